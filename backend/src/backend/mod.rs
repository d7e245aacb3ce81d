//! # Backend Module
//!
//! Orchestration layer of the claim tracker:
//! - **Domain**: the reconciliation engine and its services
//! - **Storage**: YAML or SQLite persistence behind storage traits
//! - **IO**: the REST API
//!
//! ```text
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (engine, services)
//!     ↓
//! Storage Layer (YAML files or SQLite)
//! ```

pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    Router,
};
use std::fs;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::backend::domain::{AdminSecretService, ClaimService};
use crate::backend::io::rest::{admin_apis, claim_apis};
use crate::backend::storage::sqlite::{DbConnection, SettingsRepository, SqlClaimRepository};
use crate::backend::storage::yaml::{AdminConfigRepository, ClaimRepository, YamlConnection};
use crate::backend::storage::{AdminSecretStorage, ClaimStorage};
use crate::config::{AppConfig, StorageBackend};

/// Services shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub claim_service: ClaimService,
    pub admin_secret_service: AdminSecretService,
}

/// Open the configured storage backend and build the services on top of it
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    fs::create_dir_all(&config.data_dir).with_context(|| {
        format!("Failed to create data directory {}", config.data_dir.display())
    })?;

    let (claim_storage, admin_storage): (Arc<dyn ClaimStorage>, Arc<dyn AdminSecretStorage>) =
        match config.storage {
            StorageBackend::Yaml => {
                info!("Using YAML storage in {}", config.data_dir.display());
                let connection = YamlConnection::new(&config.data_dir)?;
                (
                    Arc::new(ClaimRepository::new(connection.clone())),
                    Arc::new(AdminConfigRepository::new(connection)),
                )
            }
            StorageBackend::Sqlite => {
                info!("Using SQLite storage at {}", config.database_url);
                let db = DbConnection::new(&config.database_url).await?;
                (
                    Arc::new(SqlClaimRepository::new(db.clone())),
                    Arc::new(SettingsRepository::new(db)),
                )
            }
        };

    info!("Setting up domain services");
    Ok(AppState {
        claim_service: ClaimService::new(claim_storage),
        admin_secret_service: AdminSecretService::with_hash_cost(
            admin_storage,
            config.admin_hash_cost,
        ),
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: Option<&str>) -> Router {
    let allowed_origin = cors_origin.and_then(|origin| origin.parse::<HeaderValue>().ok());
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(claim_apis::ADMIN_PASSWORD_HEADER),
        ]);
    let cors = match allowed_origin {
        Some(origin) => cors.allow_origin(origin),
        None => cors.allow_origin(Any),
    };

    let api_routes = Router::new()
        .nest("/claims", claim_apis::router())
        .nest("/admin-password", admin_apis::router());

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
