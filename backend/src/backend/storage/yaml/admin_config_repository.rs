//! # YAML Admin Config Repository
//!
//! Keeps the admin secret hash in `admin_config.yaml` at the root of the
//! data directory:
//!
//! ```yaml
//! admin_secret_hash: "$2b$12$..."
//! created_at: "2025-03-14T08:00:00+00:00"
//! updated_at: "2025-03-20T17:45:00+00:00"
//! ```

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

use super::connection::{write_atomically, YamlConnection};
use crate::backend::storage::AdminSecretStorage;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminConfig {
    /// bcrypt hash of the admin secret (None until one is set)
    #[serde(default)]
    pub admin_secret_hash: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            admin_secret_hash: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

#[derive(Clone)]
pub struct AdminConfigRepository {
    connection: YamlConnection,
}

impl AdminConfigRepository {
    pub fn new(connection: YamlConnection) -> Self {
        Self { connection }
    }

    fn admin_config_path(&self) -> PathBuf {
        self.connection.base_directory().join("admin_config.yaml")
    }

    fn load_admin_config(&self) -> Result<Option<AdminConfig>> {
        let path = self.admin_config_path();
        if !path.exists() {
            return Ok(None);
        }

        let yaml_content = fs::read_to_string(&path)?;
        let config: AdminConfig = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Admin config {} is not valid", path.display()))?;
        debug!("Loaded admin config from {}", path.display());
        Ok(Some(config))
    }

    fn save_admin_config(&self, config: &AdminConfig) -> Result<()> {
        let yaml_content = serde_yaml::to_string(config)?;
        write_atomically(&self.admin_config_path(), &yaml_content)
    }
}

#[async_trait]
impl AdminSecretStorage for AdminConfigRepository {
    async fn get_admin_secret_hash(&self) -> Result<Option<String>> {
        Ok(self
            .load_admin_config()?
            .and_then(|config| config.admin_secret_hash))
    }

    async fn set_admin_secret_hash(&self, secret_hash: &str) -> Result<()> {
        let mut config = self.load_admin_config()?.unwrap_or_default();
        config.admin_secret_hash = Some(secret_hash.to_string());
        config.updated_at = Utc::now().to_rfc3339();
        self.save_admin_config(&config)?;

        info!("Admin secret hash updated");
        Ok(())
    }
}
