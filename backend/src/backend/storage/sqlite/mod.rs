//! # SQLite Storage
//!
//! sqlx-backed alternative to the YAML store: claim documents as JSON rows
//! in `daily_claims`, the admin secret hash in `settings`.

pub mod claim_repository;
pub mod connection;
pub mod settings_repository;

pub use claim_repository::SqlClaimRepository;
pub use connection::DbConnection;
pub use settings_repository::SettingsRepository;
