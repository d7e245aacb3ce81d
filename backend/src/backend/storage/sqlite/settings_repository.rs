//! Key/value settings table; holds the admin secret hash.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::Row;
use tracing::info;

use super::connection::DbConnection;
use crate::backend::storage::AdminSecretStorage;

const ADMIN_SECRET_HASH_KEY: &str = "admin_secret_hash";

#[derive(Clone)]
pub struct SettingsRepository {
    db: DbConnection,
}

impl SettingsRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn put_value(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO settings (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    pub async fn get_value(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.map(|r| r.get("value")))
    }
}

#[async_trait]
impl AdminSecretStorage for SettingsRepository {
    async fn get_admin_secret_hash(&self) -> Result<Option<String>> {
        self.get_value(ADMIN_SECRET_HASH_KEY).await
    }

    async fn set_admin_secret_hash(&self, secret_hash: &str) -> Result<()> {
        self.put_value(ADMIN_SECRET_HASH_KEY, secret_hash).await?;
        info!("Admin secret hash updated");
        Ok(())
    }
}
