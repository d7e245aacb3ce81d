//! SQL claim repository: one row per date in `daily_claims`, the claim
//! document kept as JSON text.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::Row;
use tracing::{debug, info};

use super::connection::DbConnection;
use crate::backend::domain::models::{format_claim_date, RawDailyClaim};
use crate::backend::storage::ClaimStorage;

#[derive(Clone)]
pub struct SqlClaimRepository {
    db: DbConnection,
}

impl SqlClaimRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ClaimStorage for SqlClaimRepository {
    async fn load_claim(&self, date: NaiveDate) -> Result<Option<RawDailyClaim>> {
        let key = format_claim_date(date);
        let row = sqlx::query("SELECT document FROM daily_claims WHERE date = ?")
            .bind(&key)
            .fetch_optional(self.db.pool())
            .await?;

        match row {
            Some(r) => {
                let document: String = r.get("document");
                let claim = serde_json::from_str(&document)
                    .with_context(|| format!("Stored claim for {} is not valid", key))?;
                debug!("Loaded claim for {} from database", key);
                Ok(Some(claim))
            }
            None => Ok(None),
        }
    }

    async fn save_claim(&self, date: NaiveDate, claim: &RawDailyClaim) -> Result<()> {
        let key = format_claim_date(date);
        let document = serde_json::to_string(claim)?;

        sqlx::query(
            "INSERT OR REPLACE INTO daily_claims (date, document, updated_at) VALUES (?, ?, ?)",
        )
        .bind(&key)
        .bind(&document)
        .bind(Utc::now().to_rfc3339())
        .execute(self.db.pool())
        .await?;

        info!(
            "Saved claim for {} ({} staff entries)",
            key,
            claim.staff_entries.len()
        );
        Ok(())
    }
}
