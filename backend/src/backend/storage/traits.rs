//! # Storage Traits
//!
//! Abstractions the domain layer persists through, so the YAML and SQLite
//! backends can be swapped without touching the services.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::backend::domain::models::RawDailyClaim;

/// One claim document per calendar date.
///
/// Documents are handed back exactly as stored; normalizing them is the
/// domain's job.
#[async_trait]
pub trait ClaimStorage: Send + Sync {
    /// Load the document saved for `date`, or `None` if the date was never saved
    async fn load_claim(&self, date: NaiveDate) -> Result<Option<RawDailyClaim>>;

    /// Replace whatever is stored for `date` with `claim`
    async fn save_claim(&self, date: NaiveDate, claim: &RawDailyClaim) -> Result<()>;
}

/// The single global admin secret, kept as a password hash.
#[async_trait]
pub trait AdminSecretStorage: Send + Sync {
    async fn get_admin_secret_hash(&self) -> Result<Option<String>>;

    async fn set_admin_secret_hash(&self, secret_hash: &str) -> Result<()>;
}
