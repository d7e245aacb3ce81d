//! # YAML Claim Repository
//!
//! One YAML document per calendar date:
//!
//! ```text
//! data/
//! ├── admin_config.yaml
//! └── claims/
//!     ├── 2025-03-13.yaml
//!     └── 2025-03-14.yaml
//! ```
//!
//! Documents keep the camelCase shape of the claim sheet (`targetAmount`,
//! `staffEntries`, ...). Older documents may still carry legacy field names;
//! they are returned untouched and normalized by the domain.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

use super::connection::{write_atomically, YamlConnection};
use crate::backend::domain::models::{format_claim_date, RawDailyClaim};
use crate::backend::storage::ClaimStorage;

#[derive(Clone)]
pub struct ClaimRepository {
    connection: YamlConnection,
}

impl ClaimRepository {
    pub fn new(connection: YamlConnection) -> Self {
        Self { connection }
    }

    fn claim_path(&self, date: NaiveDate) -> PathBuf {
        self.connection
            .claims_directory()
            .join(format!("{}.yaml", format_claim_date(date)))
    }
}

#[async_trait]
impl ClaimStorage for ClaimRepository {
    async fn load_claim(&self, date: NaiveDate) -> Result<Option<RawDailyClaim>> {
        let path = self.claim_path(date);
        if !path.exists() {
            debug!("No claim document for {}", date);
            return Ok(None);
        }

        let yaml_content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read claim document {}", path.display()))?;
        let claim: RawDailyClaim = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Claim document {} is not valid", path.display()))?;

        debug!("Loaded claim for {} from {}", date, path.display());
        Ok(Some(claim))
    }

    async fn save_claim(&self, date: NaiveDate, claim: &RawDailyClaim) -> Result<()> {
        self.connection.ensure_claims_directory()?;
        let path = self.claim_path(date);

        let yaml_content = serde_yaml::to_string(claim)?;
        write_atomically(&path, &yaml_content)
            .with_context(|| format!("Failed to write claim document {}", path.display()))?;

        info!(
            "Saved claim for {} ({} staff entries)",
            date,
            claim.staff_entries.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::{DailyClaim, StaffEntry};
    use crate::backend::storage::yaml::test_utils::TestEnvironment;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_missing_date_loads_none() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = ClaimRepository::new(env.connection.clone());

        assert!(repo.load_claim(ymd(2025, 3, 14)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = ClaimRepository::new(env.connection.clone());

        let mut claim = DailyClaim::empty(ymd(2025, 3, 14));
        claim.target_amount = 250.0;
        let mut alice = StaffEntry::new("Alice");
        alice.agent_parcels = vec![40.0, 60.5];
        alice.actual_closing_balance = -12.25;
        claim.staff_entries.push(alice);

        repo.save_claim(claim.date, &RawDailyClaim::from(&claim)).await.unwrap();

        let path = env.base_path.join("claims").join("2025-03-14.yaml");
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());

        let loaded = repo.load_claim(claim.date).await.unwrap().unwrap();
        assert_eq!(loaded.normalize(claim.date), claim);
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = ClaimRepository::new(env.connection.clone());
        let date = ymd(2025, 3, 14);

        let mut claim = DailyClaim::empty(date);
        claim.add_staff_entry("Alice");
        claim.add_staff_entry("Bob");
        repo.save_claim(date, &RawDailyClaim::from(&claim)).await.unwrap();

        claim.staff_entries.truncate(1);
        repo.save_claim(date, &RawDailyClaim::from(&claim)).await.unwrap();

        let loaded = repo.load_claim(date).await.unwrap().unwrap().normalize(date);
        assert_eq!(loaded.staff_entries.len(), 1);
    }

    #[tokio::test]
    async fn test_legacy_document_is_returned_as_stored() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = ClaimRepository::new(env.connection.clone());
        let date = ymd(2024, 11, 2);

        env.write_claim_file(
            "2024-11-02",
            "date: '2024-11-02'\n\
             totalAgentClaim: 300\n\
             staffEntries:\n\
             - id: s1\n  staffName: Alice\n  additionalScans: [10, -1]\n  closingBalance: 225\n",
        )
        .unwrap();

        let loaded = repo.load_claim(date).await.unwrap().unwrap();
        assert!(loaded.total_agent_claim.is_some());

        let claim = loaded.normalize(date);
        assert_eq!(claim.target_amount, 300.0);
        assert_eq!(claim.staff_entries[0].additional_balance_only, vec![10.0]);
        assert_eq!(claim.staff_entries[0].actual_closing_balance, 225.0);
    }

    #[tokio::test]
    async fn test_unreadable_document_is_an_error() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = ClaimRepository::new(env.connection.clone());

        env.write_claim_file("2025-03-14", "targetAmount: [1, 2\n").unwrap();
        assert!(repo.load_claim(ymd(2025, 3, 14)).await.is_err());
    }
}
