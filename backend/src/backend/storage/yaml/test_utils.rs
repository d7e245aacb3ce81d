//! RAII test environment for the YAML store. The temporary data directory
//! is removed when the environment is dropped, even if the test panics.

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use super::admin_config_repository::AdminConfigRepository;
use super::claim_repository::ClaimRepository;
use super::connection::YamlConnection;
use crate::backend::domain::{AdminSecretService, ClaimService};
use crate::backend::storage::{AdminSecretStorage, ClaimStorage};
use crate::backend::AppState;

/// Cheapest bcrypt cost, keeps hashing fast in tests
pub const TEST_HASH_COST: u32 = 4;

pub struct TestEnvironment {
    _temp_dir: TempDir,
    pub connection: YamlConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = YamlConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    pub fn claim_repository(&self) -> Arc<dyn ClaimStorage> {
        Arc::new(ClaimRepository::new(self.connection.clone()))
    }

    pub fn admin_repository(&self) -> Arc<dyn AdminSecretStorage> {
        Arc::new(AdminConfigRepository::new(self.connection.clone()))
    }

    /// Application state backed by this environment's data directory
    pub fn app_state(&self) -> AppState {
        AppState {
            claim_service: ClaimService::new(self.claim_repository()),
            admin_secret_service: AdminSecretService::with_hash_cost(
                self.admin_repository(),
                TEST_HASH_COST,
            ),
        }
    }

    /// Drop a hand-written document into `claims/<date>.yaml`
    pub fn write_claim_file(&self, date: &str, contents: &str) -> Result<()> {
        let dir = self.connection.ensure_claims_directory()?;
        fs::write(dir.join(format!("{date}.yaml")), contents)?;
        Ok(())
    }
}
