//! # Admin Secret Service
//!
//! A single global admin secret gates the admin-only parts of a claim:
//! the target, the roster, previous balances and agent parcels. Only its
//! bcrypt hash is ever stored.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::backend::domain::commands::admin::ChangeAdminSecretCommand;
use crate::backend::domain::models::AccessMode;
use crate::backend::storage::AdminSecretStorage;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AdminSecretError {
    #[error("New password required")]
    NewSecretRequired,
    #[error("Current password incorrect")]
    CurrentSecretIncorrect,
    #[error("Admin password incorrect")]
    InvalidSecret,
    #[error("Failed to hash admin password: {0}")]
    Hashing(String),
    #[error("Storage unavailable: {0}")]
    Storage(String),
}

fn storage_error(e: anyhow::Error) -> AdminSecretError {
    error!("Admin secret storage failed: {:#}", e);
    AdminSecretError::Storage(format!("{:#}", e))
}

#[derive(Clone)]
pub struct AdminSecretService {
    admin_storage: Arc<dyn AdminSecretStorage>,
    hash_cost: u32,
}

impl AdminSecretService {
    pub fn new(admin_storage: Arc<dyn AdminSecretStorage>) -> Self {
        Self::with_hash_cost(admin_storage, bcrypt::DEFAULT_COST)
    }

    pub fn with_hash_cost(admin_storage: Arc<dyn AdminSecretStorage>, hash_cost: u32) -> Self {
        Self {
            admin_storage,
            hash_cost,
        }
    }

    pub async fn has_secret(&self) -> Result<bool, AdminSecretError> {
        let hash = self
            .admin_storage
            .get_admin_secret_hash()
            .await
            .map_err(storage_error)?;
        Ok(hash.is_some())
    }

    /// True only when a secret is set and `candidate` matches it.
    pub async fn verify(&self, candidate: &str) -> Result<bool, AdminSecretError> {
        if candidate.is_empty() {
            return Ok(false);
        }

        let Some(hash) = self
            .admin_storage
            .get_admin_secret_hash()
            .await
            .map_err(storage_error)?
        else {
            info!("Admin password check with no password set");
            return Ok(false);
        };

        let valid = bcrypt::verify(candidate, &hash).unwrap_or(false);
        if !valid {
            warn!("Admin password check failed");
        }
        Ok(valid)
    }

    /// Set the secret, or replace it after checking the current one.
    pub async fn change(&self, command: ChangeAdminSecretCommand) -> Result<(), AdminSecretError> {
        if command.next.is_empty() {
            return Err(AdminSecretError::NewSecretRequired);
        }

        if self.has_secret().await? {
            let current = command.current.unwrap_or_default();
            if !self.verify(&current).await? {
                return Err(AdminSecretError::CurrentSecretIncorrect);
            }
        }

        let hash = bcrypt::hash(&command.next, self.hash_cost)
            .map_err(|e| AdminSecretError::Hashing(e.to_string()))?;
        self.admin_storage
            .set_admin_secret_hash(&hash)
            .await
            .map_err(storage_error)?;

        info!("Admin password changed");
        Ok(())
    }

    /// Staff unless a candidate is supplied; a supplied candidate must match.
    pub async fn access_mode(&self, candidate: Option<&str>) -> Result<AccessMode, AdminSecretError> {
        match candidate {
            None | Some("") => Ok(AccessMode::Staff),
            Some(candidate) => {
                if self.verify(candidate).await? {
                    Ok(AccessMode::Admin)
                } else {
                    Err(AdminSecretError::InvalidSecret)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::yaml::test_utils::{TestEnvironment, TEST_HASH_COST};

    async fn setup_test() -> (AdminSecretService, TestEnvironment) {
        let env = TestEnvironment::new().await.expect("Failed to create test environment");
        let service = AdminSecretService::with_hash_cost(env.admin_repository(), TEST_HASH_COST);
        (service, env)
    }

    fn change(current: Option<&str>, next: &str) -> ChangeAdminSecretCommand {
        ChangeAdminSecretCommand {
            current: current.map(str::to_string),
            next: next.to_string(),
        }
    }

    #[tokio::test]
    async fn test_nothing_verifies_before_a_secret_is_set() {
        let (service, _env) = setup_test().await;

        assert!(!service.has_secret().await.unwrap());
        assert!(!service.verify("anything").await.unwrap());
        assert!(!service.verify("").await.unwrap());
    }

    #[tokio::test]
    async fn test_first_secret_needs_no_current() {
        let (service, _env) = setup_test().await;

        service.change(change(None, "open sesame")).await.unwrap();

        assert!(service.has_secret().await.unwrap());
        assert!(service.verify("open sesame").await.unwrap());
        assert!(!service.verify("open  sesame").await.unwrap());
        assert!(!service.verify("").await.unwrap());
    }

    #[tokio::test]
    async fn test_later_change_requires_current() {
        let (service, _env) = setup_test().await;
        service.change(change(None, "first")).await.unwrap();

        assert_eq!(
            service.change(change(None, "second")).await,
            Err(AdminSecretError::CurrentSecretIncorrect)
        );
        assert_eq!(
            service.change(change(Some("wrong"), "second")).await,
            Err(AdminSecretError::CurrentSecretIncorrect)
        );
        assert!(service.verify("first").await.unwrap());

        service.change(change(Some("first"), "second")).await.unwrap();
        assert!(service.verify("second").await.unwrap());
        assert!(!service.verify("first").await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_new_secret_is_rejected() {
        let (service, _env) = setup_test().await;

        assert_eq!(
            service.change(change(None, "")).await,
            Err(AdminSecretError::NewSecretRequired)
        );
        assert!(!service.has_secret().await.unwrap());
    }

    #[tokio::test]
    async fn test_secret_is_stored_hashed() {
        let (service, env) = setup_test().await;
        service.change(change(None, "plain text")).await.unwrap();

        let stored = env.admin_repository().get_admin_secret_hash().await.unwrap().unwrap();
        assert_ne!(stored, "plain text");
        assert!(stored.starts_with("$2"));
    }

    #[tokio::test]
    async fn test_access_mode() {
        let (service, _env) = setup_test().await;
        service.change(change(None, "boss")).await.unwrap();

        assert_eq!(service.access_mode(None).await, Ok(AccessMode::Staff));
        assert_eq!(service.access_mode(Some("")).await, Ok(AccessMode::Staff));
        assert_eq!(service.access_mode(Some("boss")).await, Ok(AccessMode::Admin));
        assert_eq!(
            service.access_mode(Some("intern")).await,
            Err(AdminSecretError::InvalidSecret)
        );
    }
}
