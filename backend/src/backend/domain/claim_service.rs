//! # Claim Service
//!
//! Loads, edits and saves the claim document of one date and builds the
//! daily view around it.
//!
//! Every write is a full overwrite of the date's document, stamped with the
//! save time. Staff may edit their own figures; the target, the roster,
//! previous balances and agent parcels need [`AccessMode::Admin`].

use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::backend::domain::carry_forward::{CarryForward, CarryForwardResolver};
use crate::backend::domain::commands::claims::{
    AddStaffMemberCommand, ClaimMutationResult, DailyViewResult, LoadClaimResult,
    RecordAmountCommand, RemoveAmountCommand, RemoveStaffMemberCommand, SaveClaimCommand,
    UpdateFiguresCommand,
};
use crate::backend::domain::daily_aggregator::DailyAggregator;
use crate::backend::domain::models::{
    parse_claim_date, AccessMode, AmountList, ClaimEditError, DailyClaim, RawDailyClaim,
};
use crate::backend::domain::staff_calculator::StaffCalculator;
use crate::backend::storage::ClaimStorage;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClaimServiceError {
    #[error("Date required")]
    DateRequired,
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Staff name required")]
    StaffNameRequired,
    #[error("Admin access required to change {0}")]
    AdminRequired(&'static str),
    #[error(transparent)]
    Edit(#[from] ClaimEditError),
    #[error("Storage unavailable: {0}")]
    Storage(String),
}

fn storage_error(e: anyhow::Error) -> ClaimServiceError {
    error!("Claim storage failed: {:#}", e);
    ClaimServiceError::Storage(format!("{:#}", e))
}

fn parse_date(date: &str) -> Result<NaiveDate, ClaimServiceError> {
    if date.trim().is_empty() {
        return Err(ClaimServiceError::DateRequired);
    }
    parse_claim_date(date).ok_or_else(|| ClaimServiceError::InvalidDate(date.to_string()))
}

fn require_admin(access: AccessMode, field: &'static str) -> Result<(), ClaimServiceError> {
    if access.is_admin() {
        Ok(())
    } else {
        warn!("Rejected staff edit of {}", field);
        Err(ClaimServiceError::AdminRequired(field))
    }
}

/// First admin-only field a staff save would change, if any.
fn first_admin_change(stored: &DailyClaim, submitted: &DailyClaim) -> Option<&'static str> {
    if stored.target_amount != submitted.target_amount {
        return Some("targetAmount");
    }
    if stored.roster_ids() != submitted.roster_ids() {
        return Some("staffEntries");
    }
    for entry in &submitted.staff_entries {
        let Some(before) = stored.entry(&entry.id) else {
            continue;
        };
        if before.previous_balance != entry.previous_balance {
            return Some("previousBalance");
        }
        if before.agent_parcels != entry.agent_parcels {
            return Some("agentParcels");
        }
    }
    None
}

#[derive(Clone)]
pub struct ClaimService {
    claim_storage: Arc<dyn ClaimStorage>,
    calculator: StaffCalculator,
    aggregator: DailyAggregator,
    carry_forward: CarryForwardResolver,
}

impl ClaimService {
    pub fn new(claim_storage: Arc<dyn ClaimStorage>) -> Self {
        Self {
            carry_forward: CarryForwardResolver::new(claim_storage.clone()),
            claim_storage,
            calculator: StaffCalculator::new(),
            aggregator: DailyAggregator::new(),
        }
    }

    async fn load_stored(&self, date: NaiveDate) -> Result<Option<DailyClaim>, ClaimServiceError> {
        let raw = self
            .claim_storage
            .load_claim(date)
            .await
            .map_err(storage_error)?;
        Ok(raw.map(|raw| raw.normalize(date)))
    }

    async fn store(&self, mut claim: DailyClaim) -> Result<DailyClaim, ClaimServiceError> {
        claim.updated_at = Some(Utc::now());
        self.claim_storage
            .save_claim(claim.date, &RawDailyClaim::from(&claim))
            .await
            .map_err(storage_error)?;
        Ok(claim)
    }

    /// Load, apply one edit, save.
    async fn edit_claim<F>(&self, date: &str, edit: F) -> Result<DailyClaim, ClaimServiceError>
    where
        F: FnOnce(&mut DailyClaim) -> Result<(), ClaimServiceError>,
    {
        let date = parse_date(date)?;
        let mut claim = self
            .load_stored(date)
            .await?
            .unwrap_or_else(|| DailyClaim::empty(date));
        edit(&mut claim)?;
        self.store(claim).await
    }

    pub async fn load_claim(&self, date: &str) -> Result<LoadClaimResult, ClaimServiceError> {
        let date = parse_date(date)?;
        let result = match self.load_stored(date).await? {
            Some(claim) => LoadClaimResult { claim, exists: true },
            None => LoadClaimResult {
                claim: DailyClaim::empty(date),
                exists: false,
            },
        };
        Ok(result)
    }

    /// Normalize the submitted document and overwrite the stored one.
    ///
    /// In staff mode the save is refused outright if it would change any
    /// admin-only field; nothing is written in that case.
    pub async fn save_claim(
        &self,
        command: SaveClaimCommand,
        access: AccessMode,
    ) -> Result<DailyClaim, ClaimServiceError> {
        let date = parse_date(&command.date)?;
        let submitted = command.claim.normalize(date);
        info!(
            "Saving claim for {} ({} staff entries, {:?})",
            date,
            submitted.staff_entries.len(),
            access
        );

        if !access.is_admin() {
            let stored = self
                .load_stored(date)
                .await?
                .unwrap_or_else(|| DailyClaim::empty(date));
            if let Some(field) = first_admin_change(&stored, &submitted) {
                warn!("Rejected staff save for {}: {} changed", date, field);
                return Err(ClaimServiceError::AdminRequired(field));
            }
        }

        self.store(submitted).await
    }

    pub async fn add_staff_member(
        &self,
        command: AddStaffMemberCommand,
        access: AccessMode,
    ) -> Result<ClaimMutationResult, ClaimServiceError> {
        require_admin(access, "staffEntries")?;
        let staff_name = command.staff_name.trim().to_string();
        if staff_name.is_empty() {
            return Err(ClaimServiceError::StaffNameRequired);
        }

        let claim = self
            .edit_claim(&command.date, |claim| {
                claim.add_staff_entry(staff_name.clone());
                Ok(())
            })
            .await?;

        info!("Added staff member '{}' on {}", staff_name, claim.date);
        Ok(ClaimMutationResult {
            claim,
            success_message: format!("Added {}", staff_name),
        })
    }

    pub async fn remove_staff_member(
        &self,
        command: RemoveStaffMemberCommand,
        access: AccessMode,
    ) -> Result<ClaimMutationResult, ClaimServiceError> {
        require_admin(access, "staffEntries")?;

        let mut removed_name = String::new();
        let claim = self
            .edit_claim(&command.date, |claim| {
                removed_name = claim.remove_staff_entry(&command.entry_id)?.staff_name;
                Ok(())
            })
            .await?;

        info!("Removed staff member '{}' on {}", removed_name, claim.date);
        Ok(ClaimMutationResult {
            claim,
            success_message: format!("Removed {}", removed_name),
        })
    }

    pub async fn record_amount(
        &self,
        command: RecordAmountCommand,
        access: AccessMode,
    ) -> Result<ClaimMutationResult, ClaimServiceError> {
        check_list_access(command.list, access)?;

        let mut recorded = 0.0;
        let claim = self
            .edit_claim(&command.date, |claim| {
                recorded = claim.record_amount(&command.entry_id, command.list, &command.amount)?;
                Ok(())
            })
            .await?;

        Ok(ClaimMutationResult {
            claim,
            success_message: format!("Recorded {:.2} in {}", recorded, command.list.field_name()),
        })
    }

    pub async fn remove_amount(
        &self,
        command: RemoveAmountCommand,
        access: AccessMode,
    ) -> Result<ClaimMutationResult, ClaimServiceError> {
        check_list_access(command.list, access)?;

        let mut removed = 0.0;
        let claim = self
            .edit_claim(&command.date, |claim| {
                removed = claim.remove_amount(&command.entry_id, command.list, command.index)?;
                Ok(())
            })
            .await?;

        Ok(ClaimMutationResult {
            claim,
            success_message: format!("Removed {:.2} from {}", removed, command.list.field_name()),
        })
    }

    pub async fn update_figures(
        &self,
        command: UpdateFiguresCommand,
        access: AccessMode,
    ) -> Result<ClaimMutationResult, ClaimServiceError> {
        if command.figures.touches_admin_fields() {
            require_admin(access, "previousBalance")?;
        }

        let claim = self
            .edit_claim(&command.date, |claim| {
                claim.set_figures(&command.entry_id, &command.figures)?;
                Ok(())
            })
            .await?;

        Ok(ClaimMutationResult {
            claim,
            success_message: "Figures updated".to_string(),
        })
    }

    /// Prior-day wins for `date`. Never fails.
    pub async fn carry_forward(&self, date: &str) -> CarryForward {
        self.carry_forward.resolve(date).await
    }

    pub async fn daily_view(&self, date: &str) -> Result<DailyViewResult, ClaimServiceError> {
        let LoadClaimResult { claim, exists } = self.load_claim(date).await?;

        let calculations = self.calculator.calculate_all(&claim.staff_entries);
        let summary = self.aggregator.summarize(claim.target_amount, &calculations);
        let carry_forward = self.carry_forward.resolve(date).await;

        Ok(DailyViewResult {
            claim,
            exists,
            calculations,
            summary,
            carry_forward,
        })
    }
}

fn check_list_access(list: AmountList, access: AccessMode) -> Result<(), ClaimServiceError> {
    if list.is_admin_only() {
        require_admin(access, list.field_name())
    } else {
        Ok(())
    }
}
