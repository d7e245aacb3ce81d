//! Domain-level command and result types.
//!
//! Services take and return these; the REST layer maps the public DTOs of
//! the `shared` crate onto them.

pub mod claims {
    use crate::backend::domain::carry_forward::CarryForward;
    use crate::backend::domain::daily_aggregator::DailySummary;
    use crate::backend::domain::models::{AmountList, DailyClaim, FigureUpdate, RawDailyClaim};
    use crate::backend::domain::staff_calculator::StaffCalculation;

    /// A claim as loaded for a date. Unsaved dates load as an empty claim
    /// with `exists == false`.
    #[derive(Debug, Clone)]
    pub struct LoadClaimResult {
        pub claim: DailyClaim,
        pub exists: bool,
    }

    /// Full overwrite of the claim stored for `date`.
    #[derive(Debug, Clone)]
    pub struct SaveClaimCommand {
        pub date: String,
        pub claim: RawDailyClaim,
    }

    #[derive(Debug, Clone)]
    pub struct AddStaffMemberCommand {
        pub date: String,
        pub staff_name: String,
    }

    #[derive(Debug, Clone)]
    pub struct RemoveStaffMemberCommand {
        pub date: String,
        pub entry_id: String,
    }

    #[derive(Debug, Clone)]
    pub struct RecordAmountCommand {
        pub date: String,
        pub entry_id: String,
        pub list: AmountList,
        /// Draft text as typed
        pub amount: String,
    }

    #[derive(Debug, Clone)]
    pub struct RemoveAmountCommand {
        pub date: String,
        pub entry_id: String,
        pub list: AmountList,
        pub index: usize,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateFiguresCommand {
        pub date: String,
        pub entry_id: String,
        pub figures: FigureUpdate,
    }

    /// Result of any single edit: the claim as saved.
    #[derive(Debug, Clone)]
    pub struct ClaimMutationResult {
        pub claim: DailyClaim,
        pub success_message: String,
    }

    /// Everything the daily sheet shows for one date.
    #[derive(Debug, Clone)]
    pub struct DailyViewResult {
        pub claim: DailyClaim,
        pub exists: bool,
        pub calculations: Vec<StaffCalculation>,
        pub summary: DailySummary,
        pub carry_forward: CarryForward,
    }
}

pub mod admin {
    /// Set or replace the admin secret. `current` is only needed once a
    /// secret exists.
    #[derive(Debug, Clone)]
    pub struct ChangeAdminSecretCommand {
        pub current: Option<String>,
        pub next: String,
    }
}
