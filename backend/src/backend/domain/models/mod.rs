//! Domain models of the claim tracker.

pub mod access_mode;
pub mod amount;
pub mod daily_claim;
pub mod staff_entry;

pub use access_mode::AccessMode;
pub use amount::{parse_draft_amount, AmountInputError};
pub use daily_claim::{
    format_claim_date, parse_claim_date, AmountList, ClaimEditError, DailyClaim, FigureUpdate,
    RawDailyClaim,
};
pub use staff_entry::{RawStaffEntry, StaffEntry};
