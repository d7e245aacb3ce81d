//! # Domain Module
//!
//! The reconciliation engine of the claim tracker and the services that
//! drive it.
//!
//! ## Module Organization
//!
//! - **models**: claim and staff entry models, amount input rules, legacy
//!   record normalization
//! - **staff_calculator**: per-staff derived figures
//! - **daily_aggregator**: day total against the administrator's target
//! - **carry_forward**: prior-day "today's wins" per staff name
//! - **claim_service**: load, save, edit and the daily view
//! - **admin_secret_service**: the shared admin secret
//!
//! The engine itself is synchronous and pure; only the services touch
//! storage.

pub mod admin_secret_service;
pub mod carry_forward;
pub mod claim_service;
pub mod commands;
pub mod daily_aggregator;
pub mod models;
pub mod staff_calculator;

pub use admin_secret_service::{AdminSecretError, AdminSecretService};
pub use carry_forward::{CarryForward, CarryForwardResolver};
pub use claim_service::{ClaimService, ClaimServiceError};
pub use daily_aggregator::{BalanceVerdict, DailyAggregator, DailySummary};
pub use staff_calculator::{StaffCalculation, StaffCalculator, BALANCE_TOLERANCE};
