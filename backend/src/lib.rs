//! Daily lottery-claim reconciliation service.

pub mod backend;
pub mod config;
