//! Day-level comparison of assigned-scanned wins against the target.

use crate::backend::domain::staff_calculator::{StaffCalculation, BALANCE_TOLERANCE};

/// Which advisory the day's totals call for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceVerdict {
    /// A zero target means no target has been set yet
    TargetNotSet,
    Balanced,
    Mismatch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub target_amount: f64,
    pub total_assigned_scanned: f64,
    pub difference: f64,
    pub is_balanced: bool,
    pub verdict: BalanceVerdict,
}

#[derive(Clone, Default)]
pub struct DailyAggregator;

impl DailyAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Summarise already computed per-staff figures against `target_amount`.
    pub fn summarize(&self, target_amount: f64, calculations: &[StaffCalculation]) -> DailySummary {
        let total_assigned_scanned: f64 = calculations.iter().map(|c| c.assigned_scanned).sum();
        let difference = total_assigned_scanned - target_amount;
        let is_balanced = difference.abs() < BALANCE_TOLERANCE;

        let verdict = if target_amount == 0.0 {
            BalanceVerdict::TargetNotSet
        } else if is_balanced {
            BalanceVerdict::Balanced
        } else {
            BalanceVerdict::Mismatch
        };

        DailySummary {
            target_amount,
            total_assigned_scanned,
            difference,
            is_balanced,
            verdict,
        }
    }
}
