//! Per-staff reconciliation figures.
//!
//! Everything here is a pure function of one [`StaffEntry`]. Negative results
//! are reported as they come out; a negative `assigned_scanned` points at a
//! data-entry problem and is not treated as a fault.

use crate::backend::domain::models::amount::sum;
use crate::backend::domain::models::StaffEntry;

/// Differences smaller than this count as zero.
pub const BALANCE_TOLERANCE: f64 = 0.01;

/// Derived totals for one staff entry.
#[derive(Debug, Clone, PartialEq)]
pub struct StaffCalculation {
    pub entry_id: String,
    pub staff_name: String,
    pub agent_sum: f64,
    pub extra_sum: f64,
    pub today_sum: f64,
    /// All wins attributable to this balancing period
    pub wins_for_balance: f64,
    /// Closing balance the figures say the staff member should report
    pub predicted_closing: f64,
    /// Reported closing minus predicted closing
    pub balance_diff: f64,
    /// Agent-assigned wins back-solved from the reported closing balance
    pub assigned_scanned: f64,
}

impl StaffCalculation {
    pub fn is_reconciled(&self) -> bool {
        self.balance_diff.abs() < BALANCE_TOLERANCE
    }
}

/// Stateless calculator for per-staff figures
#[derive(Clone, Default)]
pub struct StaffCalculator;

impl StaffCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn calculate(&self, entry: &StaffEntry) -> StaffCalculation {
        let agent_sum = sum(&entry.agent_parcels);
        let extra_sum = sum(&entry.additional_balance_only);
        let today_sum = sum(&entry.additional_today_wins);

        let wins_for_balance = agent_sum + extra_sum + today_sum;
        let predicted_closing =
            entry.previous_balance + wins_for_balance - entry.mail_amount - entry.return_claims;
        let balance_diff = entry.actual_closing_balance - predicted_closing;

        // Solve predicted_closing for agent_sum, taking the reported closing as truth.
        let assigned_scanned = entry.mail_amount + entry.actual_closing_balance
            - entry.previous_balance
            - entry.return_claims
            - extra_sum
            - today_sum;

        StaffCalculation {
            entry_id: entry.id.clone(),
            staff_name: entry.staff_name.clone(),
            agent_sum,
            extra_sum,
            today_sum,
            wins_for_balance,
            predicted_closing,
            balance_diff,
            assigned_scanned,
        }
    }

    pub fn calculate_all(&self, entries: &[StaffEntry]) -> Vec<StaffCalculation> {
        entries.iter().map(|entry| self.calculate(entry)).collect()
    }
}
