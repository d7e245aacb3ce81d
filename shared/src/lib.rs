//! Wire types exchanged between the claim tracker backend and its clients.
//!
//! Field names are camelCase so stored documents and API bodies keep the
//! shape the daily claim sheet has always used (`targetAmount`,
//! `staffEntries`, `agentParcels`, ...).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One staff member's figures for a date, fully normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffEntry {
    pub id: String,
    pub staff_name: String,
    /// Wins assigned to agents at the start of the period
    pub agent_parcels: Vec<f64>,
    /// Extra wins counted only for today's balance
    pub additional_balance_only: Vec<f64>,
    /// Wins logged today that open tomorrow's balance
    pub additional_today_wins: Vec<f64>,
    pub previous_balance: f64,
    pub mail_amount: f64,
    pub return_claims: f64,
    pub actual_closing_balance: f64,
}

/// The claim document for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyClaim {
    /// Calendar date (YYYY-MM-DD)
    pub date: String,
    pub target_amount: f64,
    pub staff_entries: Vec<StaffEntry>,
    /// Last save time (RFC 3339), absent for dates never saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// A staff entry as submitted by a client.
///
/// Every field is optional and loosely typed: the backend normalizes the
/// payload, dropping anything that is not a usable amount.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffEntryPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_parcels: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_balance_only: Option<Value>,
    /// Older clients send `additionalScans`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_scans: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_today_wins: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_balance: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mail_amount: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_claims: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_closing_balance: Option<Value>,
    /// Older clients send `closingBalance`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closing_balance: Option<Value>,
}

/// Full overwrite of a date's claim document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveClaimRequest {
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<Value>,
    /// Name the target was saved under before `targetAmount`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_agent_claim: Option<Value>,
    /// Items that are not objects are skipped, as in stored documents
    #[serde(default, deserialize_with = "lenient_payloads")]
    pub staff_entries: Vec<StaffEntryPayload>,
}

fn lenient_payloads<'de, D>(deserializer: D) -> Result<Vec<StaffEntryPayload>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let payloads = match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    };
    Ok(payloads)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveClaimResponse {
    pub success: bool,
    pub claim: DailyClaim,
}

/// `claim` is `None` when nothing was ever saved for the date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadClaimResponse {
    pub claim: Option<DailyClaim>,
}

/// Which of the three amount lists of a staff entry an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AmountListKind {
    AgentParcels,
    AdditionalBalanceOnly,
    AdditionalTodayWins,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddStaffMemberRequest {
    pub date: String,
    pub staff_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveStaffMemberRequest {
    pub date: String,
    pub entry_id: String,
}

/// Records one amount typed into a draft field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordAmountRequest {
    pub date: String,
    pub entry_id: String,
    pub list: AmountListKind,
    /// Raw draft text, e.g. "12.50" or "1,200"
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveAmountRequest {
    pub date: String,
    pub entry_id: String,
    pub list: AmountListKind,
    pub index: usize,
}

/// Partial update of a staff entry's scalar figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFiguresRequest {
    pub date: String,
    pub entry_id: String,
    #[serde(default)]
    pub previous_balance: Option<f64>,
    #[serde(default)]
    pub mail_amount: Option<f64>,
    #[serde(default)]
    pub return_claims: Option<f64>,
    #[serde(default)]
    pub actual_closing_balance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimMutationResponse {
    pub claim: DailyClaim,
    pub success_message: String,
}

/// Derived reconciliation figures for one staff entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffCalculation {
    pub entry_id: String,
    pub staff_name: String,
    pub agent_sum: f64,
    pub extra_sum: f64,
    pub today_sum: f64,
    pub wins_for_balance: f64,
    pub predicted_closing: f64,
    pub balance_diff: f64,
    pub assigned_scanned: f64,
    pub is_reconciled: bool,
}

/// Advisory shown for the day's totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BalanceVerdict {
    /// Target is zero: neither advisory is shown
    TargetNotSet,
    Balanced,
    Mismatch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub target_amount: f64,
    pub total_assigned_scanned: f64,
    pub difference: f64,
    pub is_balanced: bool,
    pub verdict: BalanceVerdict,
}

/// Wins logged "for tomorrow" on the previous day, per staff name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarryForwardResponse {
    pub date: String,
    /// The prior date consulted, absent when `date` did not parse
    pub source_date: Option<String>,
    pub totals: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyViewResponse {
    pub date: String,
    pub claim_exists: bool,
    pub claim: DailyClaim,
    pub calculations: Vec<StaffCalculation>,
    pub summary: DailySummary,
    pub carry_forward: CarryForwardResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminPasswordStatusResponse {
    pub has_password: bool,
}

/// Body of `POST /api/admin-password`.
///
/// `mode` is `"verify"` (uses `password`) or `"change"` (uses
/// `currentPassword` and `newPassword`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminPasswordRequest {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub current_password: Option<String>,
    #[serde(default)]
    pub new_password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyAdminPasswordResponse {
    pub valid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeAdminPasswordResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_save_request_accepts_loose_payload() {
        let body = json!({
            "date": "2025-03-14",
            "totalAgentClaim": "250",
            "staffEntries": [
                { "staffName": "Alice", "agentParcels": [5, "abc", -1] },
                {}
            ]
        });

        let request: SaveClaimRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.date.as_deref(), Some("2025-03-14"));
        assert!(request.target_amount.is_none());
        assert_eq!(request.total_agent_claim, Some(json!("250")));
        assert_eq!(request.staff_entries.len(), 2);
        assert_eq!(request.staff_entries[1], StaffEntryPayload::default());
    }

    #[test]
    fn test_save_request_skips_non_object_entries() {
        let body = json!({
            "date": "2025-03-14",
            "staffEntries": [ 7, "Alice", null, [1, 2], { "staffName": "Bob" } ]
        });

        let request: SaveClaimRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.staff_entries.len(), 1);
        assert_eq!(request.staff_entries[0].staff_name, Some(json!("Bob")));

        let request: SaveClaimRequest =
            serde_json::from_value(json!({ "date": "2025-03-14", "staffEntries": "none" })).unwrap();
        assert!(request.staff_entries.is_empty());
    }

    #[test]
    fn test_daily_claim_serializes_camel_case() {
        let claim = DailyClaim {
            date: "2025-03-14".to_string(),
            target_amount: 100.0,
            staff_entries: vec![],
            updated_at: None,
        };

        let value = serde_json::to_value(&claim).unwrap();
        assert_eq!(value["targetAmount"], json!(100.0));
        assert!(value.get("staffEntries").is_some());
        assert!(value.get("updatedAt").is_none());
    }

    #[test]
    fn test_amount_list_kind_names() {
        let kind: AmountListKind = serde_json::from_value(json!("additionalTodayWins")).unwrap();
        assert_eq!(kind, AmountListKind::AdditionalTodayWins);
        assert_eq!(
            serde_json::to_value(BalanceVerdict::TargetNotSet).unwrap(),
            json!("targetNotSet")
        );
    }
}
