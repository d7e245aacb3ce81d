//! Domain model for one staff member's daily figures, and the single place
//! where loosely shaped or legacy records become that model.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::amount::{amounts_from_value, retain_storable, scalar_from_value};

#[derive(Debug, Clone, PartialEq)]
pub struct StaffEntry {
    pub id: String,
    pub staff_name: String,
    pub agent_parcels: Vec<f64>,
    pub additional_balance_only: Vec<f64>,
    pub additional_today_wins: Vec<f64>,
    pub previous_balance: f64,
    pub mail_amount: f64,
    pub return_claims: f64,
    pub actual_closing_balance: f64,
}

impl StaffEntry {
    /// A new entry with a fresh id, zero figures and empty lists.
    pub fn new(staff_name: impl Into<String>) -> Self {
        Self {
            id: Self::generate_id(),
            staff_name: staff_name.into(),
            agent_parcels: Vec::new(),
            additional_balance_only: Vec::new(),
            additional_today_wins: Vec::new(),
            previous_balance: 0.0,
            mail_amount: 0.0,
            return_claims: 0.0,
            actual_closing_balance: 0.0,
        }
    }

    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Strip anything a stored amount list must not hold.
    pub fn sanitized(mut self) -> Self {
        self.agent_parcels = retain_storable(&self.agent_parcels);
        self.additional_balance_only = retain_storable(&self.additional_balance_only);
        self.additional_today_wins = retain_storable(&self.additional_today_wins);
        self
    }
}

/// A staff entry exactly as found in a stored document or request body.
///
/// Fields may be missing, mistyped, or carry the older names
/// `additionalScans` and `closingBalance`. Nothing reads these fields
/// except [`RawStaffEntry::normalize`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStaffEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_parcels: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_balance_only: Option<Value>,
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closing_balance: Option<Value>,
}

impl RawStaffEntry {
    /// Fill every gap and translate legacy names. Never fails.
    ///
    /// A missing id becomes a fresh uuid. Entries read as part of a claim go
    /// through [`RawDailyClaim::normalize`](super::RawDailyClaim::normalize)
    /// instead, which keeps ids stable across loads.
    pub fn normalize(self) -> StaffEntry {
        let id = self.stored_id().unwrap_or_else(StaffEntry::generate_id);
        self.normalize_as(id)
    }

    /// The usable id this record carries, if any.
    pub fn stored_id(&self) -> Option<String> {
        entry_id(self.id.as_ref())
    }

    /// Normalize under `id`, ignoring whatever id the record carries.
    pub fn normalize_as(self, id: String) -> StaffEntry {
        let additional_balance_only = prefer_current(self.additional_balance_only, self.additional_scans);
        let actual_closing_balance = prefer_current(self.actual_closing_balance, self.closing_balance);

        StaffEntry {
            id,
            staff_name: staff_name(self.staff_name.as_ref()),
            agent_parcels: amounts_from_value(self.agent_parcels.as_ref()),
            additional_balance_only: amounts_from_value(additional_balance_only.as_ref()),
            additional_today_wins: amounts_from_value(self.additional_today_wins.as_ref()),
            previous_balance: scalar_from_value(self.previous_balance.as_ref()),
            mail_amount: scalar_from_value(self.mail_amount.as_ref()),
            return_claims: scalar_from_value(self.return_claims.as_ref()),
            actual_closing_balance: scalar_from_value(actual_closing_balance.as_ref()),
        }
    }
}

impl From<&StaffEntry> for RawStaffEntry {
    fn from(entry: &StaffEntry) -> Self {
        RawStaffEntry {
            id: Some(Value::String(entry.id.clone())),
            staff_name: Some(Value::String(entry.staff_name.clone())),
            agent_parcels: Some(amount_array(&entry.agent_parcels)),
            additional_balance_only: Some(amount_array(&entry.additional_balance_only)),
            additional_scans: None,
            additional_today_wins: Some(amount_array(&entry.additional_today_wins)),
            previous_balance: Some(number(entry.previous_balance)),
            mail_amount: Some(number(entry.mail_amount)),
            return_claims: Some(number(entry.return_claims)),
            actual_closing_balance: Some(number(entry.actual_closing_balance)),
            closing_balance: None,
        }
    }
}

impl From<RawStaffEntry> for StaffEntry {
    fn from(raw: RawStaffEntry) -> Self {
        raw.normalize()
    }
}

/// The current field wins whenever it carries a value; `null` counts as absent.
fn prefer_current(current: Option<Value>, legacy: Option<Value>) -> Option<Value> {
    current.filter(|v| !v.is_null()).or(legacy)
}

fn entry_id(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn staff_name(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn number(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

fn amount_array(amounts: &[f64]) -> Value {
    Value::Array(amounts.iter().map(|a| number(*a)).collect())
}
