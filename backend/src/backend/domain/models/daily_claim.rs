//! Domain model for the claim document of one calendar date, plus the
//! editing operations that keep its invariants.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};

use super::amount::{parse_draft_amount, scalar_from_value, AmountInputError};
use super::staff_entry::{RawStaffEntry, StaffEntry};

/// Dates are keyed and exchanged as `YYYY-MM-DD`.
pub const CLAIM_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_claim_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), CLAIM_DATE_FORMAT).ok()
}

pub fn format_claim_date(date: NaiveDate) -> String {
    date.format(CLAIM_DATE_FORMAT).to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyClaim {
    pub date: NaiveDate,
    pub target_amount: f64,
    pub staff_entries: Vec<StaffEntry>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// The three amount lists a staff entry carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountList {
    AgentParcels,
    AdditionalBalanceOnly,
    AdditionalTodayWins,
}

impl AmountList {
    /// Only an administrator may change the parcels assigned to agents.
    pub fn is_admin_only(self) -> bool {
        matches!(self, AmountList::AgentParcels)
    }

    pub fn field_name(self) -> &'static str {
        match self {
            AmountList::AgentParcels => "agentParcels",
            AmountList::AdditionalBalanceOnly => "additionalBalanceOnly",
            AmountList::AdditionalTodayWins => "additionalTodayWins",
        }
    }

    fn of(self, entry: &mut StaffEntry) -> &mut Vec<f64> {
        match self {
            AmountList::AgentParcels => &mut entry.agent_parcels,
            AmountList::AdditionalBalanceOnly => &mut entry.additional_balance_only,
            AmountList::AdditionalTodayWins => &mut entry.additional_today_wins,
        }
    }
}

/// Partial update of the scalar figures of one staff entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FigureUpdate {
    pub previous_balance: Option<f64>,
    pub mail_amount: Option<f64>,
    pub return_claims: Option<f64>,
    pub actual_closing_balance: Option<f64>,
}

impl FigureUpdate {
    pub fn touches_admin_fields(&self) -> bool {
        self.previous_balance.is_some()
    }

    fn first_non_finite(&self) -> Option<&'static str> {
        [
            ("previousBalance", self.previous_balance),
            ("mailAmount", self.mail_amount),
            ("returnClaims", self.return_claims),
            ("actualClosingBalance", self.actual_closing_balance),
        ]
        .into_iter()
        .find(|(_, value)| value.is_some_and(|v| !v.is_finite()))
        .map(|(name, _)| name)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClaimEditError {
    #[error("Staff entry '{0}' not found")]
    EntryNotFound(String),
    #[error("No amount at position {index} in {list} (has {len})")]
    AmountIndexOutOfRange {
        list: &'static str,
        index: usize,
        len: usize,
    },
    #[error("{0} must be a finite number")]
    InvalidFigure(&'static str),
    #[error(transparent)]
    InvalidAmount(#[from] AmountInputError),
}

impl DailyClaim {
    /// What an unsaved date reads as: no target, nobody on the roster.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            target_amount: 0.0,
            staff_entries: Vec::new(),
            updated_at: None,
        }
    }

    pub fn date_key(&self) -> String {
        format_claim_date(self.date)
    }

    pub fn entry(&self, entry_id: &str) -> Option<&StaffEntry> {
        self.staff_entries.iter().find(|e| e.id == entry_id)
    }

    fn entry_mut(&mut self, entry_id: &str) -> Result<&mut StaffEntry, ClaimEditError> {
        self.staff_entries
            .iter_mut()
            .find(|e| e.id == entry_id)
            .ok_or_else(|| ClaimEditError::EntryNotFound(entry_id.to_string()))
    }

    /// Ids of everyone on the roster.
    pub fn roster_ids(&self) -> BTreeSet<&str> {
        self.staff_entries.iter().map(|e| e.id.as_str()).collect()
    }

    pub fn add_staff_entry(&mut self, staff_name: impl Into<String>) -> &StaffEntry {
        self.staff_entries.push(StaffEntry::new(staff_name));
        &self.staff_entries[self.staff_entries.len() - 1]
    }

    pub fn remove_staff_entry(&mut self, entry_id: &str) -> Result<StaffEntry, ClaimEditError> {
        let position = self
            .staff_entries
            .iter()
            .position(|e| e.id == entry_id)
            .ok_or_else(|| ClaimEditError::EntryNotFound(entry_id.to_string()))?;
        Ok(self.staff_entries.remove(position))
    }

    /// Parse a draft amount and append it to one of the entry's lists.
    ///
    /// Rejected drafts leave the claim untouched.
    pub fn record_amount(
        &mut self,
        entry_id: &str,
        list: AmountList,
        draft: &str,
    ) -> Result<f64, ClaimEditError> {
        let amount = parse_draft_amount(draft)?;
        let entry = self.entry_mut(entry_id)?;
        list.of(entry).push(amount);
        Ok(amount)
    }

    pub fn remove_amount(
        &mut self,
        entry_id: &str,
        list: AmountList,
        index: usize,
    ) -> Result<f64, ClaimEditError> {
        let entry = self.entry_mut(entry_id)?;
        let amounts = list.of(entry);
        if index >= amounts.len() {
            return Err(ClaimEditError::AmountIndexOutOfRange {
                list: list.field_name(),
                index,
                len: amounts.len(),
            });
        }
        Ok(amounts.remove(index))
    }

    pub fn set_figures(
        &mut self,
        entry_id: &str,
        update: &FigureUpdate,
    ) -> Result<(), ClaimEditError> {
        if let Some(field) = update.first_non_finite() {
            return Err(ClaimEditError::InvalidFigure(field));
        }

        let entry = self.entry_mut(entry_id)?;
        if let Some(value) = update.previous_balance {
            entry.previous_balance = value;
        }
        if let Some(value) = update.mail_amount {
            entry.mail_amount = value;
        }
        if let Some(value) = update.return_claims {
            entry.return_claims = value;
        }
        if let Some(value) = update.actual_closing_balance {
            entry.actual_closing_balance = value;
        }
        Ok(())
    }
}

/// A claim document as stored or submitted, before normalization.
///
/// `totalAgentClaim` is the name the target was stored under before
/// `targetAmount`. Staff entries that are not mappings are skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDailyClaim {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_agent_claim: Option<Value>,
    #[serde(default, deserialize_with = "lenient_entries")]
    pub staff_entries: Vec<RawStaffEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Value>,
}

impl RawDailyClaim {
    /// Build the canonical claim for `date`, the key the record was found
    /// under.
    ///
    /// An entry with no id, or repeating an earlier one, is keyed by date
    /// and position (`2025-03-14-2`), so the same document always yields
    /// the same ids.
    pub fn normalize(self, date: NaiveDate) -> DailyClaim {
        let target = self
            .target_amount
            .filter(|v| !v.is_null())
            .or(self.total_agent_claim);

        let date_key = format_claim_date(date);
        let carried: HashSet<String> = self
            .staff_entries
            .iter()
            .filter_map(RawStaffEntry::stored_id)
            .collect();

        let mut seen = HashSet::new();
        let staff_entries = self
            .staff_entries
            .into_iter()
            .enumerate()
            .map(|(position, raw)| {
                let id = match raw.stored_id() {
                    Some(id) if !seen.contains(&id) => id,
                    _ => positional_id(&date_key, position, &carried, &seen),
                };
                seen.insert(id.clone());
                raw.normalize_as(id)
            })
            .collect();

        DailyClaim {
            date,
            target_amount: scalar_from_value(target.as_ref()),
            staff_entries,
            updated_at: self.updated_at.as_ref().and_then(parse_timestamp),
        }
    }
}

impl From<&DailyClaim> for RawDailyClaim {
    fn from(claim: &DailyClaim) -> Self {
        RawDailyClaim {
            date: Some(Value::String(claim.date_key())),
            target_amount: serde_json::Number::from_f64(claim.target_amount).map(Value::Number),
            total_agent_claim: None,
            staff_entries: claim.staff_entries.iter().map(RawStaffEntry::from).collect(),
            updated_at: claim.updated_at.map(|t| Value::String(t.to_rfc3339())),
        }
    }
}

/// `<date>-<position>`, suffixed until it clashes with no other id in the document.
fn positional_id(
    date_key: &str,
    position: usize,
    carried: &HashSet<String>,
    seen: &HashSet<String>,
) -> String {
    let base = format!("{}-{}", date_key, position + 1);
    let mut candidate = base.clone();
    let mut suffix = 1;
    while carried.contains(&candidate) || seen.contains(&candidate) {
        suffix += 1;
        candidate = format!("{}-{}", base, suffix);
    }
    candidate
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let text = value.as_str()?;
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

fn lenient_entries<'de, D>(deserializer: D) -> Result<Vec<RawStaffEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let entries = match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    };
    Ok(entries)
}
