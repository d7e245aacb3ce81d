//! # Carry-Forward
//!
//! Wins logged under "today's wins" belong to the next day's opening balance.
//! For a selected date this module looks at the day before and totals those
//! wins per staff name.
//!
//! Staff names are not unique. Entries sharing a name are merged by summing
//! their totals; the daily sheet has always behaved this way.
//!
//! Looking up the prior day never fails for the caller: a missing,
//! unreadable or malformed record yields an empty mapping.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::backend::domain::models::amount::sum;
use crate::backend::domain::models::{parse_claim_date, DailyClaim};
use crate::backend::storage::ClaimStorage;

/// Carried-forward wins for one selected date.
#[derive(Debug, Clone, PartialEq)]
pub struct CarryForward {
    /// The selected date as given
    pub date: String,
    /// The day consulted, `None` when the selected date did not parse
    pub source_date: Option<NaiveDate>,
    pub totals: BTreeMap<String, f64>,
}

impl CarryForward {
    fn empty(date: &str, source_date: Option<NaiveDate>) -> Self {
        Self {
            date: date.to_string(),
            source_date,
            totals: BTreeMap::new(),
        }
    }
}

/// The calendar day before `date`.
pub fn previous_calendar_day(date: NaiveDate) -> Option<NaiveDate> {
    date.pred_opt()
}

/// Sum `additional_today_wins` per distinct non-empty staff name.
///
/// Names that total zero are left out.
pub fn carry_forward_totals(claim: &DailyClaim) -> BTreeMap<String, f64> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for entry in &claim.staff_entries {
        if entry.staff_name.trim().is_empty() {
            continue;
        }
        *totals.entry(entry.staff_name.clone()).or_insert(0.0) += sum(&entry.additional_today_wins);
    }
    totals.retain(|_, total| *total > 0.0);
    totals
}

#[derive(Clone)]
pub struct CarryForwardResolver {
    claim_storage: Arc<dyn ClaimStorage>,
}

impl CarryForwardResolver {
    pub fn new(claim_storage: Arc<dyn ClaimStorage>) -> Self {
        Self { claim_storage }
    }

    /// Resolve the carry-forward for `date` (`YYYY-MM-DD`).
    pub async fn resolve(&self, date: &str) -> CarryForward {
        let Some(selected) = parse_claim_date(date) else {
            debug!("Carry-forward skipped, '{}' is not a date", date);
            return CarryForward::empty(date, None);
        };
        let Some(source) = previous_calendar_day(selected) else {
            return CarryForward::empty(date, None);
        };

        let totals = match self.claim_storage.load_claim(source).await {
            Ok(Some(raw)) => carry_forward_totals(&raw.normalize(source)),
            Ok(None) => {
                debug!("No claim saved for {}, nothing carried forward", source);
                BTreeMap::new()
            }
            Err(e) => {
                warn!("Could not load claim for {} while resolving carry-forward: {}", source, e);
                BTreeMap::new()
            }
        };

        CarryForward {
            date: date.to_string(),
            source_date: Some(source),
            totals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::{RawDailyClaim, StaffEntry};
    use crate::backend::storage::yaml::test_utils::TestEnvironment;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use serde_json::json;

    struct FailingStorage;

    #[async_trait]
    impl ClaimStorage for FailingStorage {
        async fn load_claim(&self, _date: NaiveDate) -> anyhow::Result<Option<RawDailyClaim>> {
            Err(anyhow!("disk on fire"))
        }

        async fn save_claim(&self, _date: NaiveDate, _claim: &RawDailyClaim) -> anyhow::Result<()> {
            Err(anyhow!("disk on fire"))
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(name: &str, wins: &[f64]) -> StaffEntry {
        let mut entry = StaffEntry::new(name);
        entry.additional_today_wins = wins.to_vec();
        entry
    }

    #[test]
    fn test_previous_calendar_day_crosses_boundaries() {
        assert_eq!(previous_calendar_day(ymd(2025, 3, 14)), Some(ymd(2025, 3, 13)));
        assert_eq!(previous_calendar_day(ymd(2024, 3, 1)), Some(ymd(2024, 2, 29)));
        assert_eq!(previous_calendar_day(ymd(2023, 3, 1)), Some(ymd(2023, 2, 28)));
        assert_eq!(previous_calendar_day(ymd(2025, 1, 1)), Some(ymd(2024, 12, 31)));
    }

    #[test]
    fn test_duplicate_names_are_merged() {
        let mut claim = DailyClaim::empty(ymd(2025, 3, 13));
        claim.staff_entries = vec![entry("Bob", &[15.0]), entry("Bob", &[10.0, 15.0])];

        let totals = carry_forward_totals(&claim);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals["Bob"], 40.0);
    }

    #[test]
    fn test_empty_names_and_zero_totals_are_omitted() {
        let mut claim = DailyClaim::empty(ymd(2025, 3, 13));
        claim.staff_entries = vec![
            entry("", &[5.0]),
            entry("   ", &[5.0]),
            entry("Carol", &[]),
            entry("Dan", &[7.5]),
        ];

        let totals = carry_forward_totals(&claim);
        assert_eq!(totals.into_iter().collect::<Vec<_>>(), vec![("Dan".to_string(), 7.5)]);
    }

    #[tokio::test]
    async fn test_resolve_reads_prior_day() {
        let env = TestEnvironment::new().await.unwrap();
        let storage = env.claim_repository();

        let prior = RawDailyClaim::from(&{
            let mut claim = DailyClaim::empty(ymd(2024, 2, 29));
            claim.staff_entries = vec![entry("Bob", &[15.0]), entry("Bob", &[25.0])];
            claim
        });
        storage.save_claim(ymd(2024, 2, 29), &prior).await.unwrap();

        let resolver = CarryForwardResolver::new(storage);
        let carry = resolver.resolve("2024-03-01").await;

        assert_eq!(carry.source_date, Some(ymd(2024, 2, 29)));
        assert_eq!(carry.totals.get("Bob"), Some(&40.0));
    }

    #[tokio::test]
    async fn test_resolve_without_prior_record_is_empty() {
        let env = TestEnvironment::new().await.unwrap();
        let resolver = CarryForwardResolver::new(env.claim_repository());

        let carry = resolver.resolve("2025-03-14").await;
        assert_eq!(carry.source_date, Some(ymd(2025, 3, 13)));
        assert!(carry.totals.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_tolerates_legacy_and_malformed_prior_record() {
        let env = TestEnvironment::new().await.unwrap();
        let storage = env.claim_repository();

        let legacy: RawDailyClaim = serde_json::from_value(json!({
            "totalAgentClaim": 50,
            "staffEntries": [ "junk", { "staffName": "Bob", "additionalTodayWins": [5, "x", -2] } ]
        }))
        .unwrap();
        storage.save_claim(ymd(2025, 3, 13), &legacy).await.unwrap();

        let carry = CarryForwardResolver::new(storage).resolve("2025-03-14").await;
        assert_eq!(carry.totals.get("Bob"), Some(&5.0));
    }

    #[tokio::test]
    async fn test_resolve_soft_fails() {
        let resolver = CarryForwardResolver::new(Arc::new(FailingStorage));

        let failed = resolver.resolve("2025-03-14").await;
        assert_eq!(failed.source_date, Some(ymd(2025, 3, 13)));
        assert!(failed.totals.is_empty());

        let unparsed = resolver.resolve("not-a-date").await;
        assert_eq!(unparsed.source_date, None);
        assert!(unparsed.totals.is_empty());
        assert_eq!(unparsed.date, "not-a-date");
    }
}
