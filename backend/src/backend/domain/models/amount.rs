//! Amount input rules shared by normalization and the editing operations.
//!
//! Stored amount lists only ever hold finite values strictly greater than
//! zero. Scalars may be negative but must be finite; anything else reads
//! as zero.

use serde_json::Value;

/// Why a draft amount was rejected at the point of entry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AmountInputError {
    #[error("Please enter an amount")]
    Empty,
    #[error("'{0}' is not a valid amount")]
    NotANumber(String),
    #[error("Amount must be a finite number")]
    NotFinite,
    #[error("Amount must be greater than 0 (got {0})")]
    NotPositive(f64),
}

/// Parse the text typed into a draft amount field.
///
/// Thousands separators and inner spaces are ignored, so "1,200" and
/// "1 200" both read as 1200.
pub fn parse_draft_amount(input: &str) -> Result<f64, AmountInputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AmountInputError::Empty);
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    let amount = cleaned
        .parse::<f64>()
        .map_err(|_| AmountInputError::NotANumber(trimmed.to_string()))?;

    if !amount.is_finite() {
        return Err(AmountInputError::NotFinite);
    }
    if amount <= 0.0 {
        return Err(AmountInputError::NotPositive(amount));
    }

    Ok(amount)
}

/// Read a loosely typed value as a finite number.
///
/// Numbers are taken as-is and numeric strings are parsed; everything else
/// yields `None`.
pub fn number_from_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    number.is_finite().then_some(number)
}

/// A scalar figure: absent or unusable values read as `0`.
pub fn scalar_from_value(value: Option<&Value>) -> f64 {
    value.and_then(number_from_value).unwrap_or(0.0)
}

/// An amount list: keeps only finite values strictly greater than zero.
///
/// A value that is not an array normalizes to an empty list.
pub fn amounts_from_value(value: Option<&Value>) -> Vec<f64> {
    match value {
        Some(Value::Array(items)) => sanitize_amounts(items),
        _ => Vec::new(),
    }
}

pub fn sanitize_amounts(items: &[Value]) -> Vec<f64> {
    items
        .iter()
        .filter_map(number_from_value)
        .filter(|amount| *amount > 0.0)
        .collect()
}

/// Drop anything a stored list must not contain.
pub fn retain_storable(amounts: &[f64]) -> Vec<f64> {
    amounts
        .iter()
        .copied()
        .filter(|amount| amount.is_finite() && *amount > 0.0)
        .collect()
}

pub fn sum(amounts: &[f64]) -> f64 {
    amounts.iter().sum()
}
