use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Expense,
    Income,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Expense => write!(f, "expense"),
            EntryKind::Income => write!(f, "income"),
        }
    }
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expense" => Ok(EntryKind::Expense),
            "income" => Ok(EntryKind::Income),
            other => Err(format!("unknown entry kind: {other}")),
        }
    }
}

/// One ledger line. Entries are never edited after creation.
///
/// Field names on disk follow the `finances` record layout:
/// `{id, type, desc, amount, dateISO}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(rename = "desc")]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "dateISO")]
    pub date: NaiveDate,
}

impl FinanceEntry {
    pub fn is_expense(&self) -> bool {
        self.kind == EntryKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == EntryKind::Income
    }
}

/// Fractional digits kept on every amount.
pub const AMOUNT_SCALE: u32 = 2;

/// Largest accepted amount, in whole units. Together with [`AMOUNT_SCALE`]
/// this keeps amounts within the 15 significant digits that survive the
/// JSON number encoding unchanged.
pub const MAX_WHOLE_AMOUNT: i64 = 1_000_000_000_000;

/// Rounds `amount` to [`AMOUNT_SCALE`] digits (half away from zero) and
/// checks the result lies in `(0, MAX_WHOLE_AMOUNT]`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidAmount`] when the rounded amount is not
/// strictly positive or exceeds the maximum.
pub fn validate_amount(amount: Decimal) -> Result<Decimal, ValidationError> {
    let rounded =
        amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if rounded <= Decimal::ZERO || rounded > Decimal::from(MAX_WHOLE_AMOUNT) {
        return Err(ValidationError::InvalidAmount(amount.to_string()));
    }
    Ok(rounded)
}

/// Parses user-typed amounts such as `"12.50"`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidAmount`] for non-numeric input or a
/// value that [`validate_amount`] rejects.
pub fn parse_amount(input: &str) -> Result<Decimal, ValidationError> {
    let amount = Decimal::from_str(input.trim())
        .map_err(|_| ValidationError::InvalidAmount(input.to_string()))?;
    validate_amount(amount).map_err(|_| ValidationError::InvalidAmount(input.to_string()))
}
