use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entry::validate_amount;

/// Monthly spending limit. Always a valid amount, so strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Budget(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Budget {
    /// Rounds `limit` like any other amount. Returns `None` when the result
    /// is not positive or exceeds the amount cap.
    pub fn new(limit: Decimal) -> Option<Self> {
        validate_amount(limit).ok().map(Self)
    }

    pub fn limit(&self) -> Decimal {
        self.0
    }
}

/// Current month's spending measured against the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BudgetStatus {
    Unset,
    WithinBudget { remaining: Decimal },
    Exceeded { over_by: Decimal },
}

/// Spending exactly at the limit is still within budget.
pub fn budget_status(budget: Option<Budget>, monthly_expense: Decimal) -> BudgetStatus {
    match budget {
        None => BudgetStatus::Unset,
        Some(budget) if monthly_expense > budget.limit() => BudgetStatus::Exceeded {
            over_by: monthly_expense - budget.limit(),
        },
        Some(budget) => BudgetStatus::WithinBudget {
            remaining: budget.limit() - monthly_expense,
        },
    }
}
