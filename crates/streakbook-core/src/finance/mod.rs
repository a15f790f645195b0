//! Income/expense ledger and the monthly budget check.

mod budget;
mod engine;
mod entry;

pub use budget::{budget_status, Budget, BudgetStatus};
pub use engine::{FinanceEngine, FinanceSummary, MonthlyTotals};
pub use entry::{
    parse_amount, validate_amount, EntryKind, FinanceEntry, AMOUNT_SCALE, MAX_WHOLE_AMOUNT,
};
