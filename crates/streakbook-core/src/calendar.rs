//! Read-only calendar views over habits and the ledger.
//!
//! Nothing here is cached; every view is recomputed from the engines.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::date::YearMonth;
use crate::finance::{EntryKind, FinanceEngine};
use crate::habit::HabitEngine;

/// Everything recorded on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayDetail {
    pub date: NaiveDate,
    pub habits_done: Vec<String>,
    pub expense_total: Decimal,
    pub income_total: Decimal,
}

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub habits_done: usize,
    pub expense_total: Decimal,
    pub income_total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthView {
    pub month: YearMonth,
    pub days: Vec<CalendarDay>,
}

pub fn day_detail(habits: &HabitEngine, finance: &FinanceEngine, date: NaiveDate) -> DayDetail {
    DayDetail {
        date,
        habits_done: habits.log().names_on(date),
        expense_total: finance.daily_total(EntryKind::Expense, date),
        income_total: finance.daily_total(EntryKind::Income, date),
    }
}

pub fn month_view(habits: &HabitEngine, finance: &FinanceEngine, month: YearMonth) -> MonthView {
    let days = month
        .days()
        .map(|date| CalendarDay {
            date,
            habits_done: habits.log().count_on(date),
            expense_total: finance.daily_total(EntryKind::Expense, date),
            income_total: finance.daily_total(EntryKind::Income, date),
        })
        .collect();
    MonthView { month, days }
}
