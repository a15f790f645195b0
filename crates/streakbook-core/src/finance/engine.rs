use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use super::entry::{validate_amount, EntryKind, FinanceEntry};
use crate::date::{month_prefix, YearMonth};
use crate::error::ValidationError;

/// Income and expense over one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyTotals {
    pub month: YearMonth,
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

impl MonthlyTotals {
    pub fn new(month: YearMonth, income: Decimal, expense: Decimal) -> Self {
        Self {
            month,
            income,
            expense,
            net: income - expense,
        }
    }
}

/// Today's spend next to the running month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FinanceSummary {
    pub date: NaiveDate,
    pub spent_today: Decimal,
    pub month: MonthlyTotals,
}

/// Append-only ledger (entries can be deleted, never edited).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinanceEngine {
    entries: Vec<FinanceEntry>,
}

impl FinanceEngine {
    pub fn new(entries: Vec<FinanceEntry>) -> Self {
        Self { entries }
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[FinanceEntry] {
        &self.entries
    }

    pub fn entry(&self, id: &str) -> Option<&FinanceEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Records a new entry dated `today`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the trimmed description is empty or
    /// `amount` fails [`validate_amount`]. Accepted amounts are rounded to
    /// cents.
    pub fn add_entry(
        &mut self,
        kind: EntryKind,
        description: &str,
        amount: Decimal,
        today: NaiveDate,
    ) -> Result<&FinanceEntry, ValidationError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        let amount = validate_amount(amount)?;

        let entry = FinanceEntry {
            id: Uuid::new_v4().to_string(),
            kind,
            description: description.to_string(),
            amount,
            date: today,
        };
        debug!(id = %entry.id, %kind, %amount, "entry added");
        self.entries.push(entry);
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Removes an entry; unknown ids are ignored.
    pub fn delete_entry(&mut self, id: &str) -> Option<FinanceEntry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        debug!(id, "entry deleted");
        Some(self.entries.remove(index))
    }

    /// Newest day first; entries from the same day keep insertion order.
    pub fn entries_newest_first(&self) -> Vec<&FinanceEntry> {
        let mut sorted: Vec<&FinanceEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    pub fn daily_total(&self, kind: EntryKind, date: NaiveDate) -> Decimal {
        self.sum(|e| e.kind == kind && e.date == date)
    }

    pub fn daily_expense_total(&self, date: NaiveDate) -> Decimal {
        self.daily_total(EntryKind::Expense, date)
    }

    pub fn monthly_totals(&self, month: YearMonth) -> MonthlyTotals {
        let income = self.sum(|e| e.is_income() && month.contains(e.date));
        let expense = self.sum(|e| e.is_expense() && month.contains(e.date));
        MonthlyTotals::new(month, income, expense)
    }

    pub fn summary(&self, today: NaiveDate) -> FinanceSummary {
        FinanceSummary {
            date: today,
            spent_today: self.daily_expense_total(today),
            month: self.monthly_totals(month_prefix(today)),
        }
    }

    pub fn into_entries(self) -> Vec<FinanceEntry> {
        self.entries
    }

    /// Saturates at `Decimal::MAX` instead of overflowing.
    fn sum(&self, filter: impl Fn(&FinanceEntry) -> bool) -> Decimal {
        self.entries
            .iter()
            .filter(|&e| filter(e))
            .fold(Decimal::ZERO, |total, e| total.saturating_add(e.amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::parse_day;
    use crate::finance::MAX_WHOLE_AMOUNT;

    fn day(s: &str) -> NaiveDate {
        parse_day(s).unwrap()
    }

    fn dec(n: i64) -> Decimal {
        Decimal::from(n)
    }

    #[test]
    fn add_entry_validates_input() {
        let mut engine = FinanceEngine::default();
        let today = day("2025-12-01");
        assert_eq!(
            engine.add_entry(EntryKind::Expense, "  ", dec(10), today),
            Err(ValidationError::EmptyDescription)
        );
        assert!(matches!(
            engine.add_entry(EntryKind::Expense, "Tea", dec(-5), today),
            Err(ValidationError::InvalidAmount(_))
        ));
        assert!(matches!(
            engine.add_entry(EntryKind::Income, "Gift", Decimal::ZERO, today),
            Err(ValidationError::InvalidAmount(_))
        ));
        assert!(engine.entries().is_empty());
    }

    #[test]
    fn add_entry_rejects_amounts_over_cap() {
        let mut engine = FinanceEngine::default();
        let today = day("2025-12-01");
        assert!(matches!(
            engine.add_entry(EntryKind::Expense, "Big", Decimal::MAX, today),
            Err(ValidationError::InvalidAmount(_))
        ));
        engine
            .add_entry(EntryKind::Expense, "A", Decimal::from(MAX_WHOLE_AMOUNT), today)
            .unwrap();
        engine
            .add_entry(EntryKind::Expense, "B", Decimal::from(MAX_WHOLE_AMOUNT), today)
            .unwrap();
        assert_eq!(
            engine.monthly_totals(YearMonth::of(today)).expense,
            Decimal::from(2 * MAX_WHOLE_AMOUNT)
        );
    }

    #[test]
    fn totals_saturate_on_oversized_records() {
        let today = day("2025-12-01");
        let huge = |id: &str| FinanceEntry {
            id: id.into(),
            kind: EntryKind::Expense,
            description: "legacy".into(),
            amount: Decimal::MAX,
            date: today,
        };
        let engine = FinanceEngine::new(vec![huge("a"), huge("b")]);
        assert_eq!(engine.daily_expense_total(today), Decimal::MAX);
        assert_eq!(engine.summary(today).month.net, -Decimal::MAX);
    }

    #[test]
    fn add_entry_rounds_to_cents() {
        let mut engine = FinanceEngine::default();
        let entry = engine
            .add_entry(EntryKind::Expense, "Tea", Decimal::new(12345, 3), day("2025-12-01"))
            .unwrap();
        assert_eq!(entry.amount, Decimal::new(1235, 2));
    }

    #[test]
    fn add_entry_stamps_today_and_trims() {
        let mut engine = FinanceEngine::default();
        let entry = engine
            .add_entry(EntryKind::Expense, " Tea ", dec(5), day("2025-12-01"))
            .unwrap();
        assert_eq!(entry.description, "Tea");
        assert_eq!(entry.date, day("2025-12-01"));
        assert_eq!(entry.amount, dec(5));
    }

    #[test]
    fn delete_entry_ignores_unknown_ids() {
        let mut engine = FinanceEngine::default();
        let id = engine
            .add_entry(EntryKind::Expense, "Tea", dec(5), day("2025-12-01"))
            .unwrap()
            .id
            .clone();
        assert!(engine.delete_entry("missing").is_none());
        assert_eq!(engine.delete_entry(&id).unwrap().description, "Tea");
        assert!(engine.entries().is_empty());
    }

    #[test]
    fn monthly_totals_and_net() {
        let mut engine = FinanceEngine::default();
        let d = day("2025-12-10");
        engine.add_entry(EntryKind::Income, "Salary", dec(1000), d).unwrap();
        engine.add_entry(EntryKind::Expense, "Rent", dec(200), d).unwrap();
        engine.add_entry(EntryKind::Expense, "Food", dec(300), day("2025-12-31")).unwrap();
        engine.add_entry(EntryKind::Expense, "Old", dec(999), day("2025-11-30")).unwrap();

        let totals = engine.monthly_totals("2025-12".parse().unwrap());
        assert_eq!(totals.income, dec(1000));
        assert_eq!(totals.expense, dec(500));
        assert_eq!(totals.net, dec(500));
    }

    #[test]
    fn daily_totals_split_by_kind() {
        let mut engine = FinanceEngine::default();
        let d = day("2025-12-10");
        engine.add_entry(EntryKind::Expense, "Tea", Decimal::new(125, 1), d).unwrap();
        engine.add_entry(EntryKind::Expense, "Bus", Decimal::new(75, 1), d).unwrap();
        engine.add_entry(EntryKind::Income, "Refund", dec(3), d).unwrap();
        engine.add_entry(EntryKind::Expense, "Tea", dec(9), day("2025-12-11")).unwrap();

        assert_eq!(engine.daily_expense_total(d), dec(20));
        assert_eq!(engine.daily_total(EntryKind::Income, d), dec(3));
        assert_eq!(engine.daily_expense_total(day("2025-12-12")), Decimal::ZERO);
    }

    #[test]
    fn summary_combines_today_and_month() {
        let mut engine = FinanceEngine::default();
        engine.add_entry(EntryKind::Expense, "Tea", dec(5), day("2025-12-01")).unwrap();
        engine.add_entry(EntryKind::Expense, "Lunch", dec(15), day("2025-12-02")).unwrap();
        let summary = engine.summary(day("2025-12-02"));
        assert_eq!(summary.spent_today, dec(15));
        assert_eq!(summary.month.expense, dec(20));
        assert_eq!(summary.month.net, dec(-20));
    }

    #[test]
    fn listing_is_newest_first_and_stable() {
        let mut engine = FinanceEngine::default();
        engine.add_entry(EntryKind::Expense, "a", dec(1), day("2025-12-01")).unwrap();
        engine.add_entry(EntryKind::Expense, "b", dec(1), day("2025-12-03")).unwrap();
        engine.add_entry(EntryKind::Expense, "c", dec(1), day("2025-12-03")).unwrap();
        let order: Vec<&str> = engine
            .entries_newest_first()
            .into_iter()
            .map(|e| e.description.as_str())
            .collect();
        assert_eq!(order, vec!["b", "c", "a"]);
    }
}
