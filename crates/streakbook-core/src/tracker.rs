//! The tracker: engines, budget, clock and store in one owned value.
//!
//! A front end constructs one [`Tracker`], calls exactly one operation per
//! user action, then reads state back to render it. Every mutating operation
//! rewrites the affected records in full before returning.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::{self, DayDetail, MonthView};
use crate::date::{month_prefix, Clock, YearMonth};
use crate::error::ValidationError;
use crate::finance::{
    budget_status, validate_amount, Budget, BudgetStatus, EntryKind, FinanceEngine, FinanceEntry,
    FinanceSummary,
};
use crate::habit::{CompletionLog, Habit, HabitEngine, WeekDay};
use crate::storage::{self, keys, KeyValueStore};

/// Everything that is persisted, one field per record key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub activities: Vec<Habit>,
    #[serde(default)]
    pub finances: Vec<FinanceEntry>,
    #[serde(default)]
    pub habit_logs: CompletionLog,
    #[serde(default)]
    pub monthly_budget: Option<Budget>,
}

impl Snapshot {
    /// Reads all four records. Each one falls back to its empty value on its
    /// own, so one corrupt record does not take the others with it.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        Self {
            activities: storage::load(store, keys::ACTIVITIES, Vec::new()),
            finances: storage::load(store, keys::FINANCES, Vec::new()),
            habit_logs: storage::load(store, keys::HABIT_LOGS, CompletionLog::default()),
            monthly_budget: storage::load(store, keys::MONTHLY_BUDGET, None::<Budget>)
                .and_then(|b| Budget::new(b.limit())),
        }
    }

    /// Writes all four records. Returns whether every write landed.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> bool {
        let activities = storage::save(store, keys::ACTIVITIES, &self.activities);
        let finances = storage::save(store, keys::FINANCES, &self.finances);
        let logs = storage::save(store, keys::HABIT_LOGS, &self.habit_logs);
        let budget = storage::save(store, keys::MONTHLY_BUDGET, &self.monthly_budget);
        activities && finances && logs && budget
    }
}

pub struct Tracker<S, C> {
    store: S,
    clock: C,
    habits: HabitEngine,
    finance: FinanceEngine,
    budget: Option<Budget>,
}

impl<S: KeyValueStore, C: Clock> Tracker<S, C> {
    /// Loads the full state from `store`. Never fails; corrupt records
    /// start out empty.
    pub fn open(store: S, clock: C) -> Self {
        let snapshot = Snapshot::load(&store);
        Self::from_snapshot(snapshot, store, clock)
    }

    /// Builds a tracker from an in-memory snapshot without reading `store`.
    pub fn from_snapshot(snapshot: Snapshot, store: S, clock: C) -> Self {
        debug!(
            habits = snapshot.activities.len(),
            entries = snapshot.finances.len(),
            "tracker opened"
        );
        Self {
            store,
            clock,
            habits: HabitEngine::new(snapshot.activities, snapshot.habit_logs),
            finance: FinanceEngine::new(snapshot.finances),
            budget: snapshot.monthly_budget,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            activities: self.habits.habits().to_vec(),
            finances: self.finance.entries().to_vec(),
            habit_logs: self.habits.log().clone(),
            monthly_budget: self.budget,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn habits(&self) -> &HabitEngine {
        &self.habits
    }

    pub fn finance(&self) -> &FinanceEngine {
        &self.finance
    }

    pub fn budget(&self) -> Option<Budget> {
        self.budget
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // Habits

    /// # Errors
    /// Returns a [`ValidationError`] for an empty or duplicate name.
    pub fn add_habit(&mut self, name: &str) -> Result<Habit, ValidationError> {
        let habit = self.habits.add_habit(name)?.clone();
        self.persist_activities();
        Ok(habit)
    }

    pub fn mark_done(&mut self, id: &str) -> bool {
        let today = self.today();
        let changed = self.habits.mark_done(id, today);
        if changed {
            self.persist_activities();
            self.persist_logs();
        }
        changed
    }

    pub fn reset_habit(&mut self, id: &str) -> bool {
        let changed = self.habits.reset_habit(id);
        if changed {
            self.persist_activities();
        }
        changed
    }

    pub fn delete_habit(&mut self, id: &str) -> Option<Habit> {
        let removed = self.habits.delete_habit(id)?;
        self.persist_activities();
        self.persist_logs();
        Some(removed)
    }

    /// Flips `name` on `date`. Returns whether it is now marked done.
    pub fn toggle_on_date(&mut self, name: &str, date: NaiveDate) -> bool {
        let today = self.today();
        let toggle = self.habits.toggle_on_date(name, date, today);
        self.persist_logs();
        if toggle.habit_changed {
            self.persist_activities();
        }
        toggle.done
    }

    /// This week's completion row for `name`.
    pub fn week_progress(&self, name: &str) -> Vec<WeekDay> {
        self.habits.week_progress(name, self.today())
    }

    // Finance

    /// # Errors
    /// Returns a [`ValidationError`] for an empty description or a
    /// non-positive amount.
    pub fn add_entry(
        &mut self,
        kind: EntryKind,
        description: &str,
        amount: Decimal,
    ) -> Result<FinanceEntry, ValidationError> {
        let today = self.today();
        let entry = self
            .finance
            .add_entry(kind, description, amount, today)?
            .clone();
        self.persist_finances();
        Ok(entry)
    }

    pub fn delete_entry(&mut self, id: &str) -> Option<FinanceEntry> {
        let removed = self.finance.delete_entry(id)?;
        self.persist_finances();
        Some(removed)
    }

    pub fn finance_summary(&self) -> FinanceSummary {
        self.finance.summary(self.today())
    }

    /// Saves a new monthly limit, rounded like any amount. Zero or negative
    /// clears it.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidAmount`] for a positive limit that
    /// rounds to zero or exceeds the amount cap. The budget is unchanged.
    pub fn set_budget(&mut self, limit: Decimal) -> Result<Option<Budget>, ValidationError> {
        self.budget = if limit <= Decimal::ZERO {
            None
        } else {
            validate_amount(limit)?;
            Budget::new(limit)
        };
        debug!(budget = ?self.budget, "budget saved");
        self.persist_budget();
        Ok(self.budget)
    }

    pub fn clear_budget(&mut self) {
        self.budget = None;
        debug!("budget cleared");
        self.persist_budget();
    }

    /// This month's expenses against the budget.
    pub fn budget_status(&self) -> BudgetStatus {
        let spent = self.finance.monthly_totals(month_prefix(self.today())).expense;
        budget_status(self.budget, spent)
    }

    // Calendar

    pub fn day_detail(&self, date: NaiveDate) -> DayDetail {
        calendar::day_detail(&self.habits, &self.finance, date)
    }

    pub fn month_view(&self, month: YearMonth) -> MonthView {
        calendar::month_view(&self.habits, &self.finance, month)
    }

    fn persist_activities(&mut self) {
        storage::save(&mut self.store, keys::ACTIVITIES, self.habits.habits());
    }

    fn persist_logs(&mut self) {
        storage::save(&mut self.store, keys::HABIT_LOGS, self.habits.log());
    }

    fn persist_finances(&mut self) {
        storage::save(&mut self.store, keys::FINANCES, self.finance.entries());
    }

    fn persist_budget(&mut self) {
        storage::save(&mut self.store, keys::MONTHLY_BUDGET, &self.budget);
    }
}
