//! Habit engine.
//!
//! Owns the habit list and the completion log and keeps them consistent.
//! Every operation takes "today" explicitly; the [`Tracker`](crate::Tracker)
//! supplies it from its clock.
//!
//! ## Per-habit states
//!
//! ```text
//! Fresh (streak 0, no last_done) --mark_done--> Active (streak n, last_done = today)
//! Active --mark_done next day--> Active (n + 1)
//! Active --mark_done after a gap--> Active (1)
//! Active --reset_habit--> Fresh
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::completion::CompletionLog;
use super::model::Habit;
use crate::date::week_of;
use crate::error::ValidationError;

/// Result of [`HabitEngine::toggle_on_date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Toggle {
    /// Whether the name is in the day's log after the toggle.
    pub done: bool,
    /// Whether a habit's streak or last completion changed.
    pub habit_changed: bool,
}

/// One cell of a habit's weekly row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekDay {
    pub date: NaiveDate,
    pub done: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitEngine {
    habits: Vec<Habit>,
    log: CompletionLog,
}

impl HabitEngine {
    /// Builds an engine from persisted records, repairing any records that
    /// break the streak or empty-day invariants.
    pub fn new(mut habits: Vec<Habit>, mut log: CompletionLog) -> Self {
        habits.iter_mut().for_each(Habit::normalize);
        log.normalize();
        Self { habits, log }
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn log(&self) -> &CompletionLog {
        &self.log
    }

    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// Exact (case-sensitive) name lookup, as used by the completion log.
    pub fn find_by_name(&self, name: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.name == name)
    }

    pub fn is_done_today(&self, id: &str, today: NaiveDate) -> bool {
        self.habit(id).is_some_and(|h| h.is_done_on(today))
    }

    /// Adds a habit after trimming `name`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the trimmed name is empty or matches
    /// an existing habit case-insensitively.
    pub fn add_habit(&mut self, name: &str) -> Result<&Habit, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyHabitName);
        }
        let lowered = name.to_lowercase();
        if self.habits.iter().any(|h| h.name.to_lowercase() == lowered) {
            return Err(ValidationError::DuplicateHabit(name.to_string()));
        }

        let habit = Habit::new(name.to_string());
        debug!(id = %habit.id, name = %habit.name, "habit added");
        self.habits.push(habit);
        Ok(&self.habits[self.habits.len() - 1])
    }

    /// Marks a habit done for `today`.
    ///
    /// Returns `false` (and changes nothing) for an unknown id or a habit
    /// already done today.
    pub fn mark_done(&mut self, id: &str, today: NaiveDate) -> bool {
        let Some(habit) = self.habits.iter_mut().find(|h| h.id == id) else {
            return false;
        };
        if !habit.complete_on(today) {
            return false;
        }
        debug!(id, streak = habit.streak, "habit marked done");
        self.log.mark(today, &habit.name);
        true
    }

    /// Clears streak and last completion. Past log days are history and stay.
    pub fn reset_habit(&mut self, id: &str) -> bool {
        let Some(habit) = self.habits.iter_mut().find(|h| h.id == id) else {
            return false;
        };
        habit.reset();
        debug!(id, "habit reset");
        true
    }

    /// Removes a habit and purges its name from every log day.
    pub fn delete_habit(&mut self, id: &str) -> Option<Habit> {
        let index = self.habits.iter().position(|h| h.id == id)?;
        let habit = self.habits.remove(index);
        let days = self.log.purge(&habit.name);
        debug!(id, name = %habit.name, days, "habit deleted");
        Some(habit)
    }

    /// Flips `name` in `date`'s log.
    ///
    /// When `date` is today the named habit is kept in sync: switching on
    /// completes it exactly as [`mark_done`](Self::mark_done) would, switching
    /// off clears it if its last completion was today. Other dates only edit
    /// the log and never recompute a streak.
    pub fn toggle_on_date(&mut self, name: &str, date: NaiveDate, today: NaiveDate) -> Toggle {
        let done = self.log.toggle(date, name);
        let mut habit_changed = false;

        if date == today {
            if let Some(habit) = self.habits.iter_mut().find(|h| h.name == name) {
                habit_changed = if done {
                    habit.complete_on(today)
                } else if habit.is_done_on(today) {
                    habit.reset();
                    true
                } else {
                    false
                };
            }
        }

        debug!(name, %date, done, habit_changed, "habit toggled");
        Toggle { done, habit_changed }
    }

    /// Monday-to-Sunday completion row for `name` around `date`.
    pub fn week_progress(&self, name: &str, date: NaiveDate) -> Vec<WeekDay> {
        week_of(date)
            .into_iter()
            .map(|day| WeekDay {
                date: day,
                done: self.log.contains(day, name),
            })
            .collect()
    }

    pub fn into_parts(self) -> (Vec<Habit>, CompletionLog) {
        (self.habits, self.log)
    }
}
