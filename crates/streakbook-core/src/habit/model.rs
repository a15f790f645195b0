use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::date::day_difference;

/// A tracked habit.
///
/// `streak` counts consecutive completed days ending at `last_done`; it is
/// zero exactly when `last_done` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub(crate) id: String,
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) streak: u32,
    #[serde(default)]
    pub(crate) last_done: Option<NaiveDate>,
}

impl Habit {
    /// Fresh habit with a new v4 id. `name` must already be validated.
    pub(crate) fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            streak: 0,
            last_done: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn last_done(&self) -> Option<NaiveDate> {
        self.last_done
    }

    pub fn is_done_on(&self, day: NaiveDate) -> bool {
        self.last_done == Some(day)
    }

    /// Records a completion on `day`.
    ///
    /// Returns `false` without touching anything if `day` is already the last
    /// completion. A gap of exactly one day extends the streak; anything else
    /// starts over at 1.
    pub(crate) fn complete_on(&mut self, day: NaiveDate) -> bool {
        self.streak = match self.last_done {
            Some(prev) if prev == day => return false,
            Some(prev) if day_difference(day, prev) == 1 => self.streak.saturating_add(1),
            _ => 1,
        };
        self.last_done = Some(day);
        true
    }

    pub(crate) fn reset(&mut self) {
        self.streak = 0;
        self.last_done = None;
    }

    /// Restores `streak == 0 <=> last_done == None` on records read from disk.
    pub(crate) fn normalize(&mut self) {
        if self.last_done.is_none() || self.streak == 0 {
            self.reset();
        }
    }
}
