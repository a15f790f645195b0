//! Per-day record of completed habits.
//!
//! Days reference habits by *name*, not id, so renaming a habit would orphan
//! its history. All lookups go through this type so a future id-keyed log
//! only has to change here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Mapping of day to the set of habit names completed that day.
///
/// A day is never stored with an empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionLog {
    days: BTreeMap<NaiveDate, BTreeSet<String>>,
}

impl CompletionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn contains(&self, day: NaiveDate, name: &str) -> bool {
        self.days.get(&day).is_some_and(|names| names.contains(name))
    }

    /// Names completed on `day`, sorted.
    pub fn names_on(&self, day: NaiveDate) -> Vec<String> {
        self.days
            .get(&day)
            .map(|names| names.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn count_on(&self, day: NaiveDate) -> usize {
        self.days.get(&day).map_or(0, BTreeSet::len)
    }

    /// Days that have at least one completion, oldest first.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    /// Adds `name` to `day`. Returns `true` if it was not already there.
    pub fn mark(&mut self, day: NaiveDate, name: &str) -> bool {
        self.days.entry(day).or_default().insert(name.to_string())
    }

    /// Removes `name` from `day`. Returns `true` if it was present.
    pub fn unmark(&mut self, day: NaiveDate, name: &str) -> bool {
        let Some(names) = self.days.get_mut(&day) else {
            return false;
        };
        let removed = names.remove(name);
        if names.is_empty() {
            self.days.remove(&day);
        }
        removed
    }

    /// Flips membership of `name` on `day`. Returns the new membership.
    pub fn toggle(&mut self, day: NaiveDate, name: &str) -> bool {
        if self.unmark(day, name) {
            false
        } else {
            self.mark(day, name)
        }
    }

    /// Removes `name` from every day. Returns how many days were touched.
    pub fn purge(&mut self, name: &str) -> usize {
        let mut touched = 0;
        self.days.retain(|_, names| {
            if names.remove(name) {
                touched += 1;
            }
            !names.is_empty()
        });
        touched
    }

    /// Drops empty days left behind by hand-edited or older data.
    pub(crate) fn normalize(&mut self) {
        self.days.retain(|_, names| !names.is_empty());
    }
}
