use chrono::NaiveDate;
use clap::Subcommand;
use serde::Serialize;
use streakbook_core::date::parse_day;
use streakbook_core::Habit;

use super::{open_tracker, print_json, CliTracker, CmdResult};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Create a habit
    Add {
        /// Habit name (unique, case-insensitive)
        name: String,
    },
    /// List habits with their streaks
    List,
    /// Mark a habit done for today
    Done {
        /// Habit id or exact name
        habit: String,
    },
    /// Reset a habit's streak
    Reset {
        /// Habit id or exact name
        habit: String,
    },
    /// Delete a habit and its completion history
    Delete {
        /// Habit id or exact name
        habit: String,
    },
    /// Flip a habit's completion on a given day
    Toggle {
        /// Exact habit name
        name: String,
        /// Day to flip (YYYY-MM-DD, default: today)
        #[arg(long, value_parser = parse_day)]
        date: Option<NaiveDate>,
    },
    /// Show this week's completion row
    Week {
        /// Exact habit name
        name: String,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HabitRow<'a> {
    #[serde(flatten)]
    habit: &'a Habit,
    done_today: bool,
}

#[derive(Serialize)]
struct ToggleResult<'a> {
    name: &'a str,
    date: NaiveDate,
    done: bool,
}

/// Accepts an id first, then an exact name.
fn resolve(tracker: &CliTracker, key: &str) -> Result<String, Box<dyn std::error::Error>> {
    let habits = tracker.habits();
    habits
        .habit(key)
        .or_else(|| habits.find_by_name(key))
        .map(|h| h.id().to_string())
        .ok_or_else(|| format!("no habit matches '{key}'").into())
}

pub fn run(action: HabitAction) -> CmdResult {
    let (mut tracker, _config) = open_tracker()?;
    let today = tracker.today();

    match action {
        HabitAction::Add { name } => {
            let habit = tracker.add_habit(&name)?;
            print_json(&habit)?;
        }
        HabitAction::List => {
            let rows: Vec<HabitRow<'_>> = tracker
                .habits()
                .habits()
                .iter()
                .map(|habit| HabitRow {
                    habit,
                    done_today: habit.is_done_on(today),
                })
                .collect();
            print_json(&rows)?;
        }
        HabitAction::Done { habit } => {
            let id = resolve(&tracker, &habit)?;
            tracker.mark_done(&id);
            print_json(&tracker.habits().habit(&id))?;
        }
        HabitAction::Reset { habit } => {
            let id = resolve(&tracker, &habit)?;
            tracker.reset_habit(&id);
            print_json(&tracker.habits().habit(&id))?;
        }
        HabitAction::Delete { habit } => {
            let id = resolve(&tracker, &habit)?;
            print_json(&tracker.delete_habit(&id))?;
        }
        HabitAction::Toggle { name, date } => {
            if tracker.habits().find_by_name(&name).is_none() {
                return Err(format!("no habit named '{name}'").into());
            }
            let date = date.unwrap_or(today);
            let done = tracker.toggle_on_date(&name, date);
            print_json(&ToggleResult {
                name: &name,
                date,
                done,
            })?;
        }
        HabitAction::Week { name } => {
            print_json(&tracker.week_progress(&name))?;
        }
    }
    Ok(())
}
