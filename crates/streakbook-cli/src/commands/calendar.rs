use chrono::NaiveDate;
use clap::Subcommand;
use streakbook_core::date::parse_day;
use streakbook_core::YearMonth;

use super::{open_tracker, print_json, CmdResult};

#[derive(Subcommand)]
pub enum CalendarAction {
    /// Habits done and money moved on one day
    Day {
        /// YYYY-MM-DD (default: today)
        #[arg(value_parser = parse_day)]
        date: Option<NaiveDate>,
    },
    /// One row per day of a month
    Month {
        /// YYYY-MM (default: current month)
        month: Option<YearMonth>,
        /// Show the month before instead
        #[arg(long, conflicts_with = "next")]
        prev: bool,
        /// Show the month after instead
        #[arg(long)]
        next: bool,
    },
}

pub fn run(action: CalendarAction) -> CmdResult {
    let (tracker, _config) = open_tracker()?;
    let today = tracker.today();

    match action {
        CalendarAction::Day { date } => {
            print_json(&tracker.day_detail(date.unwrap_or(today)))?;
        }
        CalendarAction::Month { month, prev, next } => {
            let month = month.unwrap_or_else(|| YearMonth::of(today));
            let month = match (prev, next) {
                (true, _) => month.pred(),
                (_, true) => month.succ(),
                _ => month,
            };
            print_json(&tracker.month_view(month))?;
        }
    }
    Ok(())
}
