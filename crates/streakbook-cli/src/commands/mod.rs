//! One module per top-level subcommand.
//!
//! Every command opens the tracker, performs a single operation and prints
//! the result as pretty JSON on stdout.

pub mod budget;
pub mod calendar;
pub mod config;
pub mod finance;
pub mod habit;

use serde::Serialize;
use streakbook_core::{Config, KvDatabase, SystemClock, Tracker};
use tracing::debug;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

pub type CliTracker = Tracker<KvDatabase, SystemClock>;

/// Opens the tracker in the data directory, with "today" taken from config.
pub fn open_tracker() -> Result<(CliTracker, Config), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = KvDatabase::open()?;
    let tracker = Tracker::open(db, config.clock());
    debug!(today = %tracker.today(), "tracker ready");
    Ok((tracker, config))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
