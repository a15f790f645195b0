//! # Streakbook Core Library
//!
//! This library provides the domain engine behind Streakbook, a personal
//! tracker for daily habits and a simple income/expense ledger. The CLI
//! binary is a thin layer over the same library: it calls one operation,
//! then reads the resulting state back and prints it.
//!
//! ## Architecture
//!
//! - **Dates**: calendar-day helpers evaluated in a fixed UTC offset
//! - **Habits**: streak bookkeeping plus a per-day completion log
//! - **Finance**: ledger entries, daily/monthly totals, budget status
//! - **Calendar**: read-only per-day and per-month views over both
//! - **Storage**: SQLite key-value records (JSON values) and TOML config
//!
//! ## Key Components
//!
//! - [`Tracker`]: owns the engines and writes every change through to a store
//! - [`HabitEngine`] / [`FinanceEngine`]: the pure state-update rules
//! - [`KvDatabase`]: default persistent store
//! - [`Config`]: application configuration management

pub mod calendar;
pub mod date;
pub mod error;
pub mod finance;
pub mod habit;
pub mod storage;
pub mod tracker;

pub use calendar::{CalendarDay, DayDetail, MonthView};
pub use date::{Clock, FixedClock, SystemClock, YearMonth};
pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use finance::{Budget, BudgetStatus, EntryKind, FinanceEngine, FinanceEntry, MonthlyTotals};
pub use habit::{CompletionLog, Habit, HabitEngine};
pub use storage::{Config, KeyValueStore, KvDatabase, MemoryStore};
pub use tracker::{Snapshot, Tracker};
