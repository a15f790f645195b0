//! Habits and their per-day completion log.

mod completion;
mod engine;
mod model;

pub use completion::CompletionLog;
pub use engine::{HabitEngine, Toggle, WeekDay};
pub use model::Habit;
