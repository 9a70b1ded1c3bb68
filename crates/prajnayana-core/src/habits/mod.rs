//! Habit tracking: data model, streak calculation and tracker state.

pub mod model;
pub mod streak;
pub mod tracker;

pub use model::{CompletionRecord, Habit, HabitId, HabitTrackingEntry, NewHabit, NewTrackingEntry};
pub use streak::{compute_streak, compute_streak_today, MAX_LOOKBACK_DAYS};
pub use tracker::{DayStatus, HabitTracker, ToggleAction};
