//! Habit streak computation.
//!
//! Derives current/longest streaks per habit from the day record store.

mod calculator;

pub use calculator::{all_streaks, calculate_streak, streak_history, StreakResult};
