//! Data model for tally.
//!
//! Plain serializable types for habits, day records, todos and moods.
//! These are owned by the storage layer; the computation engines in
//! `features` only ever borrow snapshots of them.

mod day;
mod habit;
mod mood;
mod todo;

pub use day::{DayRecord, DayStore};
pub use habit::{Category, HabitEntry, HabitTemplate, TimeOfDay};
pub use mood::{mood_emoji, MoodRecord, MoodStore};
pub use todo::{Priority, RecurrencePattern, TodoItem};
