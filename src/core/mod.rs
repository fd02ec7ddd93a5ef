//! Core abstractions shared across features.

mod dates;
mod merge;

pub use dates::{month_start, parse_natural_date, recent_days, week_start};
pub use merge::merge_day_habits;
