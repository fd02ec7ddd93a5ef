//! Weekly and monthly review generation.
//!
//! Composes streak and analytics output into a structured summary with
//! heuristic highlights.

mod generator;
mod types;

pub use generator::{generate_monthly_review, generate_weekly_review};
pub use types::{Highlight, HighlightKind, Review, ReviewPeriod, ReviewStatistics, WeekBreakdown};
