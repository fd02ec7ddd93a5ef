//! Analytics over the day record store, todo list and mood history.
//!
//! Pure aggregation functions: every entry point takes snapshots plus an
//! explicit `today` and returns derived data. Missing optional values
//! (difficulty, weight, mood) are excluded from aggregates, never coerced
//! to zero.

mod effort;
mod habits;
mod mood;
mod todos;
mod trend;

pub use effort::{
    calculate_effort_level, get_difficulty_stats, high_effort_low_completion, EffortStat,
};
pub use habits::{get_habit_completion_stats, HabitCompletionStat};
pub use mood::{
    all_mood_correlations, calculate_mood_habit_correlation, top_mood_boosting_habits,
    top_mood_negative_habits, MoodCorrelation,
};
pub use todos::{
    format_time_to_completion, get_average_time_to_completion, get_todo_completion_stats,
    AverageCompletion, TodoCompletionStats,
};
pub use trend::{get_productivity_trend, TrendPoint};

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Reporting window for the aggregation functions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    /// The trailing 7 calendar days.
    Week,
    /// The trailing calendar month.
    Month,
    /// No window.
    #[default]
    All,
}

impl Timeframe {
    /// First day included in the window, or `None` for [`Timeframe::All`].
    #[must_use]
    pub fn cutoff(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Week => Some(today - Duration::days(7)),
            Self::Month => today.checked_sub_months(Months::new(1)),
            Self::All => None,
        }
    }

    /// Whether a day falls inside the window.
    #[must_use]
    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        self.cutoff(today).map_or(true, |cutoff| date >= cutoff)
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
            Self::All => write!(f, "all"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_cutoff() {
        let today = date(2024, 3, 10);
        assert_eq!(Timeframe::Week.cutoff(today), Some(date(2024, 3, 3)));
    }

    #[test]
    fn test_month_cutoff_clamps() {
        // Mar 31 minus one month clamps to Feb 29 in a leap year
        assert_eq!(
            Timeframe::Month.cutoff(date(2024, 3, 31)),
            Some(date(2024, 2, 29))
        );
    }

    #[test]
    fn test_all_contains_everything() {
        let today = date(2024, 3, 10);
        assert!(Timeframe::All.contains(date(1999, 1, 1), today));
        assert!(!Timeframe::Week.contains(date(2024, 3, 1), today));
    }
}
