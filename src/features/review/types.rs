//! Review data types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Which period a review covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewPeriod {
    Week,
    Month,
}

impl std::fmt::Display for ReviewPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
        }
    }
}

/// What earned a highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightKind {
    BestDay,
    Streak,
    Consistency,
    Excellent,
    Improvement,
}

/// A single callout in a review.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    #[serde(rename = "type")]
    pub kind: HighlightKind,
    pub message: String,
    pub emoji: String,
}

impl Highlight {
    pub(super) fn new(kind: HighlightKind, message: String, emoji: &str) -> Self {
        Self {
            kind,
            message,
            emoji: emoji.to_string(),
        }
    }
}

/// Summary statistics for the review window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStatistics {
    pub days_tracked: usize,
    pub total_habits_completed: usize,
    pub total_habits_available: usize,
    /// Rounded percentage over all habit slots in the window.
    pub average_completion_rate: u32,
    /// Mean mood over the window; `None` when no mood was recorded.
    #[serde(default)]
    pub average_mood: Option<f64>,
    /// Todos completed in the window (monthly reviews only).
    #[serde(default)]
    pub todos_completed: Option<usize>,
}

/// Per-week completion figures inside a monthly review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekBreakdown {
    /// 1-based week number within the month window.
    pub week: usize,
    pub completion_rate: u32,
    pub days_tracked: usize,
}

/// A generated weekly or monthly review.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Assigned by the storage layer when the review is saved.
    #[serde(default)]
    pub id: Option<String>,
    pub period: ReviewPeriod,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub generated_at: DateTime<Utc>,
    pub statistics: ReviewStatistics,
    pub highlights: Vec<Highlight>,
    pub insights: Vec<String>,
    /// Sunday-bucketed weeks; empty for weekly reviews.
    #[serde(default)]
    pub weekly_breakdown: Vec<WeekBreakdown>,
}
