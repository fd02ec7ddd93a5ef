//! Todo items, including recurring templates and their generated instances.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Priority buckets, in the order they should be worked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Now,
    #[default]
    Next,
    Later,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Now => write!(f, "now"),
            Self::Next => write!(f, "next"),
            Self::Later => write!(f, "later"),
        }
    }
}

/// How often a recurring todo repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrencePattern {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RecurrencePattern {
    /// Human label for the pattern at a given interval.
    #[must_use]
    pub fn label(&self, interval: u32) -> String {
        match (self, interval) {
            (Self::Daily, 1) => "Daily".to_string(),
            (Self::Daily, n) => format!("Every {n} days"),
            (Self::Weekly, 1) => "Weekly".to_string(),
            (Self::Weekly, n) => format!("Every {n} weeks"),
            (Self::Monthly, 1) => "Monthly".to_string(),
            (Self::Monthly, n) => format!("Every {n} months"),
            (Self::Yearly, 1) => "Yearly".to_string(),
            (Self::Yearly, n) => format!("Every {n} years"),
        }
    }
}

fn default_interval() -> u32 {
    1
}

/// A todo item.
///
/// A recurring *template* has `is_recurring = true` and spawns instances;
/// instances carry `is_recurring_instance = true` plus a back-reference to
/// the template, and never carry recurrence fields of their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub time_commitment: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Hours from creation to completion, derived when completed.
    #[serde(default)]
    pub time_to_completion: Option<f64>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub linked_goal_id: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub recurrence_pattern: Option<RecurrencePattern>,
    #[serde(default = "default_interval")]
    pub recurrence_interval: u32,
    #[serde(default)]
    pub recurrence_end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_recurring_instance: bool,
    #[serde(default)]
    pub original_recurring_id: Option<String>,
}

impl TodoItem {
    /// Create a plain, non-recurring todo.
    #[must_use]
    pub fn new(id: &str, title: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            notes: None,
            time_commitment: None,
            priority: Priority::default(),
            completed: false,
            created_at,
            completed_at: None,
            time_to_completion: None,
            due_date: None,
            linked_goal_id: None,
            is_recurring: false,
            recurrence_pattern: None,
            recurrence_interval: 1,
            recurrence_end_date: None,
            is_recurring_instance: false,
            original_recurring_id: None,
        }
    }

    /// Set the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Turn this todo into a recurring template.
    #[must_use]
    pub fn with_recurrence(mut self, pattern: RecurrencePattern, interval: u32) -> Self {
        self.is_recurring = true;
        self.recurrence_pattern = Some(pattern);
        self.recurrence_interval = interval.max(1);
        self
    }

    /// Mark completed, stamping `completed_at` and deriving
    /// `time_to_completion` in hours.
    pub fn complete(&mut self, now: DateTime<Utc>) {
        self.completed = true;
        self.completed_at = Some(now);
        let elapsed = now - self.created_at;
        self.time_to_completion = Some(elapsed.num_seconds() as f64 / 3600.0);
    }

    /// Undo completion, clearing the derived fields.
    pub fn reopen(&mut self) {
        self.completed = false;
        self.completed_at = None;
        self.time_to_completion = None;
    }

    /// Whether this todo is past its due date at day granularity.
    #[must_use]
    pub fn is_overdue(&self, today: chrono::NaiveDate) -> bool {
        !self.completed
            && self
                .due_date
                .is_some_and(|due| due.date_naive() < today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_complete_derives_hours() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let completed = Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap();

        let mut todo = TodoItem::new("1", "File taxes", created);
        todo.complete(completed);

        assert!(todo.completed);
        assert_eq!(todo.completed_at, Some(completed));
        assert_eq!(todo.time_to_completion, Some(36.0));
    }

    #[test]
    fn test_reopen_clears_completion() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut todo = TodoItem::new("1", "Water plants", created);
        todo.complete(created + chrono::Duration::hours(2));
        todo.reopen();

        assert!(!todo.completed);
        assert!(todo.completed_at.is_none());
        assert!(todo.time_to_completion.is_none());
    }

    #[test]
    fn test_recurrence_interval_floor() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let todo =
            TodoItem::new("1", "Standup", created).with_recurrence(RecurrencePattern::Daily, 0);
        assert_eq!(todo.recurrence_interval, 1);
    }

    #[test]
    fn test_overdue_day_granularity() {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let due = Utc.with_ymd_and_hms(2024, 3, 3, 23, 0, 0).unwrap();
        let todo = TodoItem::new("1", "Ship report", created).with_due_date(due);

        let due_day = chrono::NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        assert!(!todo.is_overdue(due_day));
        assert!(todo.is_overdue(due_day.succ_opt().unwrap()));
    }

    #[test]
    fn test_pattern_labels() {
        assert_eq!(RecurrencePattern::Daily.label(1), "Daily");
        assert_eq!(RecurrencePattern::Weekly.label(2), "Every 2 weeks");
        assert_eq!(RecurrencePattern::Yearly.label(1), "Yearly");
    }
}
