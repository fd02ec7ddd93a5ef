//! Per-day tracking records.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::HabitEntry;

/// All tracked days, keyed by calendar day.
///
/// `NaiveDate` is the canonical day key throughout the crate: it is
/// locale-independent, ordered, and serializes as ISO 8601 (`YYYY-MM-DD`).
pub type DayStore = BTreeMap<NaiveDate, DayRecord>;

/// Everything recorded for a single calendar day.
///
/// `completed_count` and `total_count` are derived from `habits` and kept
/// in step by replacing the whole record via [`DayRecord::new`] or
/// [`DayRecord::set_habits`] whenever any habit for the day changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    pub habits: Vec<HabitEntry>,
    #[serde(default)]
    pub weight: Option<f64>,
    pub completed_count: usize,
    pub total_count: usize,
    /// Last write instant.
    pub timestamp: DateTime<Utc>,
}

impl DayRecord {
    /// Build a record from a day's habit entries, deriving the counts.
    #[must_use]
    pub fn new(habits: Vec<HabitEntry>, weight: Option<f64>, now: DateTime<Utc>) -> Self {
        let completed_count = habits.iter().filter(|h| h.completed).count();
        let total_count = habits.len();
        Self {
            habits,
            weight,
            completed_count,
            total_count,
            timestamp: now,
        }
    }

    /// Replace the habit list wholesale, re-deriving the counts.
    pub fn set_habits(&mut self, habits: Vec<HabitEntry>, now: DateTime<Utc>) {
        self.completed_count = habits.iter().filter(|h| h.completed).count();
        self.total_count = habits.len();
        self.habits = habits;
        self.timestamp = now;
    }

    /// The day's completion rate in [0, 1], or `None` when nothing was tracked.
    #[must_use]
    pub fn completion_rate(&self) -> Option<f64> {
        if self.total_count == 0 {
            None
        } else {
            Some(self.completed_count as f64 / self.total_count as f64)
        }
    }

    /// Look up this day's entry for a habit.
    #[must_use]
    pub fn habit(&self, habit_id: &str) -> Option<&HabitEntry> {
        self.habits.iter().find(|h| h.id == habit_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HabitTemplate;

    fn entry(id: &str, completed: bool) -> HabitEntry {
        let mut e = HabitEntry::from_template(&HabitTemplate::new(id, id));
        e.completed = completed;
        e
    }

    #[test]
    fn test_counts_derived() {
        let record = DayRecord::new(
            vec![entry("a", true), entry("b", false), entry("c", true)],
            None,
            Utc::now(),
        );
        assert_eq!(record.completed_count, 2);
        assert_eq!(record.total_count, 3);
    }

    #[test]
    fn test_set_habits_rederives() {
        let mut record = DayRecord::new(vec![entry("a", false)], Some(150.5), Utc::now());
        record.set_habits(vec![entry("a", true), entry("b", true)], Utc::now());
        assert_eq!(record.completed_count, 2);
        assert_eq!(record.total_count, 2);
        assert_eq!(record.weight, Some(150.5));
    }

    #[test]
    fn test_completion_rate_empty_day() {
        let record = DayRecord::new(Vec::new(), None, Utc::now());
        assert_eq!(record.completion_rate(), None);
    }
}
