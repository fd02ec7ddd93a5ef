//! Todo completion statistics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Timeframe;
use crate::model::TodoItem;

/// Aggregate completion figures for todos created in a timeframe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoCompletionStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Rounded percentage; 0 when no todos fall in the window.
    pub completion_rate: u32,
}

/// Average time from creation to completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageCompletion {
    pub hours: f64,
    pub days: f64,
    pub formatted: String,
    /// Completed todos the average was taken over.
    pub count: usize,
}

/// Completion stats over todos whose `created_at` falls in the timeframe.
#[must_use]
pub fn get_todo_completion_stats(
    todos: &[TodoItem],
    timeframe: Timeframe,
    today: NaiveDate,
) -> TodoCompletionStats {
    let in_window: Vec<&TodoItem> = todos
        .iter()
        .filter(|t| timeframe.contains(t.created_at.date_naive(), today))
        .collect();

    let total = in_window.len();
    let completed = in_window.iter().filter(|t| t.completed).count();

    TodoCompletionStats {
        total,
        completed,
        pending: total - completed,
        completion_rate: if total == 0 {
            0
        } else {
            (completed as f64 / total as f64 * 100.0).round() as u32
        },
    }
}

/// Average `time_to_completion` across completed todos whose completion
/// fell inside the timeframe.
///
/// Returns `None` when no completed todo qualifies — callers can tell "no
/// data" apart from a zero-hour average.
#[must_use]
pub fn get_average_time_to_completion(
    todos: &[TodoItem],
    timeframe: Timeframe,
    today: NaiveDate,
) -> Option<AverageCompletion> {
    let hours: Vec<f64> = todos
        .iter()
        .filter(|t| t.completed)
        .filter(|t| {
            t.completed_at
                .map_or(false, |at| timeframe.contains(at.date_naive(), today))
        })
        .filter_map(|t| t.time_to_completion)
        .collect();

    if hours.is_empty() {
        return None;
    }

    let average = hours.iter().sum::<f64>() / hours.len() as f64;
    Some(AverageCompletion {
        hours: average,
        days: average / 24.0,
        formatted: format_time_to_completion(average),
        count: hours.len(),
    })
}

/// Format an hour count for display: minutes under an hour, hours under a
/// day, days otherwise.
#[must_use]
pub fn format_time_to_completion(hours: f64) -> String {
    if hours < 1.0 {
        format!("{} min", (hours * 60.0).round() as i64)
    } else if hours < 24.0 {
        format!("{hours:.1} hrs")
    } else {
        format!("{:.1} days", hours / 24.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(y: i32, m: u32, d: u32, h: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_stats_counts() {
        let mut done = TodoItem::new("1", "a", at(2024, 3, 8, 9));
        done.complete(at(2024, 3, 9, 9));
        let open = TodoItem::new("2", "b", at(2024, 3, 8, 9));

        let stats = get_todo_completion_stats(&[done, open], Timeframe::Week, date(2024, 3, 10));
        assert_eq!(
            stats,
            TodoCompletionStats {
                total: 2,
                completed: 1,
                pending: 1,
                completion_rate: 50,
            }
        );
    }

    #[test]
    fn test_stats_empty_window() {
        let stats = get_todo_completion_stats(&[], Timeframe::Week, date(2024, 3, 10));
        assert_eq!(stats.completion_rate, 0);
    }

    #[test]
    fn test_average_none_without_data() {
        let open = TodoItem::new("1", "a", at(2024, 3, 8, 9));
        assert!(get_average_time_to_completion(&[open], Timeframe::All, date(2024, 3, 10)).is_none());
    }

    #[test]
    fn test_average_hours() {
        let mut fast = TodoItem::new("1", "a", at(2024, 3, 8, 9));
        fast.complete(at(2024, 3, 8, 11)); // 2h
        let mut slow = TodoItem::new("2", "b", at(2024, 3, 8, 9));
        slow.complete(at(2024, 3, 8, 15)); // 6h

        let average =
            get_average_time_to_completion(&[fast, slow], Timeframe::All, date(2024, 3, 10))
                .unwrap();
        assert!((average.hours - 4.0).abs() < f64::EPSILON);
        assert_eq!(average.count, 2);
        assert_eq!(average.formatted, "4.0 hrs");
    }

    #[test]
    fn test_format_thresholds() {
        assert_eq!(format_time_to_completion(0.5), "30 min");
        assert_eq!(format_time_to_completion(2.25), "2.2 hrs");
        assert_eq!(format_time_to_completion(36.0), "1.5 days");
    }
}
