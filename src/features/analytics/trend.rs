//! Day-by-day productivity trend.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Timeframe;
use crate::model::{DayStore, TodoItem};

/// One day's combined habit/todo activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: NaiveDate,
    /// Rounded percentage of the day's habits completed; 0 for days that
    /// tracked nothing.
    pub habit_completion_rate: u32,
    /// Todos created on this calendar day.
    pub todos_created: usize,
    /// Todos completed on this calendar day.
    pub todos_completed: usize,
}

/// Per-day trend over the tracked days in `timeframe`, ascending.
///
/// [`Timeframe::All`] reports the trailing year — beyond that the chart
/// stops being readable.
#[must_use]
pub fn get_productivity_trend(
    days: &DayStore,
    todos: &[TodoItem],
    timeframe: Timeframe,
    today: NaiveDate,
) -> Vec<TrendPoint> {
    let cutoff = timeframe
        .cutoff(today)
        .or_else(|| today.checked_sub_months(chrono::Months::new(12)));

    days.iter()
        .filter(|(date, _)| cutoff.map_or(true, |c| **date >= c))
        .map(|(date, record)| {
            let habit_completion_rate = record
                .completion_rate()
                .map_or(0, |rate| (rate * 100.0).round() as u32);

            let todos_created = todos
                .iter()
                .filter(|t| t.created_at.date_naive() == *date)
                .count();
            let todos_completed = todos
                .iter()
                .filter(|t| t.completed_at.is_some_and(|at| at.date_naive() == *date))
                .count();

            TrendPoint {
                date: *date,
                habit_completion_rate,
                todos_created,
                todos_completed,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::model::{DayRecord, HabitEntry, HabitTemplate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(id: &str, completed: bool) -> HabitEntry {
        let mut e = HabitEntry::from_template(&HabitTemplate::new(id, id));
        e.completed = completed;
        e
    }

    #[test]
    fn test_trend_counts_day_matched_todos() {
        let today = date(2024, 3, 10);
        let mut days = DayStore::new();
        days.insert(
            date(2024, 3, 9),
            DayRecord::new(vec![entry("a", true), entry("b", false)], None, Utc::now()),
        );

        let created = Utc.with_ymd_and_hms(2024, 3, 9, 8, 0, 0).unwrap();
        let mut todo = TodoItem::new("1", "t", created);
        todo.complete(Utc.with_ymd_and_hms(2024, 3, 9, 18, 0, 0).unwrap());

        let trend = get_productivity_trend(&days, &[todo], Timeframe::Week, today);
        assert_eq!(
            trend,
            vec![TrendPoint {
                date: date(2024, 3, 9),
                habit_completion_rate: 50,
                todos_created: 1,
                todos_completed: 1,
            }]
        );
    }

    #[test]
    fn test_trend_empty_day_rate_zero() {
        let today = date(2024, 3, 10);
        let mut days = DayStore::new();
        days.insert(date(2024, 3, 9), DayRecord::new(Vec::new(), None, Utc::now()));

        let trend = get_productivity_trend(&days, &[], Timeframe::Week, today);
        assert_eq!(trend[0].habit_completion_rate, 0);
    }
}
