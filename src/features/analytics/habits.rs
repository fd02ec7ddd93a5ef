//! Per-habit completion statistics.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Timeframe;
use crate::model::DayStore;

/// Completion figures for one habit over a timeframe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitCompletionStat {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    pub completed_days: usize,
    pub total_days: usize,
    /// Rounded percentage; 0 when the habit has no tracked days.
    pub percentage: u32,
}

/// Accumulate per-habit completion stats over the days in `timeframe`,
/// sorted by percentage descending.
#[must_use]
pub fn get_habit_completion_stats(
    days: &DayStore,
    timeframe: Timeframe,
    today: NaiveDate,
) -> Vec<HabitCompletionStat> {
    let mut by_id: HashMap<String, HabitCompletionStat> = HashMap::new();

    for (date, record) in days {
        if !timeframe.contains(*date, today) {
            continue;
        }
        for habit in &record.habits {
            let stat = by_id
                .entry(habit.id.clone())
                .or_insert_with(|| HabitCompletionStat {
                    id: habit.id.clone(),
                    name: habit.name.clone(),
                    emoji: habit.emoji.clone(),
                    completed_days: 0,
                    total_days: 0,
                    percentage: 0,
                });
            stat.total_days += 1;
            if habit.completed {
                stat.completed_days += 1;
            }
        }
    }

    let mut stats: Vec<HabitCompletionStat> = by_id
        .into_values()
        .map(|mut stat| {
            stat.percentage = percentage(stat.completed_days, stat.total_days);
            stat
        })
        .collect();

    stats.sort_by(|a, b| b.percentage.cmp(&a.percentage).then(a.name.cmp(&b.name)));
    stats
}

/// Rounded completion percentage with an explicit zero-total guard.
fn percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        0
    } else {
        (completed as f64 / total as f64 * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

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
    fn test_zero_total_guard() {
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn test_stats_sorted_descending() {
        let today = date(2024, 3, 10);
        let mut days = DayStore::new();
        days.insert(
            date(2024, 3, 8),
            DayRecord::new(vec![entry("a", true), entry("b", false)], None, Utc::now()),
        );
        days.insert(
            date(2024, 3, 9),
            DayRecord::new(vec![entry("a", true), entry("b", true)], None, Utc::now()),
        );

        let stats = get_habit_completion_stats(&days, Timeframe::All, today);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].id, "a");
        assert_eq!(stats[0].percentage, 100);
        assert_eq!(stats[1].percentage, 50);
    }

    #[test]
    fn test_timeframe_excludes_old_days() {
        let today = date(2024, 3, 10);
        let mut days = DayStore::new();
        days.insert(
            date(2024, 1, 1),
            DayRecord::new(vec![entry("a", false)], None, Utc::now()),
        );
        days.insert(
            date(2024, 3, 9),
            DayRecord::new(vec![entry("a", true)], None, Utc::now()),
        );

        let stats = get_habit_completion_stats(&days, Timeframe::Week, today);
        assert_eq!(stats[0].total_days, 1);
        assert_eq!(stats[0].percentage, 100);
    }
}
