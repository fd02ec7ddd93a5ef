//! Habit effort scoring.
//!
//! Effort combines self-assessed difficulty with observed completion:
//! a hard habit that keeps getting missed scores high, an easy habit done
//! daily scores low. Used to drive "consider making this easier"
//! recommendations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{DayStore, HabitTemplate};

/// Default difficulty when a template carries none.
const DEFAULT_DIFFICULTY: u8 = 3;

/// Effort figures for one habit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffortStat {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    /// Self-assessed difficulty from the template, if any.
    pub difficulty: Option<u8>,
    pub completed_days: usize,
    pub total_days: usize,
    /// Completion rate in [0, 1]; 0 for zero tracked days.
    pub completion_rate: f64,
    /// `difficulty + (1 − completion_rate) * 5`, rounded and clamped to
    /// the 1..=10 scale.
    pub effort_level: u8,
}

/// Score one habit's effort from difficulty and completion rate.
#[must_use]
pub fn calculate_effort_level(difficulty: Option<u8>, completion_rate: f64) -> u8 {
    let difficulty = f64::from(difficulty.unwrap_or(DEFAULT_DIFFICULTY));
    let completion_penalty = (1.0 - completion_rate) * 5.0;

    let score = (difficulty + completion_penalty).round();
    score.clamp(1.0, 10.0) as u8
}

/// Effort stats for every habit in the store.
///
/// Difficulty comes from the habit's template; habits whose template has
/// been deleted keep `difficulty: None` and score with the default.
#[must_use]
pub fn get_difficulty_stats(days: &DayStore, templates: &[HabitTemplate]) -> Vec<EffortStat> {
    let difficulty_by_id: HashMap<&str, Option<u8>> = templates
        .iter()
        .map(|t| (t.id.as_str(), t.difficulty))
        .collect();

    let mut by_id: HashMap<String, EffortStat> = HashMap::new();

    for record in days.values() {
        for habit in &record.habits {
            let stat = by_id.entry(habit.id.clone()).or_insert_with(|| EffortStat {
                id: habit.id.clone(),
                name: habit.name.clone(),
                emoji: habit.emoji.clone(),
                difficulty: difficulty_by_id.get(habit.id.as_str()).copied().flatten(),
                completed_days: 0,
                total_days: 0,
                completion_rate: 0.0,
                effort_level: 0,
            });
            stat.total_days += 1;
            if habit.completed {
                stat.completed_days += 1;
            }
        }
    }

    let mut stats: Vec<EffortStat> = by_id
        .into_values()
        .map(|mut stat| {
            stat.completion_rate = if stat.total_days == 0 {
                0.0
            } else {
                stat.completed_days as f64 / stat.total_days as f64
            };
            stat.effort_level = calculate_effort_level(stat.difficulty, stat.completion_rate);
            stat
        })
        .collect();

    stats.sort_by(|a, b| b.effort_level.cmp(&a.effort_level).then(a.name.cmp(&b.name)));
    stats
}

/// Habits worth a recommendation: high effort (≥7) with completion under
/// half, highest effort first.
#[must_use]
pub fn high_effort_low_completion(
    days: &DayStore,
    templates: &[HabitTemplate],
) -> Vec<EffortStat> {
    get_difficulty_stats(days, templates)
        .into_iter()
        .filter(|stat| stat.effort_level >= 7 && stat.completion_rate < 0.5)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    use crate::model::{DayRecord, HabitEntry};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(id: &str, completed: bool) -> HabitEntry {
        let mut e = HabitEntry::from_template(&HabitTemplate::new(id, id));
        e.completed = completed;
        e
    }

    #[test]
    fn test_effort_extremes() {
        // Easy habit, always done
        assert_eq!(calculate_effort_level(Some(1), 1.0), 1);
        // Hard habit, never done
        assert_eq!(calculate_effort_level(Some(5), 0.0), 10);
    }

    #[test]
    fn test_effort_default_difficulty() {
        // Missing difficulty scores as medium (3), not zero
        assert_eq!(calculate_effort_level(None, 0.0), 8);
        assert_eq!(calculate_effort_level(None, 1.0), 3);
    }

    #[test]
    fn test_high_effort_low_completion_filter() {
        let templates = vec![
            HabitTemplate::new("hard", "Hard").with_difficulty(5),
            HabitTemplate::new("easy", "Easy").with_difficulty(1),
        ];

        let mut days = DayStore::new();
        for d in 1..=4 {
            days.insert(
                date(2024, 3, d),
                DayRecord::new(
                    vec![entry("hard", d == 1), entry("easy", true)],
                    None,
                    Utc::now(),
                ),
            );
        }

        let flagged = high_effort_low_completion(&days, &templates);
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].id, "hard");
        assert!(flagged[0].effort_level >= 7);
    }

    #[test]
    fn test_stats_use_template_difficulty() {
        let templates = vec![HabitTemplate::new("h", "Habit").with_difficulty(4)];
        let mut days = DayStore::new();
        days.insert(
            date(2024, 3, 1),
            DayRecord::new(vec![entry("h", true)], None, Utc::now()),
        );

        let stats = get_difficulty_stats(&days, &templates);
        assert_eq!(stats[0].difficulty, Some(4));
        assert_eq!(stats[0].effort_level, 4);
    }
}
