//! Mood–habit correlation analysis.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::model::{DayStore, MoodStore};

/// Midpoint of the 1–5 mood scale, used as the one-sided baseline.
const NEUTRAL_MOOD: f64 = 3.0;

/// How a habit's completion correlates with recorded mood.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodCorrelation {
    pub habit_id: String,
    /// Mean mood on days the habit was completed; `None` if no such day.
    pub avg_mood_with: Option<f64>,
    /// Mean mood on days it was not; `None` if no such day.
    pub avg_mood_without: Option<f64>,
    /// `avg_with − avg_without`, or `avg_with − 3` when only one side has
    /// data (3 = neutral midpoint of the scale).
    pub mood_impact: f64,
    pub days_with_habit: usize,
    pub days_without_habit: usize,
    pub total_days: usize,
}

/// Correlate one habit's completions with mood.
///
/// Only days carrying *both* a day record and a mood record participate.
/// A day where the habit was tracked-but-incomplete — or not tracked at
/// all — counts against the "without" partition. Returns `None` when no
/// mood data overlaps the day records.
#[must_use]
pub fn calculate_mood_habit_correlation(
    habit_id: &str,
    days: &DayStore,
    moods: &MoodStore,
) -> Option<MoodCorrelation> {
    let mut with_habit = Vec::new();
    let mut without_habit = Vec::new();

    for (date, record) in days {
        let Some(mood) = moods.get(date) else {
            continue;
        };

        let completed = record.habit(habit_id).is_some_and(|h| h.completed);
        if completed {
            with_habit.push(f64::from(mood.mood));
        } else {
            without_habit.push(f64::from(mood.mood));
        }
    }

    if with_habit.is_empty() && without_habit.is_empty() {
        return None;
    }

    let avg_mood_with = mean(&with_habit);
    let avg_mood_without = mean(&without_habit);

    let mood_impact = match (avg_mood_with, avg_mood_without) {
        (Some(with), Some(without)) => with - without,
        (Some(with), None) => with - NEUTRAL_MOOD,
        _ => 0.0,
    };

    Some(MoodCorrelation {
        habit_id: habit_id.to_string(),
        avg_mood_with,
        avg_mood_without,
        mood_impact,
        days_with_habit: with_habit.len(),
        days_without_habit: without_habit.len(),
        total_days: with_habit.len() + without_habit.len(),
    })
}

/// Mean of a sample, `None` when empty — never zero for "no data".
fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Correlations for every habit in the store, most positive first.
#[must_use]
pub fn all_mood_correlations(days: &DayStore, moods: &MoodStore) -> Vec<MoodCorrelation> {
    let habit_ids: BTreeSet<String> = days
        .values()
        .flat_map(|record| record.habits.iter().map(|h| h.id.clone()))
        .collect();

    let mut correlations: Vec<MoodCorrelation> = habit_ids
        .iter()
        .filter_map(|id| calculate_mood_habit_correlation(id, days, moods))
        .filter(|c| c.total_days > 0)
        .collect();

    correlations.sort_by(|a, b| {
        b.mood_impact
            .partial_cmp(&a.mood_impact)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    correlations
}

/// The `n` habits with the strongest positive mood impact.
#[must_use]
pub fn top_mood_boosting_habits(
    days: &DayStore,
    moods: &MoodStore,
    n: usize,
) -> Vec<MoodCorrelation> {
    all_mood_correlations(days, moods)
        .into_iter()
        .filter(|c| c.mood_impact > 0.0)
        .take(n)
        .collect()
}

/// The `n` habits with the strongest negative mood impact, most negative
/// first.
#[must_use]
pub fn top_mood_negative_habits(
    days: &DayStore,
    moods: &MoodStore,
    n: usize,
) -> Vec<MoodCorrelation> {
    let negative: Vec<MoodCorrelation> = all_mood_correlations(days, moods)
        .into_iter()
        .filter(|c| c.mood_impact < 0.0)
        .collect();

    let skip = negative.len().saturating_sub(n);
    let mut bottom: Vec<MoodCorrelation> = negative.into_iter().skip(skip).collect();
    bottom.reverse();
    bottom
}
