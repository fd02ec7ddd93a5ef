//! Streak calculation over the day record store.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::DayStore;

/// Derived streak figures for one habit. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakResult {
    /// Consecutive completed calendar days ending at today (or yesterday,
    /// see the grace rule on [`calculate_streak`]).
    pub current_streak: usize,
    /// Longest run of completions over the habit's tracked days.
    pub longest_streak: usize,
    /// Most recent day the habit was completed.
    pub last_completed_date: Option<NaiveDate>,
    /// Tracked days with the habit completed.
    pub total_completed: usize,
    /// Days the habit was tracked at all.
    pub total_days: usize,
}

/// Calculate streaks for one habit.
///
/// Only days where the habit id appears in that day's entries count as
/// tracked; untracked days neither break nor extend the longest streak.
/// The current streak walks calendar days backward from today and requires
/// each day to be tracked *and* completed. If today has no entry (or is
/// incomplete) but yesterday was completed, the streak is still considered
/// alive and the walk starts from yesterday — the user may simply not have
/// logged today yet.
#[must_use]
pub fn calculate_streak(habit_id: &str, days: &DayStore, today: NaiveDate) -> StreakResult {
    // Tracked days for this habit, ascending (BTreeMap iteration order)
    let tracked: Vec<(NaiveDate, bool)> = days
        .iter()
        .filter_map(|(date, record)| record.habit(habit_id).map(|h| (*date, h.completed)))
        .collect();

    if tracked.is_empty() {
        return StreakResult::default();
    }

    let completed_on: HashMap<NaiveDate, bool> = tracked.iter().copied().collect();

    let is_completed = |date: NaiveDate| completed_on.get(&date).copied().unwrap_or(false);

    // Current streak: anchor at today, falling back to yesterday
    let yesterday = today - Duration::days(1);
    let anchor = if is_completed(today) {
        Some(today)
    } else if is_completed(yesterday) {
        Some(yesterday)
    } else {
        None
    };

    let mut current_streak = 0;
    if let Some(mut date) = anchor {
        while is_completed(date) {
            current_streak += 1;
            date -= Duration::days(1);
        }
    }

    // Longest streak: forward scan over tracked days only
    let mut longest_streak = 0;
    let mut run = 0;
    for &(_, completed) in &tracked {
        if completed {
            run += 1;
            longest_streak = longest_streak.max(run);
        } else {
            run = 0;
        }
    }

    let last_completed_date = tracked
        .iter()
        .rev()
        .find(|(_, completed)| *completed)
        .map(|(date, _)| *date);

    StreakResult {
        current_streak,
        longest_streak,
        last_completed_date,
        total_completed: tracked.iter().filter(|(_, c)| *c).count(),
        total_days: tracked.len(),
    }
}

/// Calculate streaks for every habit that appears anywhere in the store.
#[must_use]
pub fn all_streaks(days: &DayStore, today: NaiveDate) -> BTreeMap<String, StreakResult> {
    let habit_ids: BTreeSet<String> = days
        .values()
        .flat_map(|record| record.habits.iter().map(|h| h.id.clone()))
        .collect();

    habit_ids
        .into_iter()
        .map(|id| {
            let streak = calculate_streak(&id, days, today);
            (id, streak)
        })
        .collect()
}

/// Completion history for the trailing `n` days, ascending.
///
/// Days where the habit was not tracked are reported as not completed,
/// which is what calendar-style renderings want.
#[must_use]
pub fn streak_history(
    habit_id: &str,
    days: &DayStore,
    today: NaiveDate,
    n: usize,
) -> Vec<(NaiveDate, bool)> {
    crate::core::recent_days(today, n)
        .into_iter()
        .map(|date| {
            let completed = days
                .get(&date)
                .and_then(|record| record.habit(habit_id))
                .is_some_and(|h| h.completed);
            (date, completed)
        })
        .collect()
}
