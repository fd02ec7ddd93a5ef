//! Review assembly from streak and analytics data.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};

use super::types::{
    Highlight, HighlightKind, Review, ReviewPeriod, ReviewStatistics, WeekBreakdown,
};
use crate::core::{month_start, week_start};
use crate::features::streaks::all_streaks;
use crate::model::{DayRecord, DayStore, MoodStore, TodoItem};

/// Completion threshold for a "best day" highlight, percent.
const BEST_DAY_THRESHOLD: u32 = 80;
/// Active streak length earning a weekly highlight.
const WEEKLY_STREAK_THRESHOLD: usize = 7;
/// Active streak length earning a monthly highlight.
const MONTHLY_STREAK_THRESHOLD: usize = 20;
/// Completion ratio for a "most consistent habit" highlight.
const CONSISTENCY_THRESHOLD: f64 = 0.9;
/// Week-over-week improvement (percentage points) earning a highlight.
const IMPROVEMENT_THRESHOLD: i64 = 10;

/// Generate a review for the current week (Sunday through today).
#[must_use]
pub fn generate_weekly_review(days: &DayStore, moods: &MoodStore, now: DateTime<Utc>) -> Review {
    let today = now.date_naive();
    let start = week_start(today);

    let mut review = empty_review(ReviewPeriod::Week, start, today, now);

    let window: Vec<(&NaiveDate, &DayRecord)> = days.range(start..=today).collect();
    if window.is_empty() {
        return review;
    }

    review.statistics = window_statistics(&window, moods, start, today);
    let avg = review.statistics.average_completion_rate;

    // Best and worst single days
    let rates: Vec<(NaiveDate, u32)> = window
        .iter()
        .map(|(date, record)| (**date, day_rate(record)))
        .collect();
    let best = rates.iter().max_by_key(|(_, rate)| *rate).copied();
    let worst = rates.iter().min_by_key(|(_, rate)| *rate).copied();

    if let Some((date, rate)) = best {
        if rate >= BEST_DAY_THRESHOLD {
            review.highlights.push(Highlight::new(
                HighlightKind::BestDay,
                format!(
                    "Best day: {} with {rate}% completion!",
                    date.format("%b %d")
                ),
                "🌟",
            ));
        }
    }

    // Longest streak still alive
    let streaks = all_streaks(days, today);
    let longest_active = streaks
        .values()
        .map(|s| s.current_streak)
        .max()
        .unwrap_or(0);
    if longest_active >= WEEKLY_STREAK_THRESHOLD {
        review.highlights.push(Highlight::new(
            HighlightKind::Streak,
            format!("Amazing {longest_active}-day streak maintained!"),
            "🔥",
        ));
    }

    // Most consistent habit this week
    if let Some((name, ratio)) = most_consistent_habit(&window) {
        if ratio >= CONSISTENCY_THRESHOLD {
            review.highlights.push(Highlight::new(
                HighlightKind::Consistency,
                format!(
                    "{name} was completed {}% of the time!",
                    (ratio * 100.0).round() as u32
                ),
                "✨",
            ));
        }
    }

    review.insights.push(completion_insight(avg).to_string());

    if let (Some((best_date, best_rate)), Some((_, worst_rate))) = (best, worst) {
        if best_rate > worst_rate + 20 {
            review.insights.push(format!(
                "You had a great day on {}. What made that day different?",
                best_date.format("%b %d")
            ));
        }
    }

    review
}

/// Generate a review for the current month (the 1st through today),
/// including the Sunday-bucketed weekly breakdown.
#[must_use]
pub fn generate_monthly_review(
    days: &DayStore,
    moods: &MoodStore,
    todos: &[TodoItem],
    now: DateTime<Utc>,
) -> Review {
    let today = now.date_naive();
    let start = month_start(today);

    let mut review = empty_review(ReviewPeriod::Month, start, today, now);

    let window: Vec<(&NaiveDate, &DayRecord)> = days.range(start..=today).collect();
    if window.is_empty() {
        return review;
    }

    review.statistics = window_statistics(&window, moods, start, today);
    review.statistics.todos_completed = Some(
        todos
            .iter()
            .filter(|t| {
                t.completed_at
                    .is_some_and(|at| (start..=today).contains(&at.date_naive()))
            })
            .count(),
    );

    review.weekly_breakdown = weekly_breakdown(&window);

    let improvement = match (review.weekly_breakdown.first(), review.weekly_breakdown.last()) {
        (Some(first), Some(last)) => {
            i64::from(last.completion_rate) - i64::from(first.completion_rate)
        },
        _ => 0,
    };

    let avg = review.statistics.average_completion_rate;
    if avg >= BEST_DAY_THRESHOLD {
        review.highlights.push(Highlight::new(
            HighlightKind::Excellent,
            format!("Outstanding month with {avg}% average completion!"),
            "🏆",
        ));
    }

    if improvement > IMPROVEMENT_THRESHOLD {
        review.highlights.push(Highlight::new(
            HighlightKind::Improvement,
            format!("Great improvement! You increased completion rate by {improvement}% this month!"),
            "📈",
        ));
    }

    let streaks = all_streaks(days, today);
    let longest_active = streaks
        .values()
        .map(|s| s.current_streak)
        .max()
        .unwrap_or(0);
    if longest_active >= MONTHLY_STREAK_THRESHOLD {
        review.highlights.push(Highlight::new(
            HighlightKind::Streak,
            format!("Incredible {longest_active}-day streak this month!"),
            "🔥",
        ));
    }

    if improvement > 0 {
        review
            .insights
            .push("You're building momentum! Your consistency is improving over time.".to_string());
    }

    if let Some(completed) = review.statistics.todos_completed {
        if completed > 0 {
            review.insights.push(format!(
                "You completed {completed} todos this month. Great productivity!"
            ));
        }
    }

    review
}

fn empty_review(
    period: ReviewPeriod,
    start: NaiveDate,
    end: NaiveDate,
    now: DateTime<Utc>,
) -> Review {
    Review {
        id: None,
        period,
        start_date: start,
        end_date: end,
        generated_at: now,
        statistics: ReviewStatistics::default(),
        highlights: Vec::new(),
        insights: Vec::new(),
        weekly_breakdown: Vec::new(),
    }
}

/// Aggregate statistics over the window's day records.
fn window_statistics(
    window: &[(&NaiveDate, &DayRecord)],
    moods: &MoodStore,
    start: NaiveDate,
    end: NaiveDate,
) -> ReviewStatistics {
    let total: usize = window.iter().map(|(_, r)| r.total_count).sum();
    let completed: usize = window.iter().map(|(_, r)| r.completed_count).sum();

    let mood_values: Vec<f64> = moods
        .range(start..=end)
        .map(|(_, m)| f64::from(m.mood))
        .collect();
    let average_mood = if mood_values.is_empty() {
        None
    } else {
        Some(mood_values.iter().sum::<f64>() / mood_values.len() as f64)
    };

    ReviewStatistics {
        days_tracked: window.len(),
        total_habits_completed: completed,
        total_habits_available: total,
        average_completion_rate: if total == 0 {
            0
        } else {
            (completed as f64 / total as f64 * 100.0).round() as u32
        },
        average_mood,
        todos_completed: None,
    }
}

/// A single day's completion rate as a rounded percentage.
fn day_rate(record: &DayRecord) -> u32 {
    record
        .completion_rate()
        .map_or(0, |rate| (rate * 100.0).round() as u32)
}

/// The habit completed most reliably across the window, with its ratio.
fn most_consistent_habit(window: &[(&NaiveDate, &DayRecord)]) -> Option<(String, f64)> {
    let mut per_habit: HashMap<&str, (String, usize, usize)> = HashMap::new();

    for (_, record) in window {
        for habit in &record.habits {
            let stat = per_habit
                .entry(habit.id.as_str())
                .or_insert_with(|| (habit.name.clone(), 0, 0));
            stat.2 += 1;
            if habit.completed {
                stat.1 += 1;
            }
        }
    }

    per_habit
        .into_values()
        .filter(|(_, _, total)| *total > 0)
        .map(|(name, completed, total)| (name, completed as f64 / total as f64))
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
}

/// Bucket the window's days into calendar weeks; a new bucket starts
/// whenever a day falls on Sunday.
fn weekly_breakdown(window: &[(&NaiveDate, &DayRecord)]) -> Vec<WeekBreakdown> {
    let mut weeks: Vec<Vec<&DayRecord>> = Vec::new();
    let mut current: Vec<&DayRecord> = Vec::new();

    for (date, record) in window {
        if date.weekday() == Weekday::Sun && !current.is_empty() {
            weeks.push(std::mem::take(&mut current));
        }
        current.push(record);
    }
    if !current.is_empty() {
        weeks.push(current);
    }

    weeks
        .into_iter()
        .enumerate()
        .map(|(index, week)| {
            let total: usize = week.iter().map(|r| r.total_count).sum();
            let completed: usize = week.iter().map(|r| r.completed_count).sum();
            WeekBreakdown {
                week: index + 1,
                completion_rate: if total == 0 {
                    0
                } else {
                    (completed as f64 / total as f64 * 100.0).round() as u32
                },
                days_tracked: week.len(),
            }
        })
        .collect()
}

/// Tiered wording for the average completion insight.
const fn completion_insight(avg: u32) -> &'static str {
    if avg >= 80 {
        "Excellent week! You maintained high consistency across all habits."
    } else if avg >= 60 {
        "Good progress this week. Keep up the momentum!"
    } else {
        "There's room for improvement. Try focusing on your most important habits."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::model::{HabitEntry, HabitTemplate, MoodRecord};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(id: &str, completed: bool) -> HabitEntry {
        let mut e = HabitEntry::from_template(&HabitTemplate::new(id, id));
        e.completed = completed;
        e
    }

    fn record(entries: Vec<HabitEntry>) -> DayRecord {
        DayRecord::new(entries, None, Utc::now())
    }

    #[test]
    fn test_weekly_empty_store() {
        let now = Utc.with_ymd_and_hms(2024, 3, 6, 12, 0, 0).unwrap();
        let review = generate_weekly_review(&DayStore::new(), &MoodStore::new(), now);

        assert_eq!(review.statistics.days_tracked, 0);
        assert!(review.highlights.is_empty());
        assert!(review.insights.is_empty());
    }

    #[test]
    fn test_weekly_perfect_week() {
        // Wednesday 2024-03-06; week starts Sunday 03-03
        let now = Utc.with_ymd_and_hms(2024, 3, 6, 12, 0, 0).unwrap();
        let mut days = DayStore::new();
        for d in 3..=6 {
            days.insert(date(2024, 3, d), record(vec![entry("h", true)]));
        }

        let review = generate_weekly_review(&days, &MoodStore::new(), now);

        assert_eq!(review.statistics.days_tracked, 4);
        assert_eq!(review.statistics.average_completion_rate, 100);
        assert!(review
            .highlights
            .iter()
            .any(|h| h.kind == HighlightKind::BestDay));
        assert!(review
            .highlights
            .iter()
            .any(|h| h.kind == HighlightKind::Consistency));
        assert_eq!(
            review.insights[0],
            "Excellent week! You maintained high consistency across all habits."
        );
    }

    #[test]
    fn test_weekly_streak_highlight() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
        let mut days = DayStore::new();
        // 7 consecutive completed days ending today
        for d in 3..=9 {
            days.insert(date(2024, 3, d), record(vec![entry("h", true)]));
        }

        let review = generate_weekly_review(&days, &MoodStore::new(), now);
        assert!(review
            .highlights
            .iter()
            .any(|h| h.kind == HighlightKind::Streak));
    }

    #[test]
    fn test_weekly_average_mood() {
        let now = Utc.with_ymd_and_hms(2024, 3, 6, 12, 0, 0).unwrap();
        let mut days = DayStore::new();
        days.insert(date(2024, 3, 5), record(vec![entry("h", true)]));

        let mut moods = MoodStore::new();
        moods.insert(date(2024, 3, 5), MoodRecord::new(4, None, now));
        moods.insert(date(2024, 3, 6), MoodRecord::new(2, None, now));

        let review = generate_weekly_review(&days, &moods, now);
        assert_eq!(review.statistics.average_mood, Some(3.0));
    }

    #[test]
    fn test_monthly_sunday_buckets() {
        // March 2024: the 1st is a Friday, the 3rd a Sunday
        let now = Utc.with_ymd_and_hms(2024, 3, 12, 12, 0, 0).unwrap();
        let mut days = DayStore::new();
        for d in 1..=12 {
            let completed = d > 3; // first bucket incomplete, rest complete
            days.insert(date(2024, 3, d), record(vec![entry("h", completed)]));
        }

        let review = generate_monthly_review(&days, &MoodStore::new(), &[], now);

        // Buckets: Mar 1-2, Mar 3-9, Mar 10-12
        assert_eq!(review.weekly_breakdown.len(), 3);
        assert_eq!(review.weekly_breakdown[0].days_tracked, 2);
        assert_eq!(review.weekly_breakdown[1].days_tracked, 7);
        assert_eq!(review.weekly_breakdown[2].days_tracked, 3);
        assert_eq!(review.weekly_breakdown[0].completion_rate, 0);
        assert_eq!(review.weekly_breakdown[2].completion_rate, 100);

        // 0% → 100% improvement earns the highlight and the insight
        assert!(review
            .highlights
            .iter()
            .any(|h| h.kind == HighlightKind::Improvement));
        assert!(review
            .insights
            .iter()
            .any(|i| i.contains("building momentum")));
    }

    #[test]
    fn test_monthly_todos_completed() {
        let now = Utc.with_ymd_and_hms(2024, 3, 12, 12, 0, 0).unwrap();
        let mut days = DayStore::new();
        days.insert(date(2024, 3, 5), record(vec![entry("h", true)]));

        let mut todo = TodoItem::new("1", "t", Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap());
        todo.complete(Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap());
        let old = {
            let mut t = TodoItem::new("2", "old", Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap());
            t.complete(Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap());
            t
        };

        let review = generate_monthly_review(&days, &MoodStore::new(), &[todo, old], now);
        assert_eq!(review.statistics.todos_completed, Some(1));
        assert!(review
            .insights
            .iter()
            .any(|i| i.contains("completed 1 todos this month")));
    }
}
