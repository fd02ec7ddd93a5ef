//! Next-occurrence math and instance generation.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Months, NaiveDate, Utc};

use crate::model::{RecurrencePattern, TodoItem};

/// Compute the next occurrence for a recurring template.
///
/// The anchor is the template's `completed_at` if present, else its
/// `due_date`, else `now`. Month and year steps clamp to the last day of
/// the target month when the anchor's day-of-month does not exist there
/// (Jan 31 + 1 month = Feb 28/29).
///
/// Returns `None` for non-recurring todos and for series that have ended:
/// a `recurrence_end_date` is inclusive through the end of its calendar
/// day, so an occurrence landing exactly on the end date still fires.
#[must_use]
pub fn next_occurrence(todo: &TodoItem, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if !todo.is_recurring {
        return None;
    }
    let pattern = todo.recurrence_pattern?;

    let anchor = todo.completed_at.or(todo.due_date).unwrap_or(now);
    let interval = todo.recurrence_interval.max(1);

    let next = match pattern {
        RecurrencePattern::Daily => anchor + Duration::days(i64::from(interval)),
        RecurrencePattern::Weekly => anchor + Duration::days(7 * i64::from(interval)),
        RecurrencePattern::Monthly => anchor.checked_add_months(Months::new(interval))?,
        RecurrencePattern::Yearly => anchor.checked_add_months(Months::new(12 * interval))?,
    };

    if let Some(end) = todo.recurrence_end_date {
        if next.date_naive() > end.date_naive() {
            return None;
        }
    }

    Some(next)
}

/// Whether a template is due to generate its next instance.
///
/// Two disjoint conditions, both at calendar-day granularity:
/// - completed with a due date on or before today, or
/// - not completed with a due date strictly before today (it lapsed).
///
/// Paused templates never generate.
#[must_use]
pub fn should_generate_next(todo: &TodoItem, paused: &HashSet<String>, today: NaiveDate) -> bool {
    if !todo.is_recurring || todo.recurrence_pattern.is_none() {
        return false;
    }
    if paused.contains(&todo.id) {
        return false;
    }

    let Some(due) = todo.due_date else {
        return false;
    };
    let due_day = due.date_naive();

    if todo.completed {
        due_day <= today
    } else {
        due_day < today
    }
}

/// Build the next instance for a recurring template.
///
/// Returns `None` when the series has ended. The instance id is the
/// template id plus the generation instant, copies only display fields,
/// and carries no recurrence configuration of its own.
#[must_use]
pub fn generate_instance(template: &TodoItem, now: DateTime<Utc>) -> Option<TodoItem> {
    let next_due = next_occurrence(template, now)?;

    Some(TodoItem {
        id: format!("{}-{}", template.id, now.timestamp_millis()),
        title: template.title.clone(),
        notes: template.notes.clone(),
        time_commitment: template.time_commitment.clone(),
        priority: template.priority,
        completed: false,
        created_at: now,
        completed_at: None,
        time_to_completion: None,
        due_date: Some(next_due),
        linked_goal_id: None,
        is_recurring: false,
        recurrence_pattern: None,
        recurrence_interval: 1,
        recurrence_end_date: None,
        is_recurring_instance: true,
        original_recurring_id: Some(template.id.clone()),
    })
}

/// Whether an instance of `template_id` already exists with a due date on
/// the given calendar day.
///
/// Callers must check this before inserting a generated instance, or
/// repeated generation passes will accumulate duplicates.
#[must_use]
pub fn has_instance_on_day(todos: &[TodoItem], template_id: &str, day: NaiveDate) -> bool {
    todos.iter().any(|t| {
        t.original_recurring_id.as_deref() == Some(template_id)
            && t.due_date.is_some_and(|due| due.date_naive() == day)
    })
}

/// One generation pass over a todo snapshot.
///
/// Returns the new instances for every due template, with the same-day
/// deduplication already applied, so running the pass repeatedly before
/// persisting cannot double-generate against the same snapshot.
#[must_use]
pub fn due_instances(
    todos: &[TodoItem],
    paused: &HashSet<String>,
    now: DateTime<Utc>,
) -> Vec<TodoItem> {
    let today = now.date_naive();

    todos
        .iter()
        .filter(|t| should_generate_next(t, paused, today))
        .filter_map(|template| {
            let instance = generate_instance(template, now)?;
            let due_day = instance.due_date?.date_naive();
            if has_instance_on_day(todos, &template.id, due_day) {
                None
            } else {
                Some(instance)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::model::Priority;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap()
    }

    fn template(pattern: RecurrencePattern, interval: u32, due: DateTime<Utc>) -> TodoItem {
        TodoItem::new("tmpl", "Water plants", at(2024, 1, 1))
            .with_due_date(due)
            .with_recurrence(pattern, interval)
    }

    #[test]
    fn test_non_recurring_returns_none() {
        let todo = TodoItem::new("1", "Once", at(2024, 1, 1));
        assert_eq!(next_occurrence(&todo, at(2024, 1, 2)), None);
    }

    #[test]
    fn test_daily_interval() {
        let todo = template(RecurrencePattern::Daily, 3, at(2024, 3, 1));
        let next = next_occurrence(&todo, at(2024, 3, 2)).unwrap();
        assert_eq!(next.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
    }

    #[test]
    fn test_weekly_interval_two() {
        // Sunday 2024-03-03, every 2 weeks
        let todo = template(RecurrencePattern::Weekly, 2, at(2024, 3, 3));
        let next = next_occurrence(&todo, at(2024, 3, 4)).unwrap();
        assert_eq!(next.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 17).unwrap());
    }

    #[test]
    fn test_monthly_rollover_clamps() {
        // Jan 31 + 1 month lands on the last day of February
        let todo = template(RecurrencePattern::Monthly, 1, at(2024, 1, 31));
        let next = next_occurrence(&todo, at(2024, 2, 1)).unwrap();
        assert_eq!(next.date_naive(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let todo = template(RecurrencePattern::Monthly, 1, at(2023, 1, 31));
        let next = next_occurrence(&todo, at(2023, 2, 1)).unwrap();
        assert_eq!(next.date_naive(), NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
    }

    #[test]
    fn test_completed_at_preferred_as_anchor() {
        let mut todo = template(RecurrencePattern::Daily, 1, at(2024, 3, 1));
        todo.complete(at(2024, 3, 5));

        let next = next_occurrence(&todo, at(2024, 3, 6)).unwrap();
        assert_eq!(next.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
    }

    #[test]
    fn test_pure_and_idempotent() {
        let todo = template(RecurrencePattern::Weekly, 1, at(2024, 3, 3));
        let now = at(2024, 3, 10);
        assert_eq!(next_occurrence(&todo, now), next_occurrence(&todo, now));
    }

    #[test]
    fn test_end_date_inclusive_boundary() {
        // Next occurrence lands exactly on the end date: still generated
        let mut todo = template(RecurrencePattern::Daily, 1, at(2024, 3, 1));
        todo.recurrence_end_date = Some(at(2024, 3, 2));
        assert!(next_occurrence(&todo, at(2024, 3, 2)).is_some());

        // One day earlier and the series has ended
        todo.recurrence_end_date = Some(at(2024, 3, 1));
        assert_eq!(next_occurrence(&todo, at(2024, 3, 2)), None);
    }

    #[test]
    fn test_should_generate_completed_on_due_day() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let mut todo = template(RecurrencePattern::Daily, 1, at(2024, 3, 5));
        todo.completed = true;

        assert!(should_generate_next(&todo, &HashSet::new(), today));
    }

    #[test]
    fn test_should_generate_lapsed_requires_strictly_past() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let todo = template(RecurrencePattern::Daily, 1, at(2024, 3, 5));

        // Not completed, due today: not yet lapsed
        assert!(!should_generate_next(&todo, &HashSet::new(), today));

        let lapsed = template(RecurrencePattern::Daily, 1, at(2024, 3, 4));
        assert!(should_generate_next(&lapsed, &HashSet::new(), today));
    }

    #[test]
    fn test_paused_template_never_generates() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let todo = template(RecurrencePattern::Daily, 1, at(2024, 3, 1));
        let paused: HashSet<String> = ["tmpl".to_string()].into();

        assert!(!should_generate_next(&todo, &paused, today));
    }

    #[test]
    fn test_generated_instance_shape() {
        let todo = template(RecurrencePattern::Daily, 1, at(2024, 3, 1))
            .with_priority(Priority::Now);
        let now = at(2024, 3, 2);
        let instance = generate_instance(&todo, now).unwrap();

        assert_eq!(instance.id, format!("tmpl-{}", now.timestamp_millis()));
        assert_eq!(instance.title, "Water plants");
        assert_eq!(instance.priority, Priority::Now);
        assert!(!instance.completed);
        assert!(!instance.is_recurring);
        assert!(instance.is_recurring_instance);
        assert_eq!(instance.original_recurring_id.as_deref(), Some("tmpl"));
        assert!(instance.recurrence_pattern.is_none());
        assert_eq!(
            instance.due_date.unwrap().date_naive(),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
        );
    }

    #[test]
    fn test_generate_returns_none_past_end() {
        let mut todo = template(RecurrencePattern::Daily, 1, at(2024, 3, 1));
        todo.recurrence_end_date = Some(at(2024, 3, 1));
        assert!(generate_instance(&todo, at(2024, 3, 2)).is_none());
    }

    #[test]
    fn test_due_instances_deduplicates_same_day() {
        let todo = template(RecurrencePattern::Daily, 1, at(2024, 3, 1));
        let now = at(2024, 3, 2);

        let first = due_instances(&[todo.clone()], &HashSet::new(), now);
        assert_eq!(first.len(), 1);

        // With the generated instance persisted, a second pass is a no-op
        let mut todos = vec![todo];
        todos.extend(first);
        let second = due_instances(&todos, &HashSet::new(), now);
        assert!(second.is_empty());
    }
}
