//! Human-readable output formatting.

use colored::Colorize;

use chrono::NaiveDate;

use crate::model::{HabitEntry, Priority, TodoItem};

/// Format a day's habit checklist.
pub fn format_day_pretty(date: NaiveDate, habits: &[HabitEntry]) -> String {
    if habits.is_empty() {
        return format!("{} - no habits set up yet", date.format("%A %b %d"));
    }

    let completed = habits.iter().filter(|h| h.completed).count();
    let mut output = format!(
        "{} - {}/{} completed\n",
        date.format("%A %b %d").to_string().bold(),
        completed,
        habits.len()
    );
    output.push_str(&"─".repeat(40));
    output.push('\n');

    for habit in habits {
        let checkbox = if habit.completed {
            "[x]".green()
        } else {
            "[ ]".white()
        };
        let mut line = format!("{} {} {}", checkbox, habit.emoji, habit.name.bold());
        if !habit.category.name.is_empty() {
            line.push_str(&format!("  {}", habit.category.name.dimmed()));
        }
        line.push_str(&format!("  {}", habit.time_of_day.to_string().cyan()));
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format a list of todos grouped by priority bucket.
pub fn format_todos_pretty(todos: &[TodoItem], title: &str) -> String {
    if todos.is_empty() {
        return format!("{title} (0 items)\n  No items");
    }

    let mut output = format!("{} ({} items)\n", title, todos.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for priority in [Priority::Now, Priority::Next, Priority::Later] {
        let bucket: Vec<&TodoItem> = todos.iter().filter(|t| t.priority == priority).collect();
        if bucket.is_empty() {
            continue;
        }

        output.push_str(&format!("{}\n", priority.to_string().to_uppercase().bold()));
        for todo in bucket {
            output.push_str(&format_todo_line(todo));
            output.push('\n');
        }
    }

    output
}

fn format_todo_line(todo: &TodoItem) -> String {
    let checkbox = if todo.completed {
        "[x]".green()
    } else {
        "[ ]".white()
    };

    let mut line = format!("{} {} {}", checkbox, todo.title.bold(), todo.id.dimmed());

    if let Some(due) = todo.due_date {
        line.push_str(&format!("  due {}", due.date_naive().to_string().yellow()));
    }

    if todo.is_recurring {
        if let Some(pattern) = todo.recurrence_pattern {
            line.push_str(&format!(
                "  {}",
                pattern.label(todo.recurrence_interval).cyan()
            ));
        }
    }

    if todo.is_recurring_instance {
        line.push_str(&format!("  {}", "↻".cyan()));
    }

    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::model::HabitTemplate;

    #[test]
    fn test_empty_day() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        let output = format_day_pretty(date, &[]);
        assert!(output.contains("no habits"));
    }

    #[test]
    fn test_day_counts() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        let mut entry = HabitEntry::from_template(&HabitTemplate::new("1", "Read"));
        entry.completed = true;

        let output = format_day_pretty(date, &[entry]);
        assert!(output.contains("1/1 completed"));
        assert!(output.contains("Read"));
    }

    #[test]
    fn test_todos_grouped_by_priority() {
        let now = Utc::now();
        let todos = vec![
            TodoItem::new("1", "Urgent", now).with_priority(Priority::Now),
            TodoItem::new("2", "Someday", now).with_priority(Priority::Later),
        ];

        let output = format_todos_pretty(&todos, "Todos");
        let now_pos = output.find("NOW").unwrap();
        let later_pos = output.find("LATER").unwrap();
        assert!(now_pos < later_pos);
    }
}
