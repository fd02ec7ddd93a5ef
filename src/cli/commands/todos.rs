//! Todo commands: quick-add, listing, completion, recurrence.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use colored::Colorize;

use crate::cli::args::{OutputFormat, TodoCommands};
use crate::error::TallyError;
use crate::features::nlp::parse_todo;
use crate::features::recurrence::due_instances;
use crate::model::TodoItem;
use crate::output::{format_todos_pretty, to_json};
use crate::storage::Store;

/// Todo management.
///
/// # Errors
///
/// Returns an error if the referenced todo does not exist or the store
/// cannot be read or written.
pub fn todo(store: &mut Store, cmd: TodoCommands, format: OutputFormat) -> Result<String, TallyError> {
    match cmd {
        TodoCommands::Add { text } => add(store, &text.join(" "), format),
        TodoCommands::List { all } => list(store, all, format),
        TodoCommands::Done { id } => done(store, &id, format),
        TodoCommands::Undo { id } => undo(store, &id, format),
        TodoCommands::Rm { id } => remove(store, &id),
        TodoCommands::Check => check(store, format),
        TodoCommands::Pause { id } => pause(store, &id),
        TodoCommands::Resume { id } => resume(store, &id),
    }
}

fn add(store: &mut Store, text: &str, format: OutputFormat) -> Result<String, TallyError> {
    let parsed = parse_todo(text);
    if parsed.title.is_empty() {
        return Err(TallyError::Config(
            "Nothing left for a title after parsing".to_string(),
        ));
    }

    let now = store.now();
    let id = now.timestamp_millis().to_string();

    let mut todo = TodoItem::new(&id, &parsed.title, now);
    todo.notes = parsed.notes;
    if let Some(priority) = parsed.priority {
        todo.priority = priority;
    }

    if let Some((pattern, interval)) = parsed.recurrence {
        todo = todo.with_recurrence(pattern, interval);
        // A recurring template needs a due date to step from
        let due = parsed.due.unwrap_or_else(|| now.date_naive());
        todo.due_date = Some(day_start(due));
    } else if let Some(due) = parsed.due {
        todo.due_date = Some(day_start(due));
    }
    if let Some(until) = parsed.until {
        todo.recurrence_end_date = Some(day_start(until));
    }

    let mut todos = store.load_todos()?;
    todos.push(todo.clone());
    store.save_todos(&todos)?;

    match format {
        OutputFormat::Json => to_json(&todo),
        OutputFormat::Pretty => {
            let mut line = format!("Added: {} (id {id})", todo.title.bold());
            if let Some(pattern) = todo.recurrence_pattern {
                line.push_str(&format!(
                    "  {}",
                    pattern.label(todo.recurrence_interval).cyan()
                ));
            }
            if let Some(due) = todo.due_date {
                line.push_str(&format!("  due {}", due.date_naive()));
            }
            Ok(line)
        },
    }
}

fn list(store: &mut Store, all: bool, format: OutputFormat) -> Result<String, TallyError> {
    let mut todos = store.load_todos()?;
    if !all {
        todos.retain(|t| !t.completed);
    }
    todos.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then(a.due_date.cmp(&b.due_date))
    });

    match format {
        OutputFormat::Json => to_json(&todos),
        OutputFormat::Pretty => {
            let title = if all { "All todos" } else { "Open todos" };
            Ok(format_todos_pretty(&todos, title))
        },
    }
}

fn done(store: &mut Store, query: &str, format: OutputFormat) -> Result<String, TallyError> {
    let mut todos = store.load_todos()?;
    let now = store.now();

    let index = find_todo(&todos, query, false)?;
    todos[index].complete(now);
    let title = todos[index].title.clone();
    let hours = todos[index].time_to_completion.unwrap_or(0.0);

    // Completing a recurring template may make its next instance due
    let paused = store.load_paused()?;
    let generated = due_instances(&todos, &paused, now);
    let generated_count = generated.len();
    todos.extend(generated);

    store.save_todos(&todos)?;

    match format {
        OutputFormat::Json => to_json(&todos[index]),
        OutputFormat::Pretty => {
            let mut line = format!(
                "Completed: {} ({})",
                title.bold(),
                crate::features::analytics::format_time_to_completion(hours)
            );
            if generated_count > 0 {
                line.push_str(&format!(
                    "\nGenerated {generated_count} recurring instance(s)"
                ));
            }
            Ok(line)
        },
    }
}

fn undo(store: &mut Store, query: &str, format: OutputFormat) -> Result<String, TallyError> {
    let mut todos = store.load_todos()?;
    let index = find_todo(&todos, query, true)?;
    todos[index].reopen();
    let title = todos[index].title.clone();
    store.save_todos(&todos)?;

    match format {
        OutputFormat::Json => to_json(&todos[index]),
        OutputFormat::Pretty => Ok(format!("Reopened: {title}")),
    }
}

fn remove(store: &mut Store, id: &str) -> Result<String, TallyError> {
    let mut todos = store.load_todos()?;
    let before = todos.len();
    todos.retain(|t| t.id != id);
    if todos.len() == before {
        return Err(TallyError::NotFound(format!("Todo with id '{id}'")));
    }
    store.save_todos(&todos)?;
    Ok(format!("Removed todo {id}"))
}

fn check(store: &mut Store, format: OutputFormat) -> Result<String, TallyError> {
    let mut todos = store.load_todos()?;
    let paused = store.load_paused()?;
    let now = store.now();

    let generated = due_instances(&todos, &paused, now);
    if generated.is_empty() {
        return Ok("No recurring todos are due".to_string());
    }

    todos.extend(generated.clone());
    store.save_todos(&todos)?;

    match format {
        OutputFormat::Json => to_json(&generated),
        OutputFormat::Pretty => {
            let mut output = format!("Generated {} recurring instance(s)\n", generated.len());
            for instance in &generated {
                output.push_str(&format!(
                    "  {} due {}\n",
                    instance.title.bold(),
                    instance
                        .due_date
                        .map(|d| d.date_naive().to_string())
                        .unwrap_or_default()
                ));
            }
            Ok(output)
        },
    }
}

fn pause(store: &mut Store, id: &str) -> Result<String, TallyError> {
    let todos = store.load_todos()?;
    let template = todos
        .iter()
        .find(|t| t.id == id)
        .ok_or_else(|| TallyError::NotFound(format!("Todo with id '{id}'")))?;
    if !template.is_recurring {
        return Err(TallyError::Config(format!(
            "Todo '{}' is not a recurring template",
            template.title
        )));
    }

    let mut paused = store.load_paused()?;
    paused.insert(id.to_string());
    store.save_paused(&paused)?;
    Ok(format!("Paused recurring todo: {}", template.title))
}

fn resume(store: &mut Store, id: &str) -> Result<String, TallyError> {
    let mut paused = store.load_paused()?;
    if !paused.remove(id) {
        return Err(TallyError::NotFound(format!(
            "Paused recurring todo with id '{id}'"
        )));
    }
    store.save_paused(&paused)?;
    Ok(format!("Resumed recurring todo {id}"))
}

/// Midnight UTC on the given day.
fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Find a todo by exact id, else by a case-insensitive title fragment
/// among todos in the wanted completion state.
fn find_todo(todos: &[TodoItem], query: &str, completed: bool) -> Result<usize, TallyError> {
    if let Some(index) = todos.iter().position(|t| t.id == query) {
        return Ok(index);
    }

    let needle = query.to_lowercase();
    let mut matches = todos
        .iter()
        .enumerate()
        .filter(|(_, t)| t.completed == completed && t.title.to_lowercase().contains(&needle));

    match (matches.next(), matches.next()) {
        (Some((index, _)), None) => Ok(index),
        (Some(_), Some(_)) => Err(TallyError::Config(format!(
            "Todo '{query}' matches more than one todo, be more specific"
        ))),
        _ => Err(TallyError::NotFound(format!("Todo '{query}' not found"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_find_todo_prefers_exact_id() {
        let now = Utc.with_ymd_and_hms(2024, 3, 6, 9, 0, 0).unwrap();
        let todos = vec![
            TodoItem::new("1", "one", now),
            TodoItem::new("2", "two", now),
        ];
        assert_eq!(find_todo(&todos, "2", false).unwrap(), 1);
    }

    #[test]
    fn test_find_todo_by_fragment_respects_state() {
        let now = Utc.with_ymd_and_hms(2024, 3, 6, 9, 0, 0).unwrap();
        let mut finished = TodoItem::new("1", "write report", now);
        finished.complete(now);
        let open = TodoItem::new("2", "write email", now);

        let todos = vec![finished, open];
        assert_eq!(find_todo(&todos, "write", false).unwrap(), 1);
        assert_eq!(find_todo(&todos, "write", true).unwrap(), 0);
    }

    #[test]
    fn test_day_start_is_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        let start = day_start(date);
        assert_eq!(start.date_naive(), date);
        assert_eq!(start.time(), NaiveTime::MIN);
    }
}
