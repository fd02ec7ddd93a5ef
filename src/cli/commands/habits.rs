//! Habit commands: today's checklist, logging, templates, weight.

use colored::Colorize;

use crate::cli::args::{HabitCommands, OutputFormat};
use crate::core::merge_day_habits;
use crate::error::TallyError;
use crate::model::{Category, DayRecord, HabitTemplate};
use crate::output::{format_day_pretty, to_json};
use crate::storage::Store;

/// Show today's habit checklist.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn today(store: &mut Store, format: OutputFormat) -> Result<String, TallyError> {
    let days = store.load_days()?;
    let templates = store.load_habits()?;
    let today = store.now().date_naive();

    let existing = days
        .get(&today)
        .map(|record| record.habits.as_slice())
        .unwrap_or(&[]);
    let entries = merge_day_habits(existing, &templates);

    match format {
        OutputFormat::Json => to_json(&entries),
        OutputFormat::Pretty => Ok(format_day_pretty(today, &entries)),
    }
}

/// Toggle a habit's completion for today.
///
/// # Errors
///
/// Returns an error if the habit is unknown or the store cannot be
/// written.
pub fn log(store: &mut Store, query: &str, format: OutputFormat) -> Result<String, TallyError> {
    let mut days = store.load_days()?;
    let templates = store.load_habits()?;
    let habit_id = super::find_habit(&templates, query)?.id.clone();

    let now = store.now();
    let today = now.date_naive();

    let existing = days
        .get(&today)
        .map(|record| record.habits.as_slice())
        .unwrap_or(&[]);
    let mut entries = merge_day_habits(existing, &templates);

    let entry = entries
        .iter_mut()
        .find(|e| e.id == habit_id)
        .ok_or_else(|| TallyError::NotFound(format!("Habit '{query}' not found")))?;
    entry.completed = !entry.completed;
    let completed = entry.completed;
    let name = entry.name.clone();

    let weight = days.get(&today).and_then(|record| record.weight);
    let record = DayRecord::new(entries, weight, now);
    let (done, total) = (record.completed_count, record.total_count);
    days.insert(today, record);
    store.save_days(&days)?;

    match format {
        OutputFormat::Json => to_json(&days[&today]),
        OutputFormat::Pretty => {
            let state = if completed {
                "done".green().to_string()
            } else {
                "not done".yellow().to_string()
            };
            Ok(format!("{name}: {state}  ({done}/{total} completed today)"))
        },
    }
}

/// Record today's weight, leaving the day's habits untouched.
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub fn weight(store: &mut Store, value: f64, format: OutputFormat) -> Result<String, TallyError> {
    let mut days = store.load_days()?;
    let now = store.now();
    let today = now.date_naive();

    days.entry(today)
        .and_modify(|record| {
            record.weight = Some(value);
            record.timestamp = now;
        })
        .or_insert_with(|| DayRecord::new(Vec::new(), Some(value), now));
    store.save_days(&days)?;

    match format {
        OutputFormat::Json => to_json(&days[&today]),
        OutputFormat::Pretty => Ok(format!("Recorded weight {value} for {today}")),
    }
}

/// Habit template management.
///
/// # Errors
///
/// Returns an error if the store cannot be read or written.
pub fn habit(
    store: &mut Store,
    cmd: HabitCommands,
    format: OutputFormat,
) -> Result<String, TallyError> {
    match cmd {
        HabitCommands::Add {
            name,
            emoji,
            category,
            time,
            difficulty,
        } => {
            let mut templates = store.load_habits()?;

            let id = store.now().timestamp_millis().to_string();
            let mut template = HabitTemplate::new(&id, &name);
            if let Some(emoji) = emoji {
                template = template.with_emoji(&emoji);
            }
            if let Some(category) = category {
                template = template.with_category(Category::named(&category));
            }
            if let Some(time) = time {
                template = template.with_time_of_day(time.into());
            }
            if let Some(difficulty) = difficulty {
                template = template.with_difficulty(difficulty);
            }

            templates.push(template.clone());
            store.save_habits(&templates)?;

            match format {
                OutputFormat::Json => to_json(&template),
                OutputFormat::Pretty => Ok(format!("Added habit: {name} (id {id})")),
            }
        },

        HabitCommands::List => {
            let templates = store.load_habits()?;
            match format {
                OutputFormat::Json => to_json(&templates),
                OutputFormat::Pretty => {
                    if templates.is_empty() {
                        return Ok("No habits yet. Add one with 'tally habit add'".to_string());
                    }
                    let mut output = format!("Habits ({})\n", templates.len());
                    output.push_str(&"─".repeat(50));
                    output.push('\n');
                    for template in &templates {
                        let mut line = format!(
                            "{} {} {}  {}",
                            template.emoji,
                            template.name.bold(),
                            template.id.dimmed(),
                            template.time_of_day.to_string().cyan()
                        );
                        if let Some(difficulty) = template.difficulty {
                            line.push_str(&format!("  difficulty {difficulty}/5"));
                        }
                        output.push_str(&line);
                        output.push('\n');
                    }
                    Ok(output)
                },
            }
        },

        HabitCommands::Rm { id } => {
            let mut templates = store.load_habits()?;
            let before = templates.len();
            templates.retain(|t| t.id != id);
            if templates.len() == before {
                return Err(TallyError::NotFound(format!("Habit with id '{id}'")));
            }
            store.save_habits(&templates)?;
            Ok(format!(
                "Removed habit {id}. Tracked history for it is kept."
            ))
        },
    }
}
