//! Statistics command implementation.

use colored::Colorize;

use crate::cli::args::{OutputFormat, StatsCommands};
use crate::config::Config;
use crate::error::TallyError;
use crate::features::analytics::{
    get_average_time_to_completion, get_difficulty_stats, get_habit_completion_stats,
    get_productivity_trend, get_todo_completion_stats, high_effort_low_completion,
    top_mood_boosting_habits, top_mood_negative_habits, Timeframe,
};
use crate::features::streaks::{all_streaks, streak_history};
use crate::output::{render_bar_chart, render_habit_heatmap, render_sparkline, to_json};
use crate::storage::Store;

/// Execute stats subcommands.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn stats(
    store: &mut Store,
    config: &Config,
    cmd: Option<StatsCommands>,
    format: OutputFormat,
) -> Result<String, TallyError> {
    match cmd {
        None => dashboard(store, format),
        Some(StatsCommands::Habits { timeframe }) => habits(store, timeframe.into(), format),
        Some(StatsCommands::Todos { timeframe }) => todos(store, timeframe.into(), format),
        Some(StatsCommands::Trend { timeframe }) => trend(store, timeframe.into(), format),
        Some(StatsCommands::Mood { limit }) => mood(store, limit, format),
        Some(StatsCommands::Effort) => effort(store, format),
        Some(StatsCommands::Heatmap { habit, weeks }) => {
            heatmap(store, &habit, weeks.unwrap_or(config.stats.heatmap_weeks), format)
        },
    }
}

fn dashboard(store: &mut Store, format: OutputFormat) -> Result<String, TallyError> {
    let days = store.load_days()?;
    let todo_items = store.load_todos()?;
    let moods = store.load_moods()?;
    let today = store.now().date_naive();

    let habit_stats = get_habit_completion_stats(&days, Timeframe::Week, today);
    let todo_stats = get_todo_completion_stats(&todo_items, Timeframe::Week, today);
    let average = get_average_time_to_completion(&todo_items, Timeframe::Week, today);
    let streaks = all_streaks(&days, today);

    if format == OutputFormat::Json {
        return to_json(&serde_json::json!({
            "habits": habit_stats,
            "todos": todo_stats,
            "averageTimeToCompletion": average,
            "streaks": streaks,
        }));
    }

    let mut output = Vec::new();
    output.push("📊 THIS WEEK".bold().to_string());
    output.push("─".repeat(50));

    if habit_stats.is_empty() {
        output.push("  No habits tracked yet".dimmed().to_string());
    } else {
        let tracked: usize = habit_stats.iter().map(|s| s.total_days).sum();
        let completed: usize = habit_stats.iter().map(|s| s.completed_days).sum();
        output.push(format!(
            "  Habits: {} of {} slots completed across {} habits",
            completed.to_string().green(),
            tracked,
            habit_stats.len()
        ));
    }

    output.push(format!(
        "  Todos: {} open, {} completed ({}% completion)",
        todo_stats.pending.to_string().yellow(),
        todo_stats.completed.to_string().green(),
        todo_stats.completion_rate
    ));

    if let Some(average) = &average {
        output.push(format!(
            "  Average time to completion: {}",
            average.formatted.cyan()
        ));
    }

    let active: Vec<usize> = streaks
        .values()
        .map(|s| s.current_streak)
        .filter(|&n| n > 0)
        .collect();
    if let Some(best) = active.iter().max() {
        output.push(format!(
            "  Streaks: {} active, best {} days 🔥",
            active.len(),
            best
        ));
    }

    // Overlap of mood and habit data, one line as a teaser
    let boosting = top_mood_boosting_habits(&days, &moods, 1);
    if let Some(top) = boosting.first() {
        let templates = store.load_habits()?;
        let name = templates
            .iter()
            .find(|t| t.id == top.habit_id)
            .map_or(top.habit_id.as_str(), |t| t.name.as_str());
        output.push(format!(
            "  Mood: {} lifts your mood by +{:.1}",
            name, top.mood_impact
        ));
    }

    output.push(String::new());
    output.push("Run 'tally stats habits', 'tally stats trend' or 'tally stats mood' for details".dimmed().to_string());

    Ok(output.join("\n"))
}

fn habits(
    store: &mut Store,
    timeframe: Timeframe,
    format: OutputFormat,
) -> Result<String, TallyError> {
    let days = store.load_days()?;
    let today = store.now().date_naive();
    let stats = get_habit_completion_stats(&days, timeframe, today);

    match format {
        OutputFormat::Json => to_json(&stats),
        OutputFormat::Pretty => {
            if stats.is_empty() {
                return Ok(format!("No habit data for timeframe '{timeframe}'"));
            }

            let chart_data: Vec<(String, usize)> = stats
                .iter()
                .map(|s| (format!("{} {}", s.emoji, s.name), s.percentage as usize))
                .collect();

            let mut output = format!("Habit completion ({timeframe})\n");
            output.push_str(&render_bar_chart(&chart_data, 24, 20));
            output.push('\n');
            Ok(output)
        },
    }
}

fn todos(
    store: &mut Store,
    timeframe: Timeframe,
    format: OutputFormat,
) -> Result<String, TallyError> {
    let todo_items = store.load_todos()?;
    let today = store.now().date_naive();

    let stats = get_todo_completion_stats(&todo_items, timeframe, today);
    let average = get_average_time_to_completion(&todo_items, timeframe, today);

    match format {
        OutputFormat::Json => to_json(&serde_json::json!({
            "stats": stats,
            "averageTimeToCompletion": average,
        })),
        OutputFormat::Pretty => {
            let mut output = format!("Todos ({timeframe})\n");
            output.push_str(&"─".repeat(40));
            output.push('\n');
            output.push_str(&format!(
                "  Total: {}  Completed: {}  Pending: {}\n",
                stats.total,
                stats.completed.to_string().green(),
                stats.pending.to_string().yellow()
            ));
            output.push_str(&format!("  Completion rate: {}%\n", stats.completion_rate));
            match average {
                Some(average) => output.push_str(&format!(
                    "  Average time to completion: {} (over {} todos)\n",
                    average.formatted.cyan(),
                    average.count
                )),
                None => output.push_str("  No completed todos in this window\n"),
            }
            Ok(output)
        },
    }
}

fn trend(
    store: &mut Store,
    timeframe: Timeframe,
    format: OutputFormat,
) -> Result<String, TallyError> {
    let days = store.load_days()?;
    let todo_items = store.load_todos()?;
    let today = store.now().date_naive();

    let points = get_productivity_trend(&days, &todo_items, timeframe, today);

    match format {
        OutputFormat::Json => to_json(&points),
        OutputFormat::Pretty => {
            if points.is_empty() {
                return Ok(format!("No tracked days in timeframe '{timeframe}'"));
            }

            let rates: Vec<usize> = points
                .iter()
                .map(|p| p.habit_completion_rate as usize)
                .collect();
            let created: usize = points.iter().map(|p| p.todos_created).sum();
            let completed: usize = points.iter().map(|p| p.todos_completed).sum();

            let first = points.first().map(|p| p.date.to_string()).unwrap_or_default();
            let last = points.last().map(|p| p.date.to_string()).unwrap_or_default();

            let mut output = format!("Habit completion {first} → {last}\n");
            output.push_str(&format!("  {}\n", render_sparkline(&rates)));
            output.push_str(&format!(
                "  Todos: {created} created, {completed} completed over {} tracked days\n",
                points.len()
            ));
            Ok(output)
        },
    }
}

fn mood(store: &mut Store, limit: usize, format: OutputFormat) -> Result<String, TallyError> {
    let days = store.load_days()?;
    let moods = store.load_moods()?;
    let templates = store.load_habits()?;

    let boosting = top_mood_boosting_habits(&days, &moods, limit);
    let negative = top_mood_negative_habits(&days, &moods, limit);

    if format == OutputFormat::Json {
        return to_json(&serde_json::json!({
            "boosting": boosting,
            "negative": negative,
        }));
    }

    let name_of = |id: &str| -> String {
        templates
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| id.to_string())
    };

    if boosting.is_empty() && negative.is_empty() {
        return Ok("Not enough overlapping mood and habit data yet".to_string());
    }

    let mut output = String::new();
    if !boosting.is_empty() {
        output.push_str(&"Mood boosters\n".bold().to_string());
        for c in &boosting {
            output.push_str(&format!(
                "  {} {}  (over {} days)\n",
                format!("+{:.1}", c.mood_impact).green(),
                name_of(&c.habit_id),
                c.total_days
            ));
        }
    }
    if !negative.is_empty() {
        output.push_str(&"Mood drains\n".bold().to_string());
        for c in &negative {
            output.push_str(&format!(
                "  {} {}  (over {} days)\n",
                format!("{:.1}", c.mood_impact).red(),
                name_of(&c.habit_id),
                c.total_days
            ));
        }
    }
    Ok(output)
}

fn effort(store: &mut Store, format: OutputFormat) -> Result<String, TallyError> {
    let days = store.load_days()?;
    let templates = store.load_habits()?;

    let stats = get_difficulty_stats(&days, &templates);
    let flagged = high_effort_low_completion(&days, &templates);

    match format {
        OutputFormat::Json => to_json(&serde_json::json!({
            "stats": stats,
            "recommendations": flagged,
        })),
        OutputFormat::Pretty => {
            if stats.is_empty() {
                return Ok("No habit data yet".to_string());
            }

            let mut output = "Effort (difficulty + missed completions)\n".to_string();
            output.push_str(&"─".repeat(50));
            output.push('\n');
            for stat in &stats {
                output.push_str(&format!(
                    "  {:>2}/10  {:>3.0}%  {} {}\n",
                    stat.effort_level,
                    stat.completion_rate * 100.0,
                    stat.emoji,
                    stat.name
                ));
            }

            if !flagged.is_empty() {
                output.push('\n');
                output.push_str(&"Worth a rethink\n".bold().to_string());
                for stat in &flagged {
                    output.push_str(&format!(
                        "  {} takes high effort but lands under 50%, try shrinking it\n",
                        stat.name.bold()
                    ));
                }
            }
            Ok(output)
        },
    }
}

fn heatmap(
    store: &mut Store,
    habit: &str,
    weeks: usize,
    format: OutputFormat,
) -> Result<String, TallyError> {
    let days = store.load_days()?;
    let templates = store.load_habits()?;
    let today = store.now().date_naive();

    let template = super::find_habit(&templates, habit)?;
    let history = streak_history(&template.id, &days, today, weeks * 7);

    match format {
        OutputFormat::Json => to_json(&history),
        OutputFormat::Pretty => {
            let mut output = format!(
                "{} {} - last {} weeks\n",
                template.emoji,
                template.name.bold(),
                weeks
            );
            output.push_str(&render_habit_heatmap(&history, today, weeks));
            output.push('\n');
            Ok(output)
        },
    }
}
