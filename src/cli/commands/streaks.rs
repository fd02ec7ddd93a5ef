//! Streak display.

use std::collections::HashMap;

use colored::Colorize;

use crate::cli::args::OutputFormat;
use crate::error::TallyError;
use crate::features::streaks::{all_streaks, calculate_streak, streak_history};
use crate::output::{render_habit_heatmap, to_json};
use crate::storage::Store;

/// Weeks of history shown in the single-habit view.
const DETAIL_WEEKS: usize = 4;

/// Show streaks for every habit, or one habit in detail.
///
/// # Errors
///
/// Returns an error if the habit is unknown or the store cannot be read.
pub fn streaks(
    store: &mut Store,
    habit: Option<String>,
    format: OutputFormat,
) -> Result<String, TallyError> {
    let days = store.load_days()?;
    let templates = store.load_habits()?;
    let today = store.now().date_naive();

    if let Some(query) = habit {
        let template = super::find_habit(&templates, &query)?;
        let result = calculate_streak(&template.id, &days, today);

        return match format {
            OutputFormat::Json => to_json(&result),
            OutputFormat::Pretty => {
                let mut output = format!("{} {}\n", template.emoji, template.name.bold());
                output.push_str(&"─".repeat(40));
                output.push('\n');
                output.push_str(&format!(
                    "Current streak: {}\n",
                    format!("{} days", result.current_streak).green()
                ));
                output.push_str(&format!("Longest streak: {} days\n", result.longest_streak));
                output.push_str(&format!(
                    "Completed {} of {} tracked days\n",
                    result.total_completed, result.total_days
                ));
                if let Some(last) = result.last_completed_date {
                    output.push_str(&format!("Last completed: {last}\n"));
                }
                output.push('\n');
                let history = streak_history(&template.id, &days, today, DETAIL_WEEKS * 7);
                output.push_str(&render_habit_heatmap(&history, today, DETAIL_WEEKS));
                Ok(output)
            },
        };
    }

    let streaks = all_streaks(&days, today);
    let names: HashMap<&str, &str> = templates
        .iter()
        .map(|t| (t.id.as_str(), t.name.as_str()))
        .collect();

    match format {
        OutputFormat::Json => to_json(&streaks),
        OutputFormat::Pretty => {
            if streaks.is_empty() {
                return Ok("No tracked habits yet".to_string());
            }

            let mut rows: Vec<_> = streaks.iter().collect();
            rows.sort_by(|a, b| b.1.current_streak.cmp(&a.1.current_streak));

            let mut output = format!("Streaks ({} habits)\n", rows.len());
            output.push_str(&"─".repeat(50));
            output.push('\n');
            for (id, result) in rows {
                let name = names.get(id.as_str()).copied().unwrap_or(id.as_str());
                let current = if result.current_streak > 0 {
                    format!("🔥 {:>3}", result.current_streak).green().to_string()
                } else {
                    format!("   {:>3}", 0).dimmed().to_string()
                };
                output.push_str(&format!(
                    "{current}  best {:>3}  {name}\n",
                    result.longest_streak
                ));
            }
            Ok(output)
        },
    }
}
