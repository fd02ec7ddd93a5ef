//! Review command implementation.

use colored::Colorize;

use crate::cli::args::{OutputFormat, ReviewPeriodArg};
use crate::config::Config;
use crate::error::TallyError;
use crate::features::review::{
    generate_monthly_review, generate_weekly_review, Review, ReviewPeriod,
};
use crate::output::to_json;
use crate::storage::Store;

/// Generate (and optionally save) a weekly or monthly review.
///
/// # Errors
///
/// Returns an error if the store cannot be read or written.
pub fn review(
    store: &mut Store,
    config: &Config,
    period: ReviewPeriodArg,
    save: bool,
    list: bool,
    format: OutputFormat,
) -> Result<String, TallyError> {
    if list {
        return list_saved(store, format);
    }

    let days = store.load_days()?;
    let moods = store.load_moods()?;
    let now = store.now();

    let generated = match ReviewPeriod::from(period) {
        ReviewPeriod::Week => generate_weekly_review(&days, &moods, now),
        ReviewPeriod::Month => {
            let todos = store.load_todos()?;
            generate_monthly_review(&days, &moods, &todos, now)
        },
    };

    let generated = if save || config.review.auto_save {
        store.save_review(generated)?
    } else {
        generated
    };

    match format {
        OutputFormat::Json => to_json(&generated),
        OutputFormat::Pretty => Ok(render_review(&generated)),
    }
}

fn list_saved(store: &mut Store, format: OutputFormat) -> Result<String, TallyError> {
    let reviews = store.load_reviews()?;

    match format {
        OutputFormat::Json => to_json(&reviews),
        OutputFormat::Pretty => {
            if reviews.is_empty() {
                return Ok("No saved reviews. Generate one with 'tally review --save'".to_string());
            }

            let mut output = format!("Saved reviews ({})\n", reviews.len());
            output.push_str(&"─".repeat(50));
            output.push('\n');
            for review in &reviews {
                output.push_str(&format!(
                    "{}  {:5}  {} → {}  {}% completion\n",
                    review.id.as_deref().unwrap_or("-"),
                    review.period.to_string(),
                    review.start_date,
                    review.end_date,
                    review.statistics.average_completion_rate
                ));
            }
            Ok(output)
        },
    }
}

fn render_review(review: &Review) -> String {
    let mut output = Vec::new();

    let title = match review.period {
        ReviewPeriod::Week => "WEEKLY REVIEW",
        ReviewPeriod::Month => "MONTHLY REVIEW",
    };
    output.push(format!(
        "{}  {} → {}",
        title.bold(),
        review.start_date,
        review.end_date
    ));
    output.push("─".repeat(50));

    if review.statistics.days_tracked == 0 {
        output.push("No tracked days in this period yet".dimmed().to_string());
        return output.join("\n");
    }

    let stats = &review.statistics;
    output.push(format!(
        "Days tracked: {}   Habits: {}/{}   Average completion: {}%",
        stats.days_tracked,
        stats.total_habits_completed.to_string().green(),
        stats.total_habits_available,
        stats.average_completion_rate
    ));
    if let Some(mood) = stats.average_mood {
        output.push(format!("Average mood: {mood:.1}/5"));
    }
    if let Some(todos) = stats.todos_completed {
        output.push(format!("Todos completed: {todos}"));
    }

    if !review.weekly_breakdown.is_empty() {
        output.push(String::new());
        output.push("By week".bold().to_string());
        for week in &review.weekly_breakdown {
            output.push(format!(
                "  Week {}: {}% over {} days",
                week.week, week.completion_rate, week.days_tracked
            ));
        }
    }

    if !review.highlights.is_empty() {
        output.push(String::new());
        output.push("Highlights".bold().to_string());
        for highlight in &review.highlights {
            output.push(format!("  {} {}", highlight.emoji, highlight.message));
        }
    }

    if !review.insights.is_empty() {
        output.push(String::new());
        for insight in &review.insights {
            output.push(format!("  {insight}"));
        }
    }

    if let Some(id) = &review.id {
        output.push(String::new());
        output.push(format!("Saved as review {id}").dimmed().to_string());
    }

    output.join("\n")
}
