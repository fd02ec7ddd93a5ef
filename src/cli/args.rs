use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::features::analytics::Timeframe;
use crate::features::review::ReviewPeriod;
use crate::model::TimeOfDay;

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "A local-first habit, todo and mood tracker for the terminal")]
#[command(long_about = "tally - track habits, todos and mood from the terminal

All data lives in plain JSON files under ~/.tally (override with
TALLY_HOME). Nothing ever leaves your machine.

QUICK START:
  tally habit add \"Meditate\" --emoji 🧘 --time morning
  tally today                    Show today's habit checklist
  tally log meditate             Toggle a habit for today
  tally mood 4                   Record today's mood (1-5)
  tally todo add \"water plants every 3 days due friday !now\"
  tally stats                    Productivity dashboard
  tally review week              Generate a weekly review

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  tally <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (the default unless
    /// the config file says otherwise), or 'json' for machine-readable
    /// output suitable for scripting.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show today's habit checklist
    ///
    /// Merges your habit templates with anything already logged today, so
    /// habits added since this morning show up immediately and completed
    /// checkmarks survive template edits.
    #[command(alias = "t")]
    Today,

    /// Toggle a habit for today
    ///
    /// Matches the habit by id or by a case-insensitive name fragment:
    ///
    ///   tally log meditate
    ///   tally log "no phone"
    Log {
        /// Habit id or name fragment
        habit: String,
    },

    /// Record today's weight
    Weight {
        /// Weight value (any unit you like, it is only compared to itself)
        value: f64,
    },

    /// Record today's mood
    Mood {
        /// Mood on a 1 (awful) to 5 (great) scale
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        value: u8,
        /// Optional note about the day
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Manage habit templates
    Habit(HabitArgs),

    /// Manage todos
    ///
    /// Quick-add supports natural language:
    ///
    ///   tally todo add "buy milk due tomorrow"
    ///   tally todo add "pay rent monthly due 2024-04-01 !now"
    ///   tally todo add "standup every day until 2024-06-01"
    #[command(alias = "td")]
    Todo(TodoArgs),

    /// Show habit streaks
    Streaks {
        /// Show one habit in detail (id or name fragment)
        habit: Option<String>,
    },

    /// Productivity statistics
    #[command(alias = "s")]
    Stats(StatsArgs),

    /// Generate a weekly or monthly review
    Review {
        /// Review period
        #[arg(value_enum, default_value = "week")]
        period: ReviewPeriodArg,
        /// Save the review to reviews.json
        #[arg(long)]
        save: bool,
        /// List previously saved reviews instead of generating one
        #[arg(long, conflicts_with_all = ["save"])]
        list: bool,
    },

    /// Export all data as JSON
    Export,

    /// Interactive habit dashboard
    Tui,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct HabitArgs {
    #[command(subcommand)]
    pub command: HabitCommands,
}

#[derive(Subcommand)]
pub enum HabitCommands {
    /// Add a habit template
    Add {
        /// Habit name
        name: String,
        /// Emoji shown next to the name
        #[arg(short, long)]
        emoji: Option<String>,
        /// Category name
        #[arg(short, long)]
        category: Option<String>,
        /// When during the day the habit belongs
        #[arg(short, long, value_enum)]
        time: Option<TimeOfDayArg>,
        /// Difficulty from 1 (trivial) to 5 (hard)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=5))]
        difficulty: Option<u8>,
    },
    /// List habit templates
    List,
    /// Remove a habit template (tracked history is preserved)
    Rm {
        /// Habit id
        id: String,
    },
}

#[derive(Args)]
pub struct TodoArgs {
    #[command(subcommand)]
    pub command: TodoCommands,
}

#[derive(Subcommand)]
pub enum TodoCommands {
    /// Quick-add a todo with natural language
    #[command(alias = "a")]
    Add {
        /// Todo text, e.g. "water plants every 3 days due friday !now"
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// List todos (open by default)
    List {
        /// Include completed todos
        #[arg(long)]
        all: bool,
    },
    /// Complete a todo
    Done {
        /// Todo id or title fragment
        id: String,
    },
    /// Reopen a completed todo
    Undo {
        /// Todo id or title fragment
        id: String,
    },
    /// Remove a todo
    Rm {
        /// Todo id
        id: String,
    },
    /// Generate instances for recurring todos that are due
    Check,
    /// Pause a recurring template
    Pause {
        /// Template id
        id: String,
    },
    /// Resume a paused recurring template
    Resume {
        /// Template id
        id: String,
    },
}

#[derive(Args)]
pub struct StatsArgs {
    #[command(subcommand)]
    pub command: Option<StatsCommands>,
}

#[derive(Subcommand)]
pub enum StatsCommands {
    /// Per-habit completion table
    Habits {
        /// Reporting window
        #[arg(short, long, value_enum, default_value = "all")]
        timeframe: TimeframeArg,
    },
    /// Todo completion statistics
    Todos {
        /// Reporting window
        #[arg(short, long, value_enum, default_value = "all")]
        timeframe: TimeframeArg,
    },
    /// Day-by-day productivity trend
    Trend {
        /// Reporting window
        #[arg(short, long, value_enum, default_value = "month")]
        timeframe: TimeframeArg,
    },
    /// Mood-habit correlations
    Mood {
        /// How many habits to show per list
        #[arg(short, long, default_value_t = 3)]
        limit: usize,
    },
    /// Effort rankings and recommendations
    Effort,
    /// Habit completion calendar
    Heatmap {
        /// Habit id or name fragment
        habit: String,
        /// Weeks of history to show
        #[arg(short, long)]
        weeks: Option<usize>,
    },
}

/// Reporting window argument.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeframeArg {
    Week,
    Month,
    All,
}

impl From<TimeframeArg> for Timeframe {
    fn from(value: TimeframeArg) -> Self {
        match value {
            TimeframeArg::Week => Self::Week,
            TimeframeArg::Month => Self::Month,
            TimeframeArg::All => Self::All,
        }
    }
}

/// Review period argument.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReviewPeriodArg {
    Week,
    Month,
}

impl From<ReviewPeriodArg> for ReviewPeriod {
    fn from(value: ReviewPeriodArg) -> Self {
        match value {
            ReviewPeriodArg::Week => Self::Week,
            ReviewPeriodArg::Month => Self::Month,
        }
    }
}

/// Time-of-day argument.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeOfDayArg {
    Morning,
    Night,
    Anytime,
}

impl From<TimeOfDayArg> for TimeOfDay {
    fn from(value: TimeOfDayArg) -> Self {
        match value {
            TimeOfDayArg::Morning => Self::Morning,
            TimeOfDayArg::Night => Self::Night,
            TimeOfDayArg::Anytime => Self::Anytime,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_asserts() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_timeframe_mapping() {
        assert_eq!(Timeframe::from(TimeframeArg::Week), Timeframe::Week);
        assert_eq!(Timeframe::from(TimeframeArg::All), Timeframe::All);
    }
}
