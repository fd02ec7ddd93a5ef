//! Natural language todo parser.
//!
//! Parses strings like "water plants every 3 days due friday !now"
//! into structured todo data.

use once_cell::sync::Lazy;
use regex::Regex;

use chrono::NaiveDate;

use crate::core::parse_natural_date;
use crate::model::{Priority, RecurrencePattern};

/// Result of parsing a quick-add string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTodo {
    /// The todo title (main text after extracting all patterns).
    pub title: String,
    /// Optional notes (text after //).
    pub notes: Option<String>,
    /// Parsed due date (from `due <expr>`).
    pub due: Option<NaiveDate>,
    /// Priority bucket (from `!now`, `!next`, `!later`).
    pub priority: Option<Priority>,
    /// Recurrence pattern and interval (from `every 2 weeks`, `daily`, ...).
    pub recurrence: Option<(RecurrencePattern, u32)>,
    /// Recurrence end date (from `until <date>`).
    pub until: Option<NaiveDate>,
}

// Compiled regex patterns
static NOTES_PATTERN: Lazy<Regex> = Lazy::new(|| {
    // "// notes" at the end
    Regex::new(r"\s*//\s*(.+)$").unwrap_or_else(|e| panic!("Invalid notes regex: {e}"))
});

static PRIORITY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"!(now|next|later)\b").unwrap_or_else(|e| panic!("Invalid priority regex: {e}"))
});

static EVERY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    // "every 3 days", "every week"
    Regex::new(r"\bevery\s+(?:(\d+)\s+)?(day|week|month|year)s?\b")
        .unwrap_or_else(|e| panic!("Invalid recurrence regex: {e}"))
});

static SIMPLE_RECUR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(daily|weekly|monthly|yearly)\b")
        .unwrap_or_else(|e| panic!("Invalid recurrence regex: {e}"))
});

static DUE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    // "due tomorrow", "due next friday", "due in 3 days", "due 2024-12-15"
    Regex::new(r"\bdue\s+(in\s+\d+\s+\w+|next\s+\w+|[\w-]+)")
        .unwrap_or_else(|e| panic!("Invalid due regex: {e}"))
});

static UNTIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\buntil\s+(in\s+\d+\s+\w+|next\s+\w+|[\w-]+)")
        .unwrap_or_else(|e| panic!("Invalid until regex: {e}"))
});

/// Parse a quick-add string into structured todo data.
///
/// Supported patterns, all optional and order-independent:
/// - Due dates: `due tomorrow`, `due friday`, `due in 3 days`, `due 2024-12-15`
/// - Recurrence: `every 2 weeks`, `every day`, `daily`, `monthly`
/// - Series end: `until 2024-06-01`
/// - Priority: `!now`, `!next`, `!later`
/// - Notes: `// free text at the end`
///
/// Everything left over becomes the title.
#[must_use]
pub fn parse_todo(input: &str) -> ParsedTodo {
    let mut parsed = ParsedTodo::default();
    let mut working = input.trim().to_string();

    // Notes first so later patterns can't match inside them
    if let Some(caps) = NOTES_PATTERN.captures(&working) {
        if let Some(m) = caps.get(1) {
            parsed.notes = Some(m.as_str().trim().to_string());
        }
        working = NOTES_PATTERN.replace(&working, "").to_string();
    }

    if let Some(caps) = PRIORITY_PATTERN.captures(&working) {
        parsed.priority = caps.get(1).and_then(|m| match m.as_str() {
            "now" => Some(Priority::Now),
            "next" => Some(Priority::Next),
            "later" => Some(Priority::Later),
            _ => None,
        });
        working = PRIORITY_PATTERN.replace(&working, "").to_string();
    }

    // "until" before "due": both capture a trailing date expression
    if let Some(caps) = UNTIL_PATTERN.captures(&working) {
        if let Some(date) = caps.get(1).and_then(|m| parse_natural_date(m.as_str())) {
            parsed.until = Some(date);
            working = UNTIL_PATTERN.replace(&working, "").to_string();
        }
    }

    if let Some(caps) = DUE_PATTERN.captures(&working) {
        if let Some(date) = caps.get(1).and_then(|m| parse_natural_date(m.as_str())) {
            parsed.due = Some(date);
            working = DUE_PATTERN.replace(&working, "").to_string();
        }
    }

    if let Some(caps) = EVERY_PATTERN.captures(&working) {
        let interval = caps
            .get(1)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(1)
            .max(1);
        let pattern = caps.get(2).map(|m| m.as_str()).and_then(unit_pattern);
        if let Some(pattern) = pattern {
            parsed.recurrence = Some((pattern, interval));
            working = EVERY_PATTERN.replace(&working, "").to_string();
        }
    } else if let Some(caps) = SIMPLE_RECUR_PATTERN.captures(&working) {
        let pattern = caps.get(1).map(|m| m.as_str()).and_then(|word| match word {
            "daily" => Some(RecurrencePattern::Daily),
            "weekly" => Some(RecurrencePattern::Weekly),
            "monthly" => Some(RecurrencePattern::Monthly),
            "yearly" => Some(RecurrencePattern::Yearly),
            _ => None,
        });
        if let Some(pattern) = pattern {
            parsed.recurrence = Some((pattern, 1));
            working = SIMPLE_RECUR_PATTERN.replace(&working, "").to_string();
        }
    }

    parsed.title = working.split_whitespace().collect::<Vec<_>>().join(" ");
    parsed
}

fn unit_pattern(unit: &str) -> Option<RecurrencePattern> {
    match unit {
        "day" => Some(RecurrencePattern::Daily),
        "week" => Some(RecurrencePattern::Weekly),
        "month" => Some(RecurrencePattern::Monthly),
        "year" => Some(RecurrencePattern::Yearly),
        _ => None,
    }
}
