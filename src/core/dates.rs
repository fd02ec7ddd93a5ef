//! Date parsing and calendar helpers.
//!
//! Natural language date parsing for CLI input, plus the few calendar
//! range helpers (week/month starts, trailing windows) the analytics and
//! review generators share.

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};

/// Parse a natural language date expression.
///
/// Supports patterns like:
/// - `today`, `tomorrow`, `yesterday`
/// - `monday`, `tuesday`, etc. (next occurrence)
/// - `in 3 days`, `in 2 weeks`
/// - `2024-12-15` (ISO format)
///
/// Returns `None` if the input cannot be parsed.
#[must_use]
pub fn parse_natural_date(input: &str) -> Option<NaiveDate> {
    parse_date_with(input, Local::now().date_naive())
}

/// Internal parsing logic with an explicit "today" for testability.
fn parse_date_with(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let input = input.trim().to_lowercase();

    match input.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        "yesterday" => return Some(today - Duration::days(1)),
        _ => {},
    }

    // "in X days/weeks"
    if let Some(date) = parse_relative_offset(&input, today) {
        return Some(date);
    }

    // Day of week ("monday", "next tuesday")
    if let Some(date) = parse_weekday(&input, today) {
        return Some(date);
    }

    // ISO format (2024-12-15)
    NaiveDate::parse_from_str(&input, "%Y-%m-%d").ok()
}

/// Parse "in X days/weeks/months" patterns.
fn parse_relative_offset(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split_whitespace().collect();

    if parts.len() >= 3 && parts[0] == "in" {
        let amount: i64 = parts[1].parse().ok()?;
        let unit = parts[2].trim_end_matches('s'); // Handle "days" and "day"

        let days = match unit {
            "day" => amount,
            "week" => amount * 7,
            "month" => amount * 30, // Approximate
            _ => return None,
        };

        return Some(today + Duration::days(days));
    }

    None
}

/// Parse weekday names to the next occurrence of that weekday.
fn parse_weekday(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let (is_next, day_str) = input
        .strip_prefix("next ")
        .map_or((false, input), |rest| (true, rest));

    let target = match day_str {
        "monday" | "mon" => Weekday::Mon,
        "tuesday" | "tue" | "tues" => Weekday::Tue,
        "wednesday" | "wed" => Weekday::Wed,
        "thursday" | "thu" | "thur" | "thurs" => Weekday::Thu,
        "friday" | "fri" => Weekday::Fri,
        "saturday" | "sat" => Weekday::Sat,
        "sunday" | "sun" => Weekday::Sun,
        _ => return None,
    };

    let mut days_until = (i64::from(target.num_days_from_sunday())
        - i64::from(today.weekday().num_days_from_sunday())
        + 7)
        % 7;

    // Same day or explicit "next" means a week out
    if days_until == 0 || is_next {
        days_until += 7;
    }

    Some(today + Duration::days(days_until))
}

/// The Sunday on or before `today` (weeks run Sunday through Saturday).
#[must_use]
pub fn week_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(i64::from(today.weekday().num_days_from_sunday()))
}

/// The first of `today`'s month.
#[must_use]
pub fn month_start(today: NaiveDate) -> NaiveDate {
    today.with_day(1).unwrap_or(today)
}

/// The last `n` calendar days ending at `today`, ascending.
#[must_use]
pub fn recent_days(today: NaiveDate, n: usize) -> Vec<NaiveDate> {
    (0..n)
        .rev()
        .map(|back| today - Duration::days(back as i64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_relative_words() {
        let today = date(2024, 3, 6); // a Wednesday
        assert_eq!(parse_date_with("today", today), Some(today));
        assert_eq!(parse_date_with("tomorrow", today), Some(date(2024, 3, 7)));
        assert_eq!(parse_date_with("yesterday", today), Some(date(2024, 3, 5)));
    }

    #[test]
    fn test_parse_in_n_days() {
        let today = date(2024, 3, 6);
        assert_eq!(parse_date_with("in 3 days", today), Some(date(2024, 3, 9)));
        assert_eq!(parse_date_with("in 2 weeks", today), Some(date(2024, 3, 20)));
    }

    #[test]
    fn test_parse_weekday_next_occurrence() {
        let today = date(2024, 3, 6); // Wednesday
        assert_eq!(parse_date_with("friday", today), Some(date(2024, 3, 8)));
        // Same weekday rolls a full week forward
        assert_eq!(parse_date_with("wednesday", today), Some(date(2024, 3, 13)));
        assert_eq!(parse_date_with("next friday", today), Some(date(2024, 3, 15)));
    }

    #[test]
    fn test_parse_iso() {
        let today = date(2024, 3, 6);
        assert_eq!(
            parse_date_with("2024-12-15", today),
            Some(date(2024, 12, 15))
        );
        assert_eq!(parse_date_with("not a date", today), None);
    }

    #[test]
    fn test_week_start_is_sunday() {
        assert_eq!(week_start(date(2024, 3, 6)), date(2024, 3, 3));
        // Sunday maps to itself
        assert_eq!(week_start(date(2024, 3, 3)), date(2024, 3, 3));
    }

    #[test]
    fn test_month_start() {
        assert_eq!(month_start(date(2024, 3, 6)), date(2024, 3, 1));
    }

    #[test]
    fn test_recent_days_ascending() {
        let days = recent_days(date(2024, 3, 6), 3);
        assert_eq!(days, vec![date(2024, 3, 4), date(2024, 3, 5), date(2024, 3, 6)]);
    }
}
