//! Terminal visualization for statistics.
//!
//! Provides ASCII charts and calendar renderings for the stats commands.

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate};

/// Characters for sparkline rendering.
const BAR_CHARS: [char; 8] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇'];
const FULL_BLOCK: char = '█';

/// Render a horizontal bar chart.
///
/// # Arguments
///
/// * `data` - Vec of (label, value) pairs
/// * `max_label_width` - Maximum width for labels
/// * `bar_width` - Width of the bar portion
pub fn render_bar_chart(
    data: &[(String, usize)],
    max_label_width: usize,
    bar_width: usize,
) -> String {
    if data.is_empty() {
        return String::new();
    }

    let max_value = data.iter().map(|(_, v)| *v).max().unwrap_or(1).max(1);
    let mut lines = Vec::new();

    for (label, value) in data {
        let truncated_label = if label.chars().count() > max_label_width {
            let prefix: String = label.chars().take(max_label_width.saturating_sub(3)).collect();
            format!("{prefix}...")
        } else {
            format!("{label:max_label_width$}")
        };

        let bar_length = (*value as f64 / max_value as f64 * bar_width as f64) as usize;
        let bar = FULL_BLOCK.to_string().repeat(bar_length);
        let padding = " ".repeat(bar_width - bar_length);

        lines.push(format!("{truncated_label} |{bar}{padding} {value}"));
    }

    lines.join("\n")
}

/// Render a sparkline (compact inline chart).
pub fn render_sparkline(values: &[usize]) -> String {
    if values.is_empty() {
        return String::new();
    }

    let max_value = *values.iter().max().unwrap_or(&1);
    let max_value = max_value.max(1);

    values
        .iter()
        .map(|&v| {
            let normalized = (v as f64 / max_value as f64 * 7.0) as usize;
            if v == 0 {
                BAR_CHARS[0]
            } else {
                BAR_CHARS[normalized.min(7)]
            }
        })
        .collect()
}

/// Render a habit completion calendar.
///
/// Seven rows (Monday through Sunday), one column per week, newest week
/// on the right. `history` is (date, completed) pairs; days before the
/// window or after `today` render blank.
pub fn render_habit_heatmap(
    history: &[(NaiveDate, bool)],
    today: NaiveDate,
    weeks: usize,
) -> String {
    if weeks == 0 {
        return String::new();
    }

    let completed: HashSet<NaiveDate> = history
        .iter()
        .filter(|(_, done)| *done)
        .map(|(date, _)| *date)
        .collect();
    let tracked: HashSet<NaiveDate> = history.iter().map(|(date, _)| *date).collect();

    // Align the grid so each row is a fixed weekday
    let window_start = today - Duration::days(weeks as i64 * 7 - 1);
    let grid_start = week_monday(window_start);

    let day_labels = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
    // One extra column when the window does not start on a Monday
    let columns = weeks + 1;

    let mut lines = Vec::new();
    for (row, label) in day_labels.iter().enumerate() {
        let mut line = format!("{label} ");
        for col in 0..columns {
            let date = grid_start + Duration::days((col * 7 + row) as i64);
            let cell = if date > today || date < window_start {
                ' '
            } else if completed.contains(&date) {
                FULL_BLOCK
            } else if tracked.contains(&date) {
                '·'
            } else {
                ' '
            };
            line.push(cell);
            line.push(' ');
        }
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

/// The Monday on or before `date`.
fn week_monday(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_monday();
    date - Duration::days(i64::from(back))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_bar_chart_scales() {
        let data = vec![("a".to_string(), 10), ("b".to_string(), 5)];
        let chart = render_bar_chart(&data, 5, 10);

        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].matches(FULL_BLOCK).count() > lines[1].matches(FULL_BLOCK).count());
    }

    #[test]
    fn test_bar_chart_empty() {
        assert_eq!(render_bar_chart(&[], 5, 10), "");
    }

    #[test]
    fn test_sparkline_zero_is_blank() {
        let line = render_sparkline(&[0, 4, 8]);
        let chars: Vec<char> = line.chars().collect();
        assert_eq!(chars[0], ' ');
        assert_eq!(chars[2], '▇');
    }

    #[test]
    fn test_heatmap_has_weekday_rows() {
        let today = date(2024, 3, 6);
        let history = vec![(date(2024, 3, 5), true), (date(2024, 3, 6), false)];

        let map = render_habit_heatmap(&history, today, 2);
        let lines: Vec<&str> = map.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[0].starts_with("Mon"));
        assert!(lines[6].starts_with("Sun"));

        // Tuesday the 5th was completed
        assert!(lines[1].contains(FULL_BLOCK));
    }

    #[test]
    fn test_weekday_alignment() {
        assert_eq!(week_monday(date(2024, 3, 6)), date(2024, 3, 4));
        assert_eq!(week_monday(date(2024, 3, 4)), date(2024, 3, 4));
    }
}
