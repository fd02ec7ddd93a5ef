//! Output formatting for tally.

pub mod chart;
pub mod json;
pub mod pretty;

pub use chart::{render_bar_chart, render_habit_heatmap, render_sparkline};
pub use json::to_json;
pub use pretty::{format_day_pretty, format_todos_pretty};
