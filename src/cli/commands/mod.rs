//! Command implementations.
//!
//! Each command loads the documents it needs from the store, runs the
//! relevant engine, and renders the result in the requested format.

mod data;
mod habits;
mod mood;
mod review;
mod shell;
mod stats;
mod streaks;
mod todos;

pub use data::export;
pub use habits::{habit, log, today, weight};
pub use mood::mood;
pub use review::review;
pub use shell::completions;
pub use stats::stats;
pub use streaks::streaks;
pub use todos::todo;

use crate::error::TallyError;
use crate::model::HabitTemplate;

/// Find a habit template by id or by a case-insensitive name fragment.
fn find_habit<'a>(
    templates: &'a [HabitTemplate],
    query: &str,
) -> Result<&'a HabitTemplate, TallyError> {
    if let Some(template) = templates.iter().find(|t| t.id == query) {
        return Ok(template);
    }

    let needle = query.to_lowercase();
    let mut matches = templates
        .iter()
        .filter(|t| t.name.to_lowercase().contains(&needle));

    match (matches.next(), matches.next()) {
        (Some(template), None) => Ok(template),
        (Some(_), Some(_)) => Err(TallyError::Config(format!(
            "Habit '{query}' matches more than one habit, be more specific"
        ))),
        _ => Err(TallyError::NotFound(format!("Habit '{query}' not found"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_habit_by_id() {
        let templates = vec![HabitTemplate::new("42", "Read")];
        assert_eq!(find_habit(&templates, "42").unwrap().name, "Read");
    }

    #[test]
    fn test_find_habit_by_fragment() {
        let templates = vec![
            HabitTemplate::new("1", "Meditate"),
            HabitTemplate::new("2", "Read"),
        ];
        assert_eq!(find_habit(&templates, "medi").unwrap().id, "1");
    }

    #[test]
    fn test_find_habit_ambiguous() {
        let templates = vec![
            HabitTemplate::new("1", "Read fiction"),
            HabitTemplate::new("2", "Read news"),
        ];
        assert!(matches!(
            find_habit(&templates, "read"),
            Err(TallyError::Config(_))
        ));
    }

    #[test]
    fn test_find_habit_missing() {
        assert!(matches!(
            find_habit(&[], "anything"),
            Err(TallyError::NotFound(_))
        ));
    }
}
