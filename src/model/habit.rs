//! Habit templates and daily habit entries.
//!
//! A `HabitTemplate` defines a habit (name, emoji, category, time of day);
//! a `HabitEntry` is that habit's instantiation on one particular day,
//! carrying the `completed` flag. Templates live in their own store and are
//! merged into each day's entries by `core::merge`.

use serde::{Deserialize, Serialize};

/// When during the day a habit is meant to be done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Night,
    #[default]
    Anytime,
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Morning => write!(f, "morning"),
            Self::Night => write!(f, "night"),
            Self::Anytime => write!(f, "anytime"),
        }
    }
}

/// Display descriptor for a habit category.
///
/// Denormalized onto every entry so historical days keep the colors they
/// were tracked with even if the category is later edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub bg_color: String,
    #[serde(default)]
    pub border_color: String,
}

impl Category {
    /// Create a category with just a name.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

/// A habit definition, stable across days.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitTemplate {
    /// Stable identifier; entries reference it day after day.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub time_of_day: TimeOfDay,
    /// Self-assessed difficulty, 1 (trivial) to 5 (hard).
    #[serde(default)]
    pub difficulty: Option<u8>,
}

impl HabitTemplate {
    /// Create a template with defaults for the optional fields.
    #[must_use]
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            emoji: String::new(),
            category: Category::default(),
            time_of_day: TimeOfDay::Anytime,
            difficulty: None,
        }
    }

    /// Set the emoji.
    #[must_use]
    pub fn with_emoji(mut self, emoji: &str) -> Self {
        self.emoji = emoji.to_string();
        self
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Set the time of day.
    #[must_use]
    pub const fn with_time_of_day(mut self, time_of_day: TimeOfDay) -> Self {
        self.time_of_day = time_of_day;
        self
    }

    /// Set the difficulty (clamped to 1..=5).
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: u8) -> Self {
        self.difficulty = Some(difficulty.clamp(1, 5));
        self
    }
}

/// One habit's state on one particular day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitEntry {
    /// Id of the defining template.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub category: Category,
    pub completed: bool,
    #[serde(default)]
    pub time_of_day: TimeOfDay,
}

impl HabitEntry {
    /// Instantiate a template for a new day, not yet completed.
    #[must_use]
    pub fn from_template(template: &HabitTemplate) -> Self {
        Self {
            id: template.id.clone(),
            name: template.name.clone(),
            emoji: template.emoji.clone(),
            category: template.category.clone(),
            completed: false,
            time_of_day: template.time_of_day,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_builder() {
        let template = HabitTemplate::new("1", "Meditate")
            .with_emoji("🧘")
            .with_category(Category::named("Wellness"))
            .with_time_of_day(TimeOfDay::Morning)
            .with_difficulty(2);

        assert_eq!(template.name, "Meditate");
        assert_eq!(template.category.name, "Wellness");
        assert_eq!(template.time_of_day, TimeOfDay::Morning);
        assert_eq!(template.difficulty, Some(2));
    }

    #[test]
    fn test_difficulty_clamped() {
        let template = HabitTemplate::new("1", "Run").with_difficulty(9);
        assert_eq!(template.difficulty, Some(5));
    }

    #[test]
    fn test_entry_from_template() {
        let template = HabitTemplate::new("42", "Read").with_emoji("📚");
        let entry = HabitEntry::from_template(&template);

        assert_eq!(entry.id, "42");
        assert_eq!(entry.name, "Read");
        assert!(!entry.completed);
    }
}
