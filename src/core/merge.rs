//! Merging habit templates into a day's entries.

use std::collections::HashMap;

use crate::model::{HabitEntry, HabitTemplate};

/// Merge the current habit templates into an existing day's entries.
///
/// The templates define which habits the day tracks and supply every
/// display field (name, emoji, category, time of day). The only thing an
/// existing entry contributes is its `completed` flag; habits the day has
/// not seen before start out not completed. Entries whose template no
/// longer exists are dropped — historical days are never rewritten through
/// this path, only the day currently being edited.
#[must_use]
pub fn merge_day_habits(existing: &[HabitEntry], templates: &[HabitTemplate]) -> Vec<HabitEntry> {
    let completed_by_id: HashMap<&str, bool> = existing
        .iter()
        .map(|e| (e.id.as_str(), e.completed))
        .collect();

    templates
        .iter()
        .map(|template| {
            let mut entry = HabitEntry::from_template(template);
            if let Some(&completed) = completed_by_id.get(template.id.as_str()) {
                entry.completed = completed;
            }
            entry
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TimeOfDay;

    #[test]
    fn test_existing_completion_wins() {
        let templates = vec![
            HabitTemplate::new("1", "Meditate"),
            HabitTemplate::new("2", "Exercise"),
        ];
        let mut existing = vec![HabitEntry::from_template(&templates[0])];
        existing[0].completed = true;

        let merged = merge_day_habits(&existing, &templates);

        assert_eq!(merged.len(), 2);
        assert!(merged[0].completed);
        assert!(!merged[1].completed);
    }

    #[test]
    fn test_template_fields_win() {
        let old_template = HabitTemplate::new("1", "Jog").with_emoji("🏃");
        let mut existing = vec![HabitEntry::from_template(&old_template)];
        existing[0].completed = true;

        // Renamed and rescheduled since the day was first saved
        let templates = vec![HabitTemplate::new("1", "Morning run")
            .with_emoji("🏃")
            .with_time_of_day(TimeOfDay::Morning)];

        let merged = merge_day_habits(&existing, &templates);

        assert_eq!(merged[0].name, "Morning run");
        assert_eq!(merged[0].time_of_day, TimeOfDay::Morning);
        assert!(merged[0].completed);
    }

    #[test]
    fn test_removed_template_dropped() {
        let templates = vec![HabitTemplate::new("2", "Read")];
        let existing = vec![HabitEntry::from_template(&HabitTemplate::new("1", "Old"))];

        let merged = merge_day_habits(&existing, &templates);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, "2");
    }

    #[test]
    fn test_empty_existing_defaults_incomplete() {
        let templates = vec![HabitTemplate::new("1", "Meditate")];
        let merged = merge_day_habits(&[], &templates);
        assert!(!merged[0].completed);
    }
}
