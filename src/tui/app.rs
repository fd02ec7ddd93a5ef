//! Application state for the TUI.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::core::merge_day_habits;
use crate::error::TallyError;
use crate::features::streaks::{all_streaks, StreakResult};
use crate::model::{DayRecord, HabitEntry, HabitTemplate};
use crate::storage::Store;

/// Application state.
pub struct App<'a> {
    /// Handle to the document store.
    store: &'a mut Store,
    /// Today's date, fixed at startup.
    pub today: NaiveDate,
    /// Today's habit entries (templates merged with logged state).
    pub entries: Vec<HabitEntry>,
    /// Habit templates, for the streak panel labels.
    pub templates: Vec<HabitTemplate>,
    /// Streaks per habit id.
    pub streaks: BTreeMap<String, StreakResult>,
    /// Currently selected index.
    pub selected: usize,
    /// Status message to display.
    pub status: Option<String>,
}

impl<'a> App<'a> {
    /// Create a new app instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn new(store: &'a mut Store) -> Result<Self, TallyError> {
        let today = store.now().date_naive();
        let days = store.load_days()?;
        let templates = store.load_habits()?;

        let existing = days
            .get(&today)
            .map(|record| record.habits.as_slice())
            .unwrap_or(&[]);
        let entries = merge_day_habits(existing, &templates);
        let streaks = all_streaks(&days, today);

        Ok(Self {
            store,
            today,
            entries,
            templates,
            streaks,
            selected: 0,
            status: Some("Press ? for help".to_string()),
        })
    }

    /// Reload entries and streaks from the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn refresh(&mut self) -> Result<(), TallyError> {
        let days = self.store.load_days()?;
        self.templates = self.store.load_habits()?;

        let existing = days
            .get(&self.today)
            .map(|record| record.habits.as_slice())
            .unwrap_or(&[]);
        self.entries = merge_day_habits(existing, &self.templates);
        self.streaks = all_streaks(&days, self.today);

        // Adjust selection if it's out of bounds
        if !self.entries.is_empty() && self.selected >= self.entries.len() {
            self.selected = self.entries.len() - 1;
        }

        self.status = Some(format!("Refreshed {} habits", self.entries.len()));
        Ok(())
    }

    /// How many of today's habits are done.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.completed).count()
    }

    /// Move selection up.
    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// Move selection down.
    pub fn select_next(&mut self) {
        if !self.entries.is_empty() && self.selected < self.entries.len() - 1 {
            self.selected += 1;
        }
    }

    /// Jump to first item.
    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    /// Jump to last item.
    pub fn select_last(&mut self) {
        if !self.entries.is_empty() {
            self.selected = self.entries.len() - 1;
        }
    }

    /// Toggle the selected habit and persist today's record.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub fn toggle_selected(&mut self) -> Result<(), TallyError> {
        let Some(entry) = self.entries.get_mut(self.selected) else {
            return Ok(());
        };
        entry.completed = !entry.completed;
        let name = entry.name.clone();
        let completed = entry.completed;

        let now = self.store.now();
        let mut days = self.store.load_days()?;
        let weight = days.get(&self.today).and_then(|record| record.weight);
        days.insert(
            self.today,
            DayRecord::new(self.entries.clone(), weight, now),
        );
        self.store.save_days(&days)?;

        self.streaks = all_streaks(&days, self.today);
        self.status = Some(if completed {
            format!("Done: {name}")
        } else {
            format!("Undone: {name}")
        });
        Ok(())
    }
}
