//! JSON document store.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use super::cache::{Cache, Clock, SystemClock};
use crate::config::Paths;
use crate::error::TallyError;
use crate::features::review::Review;
use crate::model::{DayStore, HabitTemplate, MoodStore, TodoItem};

/// How long a read of the day store stays fresh before hitting disk again.
const DAY_CACHE_TTL_SECS: i64 = 5;

/// Handle to the on-disk documents.
///
/// Documents are read and written whole. Writes go through a temp file
/// and rename so a crash never leaves a half-written document behind.
pub struct Store {
    paths: Paths,
    clock: Box<dyn Clock>,
    day_cache: Cache<DayStore>,
}

impl Store {
    /// Open the store, creating the data directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn open(paths: Paths) -> Result<Self, TallyError> {
        Self::with_clock(paths, Box::new(SystemClock))
    }

    /// Open the store with a specific clock (used by tests).
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn with_clock(paths: Paths, clock: Box<dyn Clock>) -> Result<Self, TallyError> {
        paths.ensure_dirs()?;
        Ok(Self {
            paths,
            clock,
            day_cache: Cache::new(Duration::seconds(DAY_CACHE_TTL_SECS)),
        })
    }

    /// The store's notion of now. Commands use this rather than reading
    /// the wall clock directly so the whole write path shares one instant.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Load the day records, served from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns an error if the document exists but cannot be read or parsed.
    pub fn load_days(&mut self) -> Result<DayStore, TallyError> {
        let now = self.clock.now();
        if let Some(days) = self.day_cache.get(now) {
            return Ok(days.clone());
        }
        let days: DayStore = read_json(&self.paths.days_file)?;
        self.day_cache.put(days.clone(), now);
        Ok(days)
    }

    /// Persist the day records and invalidate the read cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    pub fn save_days(&mut self, days: &DayStore) -> Result<(), TallyError> {
        write_json(&self.paths.days_file, days)?;
        self.day_cache.clear();
        Ok(())
    }

    /// Load all todos.
    ///
    /// # Errors
    ///
    /// Returns an error if the document exists but cannot be read or parsed.
    pub fn load_todos(&self) -> Result<Vec<TodoItem>, TallyError> {
        read_json(&self.paths.todos_file)
    }

    /// Persist all todos.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    pub fn save_todos(&self, todos: &[TodoItem]) -> Result<(), TallyError> {
        write_json(&self.paths.todos_file, &todos)
    }

    /// Load all mood records.
    ///
    /// # Errors
    ///
    /// Returns an error if the document exists but cannot be read or parsed.
    pub fn load_moods(&self) -> Result<MoodStore, TallyError> {
        read_json(&self.paths.moods_file)
    }

    /// Persist all mood records.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    pub fn save_moods(&self, moods: &MoodStore) -> Result<(), TallyError> {
        write_json(&self.paths.moods_file, moods)
    }

    /// Load the habit templates.
    ///
    /// # Errors
    ///
    /// Returns an error if the document exists but cannot be read or parsed.
    pub fn load_habits(&self) -> Result<Vec<HabitTemplate>, TallyError> {
        read_json(&self.paths.habits_file)
    }

    /// Persist the habit templates.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    pub fn save_habits(&self, habits: &[HabitTemplate]) -> Result<(), TallyError> {
        write_json(&self.paths.habits_file, &habits)
    }

    /// Load the paused recurring-template ids.
    ///
    /// # Errors
    ///
    /// Returns an error if the document exists but cannot be read or parsed.
    pub fn load_paused(&self) -> Result<HashSet<String>, TallyError> {
        read_json(&self.paths.paused_file)
    }

    /// Persist the paused recurring-template ids.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    pub fn save_paused(&self, paused: &HashSet<String>) -> Result<(), TallyError> {
        write_json(&self.paths.paused_file, paused)
    }

    /// Load all saved reviews.
    ///
    /// # Errors
    ///
    /// Returns an error if the document exists but cannot be read or parsed.
    pub fn load_reviews(&self) -> Result<Vec<Review>, TallyError> {
        read_json(&self.paths.reviews_file)
    }

    /// Save a generated review, assigning it an id.
    ///
    /// # Errors
    ///
    /// Returns an error if the reviews document cannot be read or written.
    pub fn save_review(&self, mut review: Review) -> Result<Review, TallyError> {
        let mut reviews = self.load_reviews()?;
        review.id = Some(self.clock.now().timestamp_millis().to_string());
        reviews.push(review.clone());
        write_json(&self.paths.reviews_file, &reviews)?;
        Ok(review)
    }

    /// Assemble every document into one export value.
    ///
    /// # Errors
    ///
    /// Returns an error if any document cannot be read.
    pub fn export(&mut self) -> Result<serde_json::Value, TallyError> {
        Ok(json!({
            "days": self.load_days()?,
            "todos": self.load_todos()?,
            "moods": self.load_moods()?,
            "habits": self.load_habits()?,
            "pausedRecurring": self.load_paused()?,
            "reviews": self.load_reviews()?,
            "exportedAt": self.clock.now(),
        }))
    }
}

/// Read a JSON document, treating a missing or empty file as the default.
fn read_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T, TallyError> {
    if !path.exists() {
        return Ok(T::default());
    }
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    Ok(serde_json::from_str(&content)?)
}

/// Write a JSON document atomically (temp file, then rename).
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), TallyError> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    use crate::model::{DayRecord, HabitEntry};

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn test_store(dir: &TempDir) -> Store {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, 6, 12, 0, 0).unwrap());
        Store::with_clock(Paths::with_root(dir.path().to_path_buf()), Box::new(clock)).unwrap()
    }

    #[test]
    fn test_missing_documents_default() {
        let dir = TempDir::new().unwrap();
        let mut store = test_store(&dir);

        assert!(store.load_days().unwrap().is_empty());
        assert!(store.load_todos().unwrap().is_empty());
        assert!(store.load_paused().unwrap().is_empty());
    }

    #[test]
    fn test_days_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = test_store(&dir);

        let mut days = DayStore::new();
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        let entry = HabitEntry::from_template(&crate::model::HabitTemplate::new("1", "Read"));
        days.insert(date, DayRecord::new(vec![entry], Some(150.5), store.now()));

        store.save_days(&days).unwrap();
        let loaded = store.load_days().unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[&date].total_count, 1);
        assert_eq!(loaded[&date].weight, Some(150.5));
    }

    #[test]
    fn test_day_key_is_iso_date() {
        let dir = TempDir::new().unwrap();
        let mut store = test_store(&dir);

        let mut days = DayStore::new();
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        days.insert(date, DayRecord::new(Vec::new(), None, store.now()));
        store.save_days(&days).unwrap();

        let raw = fs::read_to_string(dir.path().join("days.json")).unwrap();
        assert!(raw.contains("\"2024-03-06\""));
    }

    #[test]
    fn test_save_review_assigns_id() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        let review = crate::features::review::generate_weekly_review(
            &DayStore::new(),
            &crate::model::MoodStore::new(),
            store.now(),
        );
        let saved = store.save_review(review).unwrap();

        assert!(saved.id.is_some());
        assert_eq!(store.load_reviews().unwrap().len(), 1);
    }
}
