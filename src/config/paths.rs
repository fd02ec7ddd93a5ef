//! Path resolution for tally configuration and data files.
//!
//! All tally data is stored in `~/.tally/` (overridable via `TALLY_HOME`):
//! - `config.yaml` - Main configuration file
//! - `days.json` - Day records (habits, weight), keyed by ISO date
//! - `todos.json` - Todo list, including recurring templates
//! - `moods.json` - Mood records, keyed by ISO date
//! - `habits.json` - Habit templates
//! - `paused.json` - Paused recurring-template ids
//! - `reviews.json` - Saved weekly/monthly reviews

use std::path::PathBuf;

use crate::error::TallyError;

/// Paths to tally configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.tally/`
    pub root: PathBuf,
    /// Config file: `~/.tally/config.yaml`
    pub config_file: PathBuf,
    /// Day records document.
    pub days_file: PathBuf,
    /// Todos document.
    pub todos_file: PathBuf,
    /// Mood records document.
    pub moods_file: PathBuf,
    /// Habit templates document.
    pub habits_file: PathBuf,
    /// Paused recurring ids document.
    pub paused_file: PathBuf,
    /// Saved reviews document.
    pub reviews_file: PathBuf,
}

impl Paths {
    /// Create paths based on `TALLY_HOME` or the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if neither `TALLY_HOME` nor `HOME` is set.
    pub fn new() -> Result<Self, TallyError> {
        if let Ok(root) = std::env::var("TALLY_HOME") {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME")
            .map_err(|_| TallyError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_root(PathBuf::from(home).join(".tally")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            days_file: root.join("days.json"),
            todos_file: root.join("todos.json"),
            moods_file: root.join("moods.json"),
            habits_file: root.join("habits.json"),
            paused_file: root.join("paused.json"),
            reviews_file: root.join("reviews.json"),
            root,
        }
    }

    /// Ensure the data directory exists, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), TallyError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                TallyError::Config(format!(
                    "Failed to create directory {:?}: {}",
                    self.root, e
                ))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_root_layout() {
        let paths = Paths::with_root(PathBuf::from("/tmp/tally-test"));
        assert_eq!(paths.config_file, PathBuf::from("/tmp/tally-test/config.yaml"));
        assert_eq!(paths.days_file, PathBuf::from("/tmp/tally-test/days.json"));
        assert_eq!(paths.reviews_file, PathBuf::from("/tmp/tally-test/reviews.json"));
    }
}
