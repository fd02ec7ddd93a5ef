//! Configuration settings for tally.
//!
//! Settings are loaded from `~/.tally/config.yaml`.

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::TallyError;
use crate::features::analytics::Timeframe;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Statistics settings.
    pub stats: StatsConfig,
    /// Review settings.
    pub review: ReviewConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    pub default_output: OutputFormat,
}

/// Statistics settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Default reporting window for stats commands.
    pub default_timeframe: Timeframe,
    /// Weeks shown in the habit heatmap.
    pub heatmap_weeks: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            default_timeframe: Timeframe::All,
            heatmap_weeks: 12,
        }
    }
}

/// Review settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReviewConfig {
    /// Save every generated review to `reviews.json` automatically.
    pub auto_save: bool,
}

impl Config {
    /// Load the configuration, falling back to defaults when the file is
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(paths: &Paths) -> Result<Self, TallyError> {
        if !paths.config_file.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&paths.config_file)
            .map_err(|e| TallyError::Config(format!("Failed to read config: {e}")))?;
        serde_yaml::from_str(&content)
            .map_err(|e| TallyError::Config(format!("Failed to parse config: {e}")))
    }

    /// Write the configuration to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, paths: &Paths) -> Result<(), TallyError> {
        paths.ensure_dirs()?;
        let content = serde_yaml::to_string(self)
            .map_err(|e| TallyError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(&paths.config_file, content)
            .map_err(|e| TallyError::Config(format!("Failed to write config: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_missing() {
        let dir = TempDir::new().unwrap();
        let paths = Paths::with_root(dir.path().to_path_buf());

        let config = Config::load(&paths).unwrap();
        assert_eq!(config.stats.heatmap_weeks, 12);
        assert!(!config.review.auto_save);
    }

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let paths = Paths::with_root(dir.path().to_path_buf());

        let mut config = Config::default();
        config.stats.heatmap_weeks = 4;
        config.review.auto_save = true;
        config.save(&paths).unwrap();

        let loaded = Config::load(&paths).unwrap();
        assert_eq!(loaded.stats.heatmap_weeks, 4);
        assert!(loaded.review.auto_save);
    }
}
