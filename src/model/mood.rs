//! Daily mood records.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// All mood records, keyed by calendar day.
pub type MoodStore = BTreeMap<NaiveDate, MoodRecord>;

/// One day's mood on a 1 (awful) to 5 (great) scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodRecord {
    pub mood: u8,
    #[serde(default)]
    pub notes: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl MoodRecord {
    /// Create a record, clamping the mood into the 1..=5 scale.
    #[must_use]
    pub fn new(mood: u8, notes: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            mood: mood.clamp(1, 5),
            notes,
            timestamp: now,
        }
    }
}

/// Emoji for a mood value.
#[must_use]
pub const fn mood_emoji(mood: u8) -> &'static str {
    match mood {
        1 => "😢",
        2 => "😕",
        4 => "😊",
        5 => "😄",
        _ => "😐",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_clamped() {
        assert_eq!(MoodRecord::new(0, None, Utc::now()).mood, 1);
        assert_eq!(MoodRecord::new(7, None, Utc::now()).mood, 5);
        assert_eq!(MoodRecord::new(3, None, Utc::now()).mood, 3);
    }

    #[test]
    fn test_mood_emoji() {
        assert_eq!(mood_emoji(1), "😢");
        assert_eq!(mood_emoji(3), "😐");
        assert_eq!(mood_emoji(5), "😄");
    }
}
