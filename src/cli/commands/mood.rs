//! Mood recording.

use crate::cli::args::OutputFormat;
use crate::error::TallyError;
use crate::model::{mood_emoji, MoodRecord};
use crate::output::to_json;
use crate::storage::Store;

/// Record today's mood on the 1–5 scale.
///
/// # Errors
///
/// Returns an error if the store cannot be read or written.
pub fn mood(
    store: &mut Store,
    value: u8,
    notes: Option<String>,
    format: OutputFormat,
) -> Result<String, TallyError> {
    let mut moods = store.load_moods()?;
    let now = store.now();
    let today = now.date_naive();

    let record = MoodRecord::new(value, notes, now);
    moods.insert(today, record.clone());
    store.save_moods(&moods)?;

    match format {
        OutputFormat::Json => to_json(&record),
        OutputFormat::Pretty => Ok(format!(
            "Recorded mood {} {} for {today}",
            record.mood,
            mood_emoji(record.mood)
        )),
    }
}
