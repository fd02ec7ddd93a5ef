//! JSON output formatting for tally.

use serde::Serialize;

use crate::error::TallyError;

/// Serialize any value as pretty JSON for `--output json`.
///
/// # Errors
///
/// Returns `TallyError::Parse` if serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, TallyError> {
    Ok(serde_json::to_string_pretty(value)?)
}
