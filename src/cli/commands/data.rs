//! Data export.

use crate::error::TallyError;
use crate::output::to_json;
use crate::storage::Store;

/// Dump every document as one JSON value.
///
/// # Errors
///
/// Returns an error if any document cannot be read.
pub fn export(store: &mut Store) -> Result<String, TallyError> {
    let value = store.export()?;
    to_json(&value)
}
