//! Reading entry snapshots.
//!
//! A snapshot is a JSON array of entries exported by the journaling front end.
//! It is read-only input for the query engine; nothing here writes entries.

use crate::entry::Entry;
use crate::errors::{AppError, AppResult};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Parses a snapshot from JSON text.
///
/// # Errors
///
/// Returns `AppError::Json` for malformed JSON and `AppError::Snapshot` when
/// two entries share an id.
///
/// # Examples
///
/// ```
/// use jotter::snapshot::parse_snapshot;
///
/// let entries = parse_snapshot(r#"[{
///     "id": "1b4e28ba-2fa1-11d2-883f-0016d3cca427",
///     "title": "Morning Walk",
///     "content": "<p>Felt calm</p>",
///     "tags": ["health"],
///     "date": "2024-01-15T08:30:00Z",
///     "sentiment": "positive"
/// }]"#).unwrap();
/// assert_eq!(entries.len(), 1);
/// ```
pub fn parse_snapshot(json: &str) -> AppResult<Vec<Entry>> {
    let entries: Vec<Entry> = serde_json::from_str(json)?;

    let mut seen = HashSet::with_capacity(entries.len());
    for entry in &entries {
        if !seen.insert(entry.id) {
            return Err(AppError::Snapshot(format!(
                "Duplicate entry id {}",
                entry.id
            )));
        }
    }

    debug!("Parsed {} entries from snapshot", entries.len());
    Ok(entries)
}

/// Reads and parses the snapshot at `path`.
///
/// # Errors
///
/// Returns `AppError::Io` when the file cannot be read, plus the errors of
/// [`parse_snapshot`].
pub async fn load_snapshot(path: &Path) -> AppResult<Vec<Entry>> {
    info!("Loading entry snapshot");
    let json = tokio::fs::read_to_string(path).await?;
    parse_snapshot(&json)
}
