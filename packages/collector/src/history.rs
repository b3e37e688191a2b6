//! Capped history of recent searches.

use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{HISTORY_FILE, MAX_HISTORY_ENTRIES};
use crate::error::Result;
use crate::output::write_json_atomic;

/// One search as stored in the history file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub query: String,
    /// Number of matching verses before the result limit.
    pub count: usize,
    pub timestamp: DateTime<Utc>,
}

/// History file that belongs to a verse file.
///
/// # Example
///
/// ```
/// use std::path::{Path, PathBuf};
/// use kjv_collector::history::history_path;
///
/// assert_eq!(
///     history_path(Path::new("data/bible-kjv.json")),
///     PathBuf::from("data/search-history.json")
/// );
/// ```
#[must_use]
pub fn history_path(verse_file: &Path) -> PathBuf {
    verse_file
        .parent()
        .map_or_else(|| PathBuf::from(HISTORY_FILE), |dir| dir.join(HISTORY_FILE))
}

/// Load the history, newest first. A missing file is an empty history.
pub fn load_history(path: &Path) -> Result<Vec<HistoryEntry>> {
    match File::open(path) {
        Ok(file) => Ok(serde_json::from_reader(BufReader::new(file))?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

/// Put a search at the front of the history and keep the newest
/// [`MAX_HISTORY_ENTRIES`].
pub fn record_search(path: &Path, query: &str, count: usize) -> Result<Vec<HistoryEntry>> {
    let mut history = load_history(path)?;
    history.insert(
        0,
        HistoryEntry {
            query: query.to_string(),
            count,
            timestamp: Utc::now(),
        },
    );
    history.truncate(MAX_HISTORY_ENTRIES);

    write_json_atomic(path, &history)?;
    tracing::debug!(path = %path.display(), entries = history.len(), "Saved search history");
    Ok(history)
}
