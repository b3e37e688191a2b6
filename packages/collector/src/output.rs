//! JSON output for collected verses.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::types::VerseRecord;

/// Save verses to `path` as a compact JSON array, replacing any existing file.
///
/// Writes to a temp file next to the target, syncs, then renames, so an
/// interrupted write never leaves a truncated verse file behind.
///
/// # Returns
/// Path to the saved file
pub fn save_json(path: &Path, records: &[VerseRecord]) -> Result<PathBuf> {
    write_json_atomic(path, records)?;
    tracing::info!(path = %path.display(), verses = records.len(), "Wrote verse file");
    Ok(path.to_path_buf())
}

/// Write `value` as compact JSON through a synced temp file and a rename.
pub(crate) fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent)?;
            parent.to_path_buf()
        }
        _ => PathBuf::from("."),
    };

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "verses.json".to_string());
    let temp_file = dir.join(format!(".{file_name}.tmp"));

    {
        let mut writer = BufWriter::new(File::create(&temp_file)?);
        serde_json::to_writer(&mut writer, value)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    Ok(())
}

/// Load a verse file written by [`save_json`].
pub fn load_json(path: &Path) -> Result<Vec<VerseRecord>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
