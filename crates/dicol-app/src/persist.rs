use std::path::{Path, PathBuf};

use dicol_types::{NormalizedRecord, RawEntry};

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// File-safe form of a headword: ASCII letters and digits lower-cased,
/// one `_` per UTF-16 unit of anything else
pub fn sanitize_headword(headword: &str) -> String {
    let mut safe = String::with_capacity(headword.len());
    for c in headword.chars() {
        if c.is_ascii_alphanumeric() {
            safe.push(c.to_ascii_lowercase());
        } else {
            safe.extend(std::iter::repeat_n('_', c.len_utf16()));
        }
    }
    safe
}

pub fn dump_file_name(headword: &str) -> String {
    format!("entry_{}.json", sanitize_headword(headword))
}

/// Write a raw entry to `dir` for inspection.
///
/// Entries without a headword are skipped and return `None`.
pub async fn dump_entry(dir: &Path, entry: &RawEntry) -> Result<Option<PathBuf>, PersistError> {
    let Some(headword) = entry.headword() else {
        tracing::warn!("Cannot dump entry without headword");
        return Ok(None);
    };

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(dump_file_name(headword));
    let json = serde_json::to_string_pretty(entry)?;
    tokio::fs::write(&path, json).await?;

    tracing::debug!("Entry '{}' dumped to {}", headword, path.display());
    Ok(Some(path))
}

/// Write the whole dataset as one pretty-printed JSON array
pub async fn write_records(path: &Path, records: &[NormalizedRecord]) -> Result<(), PersistError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(records)?;
    tokio::fs::write(path, json).await?;

    tracing::info!("Saved {} records to {}", records.len(), path.display());
    Ok(())
}
