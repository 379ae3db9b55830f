// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use crate::extractors::PaperEntry;
use crate::utils::error::StorageError;

/// Default export file for a conference year, in the working directory.
pub fn default_json_path(year: u32) -> PathBuf {
    PathBuf::from(format!("cvpr_{}_accepted.json", year))
}

/// Renders papers as a pretty-printed JSON array (2-space indent, non-ASCII
/// kept as UTF-8). Identical input always produces identical bytes.
pub fn to_json(papers: &[PaperEntry]) -> Result<String, StorageError> {
    serde_json::to_string_pretty(papers)
        .map_err(|e| StorageError::SerializationError(e.to_string()))
}

/// Writes the papers to `path`, creating parent directories as needed.
pub fn write_json<P: AsRef<Path>>(papers: &[PaperEntry], path: P) -> Result<PathBuf, StorageError> {
    let file_path = path.as_ref().to_path_buf();

    // Create the parent directories if they don't exist
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(StorageError::IoError)?;
        }
    }

    let json = to_json(papers)?;
    fs::write(&file_path, json).map_err(StorageError::IoError)?;

    tracing::info!("Saved {} papers to {}", papers.len(), file_path.display());

    Ok(file_path)
}
