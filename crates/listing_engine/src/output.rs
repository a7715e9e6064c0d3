use std::fs;
use std::io::{self, Write};
use std::path::Path;

use engine_logging::engine_info;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::types::RoomPayload;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Write the normalized records as a pretty-printed JSON array, atomically
/// (temp file in the target directory, then rename).
///
/// Parent directories are created as needed; an existing file is replaced.
pub fn write_payloads(path: &Path, payloads: &[RoomPayload]) -> Result<(), PersistError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|error| PersistError::OutputDir(error.to_string()))?;

    let body = serde_json::to_string_pretty(payloads)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(body.as_bytes())?;
    tmp.write_all(b"\n")?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;

    // Replace existing file if present to keep determinism.
    if path.exists() {
        fs::remove_file(path)?;
    }
    tmp.persist(path).map_err(|error| PersistError::Io(error.error))?;

    engine_info!("wrote {} record(s) to {}", payloads.len(), path.display());
    Ok(())
}
