//! Atomic page persistence
//!
//! A page document is either fully written or absent: content goes to a
//! temporary file in the target directory, which is then renamed into place.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors raised while writing into the export tree
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensures the export root exists and is writable, creating it if missing
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    // Writability check; the temp file is removed on drop
    NamedTempFile::new_in(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    Ok(())
}

/// Atomically writes `content` to `target`
///
/// A reader never observes a half-written file, and a failed write leaves no
/// file behind.
pub fn write_atomic(target: &Path, content: &str) -> Result<(), PersistError> {
    let dir = target
        .parent()
        .ok_or_else(|| PersistError::OutputDir(format!("{} has no parent", target.display())))?;
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(target).map_err(|e| PersistError::Io(e.error))?;
    Ok(())
}
