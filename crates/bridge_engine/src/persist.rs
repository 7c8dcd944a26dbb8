use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("cannot use {path:?} for bridge settings: {reason}")]
    StorageDir { path: PathBuf, reason: String },
    #[error("writing bridge settings failed: {0}")]
    Io(#[from] io::Error),
}

/// Makes sure the settings directory exists and really is a directory.
pub fn ensure_storage_dir(dir: &Path) -> Result<(), PersistError> {
    let storage_dir_error = |reason: String| PersistError::StorageDir {
        path: dir.to_path_buf(),
        reason,
    };
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(storage_dir_error("exists but is not a directory".into())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|e| storage_dir_error(e.to_string()))
        }
        Err(err) => Err(storage_dir_error(err.to_string())),
    }
}

/// Replaces settings files in one step: a crash mid-save leaves the previous
/// file intact.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_storage_dir(&self.dir)?;

        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(content.as_bytes())?;
        staged.as_file_mut().sync_all()?;

        let target = self.dir.join(filename);
        staged
            .persist(&target)
            .map_err(|err| PersistError::Io(err.error))?;
        Ok(target)
    }
}
