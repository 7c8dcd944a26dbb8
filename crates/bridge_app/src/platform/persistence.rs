use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use bridge_core::BACKEND_URL_STORAGE_KEY;
use bridge_engine::{AtomicFileWriter, PersistError};
use bridge_logging::{bridge_error, bridge_info, bridge_warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const STORAGE_FILENAME: &str = "storage.ron";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("failed to serialize storage: {0}")]
    Serialize(#[from] ron::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedStorage {
    entries: BTreeMap<String, String>,
}

/// Small durable key/value store, one RON file per app.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(STORAGE_FILENAME)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        read_storage(&self.path()).entries.remove(key)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut storage = read_storage(&self.path());
        storage.entries.insert(key.to_string(), value.to_string());

        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(&storage, pretty)?;
        AtomicFileWriter::new(self.dir.clone()).write(STORAGE_FILENAME, &content)?;
        Ok(())
    }
}

/// Missing or unreadable storage is treated as empty.
fn read_storage(path: &Path) -> PersistedStorage {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return PersistedStorage::default();
        }
        Err(err) => {
            bridge_warn!("Failed to read storage from {:?}: {}", path, err);
            return PersistedStorage::default();
        }
    };

    match ron::from_str(&content) {
        Ok(storage) => storage,
        Err(err) => {
            bridge_warn!("Failed to parse storage from {:?}: {}", path, err);
            PersistedStorage::default()
        }
    }
}

pub(crate) fn load_backend_url(storage: &LocalStorage) -> Option<String> {
    let url = storage.get(BACKEND_URL_STORAGE_KEY);
    if let Some(url) = &url {
        bridge_info!("Loaded saved backend URL {} from {:?}", url, storage.path());
    }
    url
}

pub(crate) fn save_backend_url(storage: &LocalStorage, url: &str) {
    match storage.set(BACKEND_URL_STORAGE_KEY, url) {
        Ok(()) => bridge_info!("Saved backend URL to {:?}", storage.path()),
        Err(err) => bridge_error!(
            "Failed to save backend URL to {:?}: {}",
            storage.path(),
            err
        ),
    }
}
