//! JSON-file-backed key-value store.
//!
//! Stands in for the browser's persistent storage when driving the
//! session from a terminal: one JSON object per file, keys and raw
//! string values. Every mutation rewrites the whole file, matching the
//! read-modify-write granularity of the storage contract.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use sipayi_session::{KeyValueStore, StorageError};

/// Key-value store persisted as a single JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`, creating an empty one if the file does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] if the file exists but cannot
    /// be read or is not a JSON string map.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let entries = if path.exists() {
            let raw = std::fs::read_to_string(path)
                .map_err(|err| StorageError::Backend(err.to_string()))?;
            serde_json::from_str(&raw).map_err(|err| StorageError::Backend(err.to_string()))?
        } else {
            HashMap::new()
        };

        Ok(Self {
            path: path.to_owned(),
            entries,
        })
    }

    fn flush(&self) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(&self.entries)
            .map_err(|err| StorageError::Backend(err.to_string()))?;
        std::fs::write(&self.path, raw).map_err(|err| StorageError::Backend(err.to_string()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}
