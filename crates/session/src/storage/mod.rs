//! Key-value storage boundary.
//!
//! The ordering site keeps its cart and order history under two logical
//! keys in whatever persistent store the host provides (browser profile
//! storage, a JSON file for the CLI, memory for tests). This module
//! defines that boundary as [`KeyValueStore`] plus the tolerant JSON
//! decode policy: an absent or malformed value reads back as the empty
//! collection, never as a hard failure.

pub mod secure;

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use thiserror::Error;

pub use secure::{EmptyKeyError, SecureStorage};

/// Errors surfaced by the storage boundary.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store itself failed (I/O, quota, ...).
    #[error("storage backend error: {0}")]
    Backend(String),

    /// A value could not be encoded for storage.
    #[error("failed to encode value for storage")]
    Encode(#[source] serde_json::Error),

    /// A stored value could not be decoded.
    ///
    /// Read paths log this and fall back to the empty collection; it is
    /// surfaced only for callers that want to distinguish corruption
    /// from absence.
    #[error("stored value under `{key}` is corrupted")]
    Corrupted {
        /// Storage key holding the corrupt value.
        key: String,
    },
}

/// A minimal persistent key-value store.
///
/// Mirrors the three operations the site uses on the browser's local
/// storage. Implementations must make each call atomic on its own;
/// read-modify-write sequences are serialized one level up by
/// [`crate::state::Session`].
pub trait KeyValueStore {
    /// Fetch the raw string stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] if the store cannot be written.
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;

    /// Delete the entry under `key`. Deleting an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] if the store cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store used by tests and short-lived demos.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Read a JSON collection from the store, treating absence and
/// corruption as empty.
///
/// Corruption is logged with a warning so it is visible without
/// breaking the page.
///
/// # Errors
///
/// Returns [`StorageError::Backend`] only if the store itself fails;
/// decode failures never propagate.
pub fn read_json_or_default<S, T>(store: &S, key: &str) -> Result<T, StorageError>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned + Default,
{
    let Some(raw) = store.get(key)? else {
        return Ok(T::default());
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(err) => {
            tracing::warn!(key, error = %err, "discarding corrupt stored value");
            Ok(T::default())
        }
    }
}

/// Serialize a value and store it under `key`.
///
/// # Errors
///
/// Returns [`StorageError::Encode`] if serialization fails, or
/// [`StorageError::Backend`] if the store cannot be written.
pub fn write_json<S, T>(store: &mut S, key: &str, value: &T) -> Result<(), StorageError>
where
    S: KeyValueStore + ?Sized,
    T: serde::Serialize,
{
    let raw = serde_json::to_string(value).map_err(StorageError::Encode)?;
    store.set(key, raw)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v".to_owned()).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        // removing again is a no-op
        store.remove("k").unwrap();
    }

    #[test]
    fn test_read_json_absent_is_default() {
        let store = MemoryStore::new();
        let items: Vec<u32> = read_json_or_default(&store, "missing").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_read_json_corrupt_is_default() {
        let mut store = MemoryStore::new();
        store.set("cart", "{not json".to_owned()).unwrap();
        let items: Vec<u32> = read_json_or_default(&store, "cart").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_write_then_read_json() {
        let mut store = MemoryStore::new();
        write_json(&mut store, "nums", &vec![1u32, 2, 3]).unwrap();
        let items: Vec<u32> = read_json_or_default(&store, "nums").unwrap();
        assert_eq!(items, vec![1, 2, 3]);
    }
}
