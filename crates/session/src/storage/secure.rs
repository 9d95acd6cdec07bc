//! Obfuscating wrapper over a key-value store.
//!
//! This is reversible obfuscation against casual inspection of the
//! stored blobs, not a security boundary: the XOR key lives on the
//! client and anyone holding the blob and the page source can invert
//! the transform. Do not present this as confidentiality.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{KeyValueStore, StorageError};

/// Error returned when constructing a [`SecureStorage`] with an empty key.
#[derive(Debug, thiserror::Error)]
#[error("obfuscation key must not be empty")]
pub struct EmptyKeyError;

/// A key-value store wrapper that XOR-obfuscates values.
///
/// Values are serialized to canonical JSON, XORed byte-wise against the
/// repeating key, and base64-encoded before hitting the inner store.
/// Decoding failures are logged and read back as `None` rather than
/// propagating.
pub struct SecureStorage<S> {
    store: S,
    key: SecretString,
}

impl<S> std::fmt::Debug for SecureStorage<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureStorage")
            .field("key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> SecureStorage<S> {
    /// Wrap `store` with the given obfuscation key.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyKeyError`] if the key is empty; an empty key
    /// would make the XOR transform undefined.
    pub fn new(store: S, key: SecretString) -> Result<Self, EmptyKeyError> {
        if key.expose_secret().is_empty() {
            return Err(EmptyKeyError);
        }
        Ok(Self { store, key })
    }

    /// Consume the wrapper and return the inner store.
    pub fn into_inner(self) -> S {
        self.store
    }

    fn xor(&self, data: &[u8]) -> Vec<u8> {
        let key = self.key.expose_secret().as_bytes();
        data.iter()
            .zip(key.iter().cycle())
            .map(|(byte, k)| byte ^ k)
            .collect()
    }

    /// Serialize `value` and produce the opaque obfuscated string.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Encode`] if the value cannot be
    /// serialized to JSON.
    pub fn encrypt<T: Serialize>(&self, value: &T) -> Result<String, StorageError> {
        let json = serde_json::to_string(value).map_err(StorageError::Encode)?;
        Ok(BASE64.encode(self.xor(json.as_bytes())))
    }

    /// Invert [`encrypt`](Self::encrypt).
    ///
    /// Any base64, UTF-8, or JSON failure logs a warning and yields
    /// `None`; a corrupt blob must never take the page down.
    pub fn decrypt<T: DeserializeOwned>(&self, opaque: &str) -> Option<T> {
        let bytes = match BASE64.decode(opaque) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(error = %err, "secure storage blob is not valid base64");
                return None;
            }
        };

        let json = match String::from_utf8(self.xor(&bytes)) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(error = %err, "secure storage blob decoded to invalid UTF-8");
                return None;
            }
        };

        match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(error = %err, "secure storage blob decoded to invalid JSON");
                None
            }
        }
    }

    /// Obfuscate `value` and persist it under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if encoding or the inner store fails.
    pub fn set_item<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StorageError> {
        let opaque = self.encrypt(value)?;
        self.store.set(key, opaque)
    }

    /// Fetch and decode the value under `key`.
    ///
    /// Absent keys and undecodable blobs both read back as `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] only if the inner store fails.
    pub fn get_item<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        Ok(self.store.get(key)?.and_then(|raw| self.decrypt(&raw)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde::{Deserialize, Serialize};

    fn secure() -> SecureStorage<MemoryStore> {
        SecureStorage::new(MemoryStore::new(), SecretString::from("demo-key-123")).unwrap()
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(SecureStorage::new(MemoryStore::new(), SecretString::from("")).is_err());
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let storage = secure();
        let value = Sample {
            name: "Masala Dosa".to_owned(),
            count: 3,
        };
        let opaque = storage.encrypt(&value).unwrap();
        assert_ne!(opaque, serde_json::to_string(&value).unwrap());
        assert_eq!(storage.decrypt::<Sample>(&opaque), Some(value));
    }

    #[test]
    fn test_roundtrip_arbitrary_json() {
        let storage = secure();
        let value = serde_json::json!({"a": [1, 2, 3], "b": {"nested": true}, "c": null});
        let opaque = storage.encrypt(&value).unwrap();
        assert_eq!(storage.decrypt::<serde_json::Value>(&opaque), Some(value));
    }

    #[test]
    fn test_decrypt_garbage_is_none() {
        let storage = secure();
        assert_eq!(storage.decrypt::<Sample>("not base64!!!"), None);
        // valid base64, but XOR output is not JSON for this key
        assert_eq!(storage.decrypt::<Sample>("AAAA"), None);
    }

    #[test]
    fn test_wrong_key_fails_to_decode() {
        let storage = secure();
        let opaque = storage.encrypt(&vec![1u32, 2, 3]).unwrap();

        let other =
            SecureStorage::new(MemoryStore::new(), SecretString::from("different-key")).unwrap();
        assert_eq!(other.decrypt::<Vec<u32>>(&opaque), None);
    }

    #[test]
    fn test_set_get_item() {
        let mut storage = secure();
        storage.set_item("pref", &"dark-mode").unwrap();
        assert_eq!(
            storage.get_item::<String>("pref").unwrap().as_deref(),
            Some("dark-mode")
        );
        assert_eq!(storage.get_item::<String>("absent").unwrap(), None);
    }

    #[test]
    fn test_debug_redacts_key() {
        let debug = format!("{:?}", secure());
        assert!(!debug.contains("demo-key-123"));
        assert!(debug.contains("[REDACTED]"));
    }
}
