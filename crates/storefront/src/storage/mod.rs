//! Persistent client state.
//!
//! # Keys
//!
//! - `token` - Raw bearer token of the live session
//! - `user` - Principal of the live session
//! - `cart_<email>` - Pending cart lines, one record per user
//!
//! Values are JSON strings. Two backends implement [`KeyValueStore`]:
//! [`MemoryStorage`] (tests, ephemeral sessions) and [`FileStorage`] (one file
//! per key in a directory). Callers go through the typed [`Store`] wrapper
//! rather than raw strings.

pub mod file;
pub mod keys;
pub mod memory;

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStorage;
pub use keys::{CartKey, StorageKey, TokenKey, UserKey};
pub use memory::MemoryStorage;

/// Errors from storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored value could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A thread panicked while holding the store lock.
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// String key-value store holding client state.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write did not complete.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Typed access to a single storage record.
pub struct Store<K: StorageKey> {
    backend: Arc<dyn KeyValueStore>,
    key: String,
    _value: PhantomData<fn() -> K::Value>,
}

impl<K: StorageKey> Store<K> {
    /// Bind a record key to a backend.
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueStore>, key: &K) -> Self {
        Self {
            backend,
            key: key.storage_key(),
            _value: PhantomData,
        }
    }

    /// Storage key string.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load and decode the record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the stored value is corrupt.
    pub fn load(&self) -> Result<Option<K::Value>, StorageError>
    where
        K::Value: DeserializeOwned,
    {
        self.backend
            .get(&self.key)?
            .map(|raw| serde_json::from_str(&raw))
            .transpose()
            .map_err(StorageError::from)
    }

    /// Encode and write the record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if encoding or the write fails.
    pub fn save(&self, value: &K::Value) -> Result<(), StorageError>
    where
        K::Value: Serialize,
    {
        let raw = serde_json::to_string(value)?;
        self.backend.set(&self.key, &raw)
    }

    /// Delete the record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    pub fn remove(&self) -> Result<(), StorageError> {
        self.backend.remove(&self.key)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use periodica_core::{Email, Principal, Role};

    use super::*;

    #[test]
    fn test_typed_store_round_trip() {
        let backend: Arc<dyn KeyValueStore> = Arc::new(MemoryStorage::new());
        let store = Store::new(Arc::clone(&backend), &UserKey);
        assert!(store.load().unwrap().is_none());

        let principal = Principal::new(Email::parse("a@x.com").unwrap(), Role::User);
        store.save(&principal).unwrap();

        assert_eq!(store.load().unwrap(), Some(principal));
        assert!(backend.get("user").unwrap().unwrap().contains("a@x.com"));

        store.remove().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_record_is_an_error() {
        let backend: Arc<dyn KeyValueStore> = Arc::new(MemoryStorage::new());
        backend.set("user", "{not json").unwrap();
        let store = Store::new(backend, &UserKey);
        assert!(matches!(store.load(), Err(StorageError::Serialization(_))));
    }
}
