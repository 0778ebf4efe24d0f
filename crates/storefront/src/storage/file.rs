//! Directory-backed key-value store.
//!
//! Each key is one `<percent-encoded key>.json` file. Every write goes to its
//! own uniquely named temporary file in the same directory, which is then
//! renamed into place. Readers never observe a half-written record, and
//! concurrent writers to one key never share a temporary file.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use super::{KeyValueStore, StorageError};

/// Store persisting each key as a file under `root`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Open (creating if needed) a storage directory.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        debug!(root = %root.display(), "Opened file storage");
        Ok(Self { root })
    }

    /// Storage directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", urlencoding::encode(key)))
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut tmp = NamedTempFile::new_in(&self.root)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        // A failed persist hands the file back; dropping it removes it.
        tmp.persist(self.path_for(key)).map_err(|e| e.error)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();

        let first = FileStorage::open(dir.path()).unwrap();
        first.set("cart_a@x.com", "[]").unwrap();

        let second = FileStorage::open(dir.path()).unwrap();
        assert_eq!(second.get("cart_a@x.com").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_keys_are_encoded_as_file_names() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        storage.set("cart_../escape", "x").unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["cart_..%2Fescape.json".to_string()]);
    }

    #[test]
    fn test_missing_key_and_idempotent_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("nested")).unwrap();
        assert!(storage.get("token").unwrap().is_none());

        storage.set("token", "abc").unwrap();
        storage.remove("token").unwrap();
        storage.remove("token").unwrap();
        assert!(storage.get("token").unwrap().is_none());
    }

    #[test]
    fn test_concurrent_writes_to_one_key() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        let values: Vec<String> = (0..8).map(|i| format!("[{}]", "1,".repeat(i * 500) + "1")).collect();

        std::thread::scope(|scope| {
            for value in &values {
                let storage = &storage;
                scope.spawn(move || {
                    for _ in 0..20 {
                        storage.set("cart_a@x.com", value).unwrap();
                    }
                });
            }
        });

        let stored = storage.get("cart_a@x.com").unwrap().unwrap();
        assert!(values.contains(&stored), "stored value is not one complete write");

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["cart_a%40x.com.json".to_string()]);
    }
}
