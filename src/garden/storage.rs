//! Key-value storage capability.
//!
//! All persisted state lives behind the [`KeyValueStorage`] trait and is
//! injected as an `Arc<dyn KeyValueStorage>` wherever it is needed, so tests
//! can substitute [`MemoryStorage`] for the on-disk backend.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

/// Errors produced by a storage backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Underlying filesystem error.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing medium rejected the write (e.g. quota exceeded).
    #[error("storage rejected the write: {0}")]
    WriteRejected(String),
}

/// A flat string-keyed value store.
///
/// Values are opaque strings; callers decide the encoding (the plant
/// collection is a JSON array, the capture slot a raw data URI).
pub trait KeyValueStorage: Send + Sync {
    /// Read a value, `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Remove a key. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
    /// Size in bytes of the stored value, 0 if absent. Never fails.
    fn size_of(&self, key: &str) -> u64;
}

/// Filesystem-backed storage: one file per key under a base directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (creating if needed) a storage directory.
    pub fn open(dir: PathBuf) -> Result<Self, StorageError> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Ok(std::fs::write(self.path_for(key), value)?)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    fn size_of(&self, key: &str) -> u64 {
        std::fs::metadata(self.path_for(key))
            .map(|m| m.len())
            .unwrap_or(0)
    }
}

/// In-memory storage for tests.
///
/// `fail_writes` simulates a full/rejecting medium so callers can exercise
/// their write-failure paths.
pub struct MemoryStorage {
    inner: Mutex<MemoryInner>,
}

struct MemoryInner {
    map: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MemoryInner {
                map: HashMap::new(),
                fail_writes: false,
            }),
        }
    }

    /// Make every subsequent `set` fail, as if the medium were full.
    pub fn fail_writes(&self, fail: bool) {
        self.inner.lock().expect("storage lock").fail_writes = fail;
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.inner.lock().expect("storage lock").map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = self.inner.lock().expect("storage lock");
        if inner.fail_writes {
            return Err(StorageError::WriteRejected("quota exceeded".to_string()));
        }
        inner.map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.lock().expect("storage lock").map.remove(key);
        Ok(())
    }

    fn size_of(&self, key: &str) -> u64 {
        self.inner
            .lock()
            .expect("storage lock")
            .map
            .get(key)
            .map(|v| v.len() as u64)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path().to_path_buf()).unwrap();

        assert!(storage.get("missing").unwrap().is_none());
        assert_eq!(storage.size_of("missing"), 0);

        storage.set("greeting", "hola").unwrap();
        assert_eq!(storage.get("greeting").unwrap().as_deref(), Some("hola"));
        assert_eq!(storage.size_of("greeting"), 4);

        storage.remove("greeting").unwrap();
        assert!(storage.get("greeting").unwrap().is_none());
    }

    #[test]
    fn test_file_storage_remove_absent_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path().to_path_buf()).unwrap();
        storage.remove("never-set").unwrap();
    }

    #[test]
    fn test_memory_storage_fail_writes() {
        let storage = MemoryStorage::new();
        storage.set("k", "v").unwrap();

        storage.fail_writes(true);
        assert!(matches!(
            storage.set("k", "v2"),
            Err(StorageError::WriteRejected(_))
        ));
        // The previous value survives a rejected write.
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
    }
}
