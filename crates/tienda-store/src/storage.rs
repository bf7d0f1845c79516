//! Raw string storage backends.
//!
//! `Storage` mirrors the browser `localStorage` surface: string keys mapped to
//! string values, read and written whole. There is no transaction discipline;
//! two writers doing read-modify-write on the same key race.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

use crate::CacheError;

/// A string key-value store.
pub trait Storage: Send + Sync {
    /// Read the raw value stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Replace the raw value stored under `key`.
    fn set_item(&self, key: &str, value: &str) -> Result<(), CacheError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), CacheError>;

    /// List every key currently stored.
    fn keys(&self) -> Result<Vec<String>, CacheError>;

    /// Remove every key.
    fn clear(&self) -> Result<(), CacheError> {
        for key in self.keys()? {
            self.remove_item(&key)?;
        }
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for Arc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, CacheError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), CacheError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), CacheError> {
        (**self).remove_item(key)
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        (**self).keys()
    }

    fn clear(&self) -> Result<(), CacheError> {
        (**self).clear()
    }
}

impl<S: Storage + ?Sized> Storage for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, CacheError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), CacheError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), CacheError> {
        (**self).remove_item(key)
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        (**self).keys()
    }

    fn clear(&self) -> Result<(), CacheError> {
        (**self).clear()
    }
}

/// In-process storage. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with raw entries.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

fn poisoned() -> CacheError {
    CacheError::StoreError("storage lock poisoned".to_string())
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, CacheError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.keys().cloned().collect())
    }

    fn clear(&self) -> Result<(), CacheError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.clear();
        Ok(())
    }
}

/// Storage persisted as a single JSON object on disk.
///
/// Every call re-reads the file, so edits made by another process between
/// calls are picked up (and may be overwritten by the next write).
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    /// Open (or lazily create) a store at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();
        if path.is_dir() {
            return Err(CacheError::OpenError(format!(
                "{} is a directory",
                path.display()
            )));
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, CacheError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn modify<R>(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, String>) -> R,
    ) -> Result<R, CacheError> {
        let _guard = self.lock.lock().map_err(|_| poisoned())?;
        let mut entries = self.read_all()?;
        let result = f(&mut entries);
        self.write_all(&entries)?;
        Ok(result)
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, CacheError> {
        let _guard = self.lock.lock().map_err(|_| poisoned())?;
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.modify(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), CacheError> {
        self.modify(|entries| {
            entries.remove(key);
        })
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let _guard = self.lock.lock().map_err(|_| poisoned())?;
        Ok(self.read_all()?.into_keys().collect())
    }

    fn clear(&self) -> Result<(), CacheError> {
        self.modify(|entries| entries.clear())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_set_get_remove() {
        let store = MemoryStorage::new();
        assert_eq!(store.get_item("cart").unwrap(), None);

        store.set_item("cart", "[]").unwrap();
        assert_eq!(store.get_item("cart").unwrap().as_deref(), Some("[]"));

        store.remove_item("cart").unwrap();
        assert_eq!(store.get_item("cart").unwrap(), None);
    }

    #[test]
    fn test_memory_remove_missing_is_ok() {
        let store = MemoryStorage::new();
        assert!(store.remove_item("nope").is_ok());
    }

    #[test]
    fn test_memory_keys_and_clear() {
        let store = MemoryStorage::with_entries([("b", "2"), ("a", "1")]);
        assert_eq!(store.keys().unwrap(), vec!["a", "b"]);

        store.clear().unwrap();
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn test_shared_through_arc() {
        let store = Arc::new(MemoryStorage::new());
        let other = Arc::clone(&store);
        store.set_item("jwt_token", "abc").unwrap();
        assert_eq!(other.get_item("jwt_token").unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn test_file_storage_persists_across_handles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let first = FileStorage::open(&path).unwrap();
        first.set_item("users", "[]").unwrap();
        first.set_item("cart", "[1]").unwrap();

        let second = FileStorage::open(&path).unwrap();
        assert_eq!(second.get_item("cart").unwrap().as_deref(), Some("[1]"));
        assert_eq!(second.keys().unwrap(), vec!["cart", "users"]);
    }

    #[test]
    fn test_file_storage_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStorage::open(dir.path().join("nested/store.json")).unwrap();
        assert_eq!(store.get_item("cart").unwrap(), None);

        store.set_item("cart", "[]").unwrap();
        assert!(dir.path().join("nested/store.json").exists());
    }

    #[test]
    fn test_file_storage_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FileStorage::open(dir.path()).is_err());
    }

    #[test]
    fn test_file_storage_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json").unwrap();

        let store = FileStorage::open(&path).unwrap();
        assert!(matches!(
            store.get_item("cart"),
            Err(CacheError::SerializeError(_))
        ));
    }
}
