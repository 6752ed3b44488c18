//! Key-value storage backends
//!
//! - `LocalStorage`: browser `localStorage` (wasm32 only)
//! - `FileStore`: one JSON file per key in a directory (native only)
//! - `MemoryStore`: in-process map with an optional byte quota

use std::collections::HashMap;

/// Storage failures
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No storage backend is reachable (private mode, no window)
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Exception thrown by a browser storage call
    #[error("storage call failed: {0}")]
    Js(String),
}

/// A string-keyed, string-valued persistent slot store
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects writes once keys + values exceed `quota` bytes
    pub fn with_quota(quota: usize) -> Self {
        Self {
            items: HashMap::new(),
            quota: Some(quota),
        }
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded { needed, quota });
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::fs;
    use std::io::ErrorKind;
    use std::path::PathBuf;

    use super::{KeyValueStore, StorageError};

    /// Directory-backed store: `<dir>/<key>.json`
    #[derive(Debug, Clone)]
    pub struct FileStore {
        dir: PathBuf,
    }

    impl FileStore {
        pub fn new(dir: impl Into<PathBuf>) -> Self {
            Self { dir: dir.into() }
        }

        fn path_for(&self, key: &str) -> PathBuf {
            self.dir.join(format!("{}.json", key))
        }
    }

    impl KeyValueStore for FileStore {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            match fs::read_to_string(self.path_for(key)) {
                Ok(value) => Ok(Some(value)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            }
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            fs::create_dir_all(&self.dir)?;
            fs::write(self.path_for(key), value)?;
            Ok(())
        }

        fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
            match fs::remove_file(self.path_for(key)) {
                Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

#[cfg(target_arch = "wasm32")]
mod local {
    use wasm_bindgen::JsValue;

    use super::{KeyValueStore, StorageError};

    fn js_error(value: JsValue) -> StorageError {
        StorageError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }

    /// Browser `localStorage`
    pub struct LocalStorage {
        storage: web_sys::Storage,
    }

    impl LocalStorage {
        pub fn open() -> Result<Self, StorageError> {
            let window = web_sys::window()
                .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
            let storage = window
                .local_storage()
                .map_err(js_error)?
                .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))?;
            Ok(Self { storage })
        }
    }

    impl KeyValueStore for LocalStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.storage.get_item(key).map_err(js_error)
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            self.storage.set_item(key, value).map_err(js_error)
        }

        fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
            self.storage.remove_item(key).map_err(js_error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get_item("k").unwrap(), None);
        store.set_item("k", "v").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v"));
        store.remove_item("k").unwrap();
        assert_eq!(store.get_item("k").unwrap(), None);
    }

    #[test]
    fn test_memory_store_quota() {
        let mut store = MemoryStore::with_quota(10);
        store.set_item("k", "123456789").unwrap();
        // Overwriting the same key only counts the new value
        store.set_item("k", "abcdefghi").unwrap();
        let err = store.set_item("k2", "x").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { needed: 13, quota: 10 }));
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("abcdefghi"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!(
            "expressie-store-{}-{}",
            std::process::id(),
            crate::platform::time::now_millis()
        ));
        let mut store = FileStore::new(&dir);
        assert_eq!(store.get_item("slot").unwrap(), None);
        store.set_item("slot", "[1,2]").unwrap();
        assert_eq!(store.get_item("slot").unwrap().as_deref(), Some("[1,2]"));
        assert!(dir.join("slot.json").exists());
        store.remove_item("slot").unwrap();
        store.remove_item("slot").unwrap();
        assert_eq!(store.get_item("slot").unwrap(), None);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
