//! JSON persistence over a key-value store
//!
//! Callers decide the recovery policy; these helpers only report what went
//! wrong.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::platform::{KeyValueStore, StorageError};

/// Failure to read or write a persisted value
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("malformed data under `{key}`: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Read and decode `key`; `Ok(None)` when the slot is empty
pub fn load_json<T, S>(store: &S, key: &str) -> Result<Option<T>, PersistError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(json) = store.get_item(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|source| PersistError::Malformed {
            key: key.to_string(),
            source,
        })
}

/// Encode and write `value` under `key`
pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), PersistError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string(value).map_err(|source| PersistError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set_item(key, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_missing_key_is_none() {
        let store = MemoryStore::new();
        let loaded: Option<Vec<u32>> = load_json(&store, "nothing").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_malformed_reports_key() {
        let mut store = MemoryStore::new();
        store.set_item("slot", "{not json").unwrap();
        let err = load_json::<Vec<u32>, _>(&store, "slot").unwrap_err();
        assert!(matches!(err, PersistError::Malformed { ref key, .. } if key == "slot"));
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        save_json(&mut store, "slot", &vec![1u32, 2, 3]).unwrap();
        let loaded: Option<Vec<u32>> = load_json(&store, "slot").unwrap();
        assert_eq!(loaded, Some(vec![1, 2, 3]));
    }
}
