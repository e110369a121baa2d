//! Well-known keys and typed access helpers.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::info;

use super::errors::StorageError;
use super::store::KeyValueStore;

/// Daily count of finished work phases (integer).
pub const COMPLETED_POMODOROS_KEY: &str = "completedPomodoros";

/// Ordered todo list (array of `{text, completed}`).
pub const TODOS_KEY: &str = "todos";

/// Read and deserialize a value. `Ok(None)` when the key was never written.
pub fn load<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(key)? {
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| StorageError::Corrupted {
                key: key.to_string(),
                message: e.to_string(),
            }),
        None => Ok(None),
    }
}

/// Serialize and write a value, replacing whatever was stored.
pub fn save<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let value = serde_json::to_value(value).map_err(|e| StorageError::SerializationFailed {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    store.set(key, value)
}

/// Write first-run defaults for keys that are absent.
///
/// Existing values are left alone. Returns the keys that were seeded.
pub fn seed_defaults(store: &dyn KeyValueStore) -> Result<Vec<&'static str>, StorageError> {
    let defaults: [(&'static str, Value); 2] =
        [(COMPLETED_POMODOROS_KEY, json!(0)), (TODOS_KEY, json!([]))];

    let mut seeded = Vec::new();
    for (key, value) in defaults {
        if store.get(key)?.is_none() {
            store.set(key, value)?;
            seeded.push(key);
        }
    }

    if !seeded.is_empty() {
        info!(event = "core.storage.defaults_seeded", keys = ?seeded);
    }

    Ok(seeded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::store::MemoryStore;

    #[test]
    fn test_seed_defaults_on_empty_store() {
        let store = MemoryStore::new();
        let seeded = seed_defaults(&store).unwrap();
        assert_eq!(seeded, vec![COMPLETED_POMODOROS_KEY, TODOS_KEY]);
        assert_eq!(store.get(COMPLETED_POMODOROS_KEY).unwrap(), Some(json!(0)));
        assert_eq!(store.get(TODOS_KEY).unwrap(), Some(json!([])));
    }

    #[test]
    fn test_seed_defaults_keeps_existing_values() {
        let store = MemoryStore::new();
        store.set(COMPLETED_POMODOROS_KEY, json!(7)).unwrap();

        let seeded = seed_defaults(&store).unwrap();
        assert_eq!(seeded, vec![TODOS_KEY]);
        assert_eq!(store.get(COMPLETED_POMODOROS_KEY).unwrap(), Some(json!(7)));
    }

    #[test]
    fn test_load_type_mismatch_is_corrupted() {
        let store = MemoryStore::new();
        store.set(COMPLETED_POMODOROS_KEY, json!("seven")).unwrap();

        let err = load::<u32>(&store, COMPLETED_POMODOROS_KEY).unwrap_err();
        assert!(matches!(err, StorageError::Corrupted { .. }));
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        save(&store, COMPLETED_POMODOROS_KEY, &2u32).unwrap();
        assert_eq!(load::<u32>(&store, COMPLETED_POMODOROS_KEY).unwrap(), Some(2));
    }
}
