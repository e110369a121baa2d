use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::Value;
use tracing::{debug, warn};

use super::errors::StorageError;

/// Persistent key-value store.
///
/// `get` returns `Ok(None)` for keys that were never written. `set` replaces
/// the whole value; there is no partial update.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;
    fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;
}

fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey {
            key: key.to_string(),
        })
    }
}

/// File-backed store: one pretty-printed JSON file per key.
///
/// Writes go to a temp file first and are renamed into place, so a reader
/// never sees a half-written document.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

fn cleanup_temp_file(temp_file: &Path, original_error: &std::io::Error) {
    if let Err(cleanup_err) = fs::remove_file(temp_file) {
        warn!(
            event = "core.storage.temp_file_cleanup_failed",
            temp_file = %temp_file.display(),
            original_error = %original_error,
            cleanup_error = %cleanup_err,
        );
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        validate_key(key)?;
        let path = self.key_path(key);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::IoError {
                    key: key.to_string(),
                    source: e,
                });
            }
        };

        let value = serde_json::from_str(&content).map_err(|e| StorageError::Corrupted {
            key: key.to_string(),
            message: e.to_string(),
        })?;

        Ok(Some(value))
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        validate_key(key)?;

        fs::create_dir_all(&self.dir).map_err(|e| StorageError::IoError {
            key: key.to_string(),
            source: e,
        })?;

        let json =
            serde_json::to_string_pretty(&value).map_err(|e| StorageError::SerializationFailed {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        let path = self.key_path(key);
        // Per-process temp name: daemon and panel may write concurrently
        let temp_file = self
            .dir
            .join(format!("{}.json.{}.tmp", key, std::process::id()));

        if let Err(e) = fs::write(&temp_file, &json) {
            cleanup_temp_file(&temp_file, &e);
            return Err(StorageError::IoError {
                key: key.to_string(),
                source: e,
            });
        }

        if let Err(e) = fs::rename(&temp_file, &path) {
            cleanup_temp_file(&temp_file, &e);
            return Err(StorageError::IoError {
                key: key.to_string(),
                source: e,
            });
        }

        debug!(
            event = "core.storage.value_saved",
            key = key,
            path = %path.display(),
        );

        Ok(())
    }
}

/// In-memory store for tests and ephemeral runs.
///
/// `set_fail_writes(true)` makes every `set` fail, to exercise the
/// log-and-continue paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Value>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn poisoned() -> StorageError {
        StorageError::Unavailable {
            message: "memory store lock poisoned".to_string(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        validate_key(key)?;
        let values = self.values.lock().map_err(|_| Self::poisoned())?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        validate_key(key)?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable {
                message: format!("writes disabled (key '{}')", key),
            });
        }
        let mut values = self.values.lock().map_err(|_| Self::poisoned())?;
        values.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_file_store_missing_key_is_none() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp_dir.path().join("data"));
        assert_eq!(store.get("completedPomodoros").unwrap(), None);
    }

    #[test]
    fn test_file_store_set_then_get() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp_dir.path().join("data"));

        store.set("completedPomodoros", json!(3)).unwrap();
        assert_eq!(store.get("completedPomodoros").unwrap(), Some(json!(3)));

        store.set("completedPomodoros", json!(4)).unwrap();
        assert_eq!(store.get("completedPomodoros").unwrap(), Some(json!(4)));
    }

    #[test]
    fn test_file_store_one_file_per_key_and_no_temp_leftovers() {
        let temp_dir = tempfile::tempdir().unwrap();
        let data_dir = temp_dir.path().join("data");
        let store = FileStore::new(&data_dir);

        store.set("todos", json!([])).unwrap();
        store.set("completedPomodoros", json!(0)).unwrap();

        let mut names: Vec<String> = fs::read_dir(&data_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["completedPomodoros.json", "todos.json"]);
    }

    #[test]
    fn test_file_store_corrupted_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp_dir.path());
        fs::write(temp_dir.path().join("todos.json"), "{not json").unwrap();

        let err = store.get("todos").unwrap_err();
        assert!(matches!(err, StorageError::Corrupted { .. }));
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp_dir.path());

        assert!(matches!(
            store.set("../escape", json!(1)).unwrap_err(),
            StorageError::InvalidKey { .. }
        ));
        assert!(matches!(
            store.get("").unwrap_err(),
            StorageError::InvalidKey { .. }
        ));
    }

    #[test]
    fn test_memory_store_roundtrip_and_failure_injection() {
        let store = MemoryStore::new();
        store.set("todos", json!([{"text": "a", "completed": false}])).unwrap();
        assert!(store.get("todos").unwrap().is_some());

        store.set_fail_writes(true);
        assert!(store.set("todos", json!([])).is_err());
        // Failed write leaves the previous value in place
        assert_eq!(
            store.get("todos").unwrap(),
            Some(json!([{"text": "a", "completed": false}]))
        );
    }
}
