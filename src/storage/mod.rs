//! Key/value persistence for user preferences
//!
//! The core only needs string get/set. Hosts provide a backend implementing
//! [`KeyValueStore`]; [`FileStore`] keeps one JSON file per key under a data
//! directory and [`MemoryStore`] backs tests and ephemeral sessions.
//!
//! Writes are fire-and-forget: [`store_json`] logs a failed write and moves
//! on, because the in-memory state stays authoritative for the session.

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

/// Error type for persistence operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("Stored value for key {key} is not valid JSON for its type: {source}")]
    Parse {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// String key/value persistence provided by the host
pub trait KeyValueStore {
    /// Read the raw value for `key`, `Ok(None)` if nothing was stored
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the raw value for `key`
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// A store shared between the components that persist through it
pub type SharedStore = Rc<dyn KeyValueStore>;

/// In-memory store; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with raw values
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Rc::new(RefCell::new(map)),
        }
    }

    /// Raw value currently held for `key`
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory-backed store holding each key in `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open<P: AsRef<Path>>(dir: P) -> io::Result<Self> {
        fs::create_dir_all(dir.as_ref())?;
        Ok(Self {
            dir: dir.as_ref().to_path_buf(),
        })
    }

    /// Directory holding the key files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io {
                key: key.to_string(),
                source: e,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // Write through a temporary file so a crash never leaves a torn value
        let path = self.path_for(key);
        let temp_path = path.with_extension("tmp");
        replace_file(&temp_path, &path, value.as_bytes()).map_err(|source| {
            match fs::remove_file(&temp_path) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => {
                    warn!("Failed to remove {}: {}", temp_path.display(), e);
                }
                _ => {}
            }
            StorageError::Io {
                key: key.to_string(),
                source,
            }
        })
    }
}

fn replace_file(temp_path: &Path, path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(temp_path)?;
    file.write_all(contents)?;
    file.flush()?;
    drop(file);
    fs::rename(temp_path, path)
}

/// Store whose every read and write fails, for exercising fallback paths
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FailingStore;

#[cfg(test)]
impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Io {
            key: key.to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "storage unavailable"),
        })
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io {
            key: key.to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "storage unavailable"),
        })
    }
}

/// Read and decode a JSON value, reporting why it could not be used
pub fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(key)? {
        None => Ok(None),
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Parse {
                key: key.to_string(),
                source,
            }),
    }
}

/// Read a JSON value, falling back to `default` when it is absent or unusable
///
/// Parse and I/O failures are logged and never surfaced.
pub fn load_json_or<T, F>(store: &dyn KeyValueStore, key: &str, default: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match read_json(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => {
            debug!("No stored value for {}, using default", key);
            default()
        }
        Err(e) => {
            warn!("{}; falling back to default", e);
            default()
        }
    }
}

/// Encode and write a JSON value without waiting on or retrying the write
pub fn store_json<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) {
    let encoded = match serde_json::to_string(value) {
        Ok(encoded) => encoded,
        Err(e) => {
            warn!("Failed to encode value for {}: {}", key, e);
            return;
        }
    };

    if let Err(e) = store.set(key, &encoded) {
        warn!("Failed to persist {}: {}", key, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.set("greeting", "\"hello\"").unwrap();
        assert_eq!(other.get("greeting").unwrap().as_deref(), Some("\"hello\""));
        assert_eq!(other.get("missing").unwrap(), None);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let store = FileStore::open(temp_dir.path().join("nested").join("data")).unwrap();

        assert_eq!(store.get("tracked-city-ids").unwrap(), None);

        store.set("tracked-city-ids", "[\"paris\"]").unwrap();
        assert_eq!(
            store.get("tracked-city-ids").unwrap().as_deref(),
            Some("[\"paris\"]")
        );
        assert!(store.path_for("tracked-city-ids").exists());
        assert!(!store.path_for("tracked-city-ids").with_extension("tmp").exists());

        // Overwrite replaces the whole value
        store.set("tracked-city-ids", "[]").unwrap();
        assert_eq!(store.get("tracked-city-ids").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_failed_write_leaves_no_temp_file() {
        let temp_dir = tempdir().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();

        // A directory in the value's place makes the final rename fail
        fs::create_dir(store.path_for("blocked")).unwrap();

        let result = store.set("blocked", "[]");
        assert!(matches!(result, Err(StorageError::Io { ref key, .. }) if key == "blocked"));
        assert!(!store.path_for("blocked").with_extension("tmp").exists());
        assert!(store.path_for("blocked").is_dir());
    }

    #[test]
    fn test_load_json_or_falls_back_on_corrupt_value() {
        let store = MemoryStore::with_entries([("flag", "{not json")]);
        let value: bool = load_json_or(&store, "flag", || true);
        assert!(value);
    }

    #[test]
    fn test_load_json_or_falls_back_on_wrong_shape() {
        let store = MemoryStore::with_entries([("ids", "42")]);
        let value: Vec<String> = load_json_or(&store, "ids", || vec!["x".to_string()]);
        assert_eq!(value, vec!["x".to_string()]);
    }

    #[test]
    fn test_read_json_reports_parse_error() {
        let store = MemoryStore::with_entries([("flag", "maybe")]);
        let result: Result<Option<bool>, _> = read_json(&store, "flag");
        assert!(matches!(result, Err(StorageError::Parse { ref key, .. }) if key == "flag"));
    }

    #[test]
    fn test_load_json_or_falls_back_on_read_error() {
        let value: Vec<String> = load_json_or(&FailingStore, "ids", || vec!["x".to_string()]);
        assert_eq!(value, vec!["x".to_string()]);
    }

    #[test]
    fn test_store_json_swallows_write_error() {
        store_json(&FailingStore, "ids", &["a"]);
        assert!(matches!(
            FailingStore.set("ids", "[]"),
            Err(StorageError::Io { ref key, .. }) if key == "ids"
        ));
    }

    #[test]
    fn test_store_json_writes_encoded_value() {
        let store = MemoryStore::new();
        store_json(&store, "ids", &["a", "b"]);
        assert_eq!(store.raw("ids").as_deref(), Some("[\"a\",\"b\"]"));
    }
}
