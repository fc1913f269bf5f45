//! Persistence collaborator for the snippet repository.
//!
//! The repository talks to a [`SnippetStore`] that loads and saves one
//! JSON-compatible value. The value is shared storage: the repository only
//! owns the `customSnippets` key and merges it into whatever else the value
//! already carries.
//!
//! [`JsonFileStore`] is the file-backed implementation; [`MemoryStore`] backs
//! tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value;

use crate::error::{Result, SnipError};

/// Load/save collaborator for repository persistence.
pub trait SnippetStore {
    /// Load the stored value, `None` when nothing has been stored yet.
    fn load(&self) -> Result<Option<Value>>;

    /// Persist the value, replacing whatever was stored before.
    fn save(&self, value: &Value) -> Result<()>;
}

/// File-backed store holding pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default store location: `~/.snipstash/snippets.json`.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("~"))
            .join(".snipstash")
            .join("snippets.json")
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnippetStore for JsonFileStore {
    fn load(&self) -> Result<Option<Value>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        let value: Value =
            serde_json::from_str(&content).map_err(|e| SnipError::MalformedData {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        Ok(Some(value))
    }

    /// Save using atomic write.
    ///
    /// Uses the write-to-temp-then-rename pattern to prevent corruption
    /// if the process crashes or loses power during the write operation.
    fn save(&self, value: &Value) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = serde_json::to_string_pretty(value)?;

        // Atomic write: write to temp file, then rename
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }
}

/// In-memory store for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: Mutex<Option<Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a pre-seeded value.
    pub fn with_value(value: Value) -> Self {
        Self {
            value: Mutex::new(Some(value)),
        }
    }
}

impl SnippetStore for MemoryStore {
    fn load(&self) -> Result<Option<Value>> {
        Ok(self.value.lock().unwrap().clone())
    }

    fn save(&self, value: &Value) -> Result<()> {
        *self.value.lock().unwrap() = Some(value.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn file_store_load_missing_returns_none() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp.path().join("snippets.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn file_store_save_and_load() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp.path().join("snippets.json"));

        let value = json!({"customSnippets": [], "other": 42});
        store.save(&value).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, value);
    }

    #[test]
    fn file_store_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp.path().join("nested").join("dir").join("s.json"));
        store.save(&json!({})).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn file_store_save_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp.path().join("snippets.json"));
        store.save(&json!({"a": 1})).unwrap();

        let temp_path = store.path().with_extension("json.tmp");
        assert!(
            !temp_path.exists(),
            "Temp file should not exist after successful save"
        );
    }

    #[test]
    fn file_store_load_malformed_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("snippets.json");
        fs::write(&path, "not json at all {").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(
            store.load(),
            Err(SnipError::MalformedData { .. })
        ));
    }

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        store.save(&json!({"k": "v"})).unwrap();
        assert_eq!(store.load().unwrap().unwrap(), json!({"k": "v"}));
    }

    #[test]
    fn memory_store_with_value_preseeds() {
        let store = MemoryStore::with_value(json!({"seed": true}));
        assert_eq!(store.load().unwrap().unwrap(), json!({"seed": true}));
    }
}
