//! Key-value persistence for display preferences.
//!
//! The [`KeyValueStore`] trait keeps preference handling independent of where
//! values live. The CLI uses a YAML file in its data directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error types for store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in '{}': {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("Serialization error: {0}")]
    Serialize(String),
}

/// Minimal string key-value persistence.
pub trait KeyValueStore {
    /// Read a value; `Ok(None)` when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Store backed by a flat YAML map at `<root>/settings.yaml`.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Default data directory (`~/.vcm/`).
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".vcm")
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root.join("settings.yaml")
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let path = self.settings_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_yaml::from_str(&contents).map_err(|e| StoreError::Parse {
            path,
            reason: e.to_string(),
        })
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
        ensure_dir(&self.root)?;
        let yaml =
            serde_yaml::to_string(values).map_err(|e| StoreError::Serialize(e.to_string()))?;
        let path = self.settings_path();
        fs::write(&path, yaml).map_err(|source| StoreError::Io { path, source })
    }
}

fn ensure_dir(dir: &Path) -> Result<(), StoreError> {
    fs::create_dir_all(dir).map_err(|source| StoreError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)?;
        tracing::info!(key, path = %self.settings_path().display(), "setting saved");
        Ok(())
    }
}

/// In-process store for tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    values: std::sync::Mutex<BTreeMap<String, String>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
