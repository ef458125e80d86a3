//! Local persistent key/value storage.
//!
//! The store keeps a handful of string values across runs: the session
//! token, the per-day snack-visibility flags, and the last-active tab.
//! The file backend mirrors an in-memory map into a TOML file in the
//! user's data directory, writing through on every change.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use ration_api::TokenProvider;

/// Storage key of the session token.
pub const TOKEN_KEY: &str = "auth_token";
/// Storage key of the last-active UI tab.
pub const ACTIVE_TAB_KEY: &str = "active_tab";

/// Opaque get/set/delete capability for string keys.
///
/// Setters are infallible by contract: a backend that cannot write logs
/// and keeps the in-memory value, so the running session stays coherent
/// even when the disk copy goes stale.
pub trait LocalStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Errors that can occur while opening the storage file.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// An I/O error occurred while reading the storage file.
    #[error("failed to read local storage: {0}")]
    IoError(#[from] std::io::Error),
    /// The storage file contains invalid TOML or non-string values.
    #[error("failed to deserialize local storage: {0}")]
    DeserializeError(#[from] toml::de::Error),
}

/// TOML-file-backed storage.
pub struct FileStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Opens the storage file, creating parent directories as needed. A
    /// missing file is an empty store.
    pub fn open(path: PathBuf) -> Result<Self, PersistError> {
        let values = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            toml::from_str(&contents)?
        } else {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            BTreeMap::new()
        };

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    fn flush(&self, values: &BTreeMap<String, String>) {
        let contents = match toml::to_string_pretty(values) {
            Ok(contents) => contents,
            Err(error) => {
                log::warn!("Failed to serialize local storage: {error}");
                return;
            }
        };

        if let Err(error) = std::fs::write(&self.path, contents) {
            log::warn!("Failed to write local storage to {:?}: {error}", self.path);
        }
    }
}

impl LocalStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .expect("local storage lock poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let values = {
            let mut values = self.values.lock().expect("local storage lock poisoned");
            values.insert(key.to_string(), value.to_string());
            values.clone()
        };
        self.flush(&values);
    }

    fn remove(&self, key: &str) {
        let values = {
            let mut values = self.values.lock().expect("local storage lock poisoned");
            values.remove(key);
            values.clone()
        };
        self.flush(&values);
    }
}

/// Purely in-memory storage, for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl LocalStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .expect("local storage lock poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .expect("local storage lock poisoned")
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values
            .lock()
            .expect("local storage lock poisoned")
            .remove(key);
    }
}

/// Adapter exposing the persisted token to the transport layer.
pub struct StoredTokens {
    local: Arc<dyn LocalStore>,
}

impl StoredTokens {
    pub fn new(local: Arc<dyn LocalStore>) -> Self {
        Self { local }
    }
}

impl TokenProvider for StoredTokens {
    fn token(&self) -> Option<String> {
        self.local.get(TOKEN_KEY)
    }

    fn clear_token(&self) {
        self.local.remove(TOKEN_KEY);
    }
}
