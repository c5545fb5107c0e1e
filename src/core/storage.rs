//! # Durable Storage
//!
//! A tiny string key-value store that survives restarts. Beacon only ever
//! writes one key (`app-theme`), but the store does not care.
//!
//! `FileStore` keeps all keys in one JSON object at `~/.beacon/storage.json`.
//! Writes use atomic rename (write `.tmp`, then `rename()`) so a crash never
//! leaves a half-written file behind.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    Parse(serde_json::Error),
    /// The backing store cannot be used at all (no home directory, quota, ...).
    Unavailable(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "storage I/O error: {e}"),
            StorageError::Parse(e) => write!(f, "storage parse error: {e}"),
            StorageError::Unavailable(msg) => write!(f, "storage unavailable: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Returns `~/.beacon/storage.json`.
pub fn default_storage_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".beacon").join("storage.json"))
}

/// JSON-file backed store.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => serde_json::from_str(&json).map_err(StorageError::Parse),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(StorageError::Io)?;
        }
        let tmp_path = self.path.with_extension("tmp");
        let json = serde_json::to_string_pretty(entries).map_err(StorageError::Parse)?;
        fs::write(&tmp_path, json).map_err(StorageError::Io)?;
        fs::rename(&tmp_path, &self.path).map_err(StorageError::Io)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.get(key).cloned())
    }

    /// A corrupt file is replaced rather than blocking every later write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = match self.load() {
            Ok(entries) => entries,
            Err(StorageError::Parse(e)) => {
                warn!("Discarding unreadable {}: {}", self.path.display(), e);
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)?;
        debug!("Stored {}={} in {}", key, value, self.path.display());
        Ok(())
    }
}

/// In-memory store. Used when no storage path can be determined, and in tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
