//! Local persistence for the user's video library
//!
//! Persistence is a plain string key-value store: the library lives under a
//! single well-known key as a JSON array and every write replaces the whole
//! value. [`SledStore`] keeps it on disk; [`MemoryStore`] backs tests and
//! ephemeral sessions.

use crate::error::{NovastreamError, Result};
use anyhow::Context;
use directories::ProjectDirs;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

pub mod library;
pub use library::{VideoLibrary, STORAGE_KEY};

/// Minimal string key-value store
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Resolve the per-user data directory, creating it when missing
pub fn data_dir() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "novastream", "novastream")
        .ok_or_else(|| NovastreamError::Storage("Could not determine data directory".into()))?;

    let dir = proj_dirs.data_dir().to_path_buf();
    std::fs::create_dir_all(&dir)
        .context("Failed to create data directory")
        .map_err(|e| NovastreamError::Storage(e.to_string()))?;

    Ok(dir)
}

/// Key-value store backed by an embedded `sled` database
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    /// Open the store in the user's data directory
    pub fn new() -> Result<Self> {
        Self::new_with_path(data_dir()?.join("library.db"))
    }

    /// Open or create a store at the specified database path
    ///
    /// # Examples
    ///
    /// ```
    /// use novastream::storage::{KeyValueStore, SledStore};
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let store = SledStore::new_with_path(dir.path().join("library.db")).unwrap();
    /// assert!(store.get("missing").unwrap().is_none());
    /// ```
    pub fn new_with_path<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref();

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create parent directory for database")
                .map_err(|e| NovastreamError::Storage(e.to_string()))?;
        }

        let db = sled::open(db_path)
            .map_err(|e| NovastreamError::Storage(format!("Failed to open database: {}", e)))?;

        tracing::debug!("Opened library database at {}", db_path.display());
        Ok(Self { db })
    }
}

impl KeyValueStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .db
            .get(key.as_bytes())
            .map_err(|e| NovastreamError::Storage(format!("Get failed: {}", e)))?;

        match value {
            Some(bytes) => {
                let text = String::from_utf8(bytes.to_vec()).map_err(|e| {
                    NovastreamError::Storage(format!("Stored value is not UTF-8: {}", e))
                })?;
                Ok(Some(text))
            }
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.db
            .insert(key.as_bytes(), value.as_bytes())
            .map_err(|e| NovastreamError::Storage(format!("Insert failed: {}", e)))?;

        self.db
            .flush()
            .map_err(|e| NovastreamError::Storage(format!("Flush failed: {}", e)))?;

        Ok(())
    }
}

/// In-memory key-value store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| NovastreamError::Storage("Failed to acquire read lock".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| NovastreamError::Storage("Failed to acquire write lock".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
