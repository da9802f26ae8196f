//! Local key-value persistence
//!
//! String-keyed, JSON-valued storage scoped to the client installation.
//! One JSON file per key under a data directory, mirroring the browser
//! origin-scoped store the storefront persists into.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// String-keyed local store with last-write-wins semantics.
///
/// `take` reads and deletes in a single call so that two sessions racing on
/// the same key (the guest-cart merge on login) cannot both observe a value.
pub trait LocalStore: Send {
    /// Read the value for `key`, `None` when absent.
    fn read(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete `key`. Deleting an absent key is not an error.
    fn remove(&mut self, key: &str) -> StoreResult<()>;

    /// Read and delete `key` in one call; `None` when absent or already taken.
    fn take(&mut self, key: &str) -> StoreResult<Option<String>> {
        let value = self.read(key)?;
        if value.is_some() {
            self.remove(key)?;
        }
        Ok(value)
    }
}

/// File-backed store: one `<key>.json` file per key under a data directory.
#[derive(Debug)]
pub struct FileLocalStore {
    dir: PathBuf,
}

impl FileLocalStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> StoreResult<PathBuf> {
        // Keys are flat identifiers; no path separators allowed.
        if key.is_empty() || key.contains(['/', '\\', '.']) {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }

    /// The data directory this store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl LocalStore for FileLocalStore {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&path)?))
    }

    fn write(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.key_path(key)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        let path = self.key_path(key)?;
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }

    fn take(&mut self, key: &str) -> StoreResult<Option<String>> {
        let path = self.key_path(key)?;
        let value = match std::fs::read_to_string(&path) {
            Ok(v) => v,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        // If another session deleted the file between read and remove, it won
        // the take; report absent rather than double-applying the value.
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests.
#[derive(Debug, Default)]
pub struct MemoryLocalStore {
    map: HashMap<String, String>,
}

impl MemoryLocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key directly, bypassing the trait.
    pub fn seed(&mut self, key: &str, value: &str) {
        self.map.insert(key.to_string(), value.to_string());
    }

    /// Whether a key currently exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }
}

impl LocalStore for MemoryLocalStore {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.map.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.map.remove(key);
        Ok(())
    }

    fn take(&mut self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.map.remove(key))
    }
}
