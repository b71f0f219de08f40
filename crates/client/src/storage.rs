//! Durable local storage for store state.
//!
//! Each store persists exactly one JSON record under its own key; keys
//! never collide across stores. Records are opaque to the backend and
//! round-trip through serde without loss.
//!
//! Writes go to a temp file in the same directory and are renamed into
//! place, so a committed mutation is durable before the next read and a
//! crash mid-write can never leave a truncated record.

use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage keys, one per store.
pub mod keys {
    pub const CART: &str = "cart";
    pub const FAVORITES: &str = "favorites";
    pub const SESSION: &str = "session";
}

/// Errors that can occur reading or writing persisted records.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Record failed to serialize.
    #[error("storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Handle to the local storage directory.
///
/// Cheap to clone; each store holds its own copy and reads/writes only
/// its own key.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    /// Open (creating if needed) the storage directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Load a record by key.
    ///
    /// A missing record is a normal first-launch condition and returns
    /// `None`. A corrupt record is logged and also returns `None`: the
    /// owning store falls back to its empty state rather than failing
    /// app startup.
    #[must_use]
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.record_path(key);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read persisted record");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding corrupt persisted record");
                None
            }
        }
    }

    /// Save a record under its key, atomically.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if serialization or the filesystem write
    /// fails.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value)?;
        let path = self.record_path(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Remove a record, if present.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] on filesystem failure other than the
    /// record already being absent.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.record_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}
