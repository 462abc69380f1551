//! Favorites persistence: string key-value contract plus codecs.
//!
//! The catalog owns no file format beyond one fixed key holding a JSON
//! array of integer item ids. Backends are interchangeable behind
//! [`KeyValueStore`]; the crate ships a file-per-key store for real use
//! and an in-memory store for embedding and tests.
//!
//! Decoding is lenient by contract: an absent, unparsable, or wrong-shaped
//! value reads as the empty set, never as an error.

use crate::model::ItemId;
use std::collections::{BTreeSet, HashMap};
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Fixed key the favorites set is persisted under.
pub const FAVORITES_KEY: &str = "favorites";

/// Errors from a persistence backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to read a key's backing file.
    #[error("failed to read {path:?}: {source}")]
    Read {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to write a key's backing file (or create its directory).
    #[error("failed to write {path:?}: {source}")]
    Write {
        /// File or directory that failed to write.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Backend-specific failure outside the filesystem variants.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// String key-value store the favorites side-channel runs on.
///
/// `get` of a never-written key returns `Ok(None)`; `set` is a total
/// replacement of the key's value.
pub trait KeyValueStore: Send {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// File-per-key store rooted at a directory.
///
/// Each key maps to `<dir>/<key>.json`; the directory is created on first
/// write. A missing file reads as `None`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at `dir` (typically the platform data directory).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.key_path(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| StorageError::Write {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.key_path(key);
        std::fs::write(&path, value).map_err(|source| StorageError::Write { path, source })
    }
}

/// In-memory store for embedding hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Decode a persisted favorites value.
///
/// Lenient by contract: `None`, non-JSON, or anything that is not an array
/// of integers decodes to the empty set.
pub fn decode_favorites(raw: Option<&str>) -> BTreeSet<ItemId> {
    raw.and_then(|value| serde_json::from_str::<Vec<u64>>(value).ok())
        .map(|ids| ids.into_iter().map(ItemId::new).collect())
        .unwrap_or_default()
}

/// Serialize the favorites set as a JSON array of ids, ascending.
pub fn encode_favorites(favorites: &BTreeSet<ItemId>) -> Result<String, serde_json::Error> {
    let ids: Vec<u64> = favorites.iter().map(|id| id.get()).collect();
    serde_json::to_string(&ids)
}

/// Rehydrate favorites at startup.
///
/// Backend read failures are logged and degrade to the empty set; startup
/// is never fatal on account of favorites.
pub fn load_favorites(store: &dyn KeyValueStore) -> BTreeSet<ItemId> {
    match store.get(FAVORITES_KEY) {
        Ok(raw) => decode_favorites(raw.as_deref()),
        Err(err) => {
            warn!(error = %err, "failed to read persisted favorites, starting empty");
            BTreeSet::new()
        }
    }
}
