//! Storage Abstraction Layer
//!
//! Small key-value interface for client-local durable state:
//! - Native: one file per key under the user config directory
//! - WASM: browser `localStorage` through the JS plugin
//! - Memory: degraded mode when durable storage is unavailable, and tests
//!
//! All backends are synchronous; the frame loop calls them between frames.

pub mod local;
#[cfg(target_arch = "wasm32")]
pub mod web;

use std::collections::HashMap;

pub use local::LocalStorage;
#[cfg(target_arch = "wasm32")]
pub use web::WebStorage;

/// Storage error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    /// Key or file not found
    #[error("not found: {0}")]
    NotFound(String),
    /// Permission denied
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),
    /// Storage is disabled or inaccessible (private browsing, quota, sandbox)
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serde(String),
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(e.to_string()),
            std::io::ErrorKind::PermissionDenied => StorageError::PermissionDenied(e.to_string()),
            _ => StorageError::Io(e.to_string()),
        }
    }
}

/// Durable string key-value store
///
/// A missing key is `Ok(None)`, not an error. Errors mean the backend
/// itself could not be reached.
pub trait KeyValueStore {
    /// Human-readable backend name for logs
    fn label(&self) -> &'static str;

    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Create or overwrite the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    /// Number of successful writes (lets tests observe persistence calls)
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key (simulates state left by a previous session)
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStorage {
    fn label(&self) -> &'static str {
        "memory"
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Open the platform's durable backend
#[cfg(not(target_arch = "wasm32"))]
pub fn open_default(dir: Option<&std::path::Path>) -> Box<dyn KeyValueStore> {
    match dir {
        Some(dir) => Box::new(LocalStorage::with_base_dir(dir)),
        None => Box::new(LocalStorage::new()),
    }
}

/// Open the platform's durable backend
#[cfg(target_arch = "wasm32")]
pub fn open_default(_dir: Option<&std::path::Path>) -> Box<dyn KeyValueStore> {
    Box::new(WebStorage::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("k").unwrap(), None);

        storage.set("k", "v1").unwrap();
        storage.set("k", "v2").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(storage.writes(), 2);
    }

    #[test]
    fn test_memory_storage_with_entry() {
        let storage = MemoryStorage::new().with_entry("prefs", "()");
        assert_eq!(storage.get("prefs").unwrap().as_deref(), Some("()"));
        assert_eq!(storage.writes(), 0);
    }

    #[test]
    fn test_io_error_mapping() {
        let nf = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(StorageError::from(nf), StorageError::NotFound(_)));

        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no");
        assert!(matches!(StorageError::from(denied), StorageError::PermissionDenied(_)));

        let other = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        assert!(matches!(StorageError::from(other), StorageError::Io(_)));
    }
}
