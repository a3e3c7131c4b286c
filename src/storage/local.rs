//! Local filesystem storage backend
//!
//! Each key is stored as `<key>.ron` under a base directory.
//! All operations complete immediately.

use super::{KeyValueStore, StorageError};
use std::path::{Path, PathBuf};

/// Application directory name under the platform config dir
const APP_DIR: &str = "poly-portal";

/// Fallback when the platform has no config directory
const FALLBACK_DIR: &str = "userdata";

/// Local filesystem key-value backend
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_dir: PathBuf,
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorage {
    /// Store under the user's config directory (`~/.config/poly-portal` etc.)
    pub fn new() -> Self {
        Self {
            base_dir: default_base_dir(),
        }
    }

    /// Store under a custom base directory
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Keys are restricted to a filename-safe alphabet so they can't escape the base dir
    fn resolve(&self, key: &str) -> Result<PathBuf, StorageError> {
        let safe = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !safe {
            return Err(StorageError::PermissionDenied(format!("invalid key {:?}", key)));
        }
        Ok(self.base_dir.join(format!("{}.ron", key)))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn default_base_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DIR))
}

#[cfg(target_arch = "wasm32")]
fn default_base_dir() -> PathBuf {
    PathBuf::from(FALLBACK_DIR).join(APP_DIR)
}

impl KeyValueStore for LocalStorage {
    fn label(&self) -> &'static str {
        "file"
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.resolve(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::from(e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.resolve(key)?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Write-then-rename: readers never observe a partially written document
        let tmp = path.with_extension("ron.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_dir() -> (TempDir, LocalStorage) {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::with_base_dir(dir.path());
        (dir, storage)
    }

    #[test]
    fn test_set_and_get() {
        let (_dir, mut storage) = setup_test_dir();

        storage.set("prefs", "(audioEnabled: true)").unwrap();
        assert_eq!(
            storage.get("prefs").unwrap().as_deref(),
            Some("(audioEnabled: true)")
        );
    }

    #[test]
    fn test_get_missing_is_none() {
        let (_dir, storage) = setup_test_dir();
        assert_eq!(storage.get("nothing-here").unwrap(), None);
    }

    #[test]
    fn test_overwrite_leaves_no_temp_file() {
        let (dir, mut storage) = setup_test_dir();

        storage.set("prefs", "one").unwrap();
        storage.set("prefs", "two").unwrap();
        assert_eq!(storage.get("prefs").unwrap().as_deref(), Some("two"));

        let mut files: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().into_string().unwrap())
            .collect();
        files.sort();
        assert_eq!(files, vec!["prefs.ron"]);
    }

    #[test]
    fn test_set_creates_base_dir() {
        let dir = TempDir::new().unwrap();
        let mut storage = LocalStorage::with_base_dir(dir.path().join("deep/nested"));

        storage.set("prefs", "x").unwrap();
        assert!(dir.path().join("deep/nested/prefs.ron").exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let (_dir, mut storage) = setup_test_dir();
        assert!(matches!(
            storage.set("../escape", "x"),
            Err(StorageError::PermissionDenied(_))
        ));
        assert!(storage.get("").is_err());
    }

    #[test]
    fn test_unwritable_base_is_an_error() {
        let dir = TempDir::new().unwrap();
        // A regular file where the base directory should be
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, "file").unwrap();
        let mut storage = LocalStorage::with_base_dir(&blocker);

        assert!(storage.set("prefs", "x").is_err());
    }
}
