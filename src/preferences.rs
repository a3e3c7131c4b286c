//! Durable visitor preferences
//!
//! Only `audioEnabled` and `visitedScenes` survive a reload. They live
//! under a single storage key as one RON document.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::interfaces::InterfaceId;
use crate::storage::{KeyValueStore, StorageError};

/// Storage key for the preferences document
pub const STORAGE_KEY: &str = "poly-interface-storage";

/// Persisted subset of navigation state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedPreferences {
    pub audio_enabled: bool,
    pub visited_scenes: BTreeSet<InterfaceId>,
}

impl PersistedPreferences {
    pub fn to_ron(&self) -> Result<String, StorageError> {
        let config = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .indentor("  ".to_string());
        ron::ser::to_string_pretty(self, config).map_err(|e| StorageError::Serde(e.to_string()))
    }

    pub fn from_ron(source: &str) -> Result<Self, StorageError> {
        ron::from_str(source).map_err(|e| StorageError::Serde(e.to_string()))
    }

    /// Read preferences from `backend`. A missing key is `Ok(None)`.
    pub fn load(backend: &dyn KeyValueStore) -> Result<Option<Self>, StorageError> {
        match backend.get(STORAGE_KEY)? {
            Some(doc) => Self::from_ron(&doc).map(Some),
            None => Ok(None),
        }
    }

    pub fn save(&self, backend: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        let doc = self.to_ron()?;
        backend.set(STORAGE_KEY, &doc)
    }
}
