//! Runtime configuration
//!
//! Optional `portal.ron` next to the binary's working directory. Every
//! field has a default, so a partial file (or none at all) is fine.
//! The web build always uses defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::landing::{DEFAULT_DICE_INTERVAL, DEFAULT_DICE_TICKS, DEFAULT_REVEAL_SECS};
use crate::shell::DEFAULT_TRANSITION_SECS;

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "portal.ron";

/// Environment variable that overrides `log_filter`
pub const LOG_ENV: &str = "PORTAL_LOG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Where native preferences live (default: the user config directory)
    pub storage_dir: Option<PathBuf>,
    /// Face changes before the dice settles
    pub dice_ticks: u32,
    /// Seconds between face changes
    pub dice_interval: f32,
    /// Duration of each half of the view fade; 0 disables it
    pub transition_secs: f32,
    /// Seconds a rolled result stays up before the scene fades in
    pub reveal_secs: f32,
    /// `tracing` filter directive, e.g. "info" or "poly_portal=debug"
    pub log_filter: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            storage_dir: None,
            dice_ticks: DEFAULT_DICE_TICKS,
            dice_interval: DEFAULT_DICE_INTERVAL,
            transition_secs: DEFAULT_TRANSITION_SECS,
            reveal_secs: DEFAULT_REVEAL_SECS,
            log_filter: "info".to_string(),
        }
    }
}

impl PortalConfig {
    pub fn from_ron(source: &str, path: &Path) -> Result<Self, ConfigError> {
        ron::from_str(source).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Read `path`. A missing file is `Ok(None)`.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(source) => Self::from_ron(&source, path).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
