//! User configuration loaded from `~/.openlyrics-viewer/config.toml`.
//!
//! Every key is optional and a missing file simply means "use the defaults",
//! so a fresh install shows the bundled song without any setup.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::Deserialize;
use thiserror::Error;

use crate::assets::BUNDLED_SONG;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".openlyrics-viewer";
/// Config file name stored inside the application data directory.
const CONFIG_FILE_NAME: &str = "config.toml";
/// Log file name stored inside the application data directory.
const LOG_FILE_NAME: &str = "viewer.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not locate home directory")]
    NoHomeDir,

    #[error("failed to read config file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Asset path of the song to show.
    pub song: String,
    /// Read assets from this directory instead of the ones compiled in.
    pub asset_dir: Option<PathBuf>,
    /// `tracing` filter directive used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            song: BUNDLED_SONG.to_string(),
            asset_dir: None,
            log_filter: "info".to_string(),
        }
    }
}

impl ViewerConfig {
    /// Load the config at `path`, falling back to defaults when the file does
    /// not exist. Unreadable or invalid files are errors rather than silently
    /// ignored.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Directory holding the config and log files.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dirs = BaseDirs::new().ok_or(ConfigError::NoHomeDir)?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    Ok(data_dir()?.join(CONFIG_FILE_NAME))
}

pub fn default_log_path() -> Result<PathBuf, ConfigError> {
    Ok(data_dir()?.join(LOG_FILE_NAME))
}
