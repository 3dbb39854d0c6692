use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::AppConfig;

/// File name looked up from the working directory upwards
pub const CONFIG_FILE: &str = "stockroom.toml";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Effective configuration and where it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: AppConfig,
    /// None when running on built-in defaults
    pub path: Option<PathBuf>,
}

impl LoadedConfig {
    /// Directory the config file lives in, or the given fallback
    pub fn base_dir(&self, fallback: &Path) -> PathBuf {
        self.path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| fallback.to_path_buf())
    }
}

/// Walk up from `start` looking for `stockroom.toml`.
pub fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Read and parse a config file.
pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load the explicit config if given, else the discovered one, else defaults.
/// An explicit path that does not exist is an error.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<LoadedConfig, ConfigError> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => discover_config(cwd),
    };
    match path {
        Some(path) => {
            let config = read_config(&path)?;
            log::debug!("loaded config from {}", path.display());
            Ok(LoadedConfig {
                config,
                path: Some(path),
            })
        }
        None => Ok(LoadedConfig {
            config: AppConfig::default(),
            path: None,
        }),
    }
}
