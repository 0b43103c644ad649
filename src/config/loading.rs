use std::io;
use std::path::{Path, PathBuf};

use super::store::ConfigStore;
use super::types::ConfigOverride;

/// Project configuration file names, in lookup order.
pub const CONFIG_FILES: &[&str] = &[".equals.toml", "equals.toml"];

/// File name of the user-level configuration inside `<config dir>/equals/`.
const USER_CONFIG_FILE: &str = "config.toml";

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file at {path}: {source}")]
    IoError { source: io::Error, path: String },

    /// Failed to parse the configuration content
    #[error("Failed to parse config at {path}: {message}")]
    ParseError { path: String, message: String },

    /// Explicitly requested configuration file does not exist
    #[error("Configuration file not found: {path}")]
    NotFound { path: String },
}

/// A merged configuration override and the files it came from.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub partial: ConfigOverride,
    pub loaded_files: Vec<String>,
}

impl LoadedConfig {
    /// Defaults with the loaded override applied.
    pub fn into_store(self) -> ConfigStore {
        let mut store = ConfigStore::new();
        store.reconfigure(self.partial);
        store
    }
}

/// Parse TOML configuration text.
pub fn parse_config(content: &str, path: &str) -> Result<ConfigOverride, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError {
        path: path.to_string(),
        message: e.to_string(),
    })
}

/// Read and parse a configuration file.
pub fn load_config_file(path: &Path) -> Result<ConfigOverride, ConfigError> {
    let path_str = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        source: e,
        path: path_str.clone(),
    })?;
    parse_config(&content, &path_str)
}

/// Search `start` and its ancestors for a project configuration file.
///
/// The walk stops at the first directory containing `.git`.
pub fn discover_config(start: &Path) -> Option<PathBuf> {
    for dir in start.ancestors() {
        for name in CONFIG_FILES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                log::debug!("[equals-config] Found {}", candidate.display());
                return Some(candidate);
            }
        }
        if dir.join(".git").exists() {
            log::debug!("[equals-config] Reached project root at {}", dir.display());
            break;
        }
    }
    None
}

/// Platform user configuration, e.g. `~/.config/equals/config.toml`.
pub fn user_config_path() -> Option<PathBuf> {
    use etcetera::{BaseStrategy, choose_base_strategy};

    match choose_base_strategy() {
        Ok(strategy) => {
            let path = strategy.config_dir().join("equals").join(USER_CONFIG_FILE);
            if path.is_file() {
                log::debug!("[equals-config] Found user configuration at: {}", path.display());
                Some(path)
            } else {
                None
            }
        }
        Err(e) => {
            log::debug!("[equals-config] Failed to determine user config directory: {e}");
            None
        }
    }
}

/// Load configuration the way the CLI does.
///
/// An explicit path is used on its own. Otherwise the user configuration is
/// loaded first and a discovered project configuration is layered on top.
/// `no_config` skips discovery entirely.
pub fn load_with_discovery(explicit: Option<&str>, no_config: bool) -> Result<LoadedConfig, ConfigError> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let user = if explicit.is_none() && !no_config {
        user_config_path()
    } else {
        None
    };
    load_from(explicit, no_config, &cwd, user.as_deref())
}

pub(crate) fn load_from(
    explicit: Option<&str>,
    no_config: bool,
    start: &Path,
    user_config: Option<&Path>,
) -> Result<LoadedConfig, ConfigError> {
    let mut loaded = LoadedConfig::default();

    if let Some(path) = explicit {
        let path_obj = Path::new(path);
        if !path_obj.exists() {
            return Err(ConfigError::NotFound { path: path.to_string() });
        }
        log::debug!("[equals-config] Loading explicit config file: {path}");
        loaded.partial = load_config_file(path_obj)?;
        loaded.loaded_files.push(path.to_string());
        return Ok(loaded);
    }

    if no_config {
        log::debug!("[equals-config] Skipping config discovery due to --no-config");
        return Ok(loaded);
    }

    if let Some(user) = user_config {
        loaded.partial.merge(load_config_file(user)?);
        loaded.loaded_files.push(user.display().to_string());
    }

    if let Some(project) = discover_config(start) {
        loaded.partial.merge(load_config_file(&project)?);
        loaded.loaded_files.push(project.display().to_string());
    }

    Ok(loaded)
}
