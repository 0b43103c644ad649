//!
//! This module defines configuration structures, the session configuration
//! store and file discovery for equals-sync. Configuration files are TOML in
//! kebab-case; every source (user file, project file, CLI flags, programmatic
//! calls) is expressed as a [`ConfigOverride`] and merged onto the defaults.

pub mod types;
pub use types::*;

pub mod store;
pub use store::*;

mod loading;
pub use loading::{
    CONFIG_FILES, ConfigError, LoadedConfig, discover_config, load_config_file, load_with_discovery, parse_config,
    user_config_path,
};
