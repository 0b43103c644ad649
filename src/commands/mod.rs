//! Command handlers for the equals-sync CLI.
//!
//! Each subcommand has its own module with a public handler function
//! that `main()` dispatches to.

pub mod config;
pub mod eval;
pub mod highlight;
pub mod init;

use colored::*;
use std::fs;
use std::path::Path;

use equals_sync::config::{self as equals_config, ConfigStore};
use equals_sync::exit_codes::exit;

/// Load configuration, exiting with a tool error on failure.
pub fn load_config_or_exit(config_path: Option<&str>, no_config: bool) -> ConfigStore {
    match equals_config::load_with_discovery(config_path, no_config) {
        Ok(loaded) => {
            for file in &loaded.loaded_files {
                log::debug!("[equals-config] Loaded {file}");
            }
            loaded.into_store()
        }
        Err(e) => {
            eprintln!("{}: {}", "Config error".red().bold(), e);
            exit::tool_error();
        }
    }
}

/// Read a file as document lines, exiting with a tool error on failure.
pub fn read_lines_or_exit(path: &Path) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(content) => content.lines().map(str::to_string).collect(),
        Err(e) => {
            eprintln!("{}: Failed to read {}: {}", "Error".red().bold(), path.display(), e);
            exit::tool_error();
        }
    }
}

/// Classification for a file, derived from its extension.
pub fn classification_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "py" | "pyw" => Some("python"),
        "md" | "markdown" => Some("markdown"),
        "nbt" => Some("numbat"),
        "fend" => Some("fend"),
        "txt" => Some("text"),
        _ => None,
    }
}
