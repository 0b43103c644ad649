//! Handler for the `config` command.

use colored::*;

use equals_sync::config::Config;
use equals_sync::exit_codes::exit;

use super::load_config_or_exit;

/// Handle the config command: print the effective or default configuration.
pub fn handle_config(defaults: bool, config_path: Option<&str>, no_config: bool) {
    let config = if defaults {
        Config::default()
    } else {
        load_config_or_exit(config_path, no_config).config().clone()
    };

    match toml::to_string_pretty(&config) {
        Ok(text) => print!("{text}"),
        Err(e) => {
            eprintln!("{}: Failed to serialize configuration: {}", "Error".red().bold(), e);
            exit::tool_error();
        }
    }
}
