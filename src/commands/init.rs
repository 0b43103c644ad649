//! Handler for the `init` command.

use colored::*;

use equals_sync::exit_codes::exit;
use equals_sync::init::create_default_config;

/// Handle the init command: write a commented default configuration.
pub fn handle_init(path: &str) {
    match create_default_config(path) {
        Ok(true) => println!("Created default configuration file: {path}"),
        Ok(false) => {
            eprintln!("{}: Configuration file already exists: {}", "Error".red().bold(), path);
            exit::tool_error();
        }
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            exit::tool_error();
        }
    }
}
