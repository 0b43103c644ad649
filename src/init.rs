//! Default configuration scaffolding.
//! This module provides initialization utilities for equals-sync, such as creating default configuration files.

use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Error type for initialization operations
#[derive(Error, Debug)]
pub enum InitError {
    #[error("Failed to access file {path}: {source}")]
    IoError { source: io::Error, path: String },
}

/// Commented template written by `equals-sync init`.
pub const DEFAULT_CONFIG: &str = r##"# equals-sync configuration file

# Evaluator executable and arguments placed before the generated flags
executable = "equals"
extra-args = []

# Pass classifications without a [languages] entry to the evaluator verbatim
pass-classification = false

# Process execution: "auto", "structured" or "legacy"
strategy = "auto"

# Classifications evaluated with --markdown ("*" for all)
markdown = ["markdown"]

# Directory for transient exchange files (default: system temp dir)
# temp-dir = "/tmp"

[languages]
# classification = "evaluator language"
python = "python"
numbat = "numbat"
fend = "fend"

[highlight]
enabled = true
# Sentinel that introduces a result, and the sequence that ends it
sentinel = "#="
comment = "#"
# Decoration groups and the styles they link to unless already styled
marker-group = "EqualsMarker"
result-group = "EqualsResult"
marker-link = "Operator"
result-link = "Special"
# Classifications that get decorated ("*" for all)
classifications = ["python", "numbat", "fend", "markdown", "text"]
"##;

/// Create a default configuration file at the specified path.
///
/// Returns `true` if the file was created, or `false` if it already exists.
///
/// # Errors
///
/// Returns an error if the file cannot be created due to permissions or other I/O errors.
pub fn create_default_config(path: &str) -> Result<bool, InitError> {
    if Path::new(path).exists() {
        return Ok(false);
    }

    fs::write(path, DEFAULT_CONFIG).map_err(|e| InitError::IoError {
        source: e,
        path: path.to_string(),
    })?;

    Ok(true)
}
