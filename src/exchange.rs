//! Transient files used to hand a document to the evaluator and back.
//!
//! Each invocation gets its own private directory holding an `input` and an
//! `output` path. The output path does not exist until the evaluator writes
//! it, so a missing result is detectable. Everything is removed when the
//! [`ExchangeFiles`] value is dropped; removal errors are logged and
//! swallowed.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::TempDir;

const DIR_PREFIX: &str = "equals-";

/// An input/output path pair owned by one invocation.
#[derive(Debug)]
pub struct ExchangeFiles {
    dir: Option<TempDir>,
    input: PathBuf,
    output: PathBuf,
}

impl ExchangeFiles {
    /// Allocate a fresh pair under `parent`, or the system temp directory.
    pub fn allocate(parent: Option<&Path>) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(DIR_PREFIX);
        let dir = match parent {
            Some(parent) => builder.tempdir_in(parent)?,
            None => builder.tempdir()?,
        };
        let input = dir.path().join("input");
        let output = dir.path().join("output");
        log::debug!("[equals-sync] Allocated exchange directory {}", dir.path().display());

        Ok(Self {
            dir: Some(dir),
            input,
            output,
        })
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Write document lines to the input path.
    pub fn write_input(&self, lines: &[String]) -> io::Result<()> {
        let mut file = io::BufWriter::new(fs::File::create(&self.input)?);
        file.write_all(serialize_lines(lines).as_bytes())?;
        file.flush()
    }

    /// Read the evaluator's result from the output path.
    pub fn read_output(&self) -> io::Result<Vec<String>> {
        let content = fs::read_to_string(&self.output)?;
        Ok(content.lines().map(str::to_string).collect())
    }
}

impl Drop for ExchangeFiles {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            let path = dir.path().to_path_buf();
            if let Err(e) = dir.close() {
                log::debug!("[equals-sync] Failed to remove {}: {e}", path.display());
            }
        }
    }
}

/// Serialize lines with one trailing newline each.
///
/// An empty document (no lines, or one empty line) becomes an empty stream.
pub fn serialize_lines(lines: &[String]) -> String {
    if lines.is_empty() || (lines.len() == 1 && lines[0].is_empty()) {
        return String::new();
    }
    let mut out = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}
