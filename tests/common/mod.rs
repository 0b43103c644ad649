//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// A POSIX shell stand-in for the evaluator.
///
/// Lines containing `#=` get the shell-arithmetic value of the text before
/// the marker appended. A document containing `raise` fails with a
/// diagnostic on stderr. Every invocation's arguments are appended to
/// `args.log` next to the script, one per line, followed by `--`.
const STUB: &str = r#"log="$(dirname "$0")/args.log"
for arg in "$@"; do printf '%s\n' "$arg" >> "$log"; done
echo -- >> "$log"

input=""
output=""
while [ $# -gt 0 ]; do
  case "$1" in
    --input) input="$2"; shift 2 ;;
    --output) output="$2"; shift 2 ;;
    *) shift ;;
  esac
done

if grep -q raise "$input"; then
  echo "SyntaxError: invalid syntax" >&2
  exit 1
fi

: > "$output"
while IFS= read -r line || [ -n "$line" ]; do
  case "$line" in
    *'#='*)
      expr="${line%%#=*}"
      printf '%s#= %s\n' "$expr" "$(($expr))" >> "$output" ;;
    *)
      printf '%s\n' "$line" >> "$output" ;;
  esac
done < "$input"
"#;

/// Evaluator stub installed in a directory.
pub struct StubEvaluator {
    pub script: PathBuf,
    pub log: PathBuf,
}

impl StubEvaluator {
    pub fn install(dir: &Path) -> Self {
        let script = dir.join("evaluator.sh");
        fs::write(&script, STUB).unwrap();
        Self {
            script,
            log: dir.join("args.log"),
        }
    }

    /// Arguments of each recorded invocation, script path excluded.
    pub fn invocations(&self) -> Vec<Vec<String>> {
        let content = fs::read_to_string(&self.log).unwrap_or_default();
        let mut calls = Vec::new();
        let mut current = Vec::new();
        for line in content.lines() {
            if line == "--" {
                calls.push(std::mem::take(&mut current));
            } else {
                current.push(line.to_string());
            }
        }
        calls
    }

    /// TOML configuration that runs this stub through `sh`.
    pub fn config_toml(&self, strategy: &str) -> String {
        format!(
            "executable = \"sh\"\nextra-args = [{:?}]\nstrategy = \"{strategy}\"\n",
            self.script.display().to_string()
        )
    }

    /// Write a configuration file for this stub and return its path.
    pub fn write_config(&self, dir: &Path, strategy: &str) -> PathBuf {
        let path = dir.join("equals.toml");
        fs::write(&path, self.config_toml(strategy)).unwrap();
        path
    }
}

pub fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
