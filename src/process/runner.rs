//! Process execution strategies.
//!
//! Both runners block the caller until the evaluator exits and report the
//! same [`ProcessOutput`] shape. No timeout is applied.

use std::process::{Command, Stdio};

use crate::config::ExecutionStrategy;

/// Result of running the evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code; -1 when the process was terminated by a signal.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Error raised before the evaluator produced an exit status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    /// The argv was empty.
    EmptyCommand,
    /// The process could not be started.
    Launch { program: String, message: String },
}

impl std::fmt::Display for ProcessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCommand => write!(f, "Empty command"),
            Self::Launch { program, message } => {
                write!(f, "Failed to launch '{program}': {message}")
            }
        }
    }
}

impl std::error::Error for ProcessError {}

/// Runs an argv to completion.
pub trait ProcessRunner: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn run(&self, argv: &[String]) -> Result<ProcessOutput, ProcessError>;
}

/// Pick the runner for a strategy. Called once when a session is built.
pub fn select_runner(strategy: ExecutionStrategy) -> Box<dyn ProcessRunner> {
    match strategy {
        ExecutionStrategy::Auto | ExecutionStrategy::Structured => Box::new(StructuredRunner),
        ExecutionStrategy::Legacy => Box::new(LegacyRunner),
    }
}

/// Spawns the evaluator directly with separate stdout and stderr pipes.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredRunner;

impl ProcessRunner for StructuredRunner {
    fn name(&self) -> &'static str {
        "structured"
    }

    fn run(&self, argv: &[String]) -> Result<ProcessOutput, ProcessError> {
        let (program, args) = argv.split_first().ok_or(ProcessError::EmptyCommand)?;

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| ProcessError::Launch {
                program: program.clone(),
                message: e.to_string(),
            })?;

        Ok(ProcessOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Runs the evaluator through the platform shell with stderr folded into
/// stdout. Reports the shell's last status; `stderr` is always empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyRunner;

impl ProcessRunner for LegacyRunner {
    fn name(&self) -> &'static str {
        "legacy"
    }

    fn run(&self, argv: &[String]) -> Result<ProcessOutput, ProcessError> {
        if argv.is_empty() {
            return Err(ProcessError::EmptyCommand);
        }

        let output = shell_command(argv)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| ProcessError::Launch {
                program: argv[0].clone(),
                message: e.to_string(),
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).to_string();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(ProcessOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: combined,
            stderr: String::new(),
        })
    }
}

#[cfg(not(windows))]
fn shell_command(argv: &[String]) -> Command {
    // `$0` is the program, `$@` the remaining arguments; no quoting needed.
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(r#"{ "$0" "$@"; } 2>&1"#).args(argv);
    cmd
}

#[cfg(windows)]
fn shell_command(argv: &[String]) -> Command {
    use std::os::windows::process::CommandExt;

    let line = argv.iter().map(|a| quote_windows(a)).collect::<Vec<_>>().join(" ");
    let mut cmd = Command::new("cmd");
    cmd.args(["/S", "/C"]).raw_arg(format!("\"{line} 2>&1\""));
    cmd
}

#[cfg(windows)]
fn quote_windows(arg: &str) -> String {
    if !arg.is_empty() && !arg.contains([' ', '\t', '"', '&', '|', '<', '>', '^']) {
        return arg.to_string();
    }
    format!("\"{}\"", arg.replace('"', "\"\""))
}
