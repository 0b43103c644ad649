//! Handler for the `eval` command.

use colored::*;
use std::fs;
use std::path::PathBuf;

use equals_sync::exchange::serialize_lines;
use equals_sync::exit_codes::exit;
use equals_sync::host::{Host, MemoryHost, Severity};
use equals_sync::{EvaluationRequest, Session, SyncError};

use super::{classification_for, load_config_or_exit, read_lines_or_exit};

/// Options for `equals-sync eval`.
pub struct EvalArgs {
    pub file: PathBuf,
    pub language: Option<String>,
    pub classification: Option<String>,
    pub markdown: Option<bool>,
    pub stdout: bool,
}

/// Handle the eval command: evaluate a file and write the result back.
pub fn handle_eval(args: EvalArgs, config_path: Option<&str>, no_config: bool) {
    let store = load_config_or_exit(config_path, no_config);
    let lines = read_lines_or_exit(&args.file);

    let classification = args
        .classification
        .clone()
        .or_else(|| classification_for(&args.file).map(str::to_string));

    let mut host = MemoryHost::new();
    let doc = host.open_document(lines, classification.as_deref());
    host.open_window(doc);

    let mut request = EvaluationRequest::new(doc);
    if let Some(language) = args.language.filter(|l| !l.trim().is_empty()) {
        request = request.with_language(language.trim());
    }
    if let Some(markdown) = args.markdown {
        request = request.with_markdown(markdown);
    }

    let session = Session::new(store);
    match session.evaluate(&mut host, &request) {
        Ok(outcome) => {
            let text = serialize_lines(&host.lines(doc));
            if args.stdout {
                print!("{text}");
            } else if let Err(e) = fs::write(&args.file, text) {
                eprintln!("{}: Failed to write {}: {}", "Error".red().bold(), args.file.display(), e);
                exit::tool_error();
            }
            log::info!(
                "[equals-sync] Evaluated {} ({} lines, language: {})",
                args.file.display(),
                outcome.lines,
                outcome.language.as_deref().unwrap_or("inferred")
            );
        }
        Err(e) => {
            for (severity, message) in host.notifications() {
                if *severity == Severity::Error {
                    eprintln!("{}: {}", "Error".red().bold(), message);
                }
            }
            match e {
                SyncError::Evaluator { .. } | SyncError::ReadOutput(_) | SyncError::Launch(_) => {
                    exit::evaluation_failed()
                }
                _ => exit::tool_error(),
            }
        }
    }
}
