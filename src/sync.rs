//! Document round trip through the evaluator.
//!
//! [`run`] snapshots a document, writes it to a transient input file, runs
//! the evaluator and, when it succeeds with a readable result, replaces the
//! document content while keeping the originating window's view. The
//! document is never touched on any failure path, and the transient files
//! are removed on every path.

use std::io;

use crate::config::Settings;
use crate::exchange::ExchangeFiles;
use crate::host::{DocumentId, Host, Severity};
use crate::language::LanguageResolver;
use crate::process::{ProcessError, ProcessOutput, ProcessRunner, build_invocation};

/// One evaluation of one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationRequest {
    pub document: DocumentId,
    /// Used instead of the document's own classification.
    pub classification: Option<String>,
    /// Evaluator language, bypassing resolution.
    pub language: Option<String>,
    /// Force markdown mode on or off.
    pub markdown: Option<bool>,
}

impl EvaluationRequest {
    pub fn new(document: DocumentId) -> Self {
        Self {
            document,
            classification: None,
            language: None,
            markdown: None,
        }
    }

    pub fn with_classification(mut self, classification: impl Into<String>) -> Self {
        self.classification = Some(classification.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_markdown(mut self, markdown: bool) -> Self {
        self.markdown = Some(markdown);
        self
    }
}

/// What a successful evaluation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Number of lines now in the document.
    pub lines: usize,
    pub language: Option<String>,
    pub markdown: bool,
    pub view_restored: bool,
}

/// Reasons an evaluation did not update the document.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Cannot evaluate {0}: it is not loaded")]
    NotLoaded(DocumentId),

    #[error("An evaluation is already running for {0}")]
    Busy(DocumentId),

    #[error("Failed to create temporary files: {0}")]
    Exchange(#[source] io::Error),

    #[error("Failed to write evaluator input: {0}")]
    WriteInput(#[source] io::Error),

    #[error("{0}")]
    Launch(#[from] ProcessError),

    #[error("{message}")]
    Evaluator { exit_code: i32, message: String },

    #[error("Failed to read evaluator output: {0}")]
    ReadOutput(#[source] io::Error),
}

/// Pick the most useful text explaining a failed evaluator run.
///
/// Trimmed stderr, else trimmed stdout, else a message naming the exit code.
pub fn evaluator_diagnostic(output: &ProcessOutput) -> String {
    let stderr = output.stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    let stdout = output.stdout.trim();
    if !stdout.is_empty() {
        return stdout.to_string();
    }
    format!("Evaluator exited with code {}", output.exit_code)
}

/// Evaluate a document and write the result back.
///
/// Every failure is reported once through [`Host::notify`] at error
/// severity and returned.
pub fn run<H: Host + ?Sized>(
    host: &mut H,
    settings: &Settings,
    runner: &dyn ProcessRunner,
    request: &EvaluationRequest,
) -> Result<SyncOutcome, SyncError> {
    let temp_dir = settings.config.temp_dir.clone();
    run_with(host, settings, runner, request, || ExchangeFiles::allocate(temp_dir.as_deref()))
}

pub(crate) fn run_with<H, F>(
    host: &mut H,
    settings: &Settings,
    runner: &dyn ProcessRunner,
    request: &EvaluationRequest,
    allocate: F,
) -> Result<SyncOutcome, SyncError>
where
    H: Host + ?Sized,
    F: FnOnce() -> io::Result<ExchangeFiles>,
{
    let result = evaluate(host, settings, runner, request, allocate);
    if let Err(e) = &result {
        log::debug!("[equals-sync] Evaluation of {} failed: {e}", request.document);
        host.notify(Severity::Error, &e.to_string());
    }
    result
}

fn evaluate<H, F>(
    host: &mut H,
    settings: &Settings,
    runner: &dyn ProcessRunner,
    request: &EvaluationRequest,
    allocate: F,
) -> Result<SyncOutcome, SyncError>
where
    H: Host + ?Sized,
    F: FnOnce() -> io::Result<ExchangeFiles>,
{
    let doc = request.document;
    if !host.is_loaded(doc) {
        return Err(SyncError::NotLoaded(doc));
    }

    let classification = request.classification.clone().or_else(|| host.classification(doc));
    let resolver = LanguageResolver::new(settings);
    let language = resolver.resolve(classification.as_deref(), request.language.as_deref());
    let markdown = resolver.resolve_markdown(classification.as_deref(), request.markdown);
    let window = host.window_for(doc);

    let lines = host.lines(doc);

    // Dropped on every return below.
    let files = allocate().map_err(SyncError::Exchange)?;
    files.write_input(&lines).map_err(SyncError::WriteInput)?;

    let argv = build_invocation(
        &settings.config.executable,
        &settings.config.extra_args,
        language.as_deref(),
        markdown,
        files.input(),
        files.output(),
    );
    log::debug!("[equals-sync] Running {} evaluator: {argv:?}", runner.name());

    let output = runner.run(&argv)?;
    if !output.success() {
        return Err(SyncError::Evaluator {
            exit_code: output.exit_code,
            message: evaluator_diagnostic(&output),
        });
    }

    let mut result = files.read_output().map_err(SyncError::ReadOutput)?;
    if result.is_empty() {
        result.push(String::new());
    }
    let line_count = result.len();

    let view = window.and_then(|win| host.save_view(win).map(|view| (win, view)));
    host.set_lines(doc, result);

    let view_restored = match view {
        Some((win, view)) if host.window_exists(win) => {
            host.restore_view(win, view);
            true
        }
        _ => false,
    };

    log::debug!("[equals-sync] Replaced {doc} with {line_count} lines");
    Ok(SyncOutcome {
        lines: line_count,
        language,
        markdown,
        view_restored,
    })
}
