//! End-to-end evaluation through a real child process.
#![cfg(unix)]

mod common;

use common::{StubEvaluator, lines};
use equals_sync::config::parse_config;
use equals_sync::host::{Severity, ViewState};
use equals_sync::process::{LegacyRunner, ProcessRunner, StructuredRunner};
use equals_sync::{ConfigStore, EvaluationRequest, Host, MemoryHost, Session, SyncError};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn session_for(stub: &StubEvaluator, exchange_dir: &Path, runner: Box<dyn ProcessRunner>) -> Session {
    let toml = format!(
        "{}temp-dir = {:?}\n",
        stub.config_toml("auto"),
        exchange_dir.display().to_string()
    );
    let mut store = ConfigStore::new();
    store.reconfigure(parse_config(&toml, "test").unwrap());
    Session::with_runner(store, runner)
}

fn runners() -> Vec<Box<dyn ProcessRunner>> {
    vec![Box::new(StructuredRunner), Box::new(LegacyRunner)]
}

#[test]
fn test_python_document_is_replaced_with_result() {
    for runner in runners() {
        let temp = tempdir().unwrap();
        let exchange = temp.path().join("exchange");
        fs::create_dir(&exchange).unwrap();
        let stub = StubEvaluator::install(temp.path());
        let name = runner.name();
        let session = session_for(&stub, &exchange, runner);

        let mut host = MemoryHost::new();
        let doc = host.open_document(["x = 1", "1 + 2 #="], Some("python"));
        let win = host.open_window(doc);
        host.set_view(
            win,
            ViewState {
                cursor_line: 1,
                cursor_column: 3,
                top_line: 0,
                left_column: 0,
            },
        );

        let outcome = session.evaluate(&mut host, &EvaluationRequest::new(doc)).unwrap();

        assert_eq!(host.lines(doc), lines(&["x = 1", "1 + 2 #= 3"]), "runner: {name}");
        assert_eq!(outcome.language.as_deref(), Some("python"));
        assert!(!outcome.markdown);
        assert!(outcome.view_restored);
        assert_eq!(host.view(win).unwrap().cursor_line, 1);
        assert_eq!(host.view(win).unwrap().cursor_column, 3);

        let calls = stub.invocations();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0][0], "--language");
        assert_eq!(calls[0][1], "python");
        assert_eq!(calls[0][2], "--input");
        assert_eq!(calls[0][4], "--output");

        // Exchange files are gone once the evaluation returns.
        assert_eq!(fs::read_dir(&exchange).unwrap().count(), 0, "runner: {name}");
    }
}

#[test]
fn test_markdown_document_passes_markdown_flag() {
    let temp = tempdir().unwrap();
    let stub = StubEvaluator::install(temp.path());
    let session = session_for(&stub, temp.path(), Box::new(StructuredRunner));

    let mut host = MemoryHost::new();
    let doc = host.open_document(["# Notes", "", "2 * 3 #="], Some("markdown"));
    host.open_window(doc);

    let outcome = session.evaluate(&mut host, &EvaluationRequest::new(doc)).unwrap();

    assert!(outcome.markdown);
    assert_eq!(outcome.language, None);
    assert_eq!(host.lines(doc), lines(&["# Notes", "", "2 * 3 #= 6"]));
    let calls = stub.invocations();
    assert_eq!(calls[0][0], "--markdown");
}

#[test]
fn test_evaluator_failure_leaves_document_untouched() {
    for runner in runners() {
        let temp = tempdir().unwrap();
        let exchange = temp.path().join("exchange");
        fs::create_dir(&exchange).unwrap();
        let stub = StubEvaluator::install(temp.path());
        let name = runner.name();
        let session = session_for(&stub, &exchange, runner);

        let mut host = MemoryHost::new();
        let original = lines(&["raise ValueError", "1 + 1 #="]);
        let doc = host.open_document(original.clone(), Some("python"));
        host.open_window(doc);

        let err = session.evaluate(&mut host, &EvaluationRequest::new(doc)).unwrap_err();

        match err {
            SyncError::Evaluator { exit_code, message } => {
                assert_eq!(exit_code, 1, "runner: {name}");
                assert_eq!(message, "SyntaxError: invalid syntax", "runner: {name}");
            }
            other => panic!("unexpected error from {name}: {other:?}"),
        }
        assert_eq!(host.lines(doc), original);
        assert_eq!(
            host.last_notification(),
            Some(&(Severity::Error, "SyntaxError: invalid syntax".to_string()))
        );
        assert_eq!(fs::read_dir(&exchange).unwrap().count(), 0, "runner: {name}");
    }
}

#[test]
fn test_missing_executable_is_reported() {
    let mut store = ConfigStore::new();
    store.reconfigure(parse_config("executable = \"equals-sync-no-such-evaluator\"\n", "test").unwrap());
    let session = Session::with_runner(store, Box::new(StructuredRunner));

    let mut host = MemoryHost::new();
    let doc = host.open_document(["1 #="], Some("python"));
    host.open_window(doc);

    let err = session.evaluate(&mut host, &EvaluationRequest::new(doc)).unwrap_err();

    assert!(matches!(err, SyncError::Launch(_)));
    assert_eq!(host.lines(doc), lines(&["1 #="]));
    assert_eq!(host.last_notification().map(|(s, _)| *s), Some(Severity::Error));
}

#[test]
fn test_equals_command_with_language_override() {
    let temp = tempdir().unwrap();
    let stub = StubEvaluator::install(temp.path());
    let session = session_for(&stub, temp.path(), Box::new(StructuredRunner));

    let mut host = MemoryHost::new();
    let doc = host.open_document(["4 / 2 #="], Some("text"));
    host.open_window(doc);

    session.equals_command(&mut host, Some("  fend "));

    assert_eq!(host.lines(doc), lines(&["4 / 2 #= 2"]));
    let calls = stub.invocations();
    assert_eq!(&calls[0][..2], &["--language".to_string(), "fend".to_string()]);
}

#[test]
fn test_repeated_evaluation_is_stable() {
    let temp = tempdir().unwrap();
    let stub = StubEvaluator::install(temp.path());
    let session = session_for(&stub, temp.path(), Box::new(StructuredRunner));

    let mut host = MemoryHost::new();
    let doc = host.open_document(["7 - 2 #="], Some("numbat"));
    host.open_window(doc);

    session.evaluate(&mut host, &EvaluationRequest::new(doc)).unwrap();
    assert_eq!(host.lines(doc), lines(&["7 - 2 #= 5"]));

    // The stub recomputes from the text before the marker.
    session.evaluate(&mut host, &EvaluationRequest::new(doc)).unwrap();
    assert_eq!(host.lines(doc), lines(&["7 - 2 #= 5"]));
    assert_eq!(stub.invocations().len(), 2);
}
