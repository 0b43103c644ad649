//! Handler for the `highlight` command.

use colored::*;
use std::path::Path;

use equals_sync::Session;
use equals_sync::highlight::{HighlightManager, HighlightState};
use equals_sync::host::{Host, MemoryHost};

use super::{classification_for, load_config_or_exit, read_lines_or_exit};

/// Handle the highlight command: print the decorations a document would get.
pub fn handle_highlight(file: &Path, classification: Option<String>, config_path: Option<&str>, no_config: bool) {
    let store = load_config_or_exit(config_path, no_config);
    let lines = read_lines_or_exit(file);
    let classification = classification.or_else(|| classification_for(file).map(str::to_string));

    let mut host = MemoryHost::new();
    let doc = host.open_document(lines, classification.as_deref());
    host.open_window(doc);

    let mut session = Session::new(store);
    session.attach(&mut host);

    if HighlightManager::state(&host, doc) == HighlightState::Undecorated {
        eprintln!(
            "{}: {} is not decorated (classification: {})",
            "Note".yellow().bold(),
            file.display(),
            classification.as_deref().unwrap_or("none")
        );
        return;
    }

    let lines = host.lines(doc);
    for span in host.decorations(doc) {
        let text = &lines[span.line][span.start..span.end];
        println!(
            "{}:{}-{} {} {:?}",
            span.line + 1,
            span.start + 1,
            span.end,
            span.group.cyan(),
            text
        );
    }
}
