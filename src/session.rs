//! The per-editor-session context and the user-facing command.
//!
//! A [`Session`] is built once when the integration starts. It owns the
//! configuration store, the process runner chosen for the configured
//! strategy, and the highlight manager. The host calls
//! [`Session::equals_command`] for the user verb and forwards trigger events
//! to [`Session::handle_event`].

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::{ConfigOverride, ConfigStore, Settings};
use crate::highlight::HighlightManager;
use crate::host::{DocumentId, Event, Host, Severity};
use crate::process::{ProcessRunner, select_runner};
use crate::sync::{self, EvaluationRequest, SyncError, SyncOutcome};

/// Name under which hosts register the command.
pub const COMMAND_NAME: &str = "Equals";

pub struct Session {
    store: ConfigStore,
    runner: Box<dyn ProcessRunner>,
    highlight: HighlightManager,
    in_flight: Mutex<HashSet<DocumentId>>,
}

/// Marks a document busy until dropped.
struct InFlightGuard<'a> {
    documents: &'a Mutex<HashSet<DocumentId>>,
    doc: DocumentId,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.doc);
    }
}

impl Session {
    /// Build a session; the runner is selected from the configured strategy.
    pub fn new(store: ConfigStore) -> Self {
        let runner = select_runner(store.config().strategy);
        Self::with_runner(store, runner)
    }

    pub fn with_runner(store: ConfigStore, runner: Box<dyn ProcessRunner>) -> Self {
        log::debug!("[equals-sync] Using {} process runner", runner.name());
        Self {
            store,
            runner,
            highlight: HighlightManager::new(),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub fn settings(&self) -> Arc<Settings> {
        self.store.settings()
    }

    pub fn highlight(&self) -> &HighlightManager {
        &self.highlight
    }

    /// Install highlighting for the initial configuration.
    pub fn attach<H: Host + ?Sized>(&mut self, host: &mut H) {
        let settings = self.store.settings();
        self.highlight.reconfigure(host, &settings);
    }

    /// Merge user overrides and refresh highlighting.
    ///
    /// The process runner is not replaced; the strategy is fixed when the
    /// session is built.
    pub fn reconfigure<H: Host + ?Sized>(&mut self, host: &mut H, partial: ConfigOverride) -> Arc<Settings> {
        if partial.strategy.is_some_and(|s| s != self.store.config().strategy) {
            log::warn!("[equals-sync] Execution strategy changes take effect in a new session");
        }
        let settings = self.store.reconfigure(partial);
        self.highlight.reconfigure(host, &settings);
        settings
    }

    /// Evaluate one document. Overlapping evaluations of the same document
    /// are rejected with [`SyncError::Busy`].
    pub fn evaluate<H: Host + ?Sized>(
        &self,
        host: &mut H,
        request: &EvaluationRequest,
    ) -> Result<SyncOutcome, SyncError> {
        let Some(_guard) = self.claim(request.document) else {
            let err = SyncError::Busy(request.document);
            host.notify(Severity::Error, &err.to_string());
            return Err(err);
        };
        let settings = self.store.settings();
        sync::run(host, &settings, self.runner.as_ref(), request)
    }

    /// The `Equals [language]` command: evaluate the focused document.
    pub fn equals_command<H: Host + ?Sized>(&self, host: &mut H, language: Option<&str>) {
        let Some(doc) = host.current_document() else {
            host.notify(Severity::Error, "No document to evaluate");
            return;
        };

        let mut request = EvaluationRequest::new(doc);
        if let Some(language) = language.map(str::trim).filter(|l| !l.is_empty()) {
            request = request.with_language(language);
        }
        // Failures were already reported to the host.
        let _ = self.evaluate(host, &request);
    }

    /// Forward a host event to the highlight manager.
    pub fn handle_event<H: Host + ?Sized>(&self, host: &mut H, event: Event) -> bool {
        let settings = self.store.settings();
        self.highlight.handle_event(host, &settings, event)
    }

    fn claim(&self, doc: DocumentId) -> Option<InFlightGuard<'_>> {
        let mut documents = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if !documents.insert(doc) {
            return None;
        }
        Some(InFlightGuard {
            documents: &self.in_flight,
            doc,
        })
    }
}
