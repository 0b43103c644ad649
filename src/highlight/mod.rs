//! Result highlighting.
//!
//! Each document moves at most once from [`HighlightState::Undecorated`] to
//! [`HighlightState::Decorated`]; the state is kept as a host document flag
//! and never cleared while the document stays loaded. The decision is the
//! pure function [`decide`]; [`HighlightManager`] wires it to host events.

pub mod patterns;

pub use patterns::{decoration_rules, marker_pattern, result_pattern};

use crate::config::{ClassificationSet, Settings};
use crate::host::{DocumentId, Event, EventKind, Host};

/// Subscription group owned by the highlight manager.
pub const SUBSCRIPTION_GROUP: &str = "equals-highlight";

/// Document flag recording that decoration rules were installed.
pub const DECORATED_FLAG: &str = "equals_highlighted";

/// Events that can decorate a document.
pub const TRIGGER_EVENTS: [EventKind; 2] = [EventKind::ClassificationChanged, EventKind::DocumentVisible];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightState {
    Undecorated,
    Decorated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Decorate,
    Stay,
}

/// Whether a document should be decorated now.
pub fn decide(
    enabled: bool,
    allowed: &ClassificationSet,
    classification: Option<&str>,
    state: HighlightState,
) -> Transition {
    if state == HighlightState::Decorated || !enabled {
        return Transition::Stay;
    }
    let permitted = match allowed {
        ClassificationSet::Any => true,
        ClassificationSet::Only(_) => classification.is_some_and(|c| allowed.contains(c)),
    };
    if permitted { Transition::Decorate } else { Transition::Stay }
}

/// Installs decoration rules on documents as they become eligible.
#[derive(Debug, Default)]
pub struct HighlightManager {
    active: bool,
}

impl HighlightManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether event subscriptions are currently installed.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn state<H: Host + ?Sized>(host: &H, doc: DocumentId) -> HighlightState {
        if host.flag(doc, DECORATED_FLAG) {
            HighlightState::Decorated
        } else {
            HighlightState::Undecorated
        }
    }

    /// Re-install subscriptions for the current settings.
    ///
    /// Previous subscriptions are always removed. When highlighting is
    /// enabled the decoration groups are (re)declared, both trigger events
    /// are subscribed and the focused document is evaluated right away.
    pub fn reconfigure<H: Host + ?Sized>(&mut self, host: &mut H, settings: &Settings) {
        host.clear_subscriptions(SUBSCRIPTION_GROUP);
        self.active = false;

        let config = &settings.config.highlight;
        if !config.enabled {
            log::debug!("[equals-sync] Highlighting disabled");
            return;
        }

        host.define_decoration(&config.marker_group, &config.marker_link);
        host.define_decoration(&config.result_group, &config.result_link);
        host.subscribe(SUBSCRIPTION_GROUP, &TRIGGER_EVENTS);
        self.active = true;

        if let Some(doc) = host.current_document() {
            self.apply(host, settings, doc);
        }
    }

    /// React to a host event. Returns `true` if the document was decorated.
    pub fn handle_event<H: Host + ?Sized>(&self, host: &mut H, settings: &Settings, event: Event) -> bool {
        if !self.active || !TRIGGER_EVENTS.contains(&event.kind) {
            return false;
        }
        self.apply(host, settings, event.document)
    }

    /// Decorate `doc` if the transition guard allows it.
    pub fn apply<H: Host + ?Sized>(&self, host: &mut H, settings: &Settings, doc: DocumentId) -> bool {
        if !host.is_loaded(doc) {
            return false;
        }
        let classification = host.classification(doc);
        let transition = decide(
            settings.config.highlight.enabled,
            &settings.highlight_allowed,
            classification.as_deref(),
            Self::state(host, doc),
        );
        if transition == Transition::Stay {
            return false;
        }

        for rule in decoration_rules(&settings.config.highlight) {
            host.add_decoration_rule(doc, rule);
        }
        host.set_flag(doc, DECORATED_FLAG, true);
        log::debug!(
            "[equals-sync] Decorated {doc} ({})",
            classification.as_deref().unwrap_or("unclassified")
        );
        true
    }
}
