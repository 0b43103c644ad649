//! In-memory host editor.
//!
//! Documents, windows and views live in plain maps. Replacing a document's
//! lines resets the view of every window showing it, the way a real buffer
//! rewrite moves the cursor, so callers that care about the view have to
//! restore it themselves.

use std::collections::{BTreeMap, HashMap, VecDeque};

use fancy_regex::Regex;

use super::{DecorationRule, DocumentId, Event, EventKind, Host, Severity, ViewState, WindowId};

#[derive(Debug, Default)]
struct MemoryDocument {
    lines: Vec<String>,
    classification: Option<String>,
    loaded: bool,
    flags: HashMap<String, bool>,
    rules: Vec<DecorationRule>,
}

#[derive(Debug)]
struct MemoryWindow {
    document: DocumentId,
    view: ViewState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DecorationGroup {
    link: String,
    user_defined: bool,
}

/// A decoration match produced by applying installed rules to a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecorationSpan {
    pub group: String,
    /// 0-indexed line.
    pub line: usize,
    /// Byte range within the line.
    pub start: usize,
    pub end: usize,
}

/// A self-contained [`Host`] implementation.
#[derive(Debug, Default)]
pub struct MemoryHost {
    next_id: u64,
    documents: BTreeMap<DocumentId, MemoryDocument>,
    windows: BTreeMap<WindowId, MemoryWindow>,
    current_window: Option<WindowId>,
    groups: BTreeMap<String, DecorationGroup>,
    subscriptions: HashMap<String, Vec<EventKind>>,
    pending: VecDeque<Event>,
    notifications: Vec<(Severity, String)>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Open and load a document.
    pub fn open_document<I, S>(&mut self, lines: I, classification: Option<&str>) -> DocumentId
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = DocumentId(self.next_id());
        let mut lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        self.documents.insert(
            id,
            MemoryDocument {
                lines,
                classification: classification.map(str::to_string),
                loaded: true,
                ..Default::default()
            },
        );
        if classification.is_some() {
            self.emit(EventKind::ClassificationChanged, id);
        }
        id
    }

    /// Open a window on `doc` and focus it.
    pub fn open_window(&mut self, doc: DocumentId) -> WindowId {
        let id = WindowId(self.next_id());
        self.windows.insert(
            id,
            MemoryWindow {
                document: doc,
                view: ViewState::default(),
            },
        );
        self.current_window = Some(id);
        self.emit(EventKind::DocumentVisible, doc);
        id
    }

    /// Display another document in an existing window.
    pub fn show_document(&mut self, win: WindowId, doc: DocumentId) {
        if let Some(window) = self.windows.get_mut(&win) {
            window.document = doc;
            window.view = ViewState::default();
            self.emit(EventKind::DocumentVisible, doc);
        }
    }

    pub fn focus(&mut self, win: WindowId) {
        if self.windows.contains_key(&win) {
            self.current_window = Some(win);
        }
    }

    pub fn close_window(&mut self, win: WindowId) {
        self.windows.remove(&win);
        if self.current_window == Some(win) {
            self.current_window = self.windows.keys().next().copied();
        }
    }

    /// Keep the document handle but drop its content.
    pub fn unload(&mut self, doc: DocumentId) {
        if let Some(document) = self.documents.get_mut(&doc) {
            document.loaded = false;
            document.flags.clear();
            document.rules.clear();
        }
    }

    pub fn set_classification(&mut self, doc: DocumentId, classification: &str) {
        if let Some(document) = self.documents.get_mut(&doc) {
            document.classification = Some(classification.to_string());
            self.emit(EventKind::ClassificationChanged, doc);
        }
    }

    /// Move the cursor and scroll position of a window.
    pub fn set_view(&mut self, win: WindowId, view: ViewState) {
        if let Some(window) = self.windows.get_mut(&win) {
            window.view = view;
        }
    }

    pub fn view(&self, win: WindowId) -> Option<ViewState> {
        self.windows.get(&win).map(|w| w.view)
    }

    /// Style a decoration group the way a user colorscheme would.
    pub fn set_user_style(&mut self, group: &str, link: &str) {
        self.groups.insert(
            group.to_string(),
            DecorationGroup {
                link: link.to_string(),
                user_defined: true,
            },
        );
    }

    /// The link currently in effect for a decoration group.
    pub fn decoration_link(&self, group: &str) -> Option<&str> {
        self.groups.get(group).map(|g| g.link.as_str())
    }

    pub fn subscriptions(&self, group: &str) -> &[EventKind] {
        self.subscriptions.get(group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Drain events raised since the last call, in order.
    pub fn take_events(&mut self) -> Vec<Event> {
        self.pending.drain(..).collect()
    }

    pub fn notifications(&self) -> &[(Severity, String)] {
        &self.notifications
    }

    pub fn last_notification(&self) -> Option<&(Severity, String)> {
        self.notifications.last()
    }

    pub fn rules(&self, doc: DocumentId) -> &[DecorationRule] {
        self.documents.get(&doc).map(|d| d.rules.as_slice()).unwrap_or(&[])
    }

    /// Apply every installed rule to the document's current content.
    pub fn decorations(&self, doc: DocumentId) -> Vec<DecorationSpan> {
        let Some(document) = self.documents.get(&doc) else {
            return Vec::new();
        };

        let mut spans = Vec::new();
        for rule in &document.rules {
            let regex = match Regex::new(&rule.pattern) {
                Ok(regex) => regex,
                Err(e) => {
                    log::warn!("[equals-sync] Invalid decoration pattern for {}: {e}", rule.group);
                    continue;
                }
            };
            for (line_idx, line) in document.lines.iter().enumerate() {
                for found in regex.find_iter(line) {
                    match found {
                        Ok(m) if m.start() < m.end() => spans.push(DecorationSpan {
                            group: rule.group.clone(),
                            line: line_idx,
                            start: m.start(),
                            end: m.end(),
                        }),
                        Ok(_) => {}
                        Err(e) => {
                            log::warn!("[equals-sync] Decoration match failed for {}: {e}", rule.group);
                            break;
                        }
                    }
                }
            }
        }
        spans.sort_by_key(|s| (s.line, s.start));
        spans
    }

    fn emit(&mut self, kind: EventKind, document: DocumentId) {
        if self.subscriptions.values().any(|kinds| kinds.contains(&kind)) {
            self.pending.push_back(Event { kind, document });
        }
    }
}

impl Host for MemoryHost {
    fn is_loaded(&self, doc: DocumentId) -> bool {
        self.documents.get(&doc).is_some_and(|d| d.loaded)
    }

    fn lines(&self, doc: DocumentId) -> Vec<String> {
        self.documents.get(&doc).map(|d| d.lines.clone()).unwrap_or_default()
    }

    fn set_lines(&mut self, doc: DocumentId, lines: Vec<String>) {
        let Some(document) = self.documents.get_mut(&doc) else {
            return;
        };
        document.lines = if lines.is_empty() { vec![String::new()] } else { lines };
        for window in self.windows.values_mut().filter(|w| w.document == doc) {
            window.view = ViewState::default();
        }
    }

    fn classification(&self, doc: DocumentId) -> Option<String> {
        self.documents.get(&doc).and_then(|d| d.classification.clone())
    }

    fn flag(&self, doc: DocumentId, key: &str) -> bool {
        self.documents
            .get(&doc)
            .and_then(|d| d.flags.get(key).copied())
            .unwrap_or(false)
    }

    fn set_flag(&mut self, doc: DocumentId, key: &str, value: bool) {
        if let Some(document) = self.documents.get_mut(&doc) {
            document.flags.insert(key.to_string(), value);
        }
    }

    fn current_document(&self) -> Option<DocumentId> {
        self.current_window
            .and_then(|win| self.windows.get(&win))
            .map(|w| w.document)
    }

    fn current_window(&self) -> Option<WindowId> {
        self.current_window
    }

    fn window_for(&self, doc: DocumentId) -> Option<WindowId> {
        if let Some(win) = self.current_window
            && self.windows.get(&win).is_some_and(|w| w.document == doc)
        {
            return Some(win);
        }
        self.windows
            .iter()
            .find(|(_, w)| w.document == doc)
            .map(|(id, _)| *id)
    }

    fn window_exists(&self, win: WindowId) -> bool {
        self.windows.contains_key(&win)
    }

    fn save_view(&self, win: WindowId) -> Option<ViewState> {
        self.view(win)
    }

    fn restore_view(&mut self, win: WindowId, view: ViewState) {
        let Some(window) = self.windows.get_mut(&win) else {
            return;
        };
        let line_count = self
            .documents
            .get(&window.document)
            .map(|d| d.lines.len())
            .unwrap_or(1);
        let last = line_count.saturating_sub(1);
        window.view = ViewState {
            cursor_line: view.cursor_line.min(last),
            top_line: view.top_line.min(last),
            ..view
        };
    }

    fn notify(&mut self, severity: Severity, message: &str) {
        self.notifications.push((severity, message.to_string()));
    }

    fn define_decoration(&mut self, group: &str, default_link: &str) {
        let entry = self.groups.entry(group.to_string()).or_insert_with(|| DecorationGroup {
            link: default_link.to_string(),
            user_defined: false,
        });
        if !entry.user_defined {
            entry.link = default_link.to_string();
        }
    }

    fn add_decoration_rule(&mut self, doc: DocumentId, rule: DecorationRule) {
        if let Some(document) = self.documents.get_mut(&doc) {
            document.rules.push(rule);
        }
    }

    fn subscribe(&mut self, group: &str, kinds: &[EventKind]) {
        let entry = self.subscriptions.entry(group.to_string()).or_default();
        for kind in kinds {
            if !entry.contains(kind) {
                entry.push(*kind);
            }
        }
    }

    fn clear_subscriptions(&mut self, group: &str) {
        self.subscriptions.remove(group);
    }
}
