//! Host editor surface.
//!
//! Everything equals-sync needs from the editor it runs inside is expressed by
//! the [`Host`] trait: reading and replacing document lines, per-document
//! attributes, window views, notifications, decoration rules and event
//! subscriptions. The editor owns all of that state; equals-sync only borrows
//! it for the duration of one operation.
//!
//! [`MemoryHost`] is a complete in-memory implementation used by the headless
//! CLI and by the test suite.

mod memory;

pub use memory::{DecorationSpan, MemoryHost};

use std::fmt;

/// Opaque handle to a document open in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u64);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "document {}", self.0)
    }
}

/// Opaque handle to a window displaying a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

/// Cursor and scroll state of a window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    /// 0-indexed cursor line.
    pub cursor_line: usize,
    /// 0-indexed cursor column (bytes).
    pub cursor_column: usize,
    /// First line visible in the window.
    pub top_line: usize,
    /// First column visible in the window.
    pub left_column: usize,
}

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// Host events the highlight manager reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The document's classification was set or changed.
    ClassificationChanged,
    /// The document became visible in a window.
    DocumentVisible,
}

/// A host event for one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub document: DocumentId,
}

/// A pattern-based decoration the host applies to a document.
///
/// `pattern` is a `fancy-regex` source matched against each line
/// independently. When `all_contexts` is set the rule must apply inside every
/// syntax context (strings, comments, embedded code).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecorationRule {
    pub group: String,
    pub pattern: String,
    pub all_contexts: bool,
}

/// Editor primitives consumed by equals-sync.
pub trait Host {
    /// Whether the document is open and its content is loaded.
    fn is_loaded(&self, doc: DocumentId) -> bool;

    /// All lines of the document, in order.
    fn lines(&self, doc: DocumentId) -> Vec<String>;

    /// Replace the entire content of the document.
    fn set_lines(&mut self, doc: DocumentId, lines: Vec<String>);

    /// The document's classification (file type), if any.
    fn classification(&self, doc: DocumentId) -> Option<String>;

    /// Read a per-document boolean attribute. Unset attributes read as `false`.
    fn flag(&self, doc: DocumentId, key: &str) -> bool;

    /// Set a per-document boolean attribute.
    fn set_flag(&mut self, doc: DocumentId, key: &str, value: bool);

    /// The focused document, if any.
    fn current_document(&self) -> Option<DocumentId>;

    /// The focused window, if any.
    fn current_window(&self) -> Option<WindowId>;

    /// The window that should keep its view when `doc` is rewritten.
    ///
    /// Prefers the focused window when it displays `doc`.
    fn window_for(&self, doc: DocumentId) -> Option<WindowId>;

    fn window_exists(&self, win: WindowId) -> bool;

    fn save_view(&self, win: WindowId) -> Option<ViewState>;

    fn restore_view(&mut self, win: WindowId, view: ViewState);

    /// Show a message to the user.
    fn notify(&mut self, severity: Severity, message: &str);

    /// Declare a decoration group with a default link. The link must not
    /// override a style the user already assigned to the group.
    fn define_decoration(&mut self, group: &str, default_link: &str);

    /// Install a decoration rule on a document.
    fn add_decoration_rule(&mut self, doc: DocumentId, rule: DecorationRule);

    /// Subscribe `group` to the given event kinds.
    fn subscribe(&mut self, group: &str, kinds: &[EventKind]);

    /// Drop every subscription registered under `group`.
    fn clear_subscriptions(&mut self, group: &str);
}
