//! Editor integration for the `equals` evaluator.
//!
//! Users annotate expressions in a document with a sentinel (`#=` by
//! default). equals-sync hands the whole document to the external evaluator
//! through a pair of transient files and replaces the document with the
//! evaluated result, keeping the cursor and scroll position where they were.
//! A highlight manager decorates sentinels and results once per document.
//!
//! The editor is abstracted by [`host::Host`]; [`session::Session`] is the
//! entry point a host wires its command and events to.

pub mod config;
pub mod exchange;
pub mod exit_codes;
pub mod highlight;
pub mod host;
pub mod init;
pub mod language;
pub mod process;
pub mod session;
pub mod sync;

pub use config::{Config, ConfigOverride, ConfigStore, Settings};
pub use host::{DocumentId, Host, MemoryHost, WindowId};
pub use session::Session;
pub use sync::{EvaluationRequest, SyncError, SyncOutcome};
