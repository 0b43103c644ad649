//! External evaluator invocation.
//!
//! [`build_invocation`] produces the argv the evaluator expects and a
//! [`ProcessRunner`] executes it. Two runners share one contract:
//! [`StructuredRunner`] keeps stdout and stderr apart, [`LegacyRunner`] runs
//! through the platform shell and reports combined output.

pub mod invocation;
pub mod runner;

pub use invocation::build_invocation;
pub use runner::{LegacyRunner, ProcessError, ProcessOutput, ProcessRunner, StructuredRunner, select_runner};
