/// Exit codes for equals-sync
///
/// These exit codes let scripts tell an evaluation failure apart from a
/// problem with equals-sync itself.
/// Success - The document was evaluated and written back
pub const SUCCESS: i32 = 0;

/// Evaluation failed - The evaluator reported an error or produced no result
pub const EVALUATION_FAILED: i32 = 1;

/// Tool error - Configuration error, file access error, or internal error
pub const TOOL_ERROR: i32 = 2;

/// Helper functions for consistent exit behavior
pub mod exit {
    use super::{EVALUATION_FAILED, SUCCESS, TOOL_ERROR};

    /// Exit with success code (0)
    pub fn success() -> ! {
        std::process::exit(SUCCESS);
    }

    /// Exit with evaluation failed code (1)
    pub fn evaluation_failed() -> ! {
        std::process::exit(EVALUATION_FAILED);
    }

    /// Exit with tool error code (2)
    pub fn tool_error() -> ! {
        std::process::exit(TOOL_ERROR);
    }
}
