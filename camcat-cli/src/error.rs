// ============================================================================
// camcat-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Result alias and exit code mapping
//
// The CLI reports core errors as they are; the only CLI-specific decision
// is which process exit code each outcome gets.

use camcat_core::{CoreError, CoreResult};

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Process exit code for a finished run.
///
/// An empty directory is not a failure: the recorder simply has not written
/// anything new yet.
pub fn exit_code(result: &CliResult<()>) -> i32 {
    match result {
        Ok(()) | Err(CoreError::NoFilesFound) => 0,
        Err(_) => 1,
    }
}
