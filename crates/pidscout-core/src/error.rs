//! # Error Types
//!
//! Error handling for process listing and attach-target selection.
//!
//! We use `thiserror` to automatically generate `Error` trait implementations
//! and nice error messages.

use std::time::Duration;

use thiserror::Error;

/// Failure while running or reading the process-listing helper
///
/// Every variant is fatal to the current request. Nothing is retried; the
/// caller re-issues the whole request if it wants another attempt.
#[derive(Error, Debug)]
pub enum HelperError
{
    /// The helper executable could not be started
    ///
    /// This happens when:
    /// - The helper path does not exist
    /// - The file is not executable (permissions, wrong architecture)
    #[error("Failed to start helper {path}: {source}")]
    Spawn
    {
        /// Path of the helper that failed to start
        path: String,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// Reading the helper's output or waiting for it failed
    #[error("IO error while reading helper output: {0}")]
    Io(#[from] std::io::Error),

    /// The helper ran but reported failure
    #[error("Helper exited with {}: {stderr}", exit_code_text(.code))]
    NonZeroExit
    {
        /// Exit code, or `None` when the helper was killed by a signal
        code: Option<i32>,
        /// Trimmed standard error output of the helper
        stderr: String,
    },

    /// The helper did not finish within the configured timeout
    ///
    /// The child process is killed when this is returned.
    #[error("Helper did not finish within {0:?}")]
    Timeout(Duration),

    /// The helper's output is not valid in the configured encoding
    #[error("Helper output is not valid {encoding}")]
    Decode
    {
        /// Name of the encoding used for decoding
        encoding: &'static str,
    },

    /// The configured encoding label is not known
    ///
    /// Labels follow the WHATWG Encoding Standard (`gbk`, `gb2312`,
    /// `windows-1252`, `utf-8`, ...).
    #[error("Unknown text encoding: {0}")]
    UnknownEncoding(String),
}

#[allow(clippy::ref_option)]
fn exit_code_text(code: &Option<i32>) -> String
{
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

/// Why an attach-target selection ended without a process
///
/// ## Error Categories
///
/// 1. **Fatal**: `HelperExecution` (listing failed), `NoCandidates` (nothing matched)
/// 2. **Benign**: `Cancelled` (the user dismissed the prompt)
#[derive(Error, Debug)]
pub enum SelectionError
{
    /// The process listing could not be obtained
    #[error("Failed to list processes: {0}")]
    HelperExecution(#[from] HelperError),

    /// Filtering eliminated every process
    ///
    /// The user is told that nothing matched instead of attaching to the
    /// wrong process.
    #[error("No process for attach")]
    NoCandidates,

    /// The user dismissed the process picker without choosing
    ///
    /// This is an expected outcome and must not be logged as an error.
    #[error("Process selection cancelled")]
    Cancelled,
}

impl SelectionError
{
    /// Whether this failure is the benign user-cancellation case
    #[must_use]
    pub fn is_cancelled(&self) -> bool
    {
        matches!(self, Self::Cancelled)
    }
}

/// Convenience type alias for `Result<T, SelectionError>`
///
/// ```rust
/// use pidscout_core::error::PidscoutResult;
/// fn foo() -> PidscoutResult<()>
/// {
///     Ok(())
/// }
/// ```
pub type PidscoutResult<T> = std::result::Result<T, SelectionError>;

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_exit_code_text()
    {
        assert_eq!(exit_code_text(&Some(3)), "status 3");
        assert_eq!(exit_code_text(&None), "a signal");
    }

    #[test]
    fn test_is_cancelled()
    {
        assert!(SelectionError::Cancelled.is_cancelled());
        assert!(!SelectionError::NoCandidates.is_cancelled());
    }
}
