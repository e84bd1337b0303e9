//! Error types for the runner module.

use thiserror::Error;

/// Result type alias for runner operations.
pub type RunnerResult<T> = Result<T, RunnerError>;

/// Errors that can occur while running a command.
///
/// A command that runs and exits non-zero is *not* an error at this level;
/// the exit code is reported on [`crate::ExecutionResult`].
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Shell not available: {0}")]
    ShellNotAvailable(String),

    #[error("Command execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Working directory does not exist: {0}")]
    InvalidWorkdir(String),

    #[error("Command timeout after {0} seconds")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
