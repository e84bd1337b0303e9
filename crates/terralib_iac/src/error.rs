//! Error types for terralib.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codes::{ErrorCode, Verb};

/// Result type alias for terralib operations.
pub type IacResult<T> = Result<T, IacError>;

/// A terraform failure recognized in command output.
///
/// `reason` is text lifted from terraform's own messages and may change
/// between terraform releases; match on `code` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{code}")]
pub struct CommandError {
    pub verb: Verb,
    pub code: ErrorCode,
    pub reason: String,
}

impl CommandError {
    pub fn new(verb: Verb, code: ErrorCode, reason: impl Into<String>) -> Self {
        Self {
            verb,
            code,
            reason: reason.into(),
        }
    }
}

/// Errors that can occur during terralib operations.
#[derive(Error, Debug)]
pub enum IacError {
    #[error("Terraform {} failed: {}: {}", .0.verb, .0.code, .0.reason)]
    Command(CommandError),

    #[error("Terraform {verb} exited with code {exit_code} and no recognizable error")]
    UnrecognizedFailure { verb: Verb, exit_code: i32 },

    #[error("Terraform not available: {0}")]
    TerraformNotAvailable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Runner error: {0}")]
    Runner(#[from] terralib_runner::RunnerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<CommandError> for IacError {
    fn from(err: CommandError) -> Self {
        IacError::Command(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_displays_code() {
        let err = CommandError::new(
            Verb::Init,
            ErrorCode::ProviderNotFound,
            "Provider \"x\" not available for installation",
        );
        assert_eq!(err.to_string(), "provider-not-found");
    }

    #[test]
    fn test_iac_error_includes_reason() {
        let err: IacError =
            CommandError::new(Verb::Plan, ErrorCode::Default, "something wrong happened").into();
        assert_eq!(err.to_string(), "Terraform plan failed: default: something wrong happened");
    }
}
