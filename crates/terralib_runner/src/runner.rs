//! Command runner trait and types.

use std::borrow::Cow;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{CommandConfig, RunConfig};
use crate::error::RunnerResult;

/// Result of a command execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// The command line that was run
    pub command_line: String,
    /// Exit code (-1 when the process was killed by a signal)
    pub exit_code: i32,
    /// Combined stdout + stderr, in the order the process wrote them
    pub output: Vec<u8>,
    /// Execution start time
    pub started_at: DateTime<Utc>,
    /// Execution end time
    pub finished_at: DateTime<Utc>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl ExecutionResult {
    /// Check if execution was successful (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Combined output decoded as UTF-8, replacing invalid sequences.
    pub fn output_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.output)
    }
}

/// Command runner trait.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Check if the configured shell can be started.
    async fn is_available(&self) -> RunnerResult<bool>;

    /// Run a command line and wait for it to exit.
    async fn run(&self, config: &CommandConfig, run_config: &RunConfig)
        -> RunnerResult<ExecutionResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(exit_code: i32, output: &[u8]) -> ExecutionResult {
        let now = Utc::now();
        ExecutionResult {
            command_line: "terraform plan".to_string(),
            exit_code,
            output: output.to_vec(),
            started_at: now,
            finished_at: now,
            duration_ms: 0,
        }
    }

    #[test]
    fn test_success_follows_exit_code() {
        assert!(result(0, b"").success());
        assert!(!result(1, b"").success());
    }

    #[test]
    fn test_output_lossy_replaces_invalid_utf8() {
        let res = result(0, b"ok \xff");
        assert_eq!(res.output_lossy(), "ok \u{fffd}");
    }
}
