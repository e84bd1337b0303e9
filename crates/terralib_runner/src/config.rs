//! Command configuration types.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A single command line to run through the shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandConfig {
    /// Full command line, passed verbatim to `<shell> -c`
    pub command_line: String,
    /// Working directory for the child process
    pub workdir: Option<PathBuf>,
    /// Extra environment variables
    pub env: HashMap<String, String>,
}

impl CommandConfig {
    pub fn new(command_line: impl Into<String>) -> Self {
        Self {
            command_line: command_line.into(),
            workdir: None,
            env: HashMap::new(),
        }
    }

    pub fn workdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Merge a whole map of environment variables.
    pub fn envs(mut self, vars: &HashMap<String, String>) -> Self {
        self.env.extend(vars.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }
}

/// Run configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    /// Timeout in seconds (0 = wait forever)
    pub timeout_seconds: u64,
}

impl RunConfig {
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Whether a deadline applies to this run.
    pub fn has_timeout(&self) -> bool {
        self.timeout_seconds > 0
    }
}
