//! # terralib_runner
//!
//! Shell command execution wrapper for terralib.
//!
//! This crate runs a single command line through a shell, in a given working
//! directory, and hands back the combined stdout/stderr stream together with
//! the exit status.
//!
//! # Features
//!
//! - **Shell Runner**: `sh -c` execution with stderr folded into stdout
//! - **Opt-in Timeout**: kill the child after a deadline (off by default)
//! - **Dry-Run Mode**: log commands without executing them
//! - **Mock Runner**: scripted responses for tests without a real binary
//!
//! # Example
//!
//! ```rust,no_run
//! use terralib_runner::{CommandConfig, CommandRunner, RunConfig, ShellRunner, ShellRunnerOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let runner = ShellRunner::new(ShellRunnerOptions::default());
//!
//!     let config = CommandConfig::new("terraform version").workdir("./infra");
//!
//!     let result = runner.run(&config, &RunConfig::default()).await?;
//!     println!("Exit code: {}", result.exit_code);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod mock;
pub mod runner;
pub mod shell;

pub use config::{CommandConfig, RunConfig};
pub use error::{RunnerError, RunnerResult};
pub use mock::{CapturedCall, MockResponse, MockRunner};
pub use runner::{CommandRunner, ExecutionResult};
pub use shell::{ShellRunner, ShellRunnerOptions};
