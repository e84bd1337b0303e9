//! # terralib_iac
//!
//! Terraform command dispatch and output classification for terralib.
//!
//! This crate runs `terraform init`, `plan`, `apply` and `show` through a
//! shell, then scans the combined output for known failure messages.
//!
//! ## Features
//!
//! - Ordered, per-verb error signatures with a generic `Error: ...` fallback
//! - Provider extraction from `terraform init` output
//! - Best-effort decoding of `terraform show -json`
//! - Opt-in timeout and strict exit-code checking
//!
//! ## Example
//!
//! ```rust,no_run
//! use terralib_iac::{CommandOutput, Terralib, TerralibConfig};
//!
//! # async fn run() -> terralib_iac::IacResult<()> {
//! let terralib = Terralib::new(TerralibConfig::new("./infra"));
//!
//! let init = terralib.init(&["-no-color"]).await?;
//! for provider in &init.providers {
//!     println!("{} {} {}", provider.name, provider.path, provider.version);
//! }
//!
//! let plan = terralib.plan(&["-no-color", "-out=tfplan"]).await?.into_result()?;
//! println!("{}", plan.raw);
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod codes;
pub mod command;
pub mod config;
pub mod error;
pub mod output;
pub mod providers;
pub mod terraform;

pub use classifier::{classify, signatures};
pub use codes::{ErrorCode, Verb};
pub use command::format_command;
pub use config::TerralibConfig;
pub use error::{CommandError, IacError, IacResult};
pub use output::{ApplyOutput, CommandOutput, InitOutput, PlanOutput, ShowOutput, ShowPlan};
pub use providers::{extract_providers, Provider};
pub use terraform::Terralib;
