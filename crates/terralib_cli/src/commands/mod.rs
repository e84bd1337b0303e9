//! CLI command definitions.
//!
//! Each subcommand maps to one terraform verb, plus `classify` for offline
//! inspection of captured output.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use terralib_iac::{CommandOutput, Terralib, TerralibConfig};

pub mod apply;
pub mod classify;
pub mod init;
pub mod plan;
pub mod show;
pub mod version;

/// terralib - run terraform and classify its failures
#[derive(Parser)]
#[command(name = "terralib")]
#[command(version, about = "terralib - run terraform and classify its failures")]
#[command(long_about = r#"
terralib runs terraform in a configuration directory, captures its combined
output, and reports known failures with a stable error code.

COMMANDS:
  init      → terraform init, reporting downloaded providers
  plan      → terraform plan
  apply     → terraform apply
  show      → terraform show -json, decoding the plan
  classify  → classify previously captured output
  version   → print the installed terraform version

Pass terraform flags after `--`, e.g. `terralib plan -- -no-color -out=tfplan`.

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments or configuration
  5 - Terraform reported an error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Terraform configuration directory
    #[arg(long, global = true, env = "TERRALIB_DIR")]
    pub dir: Option<PathBuf>,

    /// YAML configuration file
    #[arg(long, global = true, env = "TERRALIB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Terraform binary to run
    #[arg(long, global = true, env = "TERRALIB_BINARY")]
    pub binary: Option<String>,

    /// Kill terraform after this many seconds (0 = never)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Print commands instead of running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Fail on a non-zero exit even when no known error is found
    #[arg(long, global = true)]
    pub strict: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run terraform init
    Init(init::InitArgs),

    /// Run terraform plan
    Plan(plan::PlanArgs),

    /// Run terraform apply
    Apply(apply::ApplyArgs),

    /// Run terraform show and decode the JSON plan
    Show(show::ShowArgs),

    /// Classify captured terraform output
    Classify(classify::ClassifyArgs),

    /// Print the installed terraform version
    Version,
}

impl Cli {
    /// Resolve the effective configuration: file first, then flags.
    pub fn terralib_config(&self) -> Result<TerralibConfig> {
        let mut config = match &self.config {
            Some(path) => TerralibConfig::from_yaml_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => TerralibConfig::default(),
        };

        if let Some(dir) = &self.dir {
            config.config_path = dir.clone();
        }
        if let Some(binary) = &self.binary {
            config.binary = binary.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_seconds = timeout;
        }
        if self.dry_run {
            config.dry_run = true;
        }
        if self.strict {
            config.strict_exit = true;
        }

        config.validate()?;
        debug!("Effective config: {:?}", config);
        Ok(config)
    }

    pub fn terralib(&self) -> Result<Terralib> {
        Ok(Terralib::new(self.terralib_config()?))
    }
}

/// Print a command's output and turn a recognized terraform error into `Err`.
pub(crate) fn report<T>(output: T, json: bool) -> Result<()>
where
    T: CommandOutput + Serialize,
{
    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", output.raw());
    }

    output.into_result()?;
    Ok(())
}
