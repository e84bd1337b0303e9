//! terralib CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments or configuration
//! - 5: Terraform reported an error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use terralib_iac::IacError;

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const TERRAFORM_ERROR: u8 = 5;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging on stderr so stdout carries only terraform output
    let default_level = if cli.verbose { "terralib=debug" } else { "terralib=info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},warn", default_level)));
    // Ignore the error when a subscriber is already installed
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let result = match &cli.command {
        Commands::Init(args) => commands::init::execute(&cli, args).await,
        Commands::Plan(args) => commands::plan::execute(&cli, args).await,
        Commands::Apply(args) => commands::apply::execute(&cli, args).await,
        Commands::Show(args) => commands::show::execute(&cli, args).await,
        Commands::Classify(args) => commands::classify::execute(args, cli.json),
        Commands::Version => commands::version::execute(&cli).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if let Some(err) = e.downcast_ref::<IacError>() {
        return match err {
            IacError::Command(_)
            | IacError::UnrecognizedFailure { .. }
            | IacError::TerraformNotAvailable(_) => ExitCodes::TERRAFORM_ERROR,
            IacError::InvalidConfig(_) | IacError::Yaml(_) => ExitCodes::INVALID_ARGS,
            IacError::Runner(_) | IacError::Io(_) => ExitCodes::GENERAL_ERROR,
        };
    }

    let msg = e.to_string().to_lowercase();
    if msg.contains("argument") || msg.contains("option") || msg.contains("not found") {
        ExitCodes::INVALID_ARGS
    } else {
        ExitCodes::GENERAL_ERROR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terralib_iac::{CommandError, ErrorCode, Verb};

    #[test]
    fn test_classified_error_maps_to_terraform_exit_code() {
        let err: anyhow::Error =
            IacError::Command(CommandError::new(Verb::Plan, ErrorCode::Default, "boom")).into();
        assert_eq!(categorize_error(&err), ExitCodes::TERRAFORM_ERROR);
    }

    #[test]
    fn test_config_error_maps_to_invalid_args() {
        let err: anyhow::Error = IacError::InvalidConfig("binary must not be empty".into()).into();
        assert_eq!(categorize_error(&err), ExitCodes::INVALID_ARGS);
    }

    #[test]
    fn test_context_keeps_downcast() {
        let err = anyhow::Error::from(IacError::InvalidConfig("shell".into()))
            .context("Failed to load config terralib.yaml");
        assert_eq!(categorize_error(&err), ExitCodes::INVALID_ARGS);
    }

    #[test]
    fn test_other_errors_are_general() {
        let err = anyhow::anyhow!("something broke");
        assert_eq!(categorize_error(&err), ExitCodes::GENERAL_ERROR);
    }
}
