//! Init command - Run `terraform init`.

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::{report, Cli};

#[derive(Args)]
pub struct InitArgs {
    /// Flags passed to terraform init
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub flags: Vec<String>,
}

pub async fn execute(cli: &Cli, args: &InitArgs) -> Result<()> {
    let terralib = cli.terralib()?;
    let output = terralib.init(&args.flags).await?;

    for provider in &output.providers {
        info!(
            "Provider {} ({}) {}",
            provider.name, provider.path, provider.version
        );
    }

    report(output, cli.json)
}
