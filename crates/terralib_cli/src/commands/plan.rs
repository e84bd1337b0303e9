//! Plan command - Run `terraform plan`.

use anyhow::Result;
use clap::Args;

use super::{report, Cli};

#[derive(Args)]
pub struct PlanArgs {
    /// Flags passed to terraform plan
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub flags: Vec<String>,
}

pub async fn execute(cli: &Cli, args: &PlanArgs) -> Result<()> {
    let output = cli.terralib()?.plan(&args.flags).await?;
    report(output, cli.json)
}
