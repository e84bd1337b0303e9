//! Apply command - Run `terraform apply`.

use anyhow::Result;
use clap::Args;

use super::{report, Cli};

#[derive(Args)]
pub struct ApplyArgs {
    /// Flags passed to terraform apply (add -auto-approve for unattended runs)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub flags: Vec<String>,
}

pub async fn execute(cli: &Cli, args: &ApplyArgs) -> Result<()> {
    let output = cli.terralib()?.apply(&args.flags).await?;
    report(output, cli.json)
}
