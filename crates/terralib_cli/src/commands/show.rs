//! Show command - Run `terraform show` and decode the JSON plan.

use anyhow::Result;
use clap::Args;

use super::{report, Cli};

#[derive(Args)]
pub struct ShowArgs {
    /// Saved plan or state file
    pub path: Option<String>,

    /// Flags passed to terraform show instead of `-no-color -json`
    #[arg(last = true)]
    pub flags: Vec<String>,
}

impl ShowArgs {
    /// Terraform options: the custom flags (or the JSON defaults), then the path.
    fn options(&self) -> Vec<String> {
        let mut options = if self.flags.is_empty() {
            vec!["-no-color".to_string(), "-json".to_string()]
        } else {
            self.flags.clone()
        };
        options.extend(self.path.iter().cloned());
        options
    }
}

pub async fn execute(cli: &Cli, args: &ShowArgs) -> Result<()> {
    let output = cli.terralib()?.show(&args.options()).await?;
    report(output, cli.json)
}
