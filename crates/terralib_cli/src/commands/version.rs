//! Version command - Print the installed terraform version.

use anyhow::Result;

use super::Cli;

pub async fn execute(cli: &Cli) -> Result<()> {
    let version = cli.terralib()?.version().await?;

    if cli.json {
        println!("{}", serde_json::json!({ "terraform_version": version }));
    } else {
        println!("{}", version);
    }

    Ok(())
}
