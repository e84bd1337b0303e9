//! Classify command - Classify captured terraform output.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use terralib_iac::{classify, extract_providers, CommandError, IacError, Provider, Verb};

#[derive(Args)]
pub struct ClassifyArgs {
    /// Verb that produced the output (init, plan, apply, show)
    #[arg(long)]
    pub verb: Verb,

    /// File holding the output (reads stdin when omitted)
    pub file: Option<PathBuf>,
}

#[derive(Serialize)]
struct Classification {
    verb: Verb,
    error: Option<CommandError>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    providers: Vec<Provider>,
}

pub fn execute(args: &ClassifyArgs, json: bool) -> Result<()> {
    let output = read_input(args.file.as_ref())?;

    let providers = match args.verb {
        Verb::Init => extract_providers(&output),
        _ => Vec::new(),
    };
    let result = Classification {
        verb: args.verb,
        error: classify(&output, args.verb),
        providers,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for provider in &result.providers {
            println!("provider {} ({}) {}", provider.name, provider.path, provider.version);
        }
        match &result.error {
            Some(err) => println!("{}: {}", err.code, err.reason),
            None => println!("no error"),
        }
    }

    match result.error {
        Some(err) => Err(IacError::Command(err).into()),
        None => Ok(()),
    }
}

fn read_input(file: Option<&PathBuf>) -> Result<Vec<u8>> {
    match file {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}
