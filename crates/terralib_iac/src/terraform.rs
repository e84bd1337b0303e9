//! Terraform command dispatch.

use std::sync::{Arc, OnceLock};

use regex::Regex;
use tracing::{debug, info, warn};

use terralib_runner::{
    CommandConfig, CommandRunner, ExecutionResult, RunConfig, ShellRunner, ShellRunnerOptions,
};

use crate::classifier::classify;
use crate::codes::Verb;
use crate::command::format_command;
use crate::config::TerralibConfig;
use crate::error::{CommandError, IacError, IacResult};
use crate::output::{ApplyOutput, InitOutput, PlanOutput, ShowOutput, ShowPlan};
use crate::providers::extract_providers;

/// Runs terraform verbs in one configuration directory.
///
/// Every call spawns one process and keeps no state between calls.
pub struct Terralib {
    config: TerralibConfig,
    runner: Arc<dyn CommandRunner>,
}

impl Terralib {
    /// Create a client that runs terraform through the configured shell.
    pub fn new(config: TerralibConfig) -> Self {
        let mut options = ShellRunnerOptions::new().shell(&config.shell);
        if config.dry_run {
            options = options.dry_run();
        }
        let runner = Arc::new(ShellRunner::new(options));
        Self { config, runner }
    }

    /// Create a client on top of a custom runner.
    pub fn with_runner(config: TerralibConfig, runner: Arc<dyn CommandRunner>) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &TerralibConfig {
        &self.config
    }

    /// Run `terraform init`.
    pub async fn init<S: AsRef<str>>(&self, options: &[S]) -> IacResult<InitOutput> {
        let (result, error) = self.execute(Verb::Init, options).await?;
        let providers = extract_providers(&result.output);
        info!("terraform init reported {} provider(s)", providers.len());

        Ok(InitOutput {
            raw: result.output_lossy().into_owned(),
            exit_code: result.exit_code,
            providers,
            error,
        })
    }

    /// Run `terraform plan`.
    pub async fn plan<S: AsRef<str>>(&self, options: &[S]) -> IacResult<PlanOutput> {
        let (result, error) = self.execute(Verb::Plan, options).await?;

        Ok(PlanOutput {
            raw: result.output_lossy().into_owned(),
            exit_code: result.exit_code,
            error,
        })
    }

    /// Run `terraform apply`.
    pub async fn apply<S: AsRef<str>>(&self, options: &[S]) -> IacResult<ApplyOutput> {
        let (result, error) = self.execute(Verb::Apply, options).await?;

        Ok(ApplyOutput {
            raw: result.output_lossy().into_owned(),
            exit_code: result.exit_code,
            error,
        })
    }

    /// Run `terraform show` and decode its output if it is a JSON plan.
    ///
    /// Output that does not decode leaves `plan` empty; that is not an error.
    pub async fn show<S: AsRef<str>>(&self, options: &[S]) -> IacResult<ShowOutput> {
        let (result, error) = self.execute(Verb::Show, options).await?;

        let plan = match serde_json::from_slice::<ShowPlan>(&result.output) {
            Ok(plan) => Some(plan),
            Err(e) => {
                debug!("terraform show output is not a JSON plan: {}", e);
                None
            }
        };

        Ok(ShowOutput {
            raw: result.output_lossy().into_owned(),
            exit_code: result.exit_code,
            plan,
            error,
        })
    }

    /// Run `terraform show -no-color -json <path>` for a saved plan file.
    pub async fn show_plan(&self, path: &str) -> IacResult<ShowOutput> {
        self.show(&["-no-color", "-json", path]).await
    }

    /// Installed terraform version, e.g. `0.12.24`.
    pub async fn version(&self) -> IacResult<String> {
        if !self.runner.is_available().await? {
            return Err(IacError::TerraformNotAvailable(format!(
                "shell '{}' cannot be started",
                self.config.shell
            )));
        }

        let command_line = format!("{} version", self.config.binary);
        let result = self
            .runner
            .run(&self.command_config(command_line), &self.run_config())
            .await?;

        let output = result.output_lossy();
        if !result.success() {
            return Err(IacError::TerraformNotAvailable(output.trim().to_string()));
        }

        version_regex()
            .captures(&output)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| {
                IacError::TerraformNotAvailable(format!(
                    "unexpected version output: {}",
                    output.trim()
                ))
            })
    }

    fn command_config(&self, command_line: String) -> CommandConfig {
        CommandConfig::new(command_line)
            .workdir(&self.config.config_path)
            .envs(&self.config.env)
    }

    fn run_config(&self) -> RunConfig {
        RunConfig::default().timeout(self.config.timeout_seconds)
    }

    /// Run one verb and classify its output.
    async fn execute<S: AsRef<str>>(
        &self,
        verb: Verb,
        options: &[S],
    ) -> IacResult<(ExecutionResult, Option<CommandError>)> {
        let command_line = format_command(&self.config.binary, verb, options);
        info!("Running terraform {} in {:?}", verb, self.config.config_path);

        let result = self
            .runner
            .run(&self.command_config(command_line), &self.run_config())
            .await?;

        let error = classify(&result.output, verb);
        match &error {
            Some(err) => warn!("terraform {} failed: {} ({})", verb, err.code, err.reason),
            None if !result.success() => {
                warn!(
                    "terraform {} exited with code {} but no known error was found",
                    verb, result.exit_code
                );
                if self.config.strict_exit {
                    return Err(IacError::UnrecognizedFailure {
                        verb,
                        exit_code: result.exit_code,
                    });
                }
            }
            None => debug!("terraform {} completed without errors", verb),
        }

        Ok((result, error))
    }
}

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Terraform v(\S+)").expect("Invalid terraform version regex"))
}
