//! Shell-based command runner.
//!
//! Runs a command line through `<shell> -c` in a working directory. Standard
//! error is redirected into standard output inside the shell, so the captured
//! bytes are a single stream in the order the process wrote them.
//!
//! With a timeout set, the shell leads its own process group so that expiry
//! kills the shell together with everything it started.

use std::process::{Output, Stdio};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};
use tracing::{debug, error, info, warn};

use crate::config::{CommandConfig, RunConfig};
use crate::error::{RunnerError, RunnerResult};
use crate::runner::{CommandRunner, ExecutionResult};

/// Shell runner options.
#[derive(Debug, Clone)]
pub struct ShellRunnerOptions {
    /// Shell used to interpret the command line
    pub shell: String,
    /// Dry-run mode (log commands without executing)
    pub dry_run: bool,
}

impl Default for ShellRunnerOptions {
    fn default() -> Self {
        Self {
            shell: "sh".to_string(),
            dry_run: false,
        }
    }
}

impl ShellRunnerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }
}

/// Runs commands through the system shell.
pub struct ShellRunner {
    options: ShellRunnerOptions,
}

impl ShellRunner {
    pub fn new(options: ShellRunnerOptions) -> Self {
        Self { options }
    }

    /// Script handed to `-c`: fold stderr into stdout, then run the command.
    fn shell_script(command_line: &str) -> String {
        format!("exec 2>&1\n{}", command_line)
    }

    fn build_command(
        &self,
        config: &CommandConfig,
        run_config: &RunConfig,
    ) -> RunnerResult<Command> {
        let mut cmd = Command::new(&self.options.shell);
        cmd.arg("-c").arg(Self::shell_script(&config.command_line));

        if let Some(dir) = &config.workdir {
            if !dir.is_dir() {
                return Err(RunnerError::InvalidWorkdir(dir.display().to_string()));
            }
            cmd.current_dir(dir);
        }

        cmd.envs(&config.env);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);

        // Without a timeout the command stays in the caller's group and still
        // sees the terminal's interrupt.
        if run_config.has_timeout() {
            own_process_group(&mut cmd);
        }

        Ok(cmd)
    }
}

#[cfg(unix)]
fn own_process_group(cmd: &mut Command) {
    cmd.process_group(0);
}

#[cfg(not(unix))]
fn own_process_group(_cmd: &mut Command) {}

#[cfg(unix)]
fn kill_process_group(pgid: u32) {
    // SAFETY: killpg only sends a signal; the group id comes from our own child.
    if unsafe { libc::killpg(pgid as libc::pid_t, libc::SIGKILL) } == -1 {
        warn!("Failed to kill process group {}: {}", pgid, std::io::Error::last_os_error());
    }
}

#[cfg(not(unix))]
fn kill_process_group(_pgid: u32) {}

/// Read both pipes to the end while waiting for the shell to exit.
async fn collect_output(child: &mut Child) -> std::io::Result<Output> {
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let read_stdout = async move {
        let mut buf = Vec::new();
        if let Some(mut pipe) = stdout {
            pipe.read_to_end(&mut buf).await?;
        }
        Ok::<_, std::io::Error>(buf)
    };
    let read_stderr = async move {
        let mut buf = Vec::new();
        if let Some(mut pipe) = stderr {
            pipe.read_to_end(&mut buf).await?;
        }
        Ok::<_, std::io::Error>(buf)
    };

    let (status, stdout, stderr) = tokio::try_join!(child.wait(), read_stdout, read_stderr)?;
    Ok(Output {
        status,
        stdout,
        stderr,
    })
}

/// Kill the shell's whole process group, then reap the shell.
async fn terminate(child: &mut Child) {
    if let Some(pid) = child.id() {
        kill_process_group(pid);
    }
    if let Err(e) = child.start_kill() {
        debug!("Shell already gone: {}", e);
    }
    if let Err(e) = child.wait().await {
        warn!("Failed to reap shell: {}", e);
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn is_available(&self) -> RunnerResult<bool> {
        let status = Command::new(&self.options.shell)
            .arg("-c")
            .arg("true")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        Ok(status.map(|s| s.success()).unwrap_or(false))
    }

    async fn run(
        &self,
        config: &CommandConfig,
        run_config: &RunConfig,
    ) -> RunnerResult<ExecutionResult> {
        info!("Running: {}", config.command_line);
        debug!("Working directory: {:?}", config.workdir);

        if self.options.dry_run {
            info!("[DRY-RUN] Would execute: {}", config.command_line);
            let now = Utc::now();
            return Ok(ExecutionResult {
                command_line: config.command_line.clone(),
                exit_code: 0,
                output: Vec::new(),
                started_at: now,
                finished_at: now,
                duration_ms: 0,
            });
        }

        let mut cmd = self.build_command(config, run_config)?;
        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RunnerError::ShellNotAvailable(self.options.shell.clone())
            } else {
                RunnerError::ExecutionFailed(format!(
                    "Failed to spawn {}: {}",
                    self.options.shell, e
                ))
            }
        })?;

        let started_at = Utc::now();
        let output = if run_config.has_timeout() {
            let deadline = Duration::from_secs(run_config.timeout_seconds);
            match tokio::time::timeout(deadline, collect_output(&mut child)).await {
                Ok(output) => output?,
                Err(_) => {
                    warn!(
                        "Command timed out after {}s: {}",
                        run_config.timeout_seconds, config.command_line
                    );
                    terminate(&mut child).await;
                    return Err(RunnerError::Timeout(run_config.timeout_seconds));
                }
            }
        } else {
            collect_output(&mut child).await?
        };
        let finished_at = Utc::now();
        let duration_ms = (finished_at - started_at).num_milliseconds().max(0) as u64;

        let exit_code = output.status.code().unwrap_or(-1);
        if exit_code == 0 {
            info!("Command completed successfully in {}ms", duration_ms);
        } else {
            error!(
                "Command failed with exit code {} after {}ms",
                exit_code, duration_ms
            );
        }

        let mut combined = output.stdout;
        combined.extend_from_slice(&output.stderr);

        Ok(ExecutionResult {
            command_line: config.command_line.clone(),
            exit_code,
            output: combined,
            started_at,
            finished_at,
            duration_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_script_redirects_stderr_first() {
        let script = ShellRunner::shell_script("terraform plan -no-color");
        assert_eq!(script, "exec 2>&1\nterraform plan -no-color");
    }

    #[test]
    fn test_missing_workdir_is_rejected() {
        let runner = ShellRunner::new(ShellRunnerOptions::default());
        let config = CommandConfig::new("true").workdir("/definitely/not/here");

        let err = runner.build_command(&config, &RunConfig::default()).unwrap_err();
        assert!(matches!(err, RunnerError::InvalidWorkdir(_)));
    }
}
