// src/exec/runner.rs

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use anyhow::Context;
use tokio::process::Command;
use tracing::{debug, error, info, Span};

use crate::config::{AppConfig, EnvVars};
use crate::errors::{AutobuildError, Result};
use crate::exec::backend::{BackendFuture, RunBackend};
use crate::exec::command::{command_line, run_captured};
use crate::exec::process::{await_exit, watch_exit, ProcessState, TerminationOutcome};

/// Everything needed to launch the built program and run the pre-build hook.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Program to launch, normally `<dir>/<binary name>`.
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Custom pre-build command: program followed by its arguments.
    pub custom_command: Vec<String>,
    /// Working directory for both the launched program and the custom command.
    pub dir: PathBuf,
    pub env: EnvVars,
    /// How long a previous instance may take to exit before it is killed.
    pub grace_period: Duration,
}

impl RunConfig {
    pub fn from_app(cfg: &AppConfig) -> Self {
        Self {
            program: cfg.dir.join(&cfg.name),
            args: cfg.run_args.clone(),
            custom_command: cfg.custom_command.clone(),
            dir: cfg.dir.clone(),
            env: cfg.env.clone(),
            grace_period: cfg.settings.grace_period(),
        }
    }
}

/// Owns the launched process. At most one process is tracked at a time, and
/// a new one is only spawned after the previous one has been reaped.
#[derive(Debug)]
pub struct Runner {
    config: RunConfig,
    state: ProcessState,
    span: Span,
}

impl Runner {
    pub fn new(config: RunConfig, span: Span) -> Self {
        Self {
            config,
            state: ProcessState::NotStarted,
            span,
        }
    }

    pub fn state(&self) -> &ProcessState {
        &self.state
    }

    /// PID of the tracked process, if one is running.
    pub fn pid(&self) -> Option<u32> {
        match &self.state {
            ProcessState::Running(child) => child.id(),
            ProcessState::NotStarted | ProcessState::Terminating(_) => None,
        }
    }

    /// Stop the tracked process, if any.
    ///
    /// Waits up to the grace period for it to exit on its own, then kills it.
    /// If a previous termination was interrupted, its pending outcome is
    /// awaited instead. The state is `NotStarted` afterwards, whatever the
    /// outcome.
    pub async fn terminate(&mut self) -> Result<TerminationOutcome> {
        self.state = match std::mem::take(&mut self.state) {
            ProcessState::NotStarted => return Ok(TerminationOutcome::NotRunning),
            ProcessState::Running(child) => ProcessState::Terminating(watch_exit(
                child,
                self.config.grace_period,
                self.span.clone(),
            )),
            pending @ ProcessState::Terminating(_) => {
                debug!(parent: &self.span, "resuming interrupted termination");
                pending
            }
        };

        let ProcessState::Terminating(report) = &mut self.state else {
            return Ok(TerminationOutcome::NotRunning);
        };
        let outcome = await_exit(report, &self.span).await;
        self.state = ProcessState::NotStarted;
        outcome
    }

    async fn launch_once(&mut self) -> Result<()> {
        self.terminate().await?;

        let display_name = self
            .config
            .program
            .file_name()
            .unwrap_or(self.config.program.as_os_str())
            .to_string_lossy()
            .into_owned();
        let line = command_line(&display_name, &self.config.args);
        info!(parent: &self.span, cmd = %line, "running");

        let child = Command::new(&self.config.program)
            .args(&self.config.args)
            .current_dir(&self.config.dir)
            .envs(self.config.env.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("spawning {:?}", self.config.program))?;

        debug!(parent: &self.span, pid = ?child.id(), "process started");
        self.state = ProcessState::Running(child);
        Ok(())
    }

    async fn run_custom_once(&mut self) -> Result<()> {
        let Some((program, args)) = self.config.custom_command.split_first() else {
            return Ok(());
        };

        let line = command_line(program, args);
        info!(parent: &self.span, cmd = %line, "running custom command");

        match run_captured(program, args, &self.config.dir, &self.config.env).await {
            Ok(out) if out.success => Ok(()),
            Ok(out) => {
                error!(
                    parent: &self.span,
                    cmd = %line,
                    exit_code = ?out.code,
                    "custom command failed:\n{}",
                    out.output.trim_end()
                );
                let status = out
                    .code
                    .map(|c| format!("exit code {c}"))
                    .unwrap_or_else(|| "a signal".to_string());
                Err(AutobuildError::CustomCommand(format!("`{line}` terminated with {status}")))
            }
            Err(err) => {
                error!(parent: &self.span, cmd = %line, error = %format!("{err:#}"), "custom command failed to start");
                Err(AutobuildError::CustomCommand(format!("{err:#}")))
            }
        }
    }
}

impl RunBackend for Runner {
    fn run_custom_commands(&mut self) -> BackendFuture<'_, Result<()>> {
        Box::pin(self.run_custom_once())
    }

    fn launch(&mut self) -> BackendFuture<'_, Result<()>> {
        Box::pin(self.launch_once())
    }
}
