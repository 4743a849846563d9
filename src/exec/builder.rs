// src/exec/builder.rs

use std::path::PathBuf;
use std::time::{Instant, SystemTime};

use tracing::{error, info, Span};

use crate::config::{AppConfig, EnvVars};
use crate::exec::backend::{BackendFuture, BuildBackend};
use crate::exec::command::{command_line, run_captured};

/// Everything needed to build the project.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Build program, e.g. `go`.
    pub toolchain: String,
    /// Arguments placed before the output flag, e.g. `["build"]`.
    pub args: Vec<String>,
    /// Output-artifact flag, e.g. `-o`.
    pub output_flag: String,
    /// Name of the produced binary (relative to `dir`).
    pub binary_name: String,
    /// User-supplied extra build arguments.
    pub extra_args: Vec<String>,
    pub dir: PathBuf,
    pub env: EnvVars,
}

impl BuildConfig {
    pub fn from_app(cfg: &AppConfig) -> Self {
        let build = cfg.settings.build_section();
        Self {
            toolchain: build.toolchain.clone(),
            args: build.args.clone(),
            output_flag: build.output_flag.clone(),
            binary_name: cfg.name.clone(),
            extra_args: cfg.build_args.clone(),
            dir: cfg.dir.clone(),
            env: cfg.env.clone(),
        }
    }

    /// Arguments passed to the toolchain:
    /// `<args...> <output flag> <binary name> <extra args...>`.
    pub fn arguments(&self) -> Vec<String> {
        let mut out = self.args.clone();
        out.push(self.output_flag.clone());
        out.push(self.binary_name.clone());
        out.extend(self.extra_args.iter().cloned());
        out
    }
}

/// Builds the project and tracks when the last build attempt finished.
#[derive(Debug)]
pub struct Builder {
    config: BuildConfig,
    last_build: SystemTime,
    span: Span,
}

impl Builder {
    pub fn new(config: BuildConfig, span: Span) -> Self {
        Self {
            config,
            last_build: SystemTime::UNIX_EPOCH,
            span,
        }
    }

    /// Record a finished attempt. Never moves the timestamp backwards, even if
    /// the wall clock does.
    fn mark_built(&mut self, finished_at: SystemTime) {
        if finished_at > self.last_build {
            self.last_build = finished_at;
        }
    }

    async fn build_once(&mut self) -> bool {
        let args = self.config.arguments();
        let line = command_line(&self.config.toolchain, &args);
        info!(parent: &self.span, cmd = %line, "building");

        let started = Instant::now();
        let result = run_captured(&self.config.toolchain, &args, &self.config.dir, &self.config.env).await;

        // Success or not, this attempt has seen the current sources.
        self.mark_built(SystemTime::now());

        match result {
            Ok(out) if out.success => {
                info!(
                    parent: &self.span,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "build finished"
                );
                true
            }
            Ok(out) => {
                error!(
                    parent: &self.span,
                    exit_code = ?out.code,
                    "build failed:\n{}",
                    out.output.trim_end()
                );
                false
            }
            Err(err) => {
                error!(parent: &self.span, error = %format!("{err:#}"), "build failed to start");
                false
            }
        }
    }
}

impl BuildBackend for Builder {
    fn build(&mut self) -> BackendFuture<'_, bool> {
        Box::pin(self.build_once())
    }

    fn last_build(&self) -> SystemTime {
        self.last_build
    }
}
