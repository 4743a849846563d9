// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod watch;

use std::sync::Arc;

use tracing::{info, warn, Span};

use crate::cli::{prepare_command, CliArgs};
use crate::config::{
    default_project_name, load_env_file, resolve_project_dir, resolve_settings, AppConfig,
};
use crate::errors::Result;
use crate::exec::{BuildConfig, Builder, RunConfig, Runner};
use crate::fs::{FileSystem, RealFileSystem};
use crate::logging::component_span;
use crate::watch::{WatchTarget, Watcher};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - target / settings / env-file resolution
/// - builder, runner and watcher
/// - Ctrl-C handling
///
/// Returns only if the watch loop fails (or configuration is invalid).
pub async fn run(args: CliArgs) -> Result<()> {
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let config = build_app_config(&args, fs.as_ref())?;

    spawn_interrupt_handler(component_span("interrupt", &config.name));

    let watcher = build_watcher(&config, fs);
    watcher.watch().await
}

/// Turn CLI arguments into validated plain values for the core.
pub fn build_app_config(args: &CliArgs, fs: &dyn FileSystem) -> Result<AppConfig> {
    let dir = resolve_project_dir(fs, args.path.as_deref())?;

    let name = match args.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => default_project_name(&dir)?,
    };

    let settings = resolve_settings(args.config.as_deref(), &dir)?;

    let env = match args.env.as_deref() {
        Some(path) => load_env_file(fs, path)?,
        None => Vec::new(),
    };

    let prepare = |raw: &Option<String>| raw.as_deref().map(prepare_command).unwrap_or_default();

    Ok(AppConfig {
        dir,
        name,
        build_only: args.build_only,
        custom_command: prepare(&args.custom),
        build_args: prepare(&args.build),
        run_args: prepare(&args.run),
        env,
        settings,
    })
}

/// Build the production watcher (real builder, runner and filesystem).
pub fn build_watcher(config: &AppConfig, fs: Arc<dyn FileSystem>) -> Watcher<Builder, Runner> {
    let builder = Builder::new(
        BuildConfig::from_app(config),
        component_span("build", &config.name),
    );
    let runner = Runner::new(
        RunConfig::from_app(config),
        component_span("run", &config.name),
    );
    Watcher::new(
        WatchTarget::from_app(config),
        builder,
        runner,
        fs,
        component_span("watch", &config.name),
    )
}

/// Exit the whole process with status 0 on Ctrl-C.
///
/// The running child and any in-flight build are not stopped first.
fn spawn_interrupt_handler(span: Span) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!(parent: &span, "interrupt received; exiting");
                std::process::exit(0);
            }
            Err(e) => warn!(parent: &span, error = %e, "failed to listen for Ctrl+C"),
        }
    });
}
