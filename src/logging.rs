// src/logging.rs

//! Log output for `autobuild`.
//!
//! The level comes from `--log-level`, then the `AUTOBUILD_LOG` environment
//! variable, then defaults to `info`. Everything goes to stderr; stdout
//! belongs to the launched program.
//!
//! Components do not log into ambient context. Each one is handed its own
//! span (see [`component_span`]) and emits every event under it.

use anyhow::Result;
use tracing::{Level, Span};
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "AUTOBUILD_LOG";

/// Install the process-wide subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_level = std::env::var(LOG_ENV_VAR).ok();
    let level = resolve_level(cli_level, env_level.as_deref());

    fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))
}

/// Pick the effective level. An unparsable env value is ignored.
pub fn resolve_level(cli_level: Option<LogLevel>, env_value: Option<&str>) -> Level {
    cli_level
        .map(Level::from)
        .or_else(|| env_value.and_then(|s| s.trim().parse().ok()))
        .unwrap_or(Level::INFO)
}

/// Span carrying the command context of one component (`watch`, `build`,
/// `run`) for one project.
pub fn component_span(cmd: &'static str, app: &str) -> Span {
    tracing::info_span!("autobuild", cmd, app = %app)
}
