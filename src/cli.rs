// src/cli.rs

//! CLI argument parsing using `clap`.

use std::collections::HashSet;
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

/// Command-line arguments for `autobuild`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "autobuild",
    version,
    disable_version_flag = true,
    about = "Rebuild and restart a project whenever its sources change.",
    long_about = None
)]
pub struct CliArgs {
    /// The directory to be watched.
    ///
    /// Default: the current working directory.
    #[arg(short = 'p', long = "path", value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Project name; also the name of the built binary.
    ///
    /// Default: base name of the watched directory.
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    pub name: Option<String>,

    /// Environment file (`KEY=VALUE` per line) applied to every spawned command.
    #[arg(short = 'e', long = "env", value_name = "FILE")]
    pub env: Option<PathBuf>,

    /// Build only mode: never launch the built binary.
    #[arg(short = 'b', long = "build-only")]
    pub build_only: bool,

    /// Custom command to run before every build (e.g. a formatter or linter).
    #[arg(long = "custom", visible_alias = "cc", value_name = "CMD", allow_hyphen_values = true)]
    pub custom: Option<String>,

    /// Extra arguments appended to the build command.
    #[arg(long = "build", visible_alias = "bc", value_name = "ARGS", allow_hyphen_values = true)]
    pub build: Option<String>,

    /// Arguments passed to the binary when it is launched.
    #[arg(long = "run", visible_alias = "rc", value_name = "ARGS", allow_hyphen_values = true)]
    pub run: Option<String>,

    /// Settings file (TOML).
    ///
    /// Default: `Autobuild.toml` in the watched directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `AUTOBUILD_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print version.
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: Option<bool>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

/// Split a command string on whitespace, dropping empty pieces and repeated
/// words while keeping first-occurrence order.
pub fn prepare_command(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.split_whitespace()
        .filter(|word| seen.insert(*word))
        .map(str::to_string)
        .collect()
}
