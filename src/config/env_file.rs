// src/config/env_file.rs

//! `KEY=VALUE` environment files.
//!
//! Variables are not written into this process' environment; they are
//! handed to every child process the orchestrator spawns.

use std::path::Path;

use tracing::debug;

use crate::errors::{AutobuildError, Result};
use crate::fs::FileSystem;

/// Ordered list of environment variables for child processes.
pub type EnvVars = Vec<(String, String)>;

/// Parse env file contents.
///
/// - Lines without `=` (including blank lines) are ignored.
/// - Only the first `=` separates key from value, so `A=b=c` sets `A` to `b=c`.
/// - Key and value are trimmed; lines with an empty key are ignored.
pub fn parse_env(contents: &str) -> EnvVars {
    contents
        .lines()
        .filter_map(|line| {
            let (key, value) = line.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Read and parse an env file. Failing to read it is fatal for the caller.
pub fn load_env_file(fs: &dyn FileSystem, path: &Path) -> Result<EnvVars> {
    let contents = fs.read_to_string(path).map_err(|err| AutobuildError::EnvFile {
        path: path.to_path_buf(),
        source: match err.downcast::<std::io::Error>() {
            Ok(io) => io,
            Err(other) => std::io::Error::other(other.to_string()),
        },
    })?;

    let vars = parse_env(&contents);
    for (key, _) in &vars {
        debug!(key = %key, "exporting env variable");
    }
    Ok(vars)
}
