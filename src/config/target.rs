// src/config/target.rs

//! Resolution of the watch target and assembly of [`AppConfig`], the plain
//! values the orchestration core is built from.

use std::path::{Path, PathBuf};

use crate::config::env_file::EnvVars;
use crate::config::model::Settings;
use crate::errors::{AutobuildError, Result};
use crate::fs::FileSystem;

/// Everything the watcher, builder and runner need, already validated.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Absolute project directory.
    pub dir: PathBuf,
    /// Project / binary name.
    pub name: String,
    pub build_only: bool,
    pub custom_command: Vec<String>,
    pub build_args: Vec<String>,
    pub run_args: Vec<String>,
    pub env: EnvVars,
    pub settings: Settings,
}

/// Resolve the directory to watch.
///
/// - `None`: the current working directory, made absolute.
/// - `Some(path)`: must exist and be a directory; it is canonicalised.
pub fn resolve_project_dir(fs: &dyn FileSystem, path: Option<&Path>) -> Result<PathBuf> {
    match path {
        None => {
            let cwd = std::env::current_dir().map_err(|e| {
                AutobuildError::ConfigError(format!(
                    "an error occurred while getting the current working directory: {e}"
                ))
            })?;
            fs.canonicalize(&cwd).map_err(|e| {
                AutobuildError::ConfigError(format!(
                    "an error occurred while finding an absolute working path: {e}"
                ))
            })
        }
        Some(path) => {
            if !fs.exists(path) {
                return Err(AutobuildError::InvalidPath(path.to_path_buf()));
            }
            if !fs.is_dir(path) {
                // A symlink to a directory is still a valid target.
                let resolved = fs
                    .canonicalize(path)
                    .map_err(|_| AutobuildError::InvalidPath(path.to_path_buf()))?;
                if !fs.is_dir(&resolved) {
                    return Err(AutobuildError::NotADirectory(path.to_path_buf()));
                }
                return Ok(resolved);
            }
            fs.canonicalize(path)
                .map_err(|_| AutobuildError::InvalidPath(path.to_path_buf()))
        }
    }
}

/// Default project name: the directory's base name.
pub fn default_project_name(dir: &Path) -> Result<String> {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| {
            AutobuildError::ConfigError(format!(
                "cannot derive a project name from {:?}; pass --name",
                dir
            ))
        })
}
