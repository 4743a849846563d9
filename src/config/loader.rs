// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{RawSettings, Settings};
use crate::errors::Result;

/// File name looked up in the project directory when `--config` is not given.
pub const DEFAULT_SETTINGS_FILE: &str = "Autobuild.toml";

/// Load a settings file from a given path and return the raw `RawSettings`.
///
/// This only performs TOML deserialization; use [`load_and_validate`] to get
/// checked [`Settings`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawSettings> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let settings: RawSettings = toml::from_str(&contents)?;

    Ok(settings)
}

/// Load a settings file from path and run validation.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Settings> {
    let raw = load_from_path(&path)?;
    let settings = Settings::try_from(raw)?;
    Ok(settings)
}

/// Resolve the settings for a project.
///
/// - An explicit path must exist and parse.
/// - Otherwise `<project dir>/Autobuild.toml` is used if present.
/// - Otherwise built-in defaults apply.
pub fn resolve_settings(explicit: Option<&Path>, project_dir: &Path) -> Result<Settings> {
    if let Some(path) = explicit {
        debug!(path = ?path, "loading settings file");
        return load_and_validate(path);
    }

    let candidate = default_settings_path(project_dir);
    if candidate.is_file() {
        debug!(path = ?candidate, "loading project settings file");
        return load_and_validate(&candidate);
    }

    Ok(Settings::default())
}

pub fn default_settings_path(project_dir: &Path) -> PathBuf {
    project_dir.join(DEFAULT_SETTINGS_FILE)
}
