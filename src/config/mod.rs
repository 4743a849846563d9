// src/config/mod.rs

//! Configuration: the optional `Autobuild.toml` settings file, env files and
//! the resolved [`AppConfig`] handed to the orchestration core.

pub mod env_file;
pub mod loader;
pub mod model;
pub mod target;
pub mod validate;

pub use env_file::{load_env_file, parse_env, EnvVars};
pub use loader::{load_and_validate, resolve_settings, DEFAULT_SETTINGS_FILE};
pub use model::{BuildSection, RawSettings, RunSection, Settings, WatchSection};
pub use target::{default_project_name, resolve_project_dir, AppConfig};
