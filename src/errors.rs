// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutobuildError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Given path is not valid: {0:?}")]
    InvalidPath(PathBuf),

    #[error("Given path is not valid: {0:?}: the path must be a directory")]
    NotADirectory(PathBuf),

    #[error("Failed to read env file {path:?}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Custom command failed: {0}")]
    CustomCommand(String),

    #[error("Failed to terminate previous process: {0}")]
    Terminate(#[source] std::io::Error),

    #[error("Directory walk failed at {path:?}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AutobuildError>;
