// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running the build, the custom
//! pre-build command and the built program, using `tokio::process::Command`.
//!
//! - [`backend`] provides the `BuildBackend` / `RunBackend` traits the
//!   watcher is generic over, so tests can replace real processes.
//! - [`command`] runs a command to completion with captured output.
//! - [`builder`] owns the build command and the last-build timestamp.
//! - [`runner`] owns the launched process and the custom command.
//! - [`process`] contains the process state and the termination protocol.

pub mod backend;
pub mod builder;
pub mod command;
pub mod process;
pub mod runner;

pub use backend::{BackendFuture, BuildBackend, RunBackend};
pub use builder::{BuildConfig, Builder};
pub use process::{ExitReport, ProcessState, TerminationOutcome};
pub use runner::{RunConfig, Runner};
