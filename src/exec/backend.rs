// src/exec/backend.rs

//! Pluggable build / run backends.
//!
//! The watcher talks to a `BuildBackend` and a `RunBackend` instead of the
//! concrete [`Builder`](super::Builder) and [`Runner`](super::Runner). This
//! makes it easy to drive the whole watch loop in tests with fakes that
//! record invocations instead of spawning processes.

use std::future::Future;
use std::pin::Pin;
use std::time::SystemTime;

use crate::errors::Result;

/// Boxed `Send` future returned by the backend traits.
pub type BackendFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Something that can build the project and remembers when it last tried.
pub trait BuildBackend: Send {
    /// Attempt one build. Returns `true` on success.
    ///
    /// Implementations must advance [`last_build`](Self::last_build) to the
    /// completion time of the attempt, whether it succeeded or not.
    fn build(&mut self) -> BackendFuture<'_, bool>;

    /// Completion time of the most recent build attempt
    /// (`UNIX_EPOCH` if there has been none).
    fn last_build(&self) -> SystemTime;
}

/// Something that owns the launched process and the pre-build hook.
pub trait RunBackend: Send {
    /// Run the configured custom command, if any. Errors are non-fatal for
    /// callers.
    fn run_custom_commands(&mut self) -> BackendFuture<'_, Result<()>>;

    /// Stop the previously launched process (if any) and start a new one.
    fn launch(&mut self) -> BackendFuture<'_, Result<()>>;
}
