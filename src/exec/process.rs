// src/exec/process.rs

//! Launched-process state and the bounded-grace termination protocol.

use std::io;
use std::process::ExitStatus;
use std::time::Duration;

use tokio::process::Child;
use tokio::sync::oneshot;
use tracing::{debug, info, warn, Span};

use crate::errors::{AutobuildError, Result};

/// Receiving end of an exit-watcher's report.
pub type ExitReport = oneshot::Receiver<io::Result<TerminationOutcome>>;

/// State of the process tracked by a runner.
#[derive(Debug, Default)]
pub enum ProcessState {
    /// Nothing launched (or the previous process has been reaped).
    #[default]
    NotStarted,
    /// A process is (or was recently) running and has not been reaped.
    Running(Child),
    /// An exit-watcher owns the child and will report how it ended. Kept
    /// across an interrupted termination so the next one can pick it up.
    Terminating(ExitReport),
}

/// How a tracked process came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationOutcome {
    /// No process was tracked.
    NotRunning,
    /// The process exited on its own within the grace period. Any exit status
    /// counts, including non-zero ones.
    Exited(ExitStatus),
    /// The grace period elapsed and the process was killed.
    Killed,
}

/// Hand `child` to a background exit-watcher and return its report.
///
/// The watcher waits up to `grace` for the child to exit, then kills it and
/// waits for it to be reaped. It owns the grace timer itself, so the child is
/// stopped within `grace` even if nobody awaits the report.
pub fn watch_exit(mut child: Child, grace: Duration, span: Span) -> ExitReport {
    let (report_tx, report_rx) = oneshot::channel();

    tokio::spawn(async move {
        let pid = child.id();
        let outcome = tokio::select! {
            status = child.wait() => status.map(TerminationOutcome::Exited),

            _ = tokio::time::sleep(grace) => {
                info!(
                    parent: &span,
                    ?pid,
                    grace_ms = grace.as_millis() as u64,
                    "previous process still running after grace period; killing"
                );
                match child.kill().await {
                    Ok(()) => debug!(parent: &span, ?pid, "previous process killed"),
                    Err(e) => warn!(parent: &span, ?pid, error = %e, "error while killing previous process"),
                }
                Ok(TerminationOutcome::Killed)
            }
        };
        let _ = report_tx.send(outcome);
    });

    report_rx
}

/// Wait for an exit-watcher's report.
///
/// A failure to wait on the child surfaces as [`AutobuildError::Terminate`].
pub async fn await_exit(report: &mut ExitReport, span: &Span) -> Result<TerminationOutcome> {
    match report.await {
        Ok(Ok(outcome)) => {
            if let TerminationOutcome::Exited(status) = outcome {
                debug!(parent: span, %status, "previous process exited");
            }
            Ok(outcome)
        }
        Ok(Err(e)) => Err(AutobuildError::Terminate(e)),
        Err(_) => Err(AutobuildError::Terminate(io::Error::other(
            "exit watcher stopped without reporting",
        ))),
    }
}
