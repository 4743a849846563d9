// src/watch/watcher.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, Span};

use crate::config::AppConfig;
use crate::errors::{AutobuildError, Result};
use crate::exec::{BuildBackend, RunBackend};
use crate::fs::{is_not_found, EntryKind, FileSystem};
use crate::watch::filter::{classify_entry, EntryDecision};
use crate::watch::path_utils::{by_file_name, relative_str};

/// What the watcher watches. Immutable once the watcher is built.
#[derive(Debug, Clone)]
pub struct WatchTarget {
    /// Absolute project directory.
    pub dir: PathBuf,
    /// Tracked extension, without the leading dot.
    pub extension: String,
    pub build_only: bool,
    pub poll_interval: Duration,
}

impl WatchTarget {
    pub fn from_app(cfg: &AppConfig) -> Self {
        Self {
            dir: cfg.dir.clone(),
            extension: cfg.settings.extension().to_string(),
            build_only: cfg.build_only,
            poll_interval: cfg.settings.poll_interval(),
        }
    }
}

/// Result of one build+run cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The build failed; nothing was launched.
    BuildFailed,
    /// The build succeeded in build-only mode.
    Built,
    /// The build succeeded and the program was (re)launched.
    Launched,
    /// The build succeeded but the launch failed.
    LaunchFailed,
}

/// Polls a directory tree and runs build+run cycles when tracked sources
/// change.
///
/// Builder and runner are only ever touched from the task running the
/// watcher, one cycle at a time.
#[derive(Debug)]
pub struct Watcher<B, R> {
    target: WatchTarget,
    builder: B,
    runner: R,
    fs: Arc<dyn FileSystem>,
    span: Span,
}

impl<B, R> Watcher<B, R>
where
    B: BuildBackend + 'static,
    R: RunBackend + 'static,
{
    pub fn new(target: WatchTarget, builder: B, runner: R, fs: Arc<dyn FileSystem>, span: Span) -> Self {
        Self {
            target,
            builder,
            runner,
            fs,
            span,
        }
    }

    /// Run one cycle: custom command (best effort), build, and unless in
    /// build-only mode or the build failed, relaunch.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        if let Err(err) = self.runner.run_custom_commands().await {
            debug!(parent: &self.span, error = %err, "custom command failed; building anyway");
        }

        if !self.builder.build().await {
            return CycleOutcome::BuildFailed;
        }

        if self.target.build_only {
            return CycleOutcome::Built;
        }

        match self.runner.launch().await {
            Ok(()) => CycleOutcome::Launched,
            Err(err) => {
                error!(parent: &self.span, error = %err, "launch failed");
                CycleOutcome::LaunchFailed
            }
        }
    }

    /// Walk the target tree once, running a cycle for every tracked file
    /// modified after the last build. Returns the number of cycles run.
    ///
    /// The walk is depth-first in lexical order. Each file is compared
    /// against the builder's timestamp at the moment it is visited, so a cycle
    /// triggered mid-walk raises the bar for the rest of the pass.
    pub async fn scan_once(&mut self) -> Result<usize> {
        let root = self.target.dir.clone();
        let mut cycles = 0;
        let mut pending = self.list_dir(&root, true)?;

        while let Some(path) = pending.pop() {
            let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                continue;
            };
            let kind = match self.fs.entry_kind(&path) {
                Ok(kind) => kind,
                Err(err) if is_not_found(&err) => {
                    debug!(parent: &self.span, path = ?path, "entry vanished during scan");
                    continue;
                }
                Err(err) => return Err(AutobuildError::Walk { path, source: err }),
            };
            let is_dir = kind == EntryKind::Dir;
            let is_file = kind == EntryKind::File;

            match classify_entry(&name, is_dir, is_file, &self.target.extension) {
                EntryDecision::SkipSubtree | EntryDecision::Skip => {}
                EntryDecision::Descend => {
                    pending.extend(self.list_dir(&path, false)?);
                }
                EntryDecision::Check => {
                    let modified = match self.fs.modified(&path) {
                        Ok(t) => t,
                        Err(err) if is_not_found(&err) => {
                            debug!(parent: &self.span, path = ?path, "file vanished during scan");
                            continue;
                        }
                        Err(err) => return Err(AutobuildError::Walk { path, source: err }),
                    };

                    if modified > self.builder.last_build() {
                        info!(parent: &self.span, path = %relative_str(&root, &path), "modified");
                        self.run_cycle().await;
                        cycles += 1;
                    }
                }
            }
        }

        Ok(cycles)
    }

    /// Children of `dir`, in reverse lexical order so that popping yields
    /// them in lexical order.
    fn list_dir(&self, dir: &Path, is_root: bool) -> Result<Vec<PathBuf>> {
        let mut entries = match self.fs.read_dir(dir) {
            Ok(entries) => entries,
            Err(err) if !is_root && is_not_found(&err) => {
                debug!(parent: &self.span, path = ?dir, "directory vanished during scan");
                return Ok(Vec::new());
            }
            Err(err) => {
                return Err(AutobuildError::Walk {
                    path: dir.to_path_buf(),
                    source: err,
                });
            }
        };
        entries.sort_by(|a, b| by_file_name(b, a));
        Ok(entries)
    }

    /// Log start, run the initial cycle, then spawn the polling loop.
    pub async fn start(mut self) -> WatchHandle {
        info!(
            parent: &self.span,
            dir = ?self.target.dir,
            extension = %self.target.extension,
            build_only = self.target.build_only,
            "watching"
        );
        self.run_cycle().await;

        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();
        let join = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.target.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; the initial cycle just ran.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = &mut cancel_rx => {
                        debug!(parent: &self.span, "watch loop stopped");
                        return Ok::<(), AutobuildError>(());
                    }
                }

                if let Err(err) = self.scan_once().await {
                    return Err(err);
                }
            }
        });

        WatchHandle {
            cancel: Some(cancel_tx),
            join,
        }
    }

    /// Run until the scan fails. Only returns on error (or cancellation,
    /// which nothing triggers through this entry point).
    pub async fn watch(self) -> Result<()> {
        self.start().await.join().await
    }
}

/// Handle to a running watch loop.
///
/// Dropping the handle stops the loop after the current pass.
#[derive(Debug)]
pub struct WatchHandle {
    cancel: Option<oneshot::Sender<()>>,
    join: JoinHandle<Result<()>>,
}

impl WatchHandle {
    /// Ask the loop to stop after the current pass.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel.take() {
            let _ = tx.send(());
        }
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait for the loop to end and return its result.
    pub async fn join(mut self) -> Result<()> {
        // Keep the cancel sender alive until the loop has ended.
        let _cancel = self.cancel.take();
        match self.join.await {
            Ok(result) => result,
            Err(e) => Err(AutobuildError::Other(anyhow::anyhow!("watch loop task failed: {e}"))),
        }
    }
}
