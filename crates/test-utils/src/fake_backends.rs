use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use autobuild::errors::{AutobuildError, Result};
use autobuild::exec::{BackendFuture, BuildBackend, RunBackend};

/// Shared, ordered record of backend invocations ("custom", "build",
/// "launch"), so tests can assert on sequencing across both fakes.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Arc<Mutex<Vec<&'static str>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: &'static str) {
        self.entries.lock().unwrap().push(entry);
    }

    pub fn entries(&self) -> Vec<&'static str> {
        self.entries.lock().unwrap().clone()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.entries.lock().unwrap().iter().filter(|e| **e == entry).count()
    }
}

/// Where a fake build takes its completion time from.
#[derive(Debug, Clone)]
pub enum BuildClock {
    /// `SystemTime::now()` at the end of each build.
    Now,
    /// One scripted completion time per build; `now()` once exhausted.
    Scripted(VecDeque<SystemTime>),
}

/// A fake builder that:
/// - records every build in the journal
/// - advances its timestamp from a [`BuildClock`]
/// - succeeds or fails as configured.
#[derive(Debug)]
pub struct FakeBuilder {
    journal: Journal,
    clock: BuildClock,
    succeed: bool,
    last_build: SystemTime,
}

impl FakeBuilder {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            clock: BuildClock::Now,
            succeed: true,
            last_build: SystemTime::UNIX_EPOCH,
        }
    }

    pub fn with_completion_times(mut self, times: impl IntoIterator<Item = SystemTime>) -> Self {
        self.clock = BuildClock::Scripted(times.into_iter().collect());
        self
    }

    pub fn failing(mut self) -> Self {
        self.succeed = false;
        self
    }
}

impl BuildBackend for FakeBuilder {
    fn build(&mut self) -> BackendFuture<'_, bool> {
        Box::pin(async move {
            self.journal.record("build");
            let finished = match &mut self.clock {
                BuildClock::Now => SystemTime::now(),
                BuildClock::Scripted(times) => times.pop_front().unwrap_or_else(SystemTime::now),
            };
            if finished > self.last_build {
                self.last_build = finished;
            }
            self.succeed
        })
    }

    fn last_build(&self) -> SystemTime {
        self.last_build
    }
}

/// A fake runner that records custom-command runs and launches.
#[derive(Debug)]
pub struct FakeRunner {
    journal: Journal,
    custom_fails: bool,
    launch_fails: bool,
}

impl FakeRunner {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            custom_fails: false,
            launch_fails: false,
        }
    }

    pub fn with_failing_custom(mut self) -> Self {
        self.custom_fails = true;
        self
    }

    pub fn with_failing_launch(mut self) -> Self {
        self.launch_fails = true;
        self
    }
}

impl RunBackend for FakeRunner {
    fn run_custom_commands(&mut self) -> BackendFuture<'_, Result<()>> {
        Box::pin(async move {
            self.journal.record("custom");
            if self.custom_fails {
                Err(AutobuildError::CustomCommand("fake custom failure".to_string()))
            } else {
                Ok(())
            }
        })
    }

    fn launch(&mut self) -> BackendFuture<'_, Result<()>> {
        Box::pin(async move {
            self.journal.record("launch");
            if self.launch_fails {
                Err(AutobuildError::Other(anyhow::anyhow!("fake launch failure")))
            } else {
                Ok(())
            }
        })
    }
}
