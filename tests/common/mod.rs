#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use autobuild::fs::FileSystem;
use autobuild::watch::{WatchTarget, Watcher};

pub use autobuild_test_utils::{
    init_tracing, with_timeout, CapturedLogs, FakeBuilder, FakeRunner, Journal,
};

pub const ROOT: &str = "/project";

/// `UNIX_EPOCH + secs`, for readable scripted timestamps.
pub fn at(secs: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
}

pub fn root() -> PathBuf {
    PathBuf::from(ROOT)
}

pub fn target(dir: &Path, build_only: bool) -> WatchTarget {
    WatchTarget {
        dir: dir.to_path_buf(),
        extension: "go".to_string(),
        build_only,
        poll_interval: Duration::from_millis(400),
    }
}

pub fn fake_watcher(
    target: WatchTarget,
    builder: FakeBuilder,
    runner: FakeRunner,
    fs: Arc<dyn FileSystem>,
) -> Watcher<FakeBuilder, FakeRunner> {
    Watcher::new(target, builder, runner, fs, tracing::info_span!("test", cmd = "watch"))
}
