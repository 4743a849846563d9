// tests/watch_scenario.rs
//
// End-to-end watch loop over a real directory, with fake build/run backends.

mod common;
use crate::common::{fake_watcher, target, with_timeout, CapturedLogs};

use std::error::Error;
use std::fs;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use autobuild::fs::RealFileSystem;
use autobuild_test_utils::{FakeBuilder, FakeRunner, Journal};
use tempfile::tempdir;

type TestResult = Result<(), Box<dyn Error>>;

async fn wait_for_builds(journal: &Journal, count: usize) {
    while journal.count("build") < count {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::test]
async fn editing_a_source_file_rebuilds_and_relaunches_once() -> TestResult {
    let logs = CapturedLogs::new();
    let _guard = logs.install();

    let dir = tempdir()?;
    let root = dir.path().canonicalize()?;
    fs::create_dir_all(root.join("pkg"))?;
    fs::write(root.join("main.go"), "package main\n")?;
    fs::write(root.join("pkg/util.go"), "package pkg\n")?;
    fs::write(root.join("README.md"), "# demo\n")?;

    let journal = Journal::new();
    let mut tgt = target(&root, false);
    tgt.poll_interval = Duration::from_millis(50);

    let watcher = fake_watcher(
        tgt,
        FakeBuilder::new(journal.clone()),
        FakeRunner::new(journal.clone()),
        Arc::new(RealFileSystem),
    );

    let mut handle = watcher.start().await;
    assert_eq!(journal.count("build"), 1);
    assert_eq!(journal.count("launch"), 1);

    // Let a few passes go by with nothing to do.
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(journal.count("build"), 1);

    // Edit a file that is not tracked: still nothing.
    fs::write(root.join("README.md"), "# demo, edited\n")?;
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(journal.count("build"), 1);

    fs::write(root.join("pkg/util.go"), "package pkg\n\nfunc Util() {}\n")?;
    fs::File::options()
        .write(true)
        .open(root.join("pkg/util.go"))?
        .set_modified(SystemTime::now())?;

    with_timeout(wait_for_builds(&journal, 2)).await;

    // One change, one cycle.
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(journal.count("build"), 2);
    assert_eq!(journal.count("launch"), 2);

    let lines = logs.lines_with(&["modified", "pkg/util.go"]);
    assert_eq!(lines.len(), 1, "logs were:\n{}", logs.contents());

    handle.cancel();
    with_timeout(handle.join()).await?;

    Ok(())
}

#[tokio::test]
async fn files_inside_hidden_directories_are_ignored() -> TestResult {
    let dir = tempdir()?;
    let root = dir.path().canonicalize()?;
    fs::create_dir_all(root.join(".git/hooks"))?;
    fs::write(root.join("main.go"), "package main\n")?;

    let journal = Journal::new();
    let mut tgt = target(&root, false);
    tgt.poll_interval = Duration::from_millis(50);

    let watcher = fake_watcher(
        tgt,
        FakeBuilder::new(journal.clone()),
        FakeRunner::new(journal.clone()),
        Arc::new(RealFileSystem),
    );

    let mut handle = watcher.start().await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    fs::write(root.join(".git/hooks/pre-commit.go"), "package hooks\n")?;
    fs::write(root.join(".scratch.go"), "package main\n")?;
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(journal.count("build"), 1);

    handle.cancel();
    with_timeout(handle.join()).await?;

    Ok(())
}
