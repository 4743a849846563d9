// tests/builder_process.rs
//
// Builder against real processes. `sh` stands in for the toolchain; the
// first build argument names a script in the project directory.

#![cfg(unix)]

mod common;
use crate::common::{init_tracing, CapturedLogs};

use std::error::Error;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

use autobuild::exec::{BuildBackend, BuildConfig, Builder};
use tempfile::tempdir;

type TestResult = Result<(), Box<dyn Error>>;

fn sh_build(dir: &Path, extra_args: &[&str]) -> BuildConfig {
    BuildConfig {
        toolchain: "sh".to_string(),
        args: vec!["build.sh".to_string()],
        output_flag: "-o".to_string(),
        binary_name: "myapp".to_string(),
        extra_args: extra_args.iter().map(|s| s.to_string()).collect(),
        dir: dir.to_path_buf(),
        env: Vec::new(),
    }
}

fn builder(config: BuildConfig) -> Builder {
    Builder::new(config, tracing::info_span!("test", cmd = "build"))
}

#[test]
fn arguments_put_output_flag_before_extra_args() {
    let config = sh_build(Path::new("/project"), &["-race", "-v"]);
    assert_eq!(
        config.arguments(),
        vec!["build.sh", "-o", "myapp", "-race", "-v"]
    );
}

#[tokio::test]
async fn successful_build_passes_arguments_and_advances_timestamp() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    fs::write(dir.path().join("build.sh"), "printf '%s ' \"$@\" > args.txt\n")?;

    let mut builder = builder(sh_build(dir.path(), &["-race"]));
    assert_eq!(builder.last_build(), SystemTime::UNIX_EPOCH);

    let before = SystemTime::now();
    assert!(builder.build().await);
    assert!(builder.last_build() >= before);

    let args = fs::read_to_string(dir.path().join("args.txt"))?;
    assert_eq!(args.trim_end(), "-o myapp -race");

    Ok(())
}

#[tokio::test]
async fn failed_build_still_advances_timestamp() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    fs::write(dir.path().join("build.sh"), "exit 1\n")?;

    let mut builder = builder(sh_build(dir.path(), &[]));
    let before = SystemTime::now();

    assert!(!builder.build().await);
    assert!(builder.last_build() >= before);

    Ok(())
}

#[tokio::test]
async fn missing_toolchain_is_a_failed_build() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    let mut config = sh_build(dir.path(), &[]);
    config.toolchain = "definitely-not-a-toolchain-4242".to_string();

    let mut builder = builder(config);
    let before = SystemTime::now();

    assert!(!builder.build().await);
    assert!(builder.last_build() >= before);

    Ok(())
}

#[tokio::test]
async fn timestamps_never_go_backwards() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    fs::write(dir.path().join("build.sh"), "true\n")?;

    let mut builder = builder(sh_build(dir.path(), &[]));
    let mut previous = builder.last_build();
    for _ in 0..3 {
        builder.build().await;
        assert!(builder.last_build() >= previous);
        previous = builder.last_build();
    }

    Ok(())
}

#[tokio::test]
async fn build_sees_env_file_variables() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    fs::write(
        dir.path().join("build.sh"),
        "printf '%s' \"$GOFLAGS\" > env.txt\n",
    )?;

    let mut config = sh_build(dir.path(), &[]);
    config.env = vec![("GOFLAGS".to_string(), "-mod=vendor".to_string())];
    let mut builder = builder(config);

    assert!(builder.build().await);
    assert_eq!(fs::read_to_string(dir.path().join("env.txt"))?, "-mod=vendor");

    Ok(())
}

#[tokio::test]
async fn failed_build_logs_combined_output() -> TestResult {
    let logs = CapturedLogs::new();
    let _guard = logs.install();

    let dir = tempdir()?;
    fs::write(
        dir.path().join("build.sh"),
        "echo 'compiling main.go'\necho './main.go:3:1: syntax error' >&2\nexit 2\n",
    )?;

    let mut builder = builder(sh_build(dir.path(), &[]));
    assert!(!builder.build().await);

    let contents = logs.contents();
    assert!(contents.contains("build failed"), "logs were:\n{contents}");
    let stdout_at = contents.find("compiling main.go").ok_or("stdout missing")?;
    let stderr_at = contents.find("syntax error").ok_or("stderr missing")?;
    assert!(stdout_at < stderr_at);

    Ok(())
}
