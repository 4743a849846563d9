// src/exec/command.rs

use std::path::Path;
use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::process::Command;

use crate::config::EnvVars;

/// Result of a command whose output was captured.
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    pub success: bool,
    /// Exit code; `None` if the process was terminated by a signal.
    pub code: Option<i32>,
    /// Stdout followed by stderr.
    pub output: String,
}

/// Run `program args...` in `dir` to completion, capturing its output.
///
/// Returns `Err` only if the process could not be spawned or waited on; a
/// non-zero exit is reported through [`CapturedOutput::success`].
pub async fn run_captured(
    program: &str,
    args: &[String],
    dir: &Path,
    env: &EnvVars,
) -> Result<CapturedOutput> {
    let output = Command::new(program)
        .args(args)
        .current_dir(dir)
        .envs(env.iter().map(|(k, v)| (k, v)))
        .stdin(Stdio::null())
        .output()
        .await
        .with_context(|| format!("running `{}`", command_line(program, args)))?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    Ok(CapturedOutput {
        success: output.status.success(),
        code: output.status.code(),
        output: combined,
    })
}

/// Human-readable command line for logs.
pub fn command_line(program: &str, args: &[String]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}
