// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

/// Settings file as read from TOML (`Autobuild.toml`).
///
/// ```toml
/// [build]
/// toolchain = "go"
/// args = ["build"]
/// output_flag = "-o"
///
/// [watch]
/// extension = "go"
/// poll_interval_ms = 400
///
/// [run]
/// grace_period_ms = 1000
/// ```
///
/// All sections are optional and have reasonable defaults. This is the
/// unvalidated form; convert it into [`Settings`] with `TryFrom`.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RawSettings {
    #[serde(default)]
    pub build: BuildSection,

    #[serde(default)]
    pub watch: WatchSection,

    #[serde(default)]
    pub run: RunSection,
}

/// `[build]` section.
///
/// The build command line is
/// `<toolchain> <args...> <output_flag> <binary name> <extra build args...>`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildSection {
    #[serde(default = "default_toolchain")]
    pub toolchain: String,

    #[serde(default = "default_build_args")]
    pub args: Vec<String>,

    #[serde(default = "default_output_flag")]
    pub output_flag: String,
}

fn default_toolchain() -> String {
    "go".to_string()
}

fn default_build_args() -> Vec<String> {
    vec!["build".to_string()]
}

fn default_output_flag() -> String {
    "-o".to_string()
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            toolchain: default_toolchain(),
            args: default_build_args(),
            output_flag: default_output_flag(),
        }
    }
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchSection {
    /// Tracked source extension, without the leading dot.
    #[serde(default = "default_extension")]
    pub extension: String,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_extension() -> String {
    "go".to_string()
}

fn default_poll_interval_ms() -> u64 {
    400
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

/// `[run]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSection {
    /// How long a previous process may take to exit before it is killed.
    #[serde(default = "default_grace_period_ms")]
    pub grace_period_ms: u64,
}

fn default_grace_period_ms() -> u64 {
    1000
}

impl Default for RunSection {
    fn default() -> Self {
        Self {
            grace_period_ms: default_grace_period_ms(),
        }
    }
}

/// Validated settings.
///
/// Only constructible through `TryFrom<RawSettings>` (see `validate.rs`) or
/// [`Settings::default`], so the rest of the crate can rely on non-empty
/// toolchain/extension and a non-zero poll interval.
#[derive(Debug, Clone)]
pub struct Settings {
    build: BuildSection,
    watch: WatchSection,
    run: RunSection,
}

impl Settings {
    pub(crate) fn new_unchecked(build: BuildSection, watch: WatchSection, run: RunSection) -> Self {
        let mut watch = watch;
        // Accept ".go" as well as "go".
        watch.extension = watch.extension.trim_start_matches('.').to_string();
        Self { build, watch, run }
    }

    pub fn build_section(&self) -> &BuildSection {
        &self.build
    }

    pub fn extension(&self) -> &str {
        &self.watch.extension
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.watch.poll_interval_ms)
    }

    pub fn grace_period(&self) -> Duration {
        Duration::from_millis(self.run.grace_period_ms)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new_unchecked(
            BuildSection::default(),
            WatchSection::default(),
            RunSection::default(),
        )
    }
}
