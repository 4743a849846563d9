// src/config/validate.rs

use crate::config::model::{RawSettings, Settings};
use crate::errors::{AutobuildError, Result};

impl TryFrom<RawSettings> for Settings {
    type Error = crate::errors::AutobuildError;

    fn try_from(raw: RawSettings) -> std::result::Result<Self, Self::Error> {
        validate_raw_settings(&raw)?;
        Ok(Settings::new_unchecked(raw.build, raw.watch, raw.run))
    }
}

fn validate_raw_settings(raw: &RawSettings) -> Result<()> {
    validate_build_section(raw)?;
    validate_watch_section(raw)?;
    Ok(())
}

fn validate_build_section(raw: &RawSettings) -> Result<()> {
    if raw.build.toolchain.trim().is_empty() {
        return Err(AutobuildError::ConfigError(
            "[build].toolchain must not be empty".to_string(),
        ));
    }
    if raw.build.output_flag.trim().is_empty() {
        return Err(AutobuildError::ConfigError(
            "[build].output_flag must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_watch_section(raw: &RawSettings) -> Result<()> {
    if raw.watch.extension.trim_start_matches('.').trim().is_empty() {
        return Err(AutobuildError::ConfigError(
            "[watch].extension must not be empty".to_string(),
        ));
    }

    if raw.watch.poll_interval_ms == 0 {
        return Err(AutobuildError::ConfigError(
            "[watch].poll_interval_ms must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}
