//! `HEARTH_*` environment variable fallbacks.
//!
//! Environment variables only fill fields that the config file leaves unset.
//! A value written in the file always wins.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::merge::{contains_path, set_path};

/// Kind of TOML value an environment variable maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EnvKind {
    String,
    Integer,
}

/// Environment variable → dotted config path.
const ENV_FALLBACKS: &[(&str, &str, EnvKind)] = &[
    ("HEARTH_MAX_ABILITIES", "runtime.max_abilities", EnvKind::Integer),
    ("HEARTH_TICK_INTERVAL_MS", "runtime.tick_interval_ms", EnvKind::Integer),
    ("HEARTH_LOG_LEVEL", "logging.level", EnvKind::String),
    ("HEARTH_LOG_FORMAT", "logging.format", EnvKind::String),
];

/// Snapshot the `HEARTH_*` variables of the current process.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(key, _)| key.starts_with("HEARTH_"))
        .collect()
}

/// Apply environment fallbacks to `merged` for every path that `file_overlay`
/// does not set. Returns the number of fields filled from the environment.
///
/// # Errors
///
/// Returns [`ConfigError::ValidationError`] if a numeric variable does not
/// parse as a non-negative integer.
pub fn apply_env_fallbacks(
    merged: &mut toml::Value,
    file_overlay: Option<&toml::Value>,
    env_vars: &HashMap<String, String>,
) -> ConfigResult<usize> {
    let mut applied: usize = 0;

    for (var, path, kind) in ENV_FALLBACKS {
        let Some(raw) = env_vars.get(*var) else {
            continue;
        };
        if file_overlay.is_some_and(|overlay| contains_path(overlay, path)) {
            debug!(var, path, "config file sets field, ignoring env fallback");
            continue;
        }

        let value = match kind {
            EnvKind::String => toml::Value::String(raw.trim().to_owned()),
            EnvKind::Integer => {
                let parsed: u32 =
                    raw.trim()
                        .parse()
                        .map_err(|_| ConfigError::ValidationError {
                            field: (*path).to_owned(),
                            message: format!("{var}={raw} is not a non-negative integer"),
                        })?;
                toml::Value::Integer(i64::from(parsed))
            },
        };

        set_path(merged, path, value);
        applied = applied.saturating_add(1);
    }

    Ok(applied)
}
