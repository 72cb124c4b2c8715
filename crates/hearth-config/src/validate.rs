//! Post-merge configuration validation.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Validate a fully-merged and deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_runtime(config)?;
    validate_logging(config)?;
    validate_storage(config)?;
    Ok(())
}

/// Longest tick interval accepted (one minute).
const MAX_TICK_INTERVAL_MS: u64 = 60_000;

fn validate_runtime(config: &Config) -> ConfigResult<()> {
    let r = &config.runtime;

    if r.tick_interval_ms == 0 || r.tick_interval_ms > MAX_TICK_INTERVAL_MS {
        return Err(ConfigError::ValidationError {
            field: "runtime.tick_interval_ms".to_owned(),
            message: format!(
                "tick_interval_ms must be between 1 and {MAX_TICK_INTERVAL_MS}, got {}",
                r.tick_interval_ms
            ),
        });
    }

    // Ability ids are u32; a larger live set could never be addressed.
    if u32::try_from(r.max_abilities).is_err() {
        return Err(ConfigError::ValidationError {
            field: "runtime.max_abilities".to_owned(),
            message: format!("max_abilities must not exceed {}", u32::MAX),
        });
    }

    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.logging.level.as_str()) {
        return Err(ConfigError::ValidationError {
            field: "logging.level".to_owned(),
            message: format!(
                "unsupported log level '{}'; expected one of: {}",
                config.logging.level,
                valid_levels.join(", ")
            ),
        });
    }

    let valid_formats = ["pretty", "compact", "json", "full"];
    if !valid_formats.contains(&config.logging.format.as_str()) {
        return Err(ConfigError::ValidationError {
            field: "logging.format".to_owned(),
            message: format!(
                "unsupported log format '{}'; expected one of: {}",
                config.logging.format,
                valid_formats.join(", ")
            ),
        });
    }

    Ok(())
}

fn validate_storage(config: &Config) -> ConfigResult<()> {
    let prefix = &config.storage.app_namespace_prefix;
    if prefix.is_empty() || prefix.contains('\0') || prefix.contains(':') {
        return Err(ConfigError::ValidationError {
            field: "storage.app_namespace_prefix".to_owned(),
            message: format!(
                "app_namespace_prefix must be non-empty and contain no ':' or NUL, got {prefix:?}"
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_zero_tick_interval() {
        let mut config = Config::default();
        config.runtime.tick_interval_ms = 0;
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("runtime.tick_interval_ms"));
    }

    #[test]
    fn test_tick_interval_upper_bound() {
        let mut config = Config::default();
        config.runtime.tick_interval_ms = MAX_TICK_INTERVAL_MS;
        assert!(validate(&config).is_ok());
        config.runtime.tick_interval_ms = MAX_TICK_INTERVAL_MS + 1;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_owned();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("logging.level"));
    }

    #[test]
    fn test_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_owned();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_invalid_namespace_prefix() {
        for bad in ["", "app:x", "a\0b"] {
            let mut config = Config::default();
            config.storage.app_namespace_prefix = bad.to_owned();
            assert!(validate(&config).is_err(), "prefix {bad:?} should be rejected");
        }
    }
}
