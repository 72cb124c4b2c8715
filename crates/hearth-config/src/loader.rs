//! Config file loading.
//!
//! Implements the `Config::load()` algorithm:
//! 1. Parse `defaults.toml` → base
//! 2. Merge the config file, if one is given and exists
//! 3. Apply `HEARTH_*` env fallbacks for fields the file leaves unset
//! 4. Deserialize merged tree → `Config`
//! 5. Validate

use std::path::Path;

use tracing::{debug, info};

use crate::env::{apply_env_fallbacks, collect_env_vars};
use crate::error::{ConfigError, ConfigResult};
use crate::merge::deep_merge;
use crate::types::Config;
use crate::validate;

/// Embedded default configuration.
const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// Maximum allowed config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// Load configuration from embedded defaults, an optional file, and the
/// process environment.
///
/// A `path` that does not exist is skipped, so hosts can pass their default
/// location unconditionally.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file is unreadable or malformed, or if
/// the final merged configuration fails validation.
pub fn load(path: Option<&Path>) -> ConfigResult<Config> {
    load_with_env(path, &collect_env_vars())
}

/// [`load`] with an explicit environment snapshot.
///
/// # Errors
///
/// See [`load`].
pub fn load_with_env(
    path: Option<&Path>,
    env_vars: &std::collections::HashMap<String, String>,
) -> ConfigResult<Config> {
    // 1. Parse embedded defaults.
    let mut merged: toml::Value =
        toml::from_str(DEFAULTS_TOML).map_err(|e| ConfigError::ParseError {
            path: "<embedded defaults>".to_owned(),
            source: e,
        })?;

    // 2. Config file.
    let overlay = match path {
        Some(p) => try_load_file(p)?,
        None => None,
    };
    if let (Some(overlay), Some(p)) = (&overlay, path) {
        deep_merge(&mut merged, overlay);
        info!(path = %p.display(), "loaded config file");
    }

    // 3. Env fallbacks.
    let env_count = apply_env_fallbacks(&mut merged, overlay.as_ref(), env_vars)?;
    if env_count > 0 {
        debug!(count = env_count, "applied environment variable fallbacks");
    }

    // 4. Deserialize.
    let config: Config =
        merged
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::ParseError {
                path: "<merged config>".to_owned(),
                source: e,
            })?;

    // 5. Validate.
    validate::validate(&config)?;
    Ok(config)
}

/// Load a config from a specific file path (no defaults merge, no env).
///
/// Missing fields take their `Default` values.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read, parsed, or validated.
pub fn load_file(path: &Path) -> ConfigResult<Config> {
    let content = read_bounded(path)?;
    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })?;

    validate::validate(&config)?;
    Ok(config)
}

/// Try to load a file, returning `None` if the file doesn't exist.
fn try_load_file(path: &Path) -> ConfigResult<Option<toml::Value>> {
    let content = match read_bounded(path) {
        Ok(c) => c,
        Err(ConfigError::ReadError { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            debug!(path = %path.display(), "config file not found, skipping");
            return Ok(None);
        },
        Err(e) => return Err(e),
    };

    let value: toml::Value = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(Some(value))
}

/// Read a file, rejecting anything above [`MAX_CONFIG_FILE_SIZE`].
///
/// Size is checked after a single read so there is no stat/read race.
fn read_bounded(path: &Path) -> ConfigResult<String> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    if content.len() as u64 > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!(
                "config file is {} bytes, exceeding the {} byte limit",
                content.len(),
                MAX_CONFIG_FILE_SIZE
            ),
        });
    }

    Ok(content)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn write_config(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hearth.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_defaults_parse() {
        let val: toml::Value = toml::from_str(DEFAULTS_TOML).unwrap();
        let table = val.as_table().unwrap();
        assert!(table.contains_key("runtime"));
        assert!(table.contains_key("logging"));
        assert!(table.contains_key("storage"));
    }

    #[test]
    fn test_defaults_match_default_impls() {
        let config: Config = toml::from_str(DEFAULTS_TOML).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_without_file() {
        let config = load_with_env(None, &HashMap::new()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let config =
            load_with_env(Some(Path::new("/nonexistent/hearth.toml")), &HashMap::new()).unwrap();
        assert_eq!(config.runtime.tick_interval_ms, 10);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let (_dir, path) = write_config(
            r#"
            [runtime]
            max_abilities = 16

            [logging]
            format = "json"
            directives = ["hearth_abilities=trace"]
        "#,
        );

        let config = load_with_env(Some(&path), &HashMap::new()).unwrap();

        assert_eq!(config.runtime.max_abilities, 16);
        assert_eq!(config.runtime.tick_interval_ms, 10);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.directives, vec!["hearth_abilities=trace"]);
    }

    #[test]
    fn test_env_applies_only_where_file_is_silent() {
        let (_dir, path) = write_config("[logging]\nlevel = \"warn\"");
        let env: HashMap<String, String> = [
            ("HEARTH_LOG_LEVEL".to_owned(), "trace".to_owned()),
            ("HEARTH_TICK_INTERVAL_MS".to_owned(), "20".to_owned()),
        ]
        .into_iter()
        .collect();

        let config = load_with_env(Some(&path), &env).unwrap();

        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.runtime.tick_interval_ms, 20);
    }

    #[test]
    fn test_invalid_value_fails_validation() {
        let (_dir, path) = write_config("[logging]\nlevel = \"loud\"");
        let result = load_with_env(Some(&path), &HashMap::new());
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let (_dir, path) = write_config("[runtime\nmax_abilities = ");
        let result = load_with_env(Some(&path), &HashMap::new());
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_wrong_type_is_parse_error() {
        let (_dir, path) = write_config("[runtime]\nmax_abilities = \"many\"");
        let result = load_with_env(Some(&path), &HashMap::new());
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_load_file_nonexistent() {
        let result = load_file(Path::new("/nonexistent/hearth.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_load_file_partial_uses_defaults() {
        let (_dir, path) = write_config("[storage]\nattach_app_database = false");
        let config = load_file(&path).unwrap();
        assert!(!config.storage.attach_app_database);
        assert_eq!(config.storage.app_namespace_prefix, "app");
    }

    #[test]
    fn test_oversized_config_rejected() {
        let data = "x = \"".to_owned() + &"a".repeat(1_100_000) + "\"";
        let (_dir, path) = write_config(&data);

        let result = try_load_file(&path);
        assert!(
            matches!(result, Err(ConfigError::ValidationError { .. })),
            "Expected ValidationError for oversized config, got: {result:?}"
        );
    }

    #[test]
    fn test_config_serializes_to_json() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("\"tick_interval_ms\":10"));
        assert!(json.contains("\"app_namespace_prefix\":\"app\""));
    }
}
