//! Test harness helpers.

use std::path::PathBuf;

use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

/// Set up test logging with the given filter.
///
/// Output goes through the test writer, so it only shows for failing tests.
/// Safe to call from every test; only the first call installs a subscriber.
///
/// # Example
///
/// ```rust,ignore
/// use hearth_test::setup_test_logging;
///
/// #[test]
/// fn my_test() {
///     setup_test_logging("hearth_abilities=debug");
///     // ... test code
/// }
/// ```
pub fn setup_test_logging(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_test_writer()
        .try_init();
}

/// Set up test logging at `warn`.
pub fn init_test_logging() {
    setup_test_logging("warn");
}

/// Write `content` to `hearth.toml` in a fresh temporary directory.
///
/// Keep the returned `TempDir` alive for as long as the path is used.
///
/// # Panics
///
/// Panics if the directory or file cannot be created.
#[must_use]
pub fn test_config_file(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("hearth.toml");
    std::fs::write(&path, content).expect("Failed to write config file");
    (dir, path)
}
