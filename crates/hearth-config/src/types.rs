//! Configuration types for the Hearth runtime.
//!
//! Every struct implements [`Default`] with the same values as the embedded
//! `defaults.toml`, so a bare `[section]` header produces a working
//! configuration.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration for the Hearth runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ability manager limits and host loop cadence.
    pub runtime: RuntimeSection,
    /// Logging level, format, and per-crate directives.
    pub logging: LoggingSection,
    /// App database settings.
    pub storage: StorageSection,
}

// ---------------------------------------------------------------------------
// RuntimeSection
// ---------------------------------------------------------------------------

/// Ability manager settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSection {
    /// Maximum number of live abilities. `0` means unlimited.
    pub max_abilities: usize,
    /// Interval between ticks the host loop should aim for, in milliseconds.
    ///
    /// The manager never sleeps; this is read by the host loop.
    pub tick_interval_ms: u64,
}

impl Default for RuntimeSection {
    fn default() -> Self {
        Self {
            max_abilities: 0,
            tick_interval_ms: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// LoggingSection
// ---------------------------------------------------------------------------

/// Logging and tracing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Global log level filter (`"trace"`, `"debug"`, `"info"`, `"warn"`,
    /// `"error"`).
    pub level: String,
    /// Output format: `"pretty"`, `"compact"`, `"json"`, or `"full"`.
    pub format: String,
    /// Per-crate tracing directives (e.g. `["hearth_abilities=debug"]`).
    pub directives: Vec<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "compact".to_owned(),
            directives: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// StorageSection
// ---------------------------------------------------------------------------

/// App database settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// Whether apps get a database handle attached on registration.
    pub attach_app_database: bool,
    /// Namespace prefix for per-app stores (`"{prefix}:{app name}"`).
    pub app_namespace_prefix: String,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            attach_app_database: true,
            app_namespace_prefix: "app".to_owned(),
        }
    }
}
