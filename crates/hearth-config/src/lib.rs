#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
//! Layered configuration for the Hearth ability runtime.
//!
//! A single [`Config`] type covers the ability manager (`[runtime]`), the
//! logging stack (`[logging]`) and the app database (`[storage]`).
//!
//! # Usage
//!
//! ```rust,no_run
//! use hearth_config::Config;
//!
//! // Embedded defaults, then the file, then HEARTH_* environment fallbacks.
//! let config = Config::load(Some(std::path::Path::new("hearth.toml"))).unwrap();
//! println!("max abilities: {}", config.runtime.max_abilities);
//! ```
//!
//! # Configuration Precedence
//!
//! From highest to lowest priority:
//!
//! 1. **File** passed to [`Config::load`]
//! 2. **Environment variables** (`HEARTH_*`): fallback only, for fields the
//!    file leaves unset
//! 3. **Embedded defaults** (`defaults.toml` compiled into the binary)
//!
//! This crate has no dependencies on other internal hearth crates.
//! Conversion to domain types happens in the consuming crates.

/// Environment variable fallback resolution.
pub mod env;
/// Configuration error types.
pub mod error;
/// Configuration file loading.
pub mod loader;
/// Deep merging of TOML trees.
pub mod merge;
/// Configuration struct definitions.
pub mod types;
/// Configuration validation rules.
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use types::*;

impl Config {
    /// Load configuration from embedded defaults, an optional file, and
    /// environment fallbacks.
    ///
    /// See [`loader::load`] for the full algorithm.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file is malformed or the merged
    /// configuration fails validation.
    pub fn load(path: Option<&std::path::Path>) -> ConfigResult<Self> {
        loader::load(path)
    }
}
