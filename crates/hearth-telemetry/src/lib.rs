//! Hearth Telemetry - Logging setup for the Hearth ability runtime.
//!
//! This crate provides:
//! - Configurable logging setup with multiple formats and targets
//! - A bridge from the `[logging]` config section (feature `config`)
//!
//! # Example
//!
//! ```rust,no_run
//! use hearth_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), hearth_telemetry::TelemetryError> {
//! let config = LogConfig::new("debug")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("hearth_abilities=trace");
//!
//! setup_logging(&config)?;
//! tracing::info!("host loop starting");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

#[cfg(feature = "config")]
mod bridge;
mod error;
mod logging;

#[cfg(feature = "config")]
pub use bridge::to_log_config;
pub use error::{TelemetryError, TelemetryResult};
pub use logging::{
    FileRotation, LogConfig, LogFormat, LogTarget, setup_default_logging, setup_logging,
};
