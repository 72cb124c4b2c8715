//! Conversion from the `[logging]` config section.

use hearth_config::LoggingSection;

use crate::logging::{LogConfig, LogFormat};

/// Convert the `[logging]` section into a [`LogConfig`].
///
/// Unknown formats fall back to compact; `hearth_config` validation rejects
/// them before this point.
#[must_use]
pub fn to_log_config(section: &LoggingSection) -> LogConfig {
    let format = match section.format.as_str() {
        "pretty" => LogFormat::Pretty,
        "json" => LogFormat::Json,
        "full" => LogFormat::Full,
        _ => LogFormat::Compact,
    };

    section
        .directives
        .iter()
        .fold(LogConfig::new(&section.level).with_format(format), |cfg, d| {
            cfg.with_directive(d)
        })
}
