//! Bridge from `hearth_config::Config` to manager settings.
//!
//! `hearth-config` knows nothing about abilities; conversion into domain
//! types happens here, once.

use std::time::Duration;

use hearth_config::Config;

use crate::manager::ManagerConfig;

/// Convert config to [`ManagerConfig`].
///
/// A `max_abilities` of `0` means unlimited.
#[must_use]
pub fn to_manager_config(cfg: &Config) -> ManagerConfig {
    let max_abilities = match cfg.runtime.max_abilities {
        0 => None,
        limit => Some(limit),
    };

    ManagerConfig {
        max_abilities,
        attach_app_database: cfg.storage.attach_app_database,
        app_namespace_prefix: cfg.storage.app_namespace_prefix.clone(),
    }
}

/// How often the host loop should call
/// [`AbilityManager::update_abilities`](crate::AbilityManager::update_abilities).
#[must_use]
pub fn tick_interval(cfg: &Config) -> Duration {
    Duration::from_millis(cfg.runtime.tick_interval_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_unlimited() {
        let manager = to_manager_config(&Config::default());
        assert_eq!(manager, ManagerConfig::default());
        assert_eq!(tick_interval(&Config::default()), Duration::from_millis(10));
    }

    #[test]
    fn test_limits_and_storage_carry_over() {
        let mut cfg = Config::default();
        cfg.runtime.max_abilities = 8;
        cfg.runtime.tick_interval_ms = 50;
        cfg.storage.attach_app_database = false;
        cfg.storage.app_namespace_prefix = "apps".to_owned();

        let manager = to_manager_config(&cfg);
        assert_eq!(manager.max_abilities, Some(8));
        assert!(!manager.attach_app_database);
        assert_eq!(manager.app_namespace_prefix, "apps");
        assert_eq!(tick_interval(&cfg), Duration::from_millis(50));
    }
}
