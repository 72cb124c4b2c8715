//! Test fixtures for common types.

use std::sync::Arc;

use hearth_abilities::{Ability, AbilityManager, AppInfo, ManagerConfig};
use hearth_config::Config;
use hearth_storage::{KvStore, MemoryKvStore};

use crate::events::EventLog;
use crate::recorder::RecordingHooks;

/// App info for a test app called `name`.
#[must_use]
pub fn test_app_info(name: &str) -> AppInfo {
    AppInfo::new(name)
        .with_icon(format!("icons/{name}.png"))
        .with_user_data(serde_json::json!({ "fixture": true }))
}

/// A base ability recording into `log`.
#[must_use]
pub fn recording_base(log: &EventLog) -> Ability {
    Ability::base(RecordingHooks::new(log))
}

/// A UI ability recording into `log`.
#[must_use]
pub fn recording_ui(log: &EventLog) -> Ability {
    Ability::ui(RecordingHooks::new(log))
}

/// A worker ability recording into `log`.
#[must_use]
pub fn recording_worker(log: &EventLog) -> Ability {
    Ability::worker(RecordingHooks::new(log))
}

/// An app ability named `name` recording into `log`.
#[must_use]
pub fn recording_app(name: &str, log: &EventLog) -> Ability {
    Ability::app(test_app_info(name), RecordingHooks::new(log))
}

/// An app ability that keeps running in the background once closed.
#[must_use]
pub fn recording_background_app(name: &str, log: &EventLog) -> Ability {
    Ability::app(
        test_app_info(name).with_background_running(true),
        RecordingHooks::new(log),
    )
}

/// A fresh in-memory database.
#[must_use]
pub fn test_store() -> Arc<MemoryKvStore> {
    Arc::new(MemoryKvStore::new())
}

/// A manager with default settings and `store` attached.
#[must_use]
pub fn test_manager_with_store(store: Arc<dyn KvStore>) -> AbilityManager {
    AbilityManager::with_config(ManagerConfig::default()).with_database(store)
}

/// A config with a small ability limit, for capacity tests.
#[must_use]
pub fn test_config(max_abilities: usize) -> Config {
    let mut config = Config::default();
    config.runtime.max_abilities = max_abilities;
    config
}
