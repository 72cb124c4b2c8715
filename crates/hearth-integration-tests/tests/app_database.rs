//! App abilities and the shared key-value database.

use hearth_abilities::{
    Ability, AbilityManager, AppContext, AppHooks, AppInfo, config_bridge::to_manager_config,
};
use hearth_storage::keys::{BATTERY_LEVEL, SYSTEM_NAMESPACE};
use hearth_storage::{KvStore, ScopedKvStore};
use hearth_test::{EventLog, recording_app, recording_ui, test_manager_with_store, test_store};

/// Counts how often it has been opened, persisting the count in its database.
struct LaunchCounter;

impl AppHooks for LaunchCounter {
    fn on_open(&mut self, ctx: &mut AppContext<'_, '_>) {
        let Some(db) = ctx.database() else {
            return;
        };
        let launches: u32 = db.get_json("launches").unwrap().unwrap_or(0);
        db.set_json("launches", &launches.saturating_add(1)).unwrap();
    }
}

fn open_once(manager: &mut AbilityManager, name: &str) {
    let id = manager
        .create_ability(Ability::app(AppInfo::new(name), LaunchCounter))
        .unwrap();
    manager.open_app_ability(id);
    manager.update_abilities();
    manager.destroy_ability(id);
    manager.update_abilities();
}

#[test]
fn app_data_survives_destroy_and_recreate() {
    let store = test_store();
    let mut manager = test_manager_with_store(store.clone());

    open_once(&mut manager, "clock");
    open_once(&mut manager, "clock");
    open_once(&mut manager, "weather");

    let clock = ScopedKvStore::new(store.clone(), "app:clock").unwrap();
    assert_eq!(clock.get_json::<u32>("launches").unwrap(), Some(2));
    let weather = ScopedKvStore::new(store, "app:weather").unwrap();
    assert_eq!(weather.get_json::<u32>("launches").unwrap(), Some(1));
}

#[test]
fn only_apps_receive_a_database() {
    let log = EventLog::new();
    let mut manager = test_manager_with_store(test_store());
    let app = manager.create_ability(recording_app("notes", &log)).unwrap();
    let ui = manager.create_ability(recording_ui(&log)).unwrap();

    let db = manager
        .ability(app)
        .and_then(Ability::as_app)
        .and_then(|a| a.database())
        .map(|db| db.namespace().to_owned());
    assert_eq!(db.as_deref(), Some("app:notes"));
    assert!(manager.ability(ui).and_then(Ability::as_app).is_none());
}

#[test]
fn no_database_without_a_store() {
    let mut manager = AbilityManager::with_config(to_manager_config(&Default::default()));
    let id = manager
        .create_ability(Ability::app(AppInfo::new("clock"), LaunchCounter))
        .unwrap();
    manager.open_app_ability(id);
    manager.update_abilities();

    let app = manager.ability(id).and_then(Ability::as_app).unwrap();
    assert!(app.database().is_none());
}

#[test]
fn apps_read_system_keys() {
    struct BatteryWidget {
        seen: Option<u8>,
    }

    impl AppHooks for BatteryWidget {
        fn on_running(&mut self, ctx: &mut AppContext<'_, '_>) {
            let system = ctx
                .database()
                .map(|db| db.rebind(SYSTEM_NAMESPACE).unwrap());
            self.seen = system.and_then(|db| BATTERY_LEVEL.read(&db).unwrap());
        }
    }

    let store = test_store();
    let system = ScopedKvStore::new(store.clone(), SYSTEM_NAMESPACE).unwrap();
    BATTERY_LEVEL.write(&system, &87).unwrap();

    let mut manager = test_manager_with_store(store.clone());
    let id = manager
        .create_ability(Ability::app(
            AppInfo::new("battery"),
            BatteryWidget { seen: None },
        ))
        .unwrap();
    manager.open_app_ability(id);
    manager.update_abilities();
    manager.update_abilities();

    let seen = manager
        .ability(id)
        .and_then(|a| a.hooks::<BatteryWidget>())
        .and_then(|w| w.seen);
    assert_eq!(seen, Some(87));
    assert!(store.exists(SYSTEM_NAMESPACE, "battery.level").unwrap());
}
