//! End-to-end lifecycle scenarios driven through the manager's public API.

mod common;

use hearth_abilities::{
    Ability, AbilityError, AbilityId, AbilityManager, AbilityType, AppState, LifecycleState,
    UiState, WorkerState,
};
use hearth_test::{
    EventLog, LifecycleEvent, RecordingHooks, init_test_logging, recording_app,
    recording_background_app, recording_base, recording_ui, recording_worker,
};

use common::tick;

use LifecycleEvent::{
    Background, Close, Create, Destroy, Foreground, Hide, Open, Pause, Paused, Resume, Running,
    RunningBackground, Show, Update,
};

#[test]
fn worker_and_ui_then_reuse_of_freed_id() {
    init_test_logging();
    let log = EventLog::new();
    let mut manager = AbilityManager::new();

    let a = manager.create_ability(recording_worker(&log)).unwrap();
    let b = manager.create_ability(recording_ui(&log)).unwrap();
    assert_eq!((a.get(), b.get()), (0, 1));

    assert!(manager.destroy_ability(a));
    manager.update_abilities();
    assert!(log.events_for(a).contains(&Destroy));
    assert_eq!(log.events_for(b), vec![Create, Update]);
    assert!(!manager.is_ability_exist(a));

    let c = manager.create_ability(recording_base(&log)).unwrap();
    assert_eq!(c.get(), 0);
    assert_eq!(manager.ability_type(c), AbilityType::Base);
    assert_eq!(manager.ability_count(), 2);
}

#[test]
fn destroy_after_first_tick_pairs_hooks() {
    let log = EventLog::new();
    let mut manager = AbilityManager::new();
    let a = manager.create_ability(recording_worker(&log)).unwrap();

    manager.update_abilities();
    assert!(manager.destroy_ability(a));
    manager.update_abilities();
    assert_eq!(log.events_for(a), vec![Create, Update, Destroy]);
}

#[test]
fn every_created_ability_is_destroyed_exactly_once() {
    let log = EventLog::new();
    let mut manager = AbilityManager::new();
    let ids: Vec<AbilityId> = (0..4)
        .map(|_| manager.create_ability(recording_base(&log)).unwrap())
        .collect();

    tick(&mut manager, 3);
    manager.destroy_ability(ids[1]);
    manager.destroy_ability(ids[1]);
    tick(&mut manager, 2);
    manager.destroy_all();
    tick(&mut manager, 1);

    for id in ids {
        let events = log.events_for(id);
        assert_eq!(events.first(), Some(&Create));
        assert_eq!(events.last(), Some(&Destroy));
        assert_eq!(log.count(id, Create), 1);
        assert_eq!(log.count(id, Destroy), 1);
        assert!(log.count(id, Update) >= 1);
    }
    assert_eq!(manager.ability_count(), 0);
}

#[test]
fn ui_walkthrough() {
    let log = EventLog::new();
    let mut manager = AbilityManager::new();
    let ui = manager.create_ability(recording_ui(&log)).unwrap();

    manager.show_ui_ability(ui);
    tick(&mut manager, 2);
    manager.hide_ui_ability(ui);
    tick(&mut manager, 2);
    manager.show_ui_ability(ui);
    tick(&mut manager, 1);
    manager.destroy_ability(ui);
    tick(&mut manager, 1);

    assert_eq!(
        log.events_for(ui),
        vec![
            Create, Update, Show, Update, Foreground, Update, Hide, Update, Background, Update,
            Show, Hide, Destroy,
        ]
    );
    assert_eq!(manager.ui_ability_state(ui), UiState::Null);
}

#[test]
fn worker_walkthrough() {
    let log = EventLog::new();
    let mut manager = AbilityManager::new();
    let worker = manager.create_ability(recording_worker(&log)).unwrap();

    tick(&mut manager, 1);
    manager.resume_worker_ability(worker);
    manager.resume_worker_ability(worker);
    tick(&mut manager, 2);
    assert_eq!(manager.worker_ability_state(worker), WorkerState::Running);
    manager.pause_worker_ability(worker);
    tick(&mut manager, 2);
    assert_eq!(manager.worker_ability_state(worker), WorkerState::Paused);

    assert_eq!(
        log.events_for(worker),
        vec![
            Create, Update, Update, Resume, Update, Running, Update, Pause, Update, Paused,
        ]
    );
}

#[test]
fn apps_in_background() {
    let log = EventLog::new();
    let mut manager = AbilityManager::new();
    let plain = manager.create_ability(recording_app("plain", &log)).unwrap();
    let music = manager
        .create_ability(recording_background_app("music", &log))
        .unwrap();

    for app in [plain, music] {
        assert!(manager.open_app_ability(app));
    }
    tick(&mut manager, 2);
    for app in [plain, music] {
        assert!(manager.close_app_ability(app));
    }
    tick(&mut manager, 3);

    assert_eq!(log.count(plain, RunningBackground), 0);
    assert_eq!(log.count(music, RunningBackground), 2);
    assert_eq!(log.count(music, Running), 1);
    assert_eq!(log.count(music, Open), 1);
    assert_eq!(log.count(music, Close), 1);
    assert_eq!(manager.app_ability_state(plain), AppState::Closed);
    assert_eq!(manager.app_ability_info(music).name, "music");
}

#[test]
fn hooks_spawn_and_retire_abilities() {
    let log = EventLog::new();
    let mut manager = AbilityManager::new();
    let child_log = log.clone();
    let parent = manager
        .create_ability(Ability::base(
            RecordingHooks::new(&log)
                .spawn_on_create(move || {
                    Ability::worker(RecordingHooks::new(&child_log).destroy_self_after(2))
                })
                .destroy_self_after(3),
        ))
        .unwrap();

    tick(&mut manager, 1);
    let child = manager
        .ability(parent)
        .and_then(|a| a.hooks::<RecordingHooks>())
        .map(|h| h.spawned().to_vec())
        .unwrap();
    assert_eq!(child, vec![AbilityId::new(1)]);
    let child = child[0];
    assert_eq!(manager.lifecycle_state(child), Some(LifecycleState::GoCreate));
    assert!(log.events_for(child).is_empty());

    tick(&mut manager, 2);
    assert_eq!(manager.lifecycle_state(child), Some(LifecycleState::GoDestroy));
    assert_eq!(manager.lifecycle_state(parent), Some(LifecycleState::GoDestroy));

    tick(&mut manager, 1);
    assert_eq!(manager.ability_count(), 0);
    assert_eq!(log.events_for(child), vec![Create, Update, Update, Destroy]);
    assert_eq!(log.count(parent, Update), 3);
}

#[test]
fn wrappers_report_missing_and_mismatched_abilities() {
    let log = EventLog::new();
    let mut manager = AbilityManager::new();
    let ui = manager.create_ability(recording_ui(&log)).unwrap();
    let ghost = AbilityId::new(41);

    assert!(!manager.pause_worker_ability(ui));
    assert!(!manager.pause_worker_ability(ghost));
    assert_eq!(
        manager.try_pause_worker_ability(ui),
        Err(AbilityError::TypeMismatch {
            id: ui,
            expected: AbilityType::Worker,
            actual: AbilityType::Ui,
        })
    );
    assert_eq!(
        manager.try_pause_worker_ability(ghost),
        Err(AbilityError::NotFound(ghost))
    );
    assert!(log.is_empty());
}

#[test]
fn shutdown_runs_teardown_for_every_ability() {
    let log = EventLog::new();
    let mut manager = AbilityManager::new();
    let app = manager.create_ability(recording_app("notes", &log)).unwrap();
    manager.open_app_ability(app);
    tick(&mut manager, 1);
    let pending = manager.create_ability(recording_ui(&log)).unwrap();
    log.clear();

    assert_eq!(manager.shutdown(), 2);
    assert_eq!(log.events_for(app), vec![Close, Destroy]);
    assert_eq!(log.events_for(pending), vec![Destroy]);
    assert_eq!(manager.ability_count(), 0);
}

#[test]
fn deactivating_before_activation_fires_no_hook() {
    let log = EventLog::new();
    let mut manager = AbilityManager::new();
    let ui = manager.create_ability(recording_ui(&log)).unwrap();
    let worker = manager.create_ability(recording_worker(&log)).unwrap();
    let app = manager.create_ability(recording_app("notes", &log)).unwrap();

    assert!(manager.hide_ui_ability(ui));
    assert!(manager.pause_worker_ability(worker));
    assert!(manager.close_app_ability(app));
    tick(&mut manager, 1);
    manager.destroy_all();
    tick(&mut manager, 1);

    assert_eq!(log.events_for(ui), vec![Create, Update, Background, Destroy]);
    assert_eq!(log.events_for(worker), vec![Create, Update, Paused, Destroy]);
    assert_eq!(log.events_for(app), vec![Create, Update, Destroy]);
}
