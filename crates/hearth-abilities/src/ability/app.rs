//! App abilities: foreground applications with metadata and a database.
//!
//! An app is opened and closed like a UI screen, but also carries an
//! [`AppInfo`] record and, when the manager has a database attached, a
//! [`ScopedKvStore`] bound to the app's own namespace. App hooks receive an
//! [`AppContext`], which derefs to the ordinary [`AbilityContext`].

use std::any::Any;
use std::fmt;
use std::ops::{Deref, DerefMut};

use hearth_storage::ScopedKvStore;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::AbilityContext;

/// Descriptive metadata of an app.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppInfo {
    /// Display name, also used to name the app's database namespace.
    pub name: String,
    /// Icon resource identifier.
    pub icon: Option<String>,
    /// Whether `on_running_background` fires while the app is closed.
    pub allow_background_running: bool,
    /// Opaque host data.
    pub user_data: serde_json::Value,
}

impl AppInfo {
    /// Info with just a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the icon.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Allow or forbid background running.
    #[must_use]
    pub fn with_background_running(mut self, allow: bool) -> Self {
        self.allow_background_running = allow;
        self
    }

    /// Attach host data.
    #[must_use]
    pub fn with_user_data(mut self, user_data: serde_json::Value) -> Self {
        self.user_data = user_data;
        self
    }
}

/// Open state of an app ability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppState {
    /// Never opened or closed.
    #[default]
    Null,
    /// Open requested.
    GoOpen,
    /// In the foreground.
    Open,
    /// Close requested.
    GoClose,
    /// Closed.
    Closed,
}

impl AppState {
    /// Whether `on_open` has fired without a matching `on_close`.
    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open | Self::GoClose)
    }

    fn request_open(&mut self) {
        *self = match *self {
            Self::Null | Self::Closed => Self::GoOpen,
            Self::GoClose => Self::Open,
            state @ (Self::GoOpen | Self::Open) => state,
        };
    }

    fn request_close(&mut self) {
        *self = match *self {
            Self::Open => Self::GoClose,
            Self::Null | Self::GoOpen => Self::Closed,
            state @ (Self::GoClose | Self::Closed) => state,
        };
    }
}

/// Hooks of an app ability.
pub trait AppHooks: Any {
    /// First tick after registration.
    fn on_create(&mut self, _ctx: &mut AppContext<'_, '_>) {}

    /// Every tick, before the open state is advanced.
    fn on_update(&mut self, _ctx: &mut AppContext<'_, '_>) {}

    /// The tick an open request is carried out.
    fn on_open(&mut self, _ctx: &mut AppContext<'_, '_>) {}

    /// Every later tick while open.
    fn on_running(&mut self, _ctx: &mut AppContext<'_, '_>) {}

    /// The tick a close request is carried out, or teardown while open.
    fn on_close(&mut self, _ctx: &mut AppContext<'_, '_>) {}

    /// Every later tick while closed, if background running is allowed.
    fn on_running_background(&mut self, _ctx: &mut AppContext<'_, '_>) {}

    /// Teardown.
    fn on_destroy(&mut self, _ctx: &mut AppContext<'_, '_>) {}
}

/// What an app hook can reach: its own info, database and open state, plus
/// everything an [`AbilityContext`] offers.
pub struct AppContext<'c, 'a> {
    base: &'c mut AbilityContext<'a>,
    info: &'c AppInfo,
    database: Option<&'c ScopedKvStore>,
    state: &'c mut AppState,
}

impl AppContext<'_, '_> {
    /// The app's metadata.
    #[must_use]
    pub fn info(&self) -> &AppInfo {
        self.info
    }

    /// The app's database, if the manager attached one.
    #[must_use]
    pub fn database(&self) -> Option<&ScopedKvStore> {
        self.database
    }

    /// The app's open state as of this call.
    #[must_use]
    pub fn state(&self) -> AppState {
        *self.state
    }

    /// Ask for the app to close on the next tick.
    pub fn close(&mut self) {
        self.state.request_close();
    }
}

impl<'a> Deref for AppContext<'_, 'a> {
    type Target = AbilityContext<'a>;

    fn deref(&self) -> &Self::Target {
        &*self.base
    }
}

impl DerefMut for AppContext<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.base
    }
}

impl fmt::Debug for AppContext<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("id", &self.base.id())
            .field("name", &self.info.name)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy)]
enum AppHook {
    Create,
    Update,
    Open,
    Running,
    Close,
    RunningBackground,
    Destroy,
}

/// A foreground application driven by [`AppHooks`].
pub struct AppAbility {
    hooks: Box<dyn AppHooks>,
    info: AppInfo,
    database: Option<ScopedKvStore>,
    state: AppState,
}

impl AppAbility {
    /// Wrap `hooks`, starting in [`AppState::Null`] with no database.
    pub fn new(info: AppInfo, hooks: impl AppHooks) -> Self {
        Self {
            hooks: Box::new(hooks),
            info,
            database: None,
            state: AppState::Null,
        }
    }

    /// Use `database` instead of the one the manager would attach.
    #[must_use]
    pub fn with_database(mut self, database: ScopedKvStore) -> Self {
        self.database = Some(database);
        self
    }

    /// Request the app open.
    pub fn open(&mut self) {
        self.state.request_open();
    }

    /// Request the app close. An app that was never opened is closed
    /// without `on_close`.
    pub fn close(&mut self) {
        self.state.request_close();
    }

    /// Current open state.
    #[must_use]
    pub fn current_state(&self) -> AppState {
        self.state
    }

    /// The app's metadata.
    #[must_use]
    pub fn info(&self) -> &AppInfo {
        &self.info
    }

    /// The app's metadata, mutably.
    pub fn info_mut(&mut self) -> &mut AppInfo {
        &mut self.info
    }

    /// The app's database, if any.
    #[must_use]
    pub fn database(&self) -> Option<&ScopedKvStore> {
        self.database.as_ref()
    }

    /// Replace the app's database.
    pub fn set_database(&mut self, database: ScopedKvStore) {
        self.database = Some(database);
    }

    pub(super) fn hooks_any(&self) -> &dyn Any {
        &*self.hooks
    }

    pub(super) fn hooks_any_mut(&mut self) -> &mut dyn Any {
        &mut *self.hooks
    }

    pub(super) fn create(&mut self, ctx: &mut AbilityContext<'_>) {
        self.fire(ctx, AppHook::Create);
    }

    pub(super) fn update(&mut self, ctx: &mut AbilityContext<'_>) {
        self.fire(ctx, AppHook::Update);

        match self.state {
            AppState::GoOpen => {
                self.transition(ctx, AppState::Open);
                self.fire(ctx, AppHook::Open);
            },
            AppState::GoClose => {
                self.transition(ctx, AppState::Closed);
                self.fire(ctx, AppHook::Close);
            },
            AppState::Open => self.fire(ctx, AppHook::Running),
            AppState::Closed if self.info.allow_background_running => {
                self.fire(ctx, AppHook::RunningBackground);
            },
            AppState::Closed | AppState::Null => {},
        }
    }

    pub(super) fn destroy(&mut self, ctx: &mut AbilityContext<'_>) {
        if self.state.is_open() {
            self.transition(ctx, AppState::Closed);
            self.fire(ctx, AppHook::Close);
        }
        self.fire(ctx, AppHook::Destroy);
    }

    fn transition(&mut self, ctx: &AbilityContext<'_>, to: AppState) {
        debug!(
            ability_id = %ctx.id(),
            app = %self.info.name,
            from = ?self.state,
            to = ?to,
            "App state transition"
        );
        self.state = to;
    }

    fn fire(&mut self, ctx: &mut AbilityContext<'_>, hook: AppHook) {
        let Self {
            hooks,
            info,
            database,
            state,
        } = self;
        let mut app_ctx = AppContext {
            base: ctx,
            info,
            database: database.as_ref(),
            state,
        };
        match hook {
            AppHook::Create => hooks.on_create(&mut app_ctx),
            AppHook::Update => hooks.on_update(&mut app_ctx),
            AppHook::Open => hooks.on_open(&mut app_ctx),
            AppHook::Running => hooks.on_running(&mut app_ctx),
            AppHook::Close => hooks.on_close(&mut app_ctx),
            AppHook::RunningBackground => hooks.on_running_background(&mut app_ctx),
            AppHook::Destroy => hooks.on_destroy(&mut app_ctx),
        }
    }
}

impl fmt::Debug for AppAbility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppAbility")
            .field("info", &self.info)
            .field("database", &self.database)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Clock;
    impl AppHooks for Clock {}

    #[test]
    fn test_app_info_builder() {
        let info = AppInfo::new("clock")
            .with_icon("icons/clock.png")
            .with_background_running(true)
            .with_user_data(serde_json::json!({"tz": "UTC"}));

        assert_eq!(info.name, "clock");
        assert_eq!(info.icon.as_deref(), Some("icons/clock.png"));
        assert!(info.allow_background_running);
        assert_eq!(info.user_data["tz"], "UTC");
    }

    #[test]
    fn test_app_info_deserialize_fills_defaults() {
        let info: AppInfo = serde_json::from_str(r#"{"name":"notes"}"#).unwrap();
        assert_eq!(info, AppInfo::new("notes"));
        assert!(info.user_data.is_null());
    }

    #[test]
    fn test_requests_are_idempotent() {
        let mut app = AppAbility::new(AppInfo::new("clock"), Clock);
        app.open();
        app.open();
        assert_eq!(app.current_state(), AppState::GoOpen);

        app.state = AppState::Open;
        app.close();
        assert_eq!(app.current_state(), AppState::GoClose);
        app.close();
        assert_eq!(app.current_state(), AppState::GoClose);
        app.open();
        assert_eq!(app.current_state(), AppState::Open);
    }

    #[test]
    fn test_close_before_open_skips_hook() {
        let mut app = AppAbility::new(AppInfo::new("clock"), Clock);
        app.close();
        assert_eq!(app.current_state(), AppState::Closed);

        app.open();
        app.close();
        assert_eq!(app.current_state(), AppState::Closed);
    }

    #[test]
    fn test_open_states() {
        assert!(AppState::Open.is_open());
        assert!(AppState::GoClose.is_open());
        assert!(!AppState::GoOpen.is_open());
        assert!(!AppState::Closed.is_open());
    }
}
