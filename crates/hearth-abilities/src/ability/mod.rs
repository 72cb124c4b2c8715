//! The ability model.
//!
//! An [`Ability`] is one of four variants. Each variant owns a user-supplied
//! hooks object and, for UI, worker and app abilities, a small sub-state
//! machine advanced by the manager's tick:
//!
//! | Variant | Hooks | Sub-state |
//! |---------|-------|-----------|
//! | [`Ability::Base`] | [`AbilityHooks`] | none |
//! | [`Ability::Ui`] | [`UiHooks`] | [`UiState`] |
//! | [`Ability::Worker`] | [`WorkerHooks`] | [`WorkerState`] |
//! | [`Ability::App`] | [`AppHooks`] | [`AppState`] |
//!
//! `on_create` fires at most once and `on_destroy` exactly once per ability,
//! with at least one `on_update` in between when both fire. An ability
//! destroyed before its first tick only sees `on_destroy`. Hooks are only
//! ever called by the manager.

mod app;
mod ui;
mod worker;

use std::any::Any;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use app::{AppAbility, AppContext, AppHooks, AppInfo, AppState};
pub use ui::{UiAbility, UiHooks, UiState};
pub use worker::{WorkerAbility, WorkerHooks, WorkerState};

use crate::context::AbilityContext;

/// The variant of an ability, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbilityType {
    /// Plain lifecycle-only ability.
    Base,
    /// Screen that can be shown and hidden.
    Ui,
    /// Background task that can be paused and resumed.
    Worker,
    /// Foreground application that can be opened and closed.
    App,
}

impl fmt::Display for AbilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Base => "base",
            Self::Ui => "ui",
            Self::Worker => "worker",
            Self::App => "app",
        };
        f.write_str(name)
    }
}

/// Lifecycle hooks of a base ability.
pub trait AbilityHooks: Any {
    /// First tick after registration.
    fn on_create(&mut self, _ctx: &mut AbilityContext<'_>) {}

    /// Every tick while the ability is alive, including the creation tick.
    fn on_update(&mut self, _ctx: &mut AbilityContext<'_>) {}

    /// Tick that observes the destroy request.
    fn on_destroy(&mut self, _ctx: &mut AbilityContext<'_>) {}
}

/// A base ability: nothing but the three lifecycle hooks.
pub struct BaseAbility {
    hooks: Box<dyn AbilityHooks>,
}

impl BaseAbility {
    /// Wrap `hooks`.
    pub fn new(hooks: impl AbilityHooks) -> Self {
        Self {
            hooks: Box::new(hooks),
        }
    }

    fn hooks_any(&self) -> &dyn Any {
        &*self.hooks
    }

    fn hooks_any_mut(&mut self) -> &mut dyn Any {
        &mut *self.hooks
    }
}

impl fmt::Debug for BaseAbility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseAbility").finish_non_exhaustive()
    }
}

/// An ability owned by the manager.
#[derive(Debug)]
pub enum Ability {
    /// Lifecycle-only ability.
    Base(BaseAbility),
    /// UI ability.
    Ui(UiAbility),
    /// Worker ability.
    Worker(WorkerAbility),
    /// App ability.
    App(AppAbility),
}

impl Ability {
    /// A base ability driven by `hooks`.
    pub fn base(hooks: impl AbilityHooks) -> Self {
        Self::Base(BaseAbility::new(hooks))
    }

    /// A UI ability driven by `hooks`, initially in [`UiState::Null`].
    pub fn ui(hooks: impl UiHooks) -> Self {
        Self::Ui(UiAbility::new(hooks))
    }

    /// A worker ability driven by `hooks`, initially in
    /// [`WorkerState::Null`].
    pub fn worker(hooks: impl WorkerHooks) -> Self {
        Self::Worker(WorkerAbility::new(hooks))
    }

    /// An app ability described by `info` and driven by `hooks`.
    pub fn app(info: AppInfo, hooks: impl AppHooks) -> Self {
        Self::App(AppAbility::new(info, hooks))
    }

    /// The variant of this ability.
    #[must_use]
    pub fn ability_type(&self) -> AbilityType {
        match self {
            Self::Base(_) => AbilityType::Base,
            Self::Ui(_) => AbilityType::Ui,
            Self::Worker(_) => AbilityType::Worker,
            Self::App(_) => AbilityType::App,
        }
    }

    /// The UI ability, if this is one.
    #[must_use]
    pub fn as_ui(&self) -> Option<&UiAbility> {
        match self {
            Self::Ui(ui) => Some(ui),
            _ => None,
        }
    }

    /// The UI ability, mutably, if this is one.
    pub fn as_ui_mut(&mut self) -> Option<&mut UiAbility> {
        match self {
            Self::Ui(ui) => Some(ui),
            _ => None,
        }
    }

    /// The worker ability, if this is one.
    #[must_use]
    pub fn as_worker(&self) -> Option<&WorkerAbility> {
        match self {
            Self::Worker(worker) => Some(worker),
            _ => None,
        }
    }

    /// The worker ability, mutably, if this is one.
    pub fn as_worker_mut(&mut self) -> Option<&mut WorkerAbility> {
        match self {
            Self::Worker(worker) => Some(worker),
            _ => None,
        }
    }

    /// The app ability, if this is one.
    #[must_use]
    pub fn as_app(&self) -> Option<&AppAbility> {
        match self {
            Self::App(app) => Some(app),
            _ => None,
        }
    }

    /// The app ability, mutably, if this is one.
    pub fn as_app_mut(&mut self) -> Option<&mut AppAbility> {
        match self {
            Self::App(app) => Some(app),
            _ => None,
        }
    }

    /// The hooks object, if it is a `T`.
    #[must_use]
    pub fn hooks<T: Any>(&self) -> Option<&T> {
        let hooks = match self {
            Self::Base(base) => base.hooks_any(),
            Self::Ui(ui) => ui.hooks_any(),
            Self::Worker(worker) => worker.hooks_any(),
            Self::App(app) => app.hooks_any(),
        };
        hooks.downcast_ref()
    }

    /// The hooks object, mutably, if it is a `T`.
    pub fn hooks_mut<T: Any>(&mut self) -> Option<&mut T> {
        let hooks = match self {
            Self::Base(base) => base.hooks_any_mut(),
            Self::Ui(ui) => ui.hooks_any_mut(),
            Self::Worker(worker) => worker.hooks_any_mut(),
            Self::App(app) => app.hooks_any_mut(),
        };
        hooks.downcast_mut()
    }

    pub(crate) fn base_create(&mut self, ctx: &mut AbilityContext<'_>) {
        match self {
            Self::Base(base) => base.hooks.on_create(ctx),
            Self::Ui(ui) => ui.create(ctx),
            Self::Worker(worker) => worker.create(ctx),
            Self::App(app) => app.create(ctx),
        }
    }

    pub(crate) fn base_update(&mut self, ctx: &mut AbilityContext<'_>) {
        match self {
            Self::Base(base) => base.hooks.on_update(ctx),
            Self::Ui(ui) => ui.update(ctx),
            Self::Worker(worker) => worker.update(ctx),
            Self::App(app) => app.update(ctx),
        }
    }

    pub(crate) fn base_destroy(&mut self, ctx: &mut AbilityContext<'_>) {
        match self {
            Self::Base(base) => base.hooks.on_destroy(ctx),
            Self::Ui(ui) => ui.destroy(ctx),
            Self::Worker(worker) => worker.destroy(ctx),
            Self::App(app) => app.destroy(ctx),
        }
    }
}

impl From<BaseAbility> for Ability {
    fn from(base: BaseAbility) -> Self {
        Self::Base(base)
    }
}

impl From<UiAbility> for Ability {
    fn from(ui: UiAbility) -> Self {
        Self::Ui(ui)
    }
}

impl From<WorkerAbility> for Ability {
    fn from(worker: WorkerAbility) -> Self {
        Self::Worker(worker)
    }
}

impl From<AppAbility> for Ability {
    fn from(app: AppAbility) -> Self {
        Self::App(app)
    }
}
