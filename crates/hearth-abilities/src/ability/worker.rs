//! Worker abilities: background tasks that can be paused and resumed.

use std::any::Any;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::AbilityContext;

/// Run state of a worker ability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerState {
    /// Never resumed or paused.
    #[default]
    Null,
    /// Resume requested.
    GoResume,
    /// Running.
    Running,
    /// Pause requested.
    GoPause,
    /// Paused.
    Paused,
}

impl WorkerState {
    /// Whether `on_resume` has fired without a matching `on_pause`.
    #[must_use]
    pub fn is_running(self) -> bool {
        matches!(self, Self::Running | Self::GoPause)
    }

    fn request_resume(&mut self) {
        *self = match *self {
            Self::Null | Self::Paused => Self::GoResume,
            Self::GoPause => Self::Running,
            state @ (Self::GoResume | Self::Running) => state,
        };
    }

    fn request_pause(&mut self) {
        *self = match *self {
            Self::Running => Self::GoPause,
            Self::Null | Self::GoResume => Self::Paused,
            state @ (Self::GoPause | Self::Paused) => state,
        };
    }
}

/// Hooks of a worker ability.
pub trait WorkerHooks: Any {
    /// First tick after registration.
    fn on_create(&mut self, _ctx: &mut AbilityContext<'_>) {}

    /// Every tick, before the run state is advanced.
    fn on_update(&mut self, _ctx: &mut AbilityContext<'_>) {}

    /// The tick a resume request is carried out.
    fn on_resume(&mut self, _ctx: &mut AbilityContext<'_>) {}

    /// Every later tick while running.
    fn on_running(&mut self, _ctx: &mut AbilityContext<'_>) {}

    /// The tick a pause request is carried out, or teardown while running.
    fn on_pause(&mut self, _ctx: &mut AbilityContext<'_>) {}

    /// Every later tick while paused.
    fn on_paused(&mut self, _ctx: &mut AbilityContext<'_>) {}

    /// Teardown.
    fn on_destroy(&mut self, _ctx: &mut AbilityContext<'_>) {}
}

/// A background task driven by [`WorkerHooks`].
pub struct WorkerAbility {
    hooks: Box<dyn WorkerHooks>,
    state: WorkerState,
}

impl WorkerAbility {
    /// Wrap `hooks`, starting in [`WorkerState::Null`].
    pub fn new(hooks: impl WorkerHooks) -> Self {
        Self {
            hooks: Box::new(hooks),
            state: WorkerState::Null,
        }
    }

    /// Request the worker resume. Cancels a pending pause.
    pub fn resume(&mut self) {
        self.state.request_resume();
    }

    /// Request the worker pause. A worker that never ran is parked in
    /// [`WorkerState::Paused`] without `on_pause`.
    pub fn pause(&mut self) {
        self.state.request_pause();
    }

    /// Current run state.
    #[must_use]
    pub fn current_state(&self) -> WorkerState {
        self.state
    }

    pub(super) fn hooks_any(&self) -> &dyn Any {
        &*self.hooks
    }

    pub(super) fn hooks_any_mut(&mut self) -> &mut dyn Any {
        &mut *self.hooks
    }

    pub(super) fn create(&mut self, ctx: &mut AbilityContext<'_>) {
        self.hooks.on_create(ctx);
    }

    pub(super) fn update(&mut self, ctx: &mut AbilityContext<'_>) {
        self.hooks.on_update(ctx);

        match self.state {
            WorkerState::GoResume => {
                self.transition(ctx, WorkerState::Running);
                self.hooks.on_resume(ctx);
            },
            WorkerState::GoPause => {
                self.transition(ctx, WorkerState::Paused);
                self.hooks.on_pause(ctx);
            },
            WorkerState::Running => self.hooks.on_running(ctx),
            WorkerState::Paused => self.hooks.on_paused(ctx),
            WorkerState::Null => {},
        }
    }

    pub(super) fn destroy(&mut self, ctx: &mut AbilityContext<'_>) {
        if self.state.is_running() {
            self.transition(ctx, WorkerState::Paused);
            self.hooks.on_pause(ctx);
        }
        self.hooks.on_destroy(ctx);
    }

    fn transition(&mut self, ctx: &AbilityContext<'_>, to: WorkerState) {
        debug!(ability_id = %ctx.id(), from = ?self.state, to = ?to, "Worker state transition");
        self.state = to;
    }
}

impl fmt::Debug for WorkerAbility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerAbility")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
