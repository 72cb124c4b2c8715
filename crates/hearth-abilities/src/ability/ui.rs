//! UI abilities: screens that are shown and hidden.

use std::any::Any;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::AbilityContext;

/// Visibility of a UI ability.
///
/// `GoShow` and `GoHide` are pending requests, carried out on the next tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiState {
    /// Never shown or hidden.
    #[default]
    Null,
    /// Show requested.
    GoShow,
    /// On screen.
    Shown,
    /// Hide requested.
    GoHide,
    /// Off screen.
    Hidden,
}

impl UiState {
    /// Whether `on_show` has fired without a matching `on_hide`.
    #[must_use]
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Shown | Self::GoHide)
    }

    fn request_show(&mut self) {
        *self = match *self {
            Self::Null | Self::Hidden => Self::GoShow,
            Self::GoHide => Self::Shown,
            state @ (Self::GoShow | Self::Shown) => state,
        };
    }

    fn request_hide(&mut self) {
        *self = match *self {
            Self::Shown => Self::GoHide,
            Self::Null | Self::GoShow => Self::Hidden,
            state @ (Self::GoHide | Self::Hidden) => state,
        };
    }
}

/// Hooks of a UI ability.
pub trait UiHooks: Any {
    /// First tick after registration.
    fn on_create(&mut self, _ctx: &mut AbilityContext<'_>) {}

    /// Every tick, before the visibility state is advanced.
    fn on_update(&mut self, _ctx: &mut AbilityContext<'_>) {}

    /// The tick a show request is carried out.
    fn on_show(&mut self, _ctx: &mut AbilityContext<'_>) {}

    /// Every later tick while shown.
    fn on_foreground(&mut self, _ctx: &mut AbilityContext<'_>) {}

    /// The tick a hide request is carried out, or teardown while visible.
    fn on_hide(&mut self, _ctx: &mut AbilityContext<'_>) {}

    /// Every later tick while hidden.
    fn on_background(&mut self, _ctx: &mut AbilityContext<'_>) {}

    /// Teardown.
    fn on_destroy(&mut self, _ctx: &mut AbilityContext<'_>) {}
}

/// A screen driven by [`UiHooks`].
pub struct UiAbility {
    hooks: Box<dyn UiHooks>,
    state: UiState,
}

impl UiAbility {
    /// Wrap `hooks`, starting in [`UiState::Null`].
    pub fn new(hooks: impl UiHooks) -> Self {
        Self {
            hooks: Box::new(hooks),
            state: UiState::Null,
        }
    }

    /// Request the screen be shown. No-op if shown or already requested.
    /// A pending hide is cancelled instead.
    pub fn show(&mut self) {
        self.state.request_show();
    }

    /// Request the screen be hidden. No-op if hidden or already requested.
    ///
    /// A screen that was never shown goes straight to [`UiState::Hidden`]
    /// without `on_hide`, so `on_hide` only ever follows `on_show`.
    pub fn hide(&mut self) {
        self.state.request_hide();
    }

    /// Current visibility.
    #[must_use]
    pub fn current_state(&self) -> UiState {
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
            UiState::GoShow => {
                self.transition(ctx, UiState::Shown);
                self.hooks.on_show(ctx);
            },
            UiState::GoHide => {
                self.transition(ctx, UiState::Hidden);
                self.hooks.on_hide(ctx);
            },
            UiState::Shown => self.hooks.on_foreground(ctx),
            UiState::Hidden => self.hooks.on_background(ctx),
            UiState::Null => {},
        }
    }

    pub(super) fn destroy(&mut self, ctx: &mut AbilityContext<'_>) {
        if self.state.is_visible() {
            self.transition(ctx, UiState::Hidden);
            self.hooks.on_hide(ctx);
        }
        self.hooks.on_destroy(ctx);
    }

    fn transition(&mut self, ctx: &AbilityContext<'_>, to: UiState) {
        debug!(ability_id = %ctx.id(), from = ?self.state, to = ?to, "UI state transition");
        self.state = to;
    }
}

impl fmt::Debug for UiAbility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiAbility")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_are_idempotent() {
        struct Screen;
        impl UiHooks for Screen {}

        let mut ui = UiAbility::new(Screen);
        assert_eq!(ui.current_state(), UiState::Null);

        ui.show();
        ui.show();
        assert_eq!(ui.current_state(), UiState::GoShow);

        ui.state = UiState::Shown;
        ui.show();
        assert_eq!(ui.current_state(), UiState::Shown);

        ui.hide();
        assert_eq!(ui.current_state(), UiState::GoHide);
        ui.show();
        assert_eq!(ui.current_state(), UiState::Shown);
    }

    #[test]
    fn test_hide_before_show_skips_hook() {
        struct Screen;
        impl UiHooks for Screen {}

        let mut ui = UiAbility::new(Screen);
        ui.hide();
        assert_eq!(ui.current_state(), UiState::Hidden);

        ui.show();
        assert_eq!(ui.current_state(), UiState::GoShow);
        ui.hide();
        assert_eq!(ui.current_state(), UiState::Hidden);
        assert!(!ui.current_state().is_visible());
    }

    #[test]
    fn test_visibility() {
        assert!(UiState::Shown.is_visible());
        assert!(UiState::GoHide.is_visible());
        assert!(!UiState::GoShow.is_visible());
        assert!(!UiState::Null.is_visible());
    }
}
