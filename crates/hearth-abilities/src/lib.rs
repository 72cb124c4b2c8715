//! Hearth Abilities - the ability model and lifecycle manager.
//!
//! An [`AbilityManager`] owns a set of [`Ability`] values (plain, UI, worker
//! or app), gives each a stable [`AbilityId`], and advances every one of them
//! once per [`update_abilities`](AbilityManager::update_abilities) call.
//! Hosts hold ids, never abilities; everything variant-specific goes through
//! the manager's wrappers or a borrow-scoped [`AbilityManager::ability`] view.
//!
//! # Example
//!
//! ```rust
//! use hearth_abilities::{Ability, AbilityManager, UiHooks, UiState};
//!
//! struct Home;
//! impl UiHooks for Home {}
//!
//! # fn main() -> Result<(), hearth_abilities::AbilityError> {
//! let mut manager = AbilityManager::new();
//! let home = manager.create_ability(Ability::ui(Home))?;
//!
//! manager.show_ui_ability(home);
//! manager.update_abilities();
//! assert_eq!(manager.ui_ability_state(home), UiState::Shown);
//!
//! manager.destroy_ability(home);
//! manager.update_abilities();
//! assert!(!manager.is_ability_exist(home));
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod ability;
pub mod config_bridge;
mod context;
pub mod error;
mod id;
pub mod manager;

pub use ability::{
    Ability, AbilityHooks, AbilityType, AppAbility, AppContext, AppHooks, AppInfo, AppState,
    BaseAbility, UiAbility, UiHooks, UiState, WorkerAbility, WorkerHooks, WorkerState,
};
pub use context::AbilityContext;
pub use error::{AbilityError, AbilityResult};
pub use id::{AbilityId, IdPool};
pub use manager::{AbilityManager, LifecycleState, ManagerConfig, TickReport};
