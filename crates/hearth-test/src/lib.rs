//! Hearth Test - Shared test utilities for the Hearth ability runtime.
//!
//! Recording hooks, lifecycle event logs and fixtures for use as a
//! dev-dependency.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! hearth-test.workspace = true
//! ```
//!
//! ```rust
//! use hearth_abilities::{AbilityManager, UiState};
//! use hearth_test::{EventLog, LifecycleEvent, recording_ui};
//!
//! let log = EventLog::new();
//! let mut manager = AbilityManager::new();
//! let id = manager.create_ability(recording_ui(&log)).unwrap();
//!
//! manager.show_ui_ability(id);
//! manager.update_abilities();
//!
//! assert_eq!(manager.ui_ability_state(id), UiState::Shown);
//! assert_eq!(
//!     log.events_for(id),
//!     vec![LifecycleEvent::Create, LifecycleEvent::Update, LifecycleEvent::Show]
//! );
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod events;
pub mod fixtures;
pub mod harness;
pub mod recorder;

pub use events::*;
pub use fixtures::*;
pub use harness::*;
pub use recorder::*;
