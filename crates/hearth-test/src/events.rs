//! Shared log of lifecycle hook calls.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use hearth_abilities::AbilityId;
use serde::{Deserialize, Serialize};

/// A lifecycle hook that fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleEvent {
    /// `on_create`.
    Create,
    /// `on_update`.
    Update,
    /// `on_destroy`.
    Destroy,
    /// UI `on_show`.
    Show,
    /// UI `on_foreground`.
    Foreground,
    /// UI `on_hide`.
    Hide,
    /// UI `on_background`.
    Background,
    /// Worker `on_resume`.
    Resume,
    /// Worker or app `on_running`.
    Running,
    /// Worker `on_pause`.
    Pause,
    /// Worker `on_paused`.
    Paused,
    /// App `on_open`.
    Open,
    /// App `on_close`.
    Close,
    /// App `on_running_background`.
    RunningBackground,
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Destroy => "destroy",
            Self::Show => "show",
            Self::Foreground => "foreground",
            Self::Hide => "hide",
            Self::Background => "background",
            Self::Resume => "resume",
            Self::Running => "running",
            Self::Pause => "pause",
            Self::Paused => "paused",
            Self::Open => "open",
            Self::Close => "close",
            Self::RunningBackground => "running_background",
        };
        f.write_str(name)
    }
}

/// Ordered record of `(ability, event)` pairs, shared between the test and
/// any number of recording hooks. Cloning shares the same log.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<(AbilityId, LifecycleEvent)>>>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn record(&self, id: AbilityId, event: LifecycleEvent) {
        self.events.borrow_mut().push((id, event));
    }

    /// Every event so far, in order.
    #[must_use]
    pub fn events(&self) -> Vec<(AbilityId, LifecycleEvent)> {
        self.events.borrow().clone()
    }

    /// Events of one ability, in order.
    #[must_use]
    pub fn events_for(&self, id: AbilityId) -> Vec<LifecycleEvent> {
        self.events
            .borrow()
            .iter()
            .filter(|(who, _)| *who == id)
            .map(|(_, event)| *event)
            .collect()
    }

    /// How many times `event` fired for `id`.
    #[must_use]
    pub fn count(&self, id: AbilityId, event: LifecycleEvent) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|entry| **entry == (id, event))
            .count()
    }

    /// Remove and return every event so far.
    pub fn take(&self) -> Vec<(AbilityId, LifecycleEvent)> {
        self.events.borrow_mut().drain(..).collect()
    }

    /// Forget every event.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// Number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}
