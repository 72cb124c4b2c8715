//! Per-ability bookkeeping.

use serde::{Deserialize, Serialize};

use crate::ability::Ability;
use crate::id::AbilityId;

/// Manager-level lifecycle of a registered ability, independent of any
/// variant sub-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// Registered, waiting for its first tick.
    GoCreate,
    /// Created and updated every tick.
    Updating,
    /// Destroy requested; erased on the next tick.
    GoDestroy,
}

#[derive(Debug)]
pub(crate) struct AbilityRecord {
    pub(crate) id: AbilityId,
    pub(crate) lifecycle: LifecycleState,
    pub(crate) ability: Ability,
}

impl AbilityRecord {
    pub(crate) fn new(id: AbilityId, ability: Ability) -> Self {
        Self {
            id,
            lifecycle: LifecycleState::GoCreate,
            ability,
        }
    }
}
