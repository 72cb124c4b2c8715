//! Ability identifiers and their allocation pool.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AbilityError, AbilityResult};

/// Identifier of a registered ability.
///
/// Unique among live abilities. An id is handed out again only after the
/// ability that held it has been destroyed and erased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbilityId(u32);

impl AbilityId {
    /// Wrap a raw id.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw numeric id.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for AbilityId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for AbilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out ability ids.
///
/// Recycled ids are reused oldest first. Fresh ids come from a counter
/// starting at zero which never wraps; once it passes `u32::MAX` only
/// recycled ids remain available.
#[derive(Debug, Clone)]
pub struct IdPool {
    next: Option<u32>,
    recycled: VecDeque<AbilityId>,
}

impl Default for IdPool {
    fn default() -> Self {
        Self::new()
    }
}

impl IdPool {
    /// Create an empty pool whose first fresh id is `0`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next: Some(0),
            recycled: VecDeque::new(),
        }
    }

    /// Create a pool whose first fresh id is `first`.
    #[must_use]
    pub fn starting_at(first: u32) -> Self {
        Self {
            next: Some(first),
            recycled: VecDeque::new(),
        }
    }

    /// Take the next id.
    ///
    /// # Errors
    ///
    /// Returns [`AbilityError::IdsExhausted`] when the counter is spent and
    /// no id is waiting to be recycled.
    pub fn allocate(&mut self) -> AbilityResult<AbilityId> {
        if let Some(id) = self.recycled.pop_front() {
            return Ok(id);
        }
        let raw = self.next.ok_or(AbilityError::IdsExhausted)?;
        self.next = raw.checked_add(1);
        Ok(AbilityId(raw))
    }

    /// Return an id whose record has been erased.
    pub fn release(&mut self, id: AbilityId) {
        self.recycled.push_back(id);
    }

    /// Ids waiting to be reused, oldest first.
    pub fn recycled(&self) -> impl Iterator<Item = AbilityId> + '_ {
        self.recycled.iter().copied()
    }

    /// Number of ids waiting to be reused.
    #[must_use]
    pub fn recycled_len(&self) -> usize {
        self.recycled.len()
    }
}
