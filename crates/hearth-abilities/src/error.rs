//! Ability manager error types.

use crate::ability::AbilityType;
use crate::id::AbilityId;

/// Errors from ability manager operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AbilityError {
    /// No live ability has this id.
    #[error("ability not found: {0}")]
    NotFound(AbilityId),

    /// The ability exists but is of a different variant.
    #[error("ability {id} is a {actual} ability, expected {expected}")]
    TypeMismatch {
        /// The ability that was addressed.
        id: AbilityId,
        /// The variant the operation needs.
        expected: AbilityType,
        /// The variant the ability actually is.
        actual: AbilityType,
    },

    /// The configured ability limit has been reached.
    #[error("ability limit reached: at most {limit} abilities may be registered")]
    CapacityExceeded {
        /// The configured limit.
        limit: usize,
    },

    /// Every id has been handed out and none is waiting to be recycled.
    #[error("ability id space exhausted")]
    IdsExhausted,
}

/// Result type for ability manager operations.
pub type AbilityResult<T> = Result<T, AbilityError>;
