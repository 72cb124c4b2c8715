//! The handle every lifecycle hook receives.
//!
//! Hooks never see the manager itself. Anything a hook asks for through an
//! [`AbilityContext`] is queued and applied once the current tick's pass over
//! the ability table has finished.

use tracing::debug;

use crate::ability::Ability;
use crate::error::{AbilityError, AbilityResult};
use crate::id::{AbilityId, IdPool};

/// Reject a registration once `occupied` slots fill a configured `limit`.
pub(crate) fn check_capacity(limit: Option<usize>, occupied: usize) -> AbilityResult<()> {
    match limit {
        Some(limit) if occupied >= limit => Err(AbilityError::CapacityExceeded { limit }),
        _ => Ok(()),
    }
}

/// Mutations requested by hooks during a pass.
#[derive(Default)]
pub(crate) struct Deferred {
    pub(crate) creates: Vec<(AbilityId, Ability)>,
    pub(crate) destroys: Vec<AbilityId>,
}

/// Per-hook access to the ability manager.
pub struct AbilityContext<'a> {
    id: AbilityId,
    ids: &'a mut IdPool,
    deferred: &'a mut Deferred,
    occupied: usize,
    limit: Option<usize>,
}

impl<'a> AbilityContext<'a> {
    pub(crate) fn new(
        id: AbilityId,
        ids: &'a mut IdPool,
        deferred: &'a mut Deferred,
        occupied: usize,
        limit: Option<usize>,
    ) -> Self {
        Self {
            id,
            ids,
            deferred,
            occupied,
            limit,
        }
    }

    /// Id of the ability whose hook is running.
    #[must_use]
    pub fn id(&self) -> AbilityId {
        self.id
    }

    /// Register another ability.
    ///
    /// The id is reserved immediately. The ability joins the table after the
    /// current pass and receives its first tick on the next
    /// `update_abilities` call.
    ///
    /// # Errors
    ///
    /// Returns [`AbilityError::CapacityExceeded`] if the manager's limit is
    /// already taken up, counting other requests from this tick, or
    /// [`AbilityError::IdsExhausted`] if no id is left.
    pub fn create_ability(&mut self, ability: impl Into<Ability>) -> AbilityResult<AbilityId> {
        let ability = ability.into();
        check_capacity(
            self.limit,
            self.occupied.saturating_add(self.deferred.creates.len()),
        )?;
        let id = self.ids.allocate()?;
        debug!(
            parent_id = %self.id,
            ability_id = %id,
            ability_type = %ability.ability_type(),
            "Queued ability creation"
        );
        self.deferred.creates.push((id, ability));
        Ok(id)
    }

    /// Ask for `id` to be destroyed.
    ///
    /// Unknown ids are ignored when the queue is applied.
    pub fn destroy_ability(&mut self, id: AbilityId) {
        debug!(parent_id = %self.id, ability_id = %id, "Queued ability destruction");
        self.deferred.destroys.push(id);
    }

    /// Ask for the calling ability to be destroyed.
    pub fn destroy_self(&mut self) {
        let id = self.id;
        self.destroy_ability(id);
    }
}

impl std::fmt::Debug for AbilityContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbilityContext")
            .field("id", &self.id)
            .field("queued_creates", &self.deferred.creates.len())
            .field("queued_destroys", &self.deferred.destroys.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{Ability, AbilityHooks};

    struct Noop;
    impl AbilityHooks for Noop {}

    #[test]
    fn test_check_capacity() {
        assert!(check_capacity(None, usize::MAX).is_ok());
        assert!(check_capacity(Some(2), 1).is_ok());
        assert_eq!(
            check_capacity(Some(2), 2),
            Err(AbilityError::CapacityExceeded { limit: 2 })
        );
    }

    #[test]
    fn test_create_reserves_id_and_queues() {
        let mut ids = IdPool::new();
        let mut deferred = Deferred::default();
        let mut ctx = AbilityContext::new(AbilityId::new(9), &mut ids, &mut deferred, 0, None);

        let a = ctx.create_ability(Ability::base(Noop)).unwrap();
        let b = ctx.create_ability(Ability::base(Noop)).unwrap();
        ctx.destroy_self();

        assert_eq!((a.get(), b.get()), (0, 1));
        assert_eq!(deferred.creates.len(), 2);
        assert_eq!(deferred.destroys, vec![AbilityId::new(9)]);
    }

    #[test]
    fn test_create_counts_queued_requests_against_limit() {
        let mut ids = IdPool::new();
        let mut deferred = Deferred::default();
        let mut ctx = AbilityContext::new(AbilityId::new(0), &mut ids, &mut deferred, 1, Some(2));

        assert!(ctx.create_ability(Ability::base(Noop)).is_ok());
        assert_eq!(
            ctx.create_ability(Ability::base(Noop)),
            Err(AbilityError::CapacityExceeded { limit: 2 })
        );
        assert_eq!(ids.recycled_len(), 0);
    }
}
