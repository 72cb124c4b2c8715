//! The ability manager.
//!
//! Owns every registered ability, hands out ids, and drives the lifecycle
//! once per [`AbilityManager::update_abilities`] call:
//!
//! ```text
//! create_ability ──► GoCreate ──tick──► on_create, on_update ──► Updating
//!                                                                   │
//!                        every tick: on_update ◄────────────────────┤
//!                                                                   │
//! destroy_ability ─────────────────────────────────────────► GoDestroy
//!                                                                   │
//!                              next tick: on_destroy, erase, recycle id
//! ```
//!
//! Records are kept in registration order and visited in that order.
//! Creations and destructions requested by hooks during a tick are applied
//! after the pass; ids freed by the tick are recycled only after that.

mod record;

use std::fmt;
use std::sync::Arc;

use hearth_storage::{KvStore, ScopedKvStore};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

pub use record::LifecycleState;

use crate::ability::{
    Ability, AbilityType, AppAbility, AppInfo, AppState, UiAbility, UiState, WorkerAbility,
    WorkerState,
};
use crate::context::{AbilityContext, Deferred, check_capacity};
use crate::error::{AbilityError, AbilityResult};
use crate::id::{AbilityId, IdPool};
use record::AbilityRecord;

/// Ability manager settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerConfig {
    /// Most abilities that may be registered at once. `None` is unlimited.
    pub max_abilities: Option<usize>,
    /// Give app abilities a database when the manager has one.
    pub attach_app_database: bool,
    /// Prefix of app database namespaces (`{prefix}:{app name}`).
    pub app_namespace_prefix: String,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            max_abilities: None,
            attach_app_database: true,
            app_namespace_prefix: "app".to_owned(),
        }
    }
}

/// What one tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// Abilities whose `on_create` fired.
    pub created: usize,
    /// Abilities whose update ran.
    pub updated: usize,
    /// Records erased.
    pub destroyed: usize,
}

/// Owns abilities and drives their lifecycle.
pub struct AbilityManager {
    records: Vec<AbilityRecord>,
    ids: IdPool,
    config: ManagerConfig,
    database: Option<Arc<dyn KvStore>>,
}

impl Default for AbilityManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AbilityManager {
    /// Create an empty manager with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ManagerConfig::default())
    }

    /// Create an empty manager.
    #[must_use]
    pub fn with_config(config: ManagerConfig) -> Self {
        Self {
            records: Vec::new(),
            ids: IdPool::new(),
            config,
            database: None,
        }
    }

    /// Attach a database that app abilities get scoped views of.
    #[must_use]
    pub fn with_database(mut self, store: Arc<dyn KvStore>) -> Self {
        self.database = Some(store);
        self
    }

    /// Attach or replace the database. Apps registered earlier keep theirs.
    pub fn set_database(&mut self, store: Arc<dyn KvStore>) {
        self.database = Some(store);
    }

    /// Current settings.
    #[must_use]
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Register an ability. It is created on the next tick.
    ///
    /// # Errors
    ///
    /// Returns [`AbilityError::CapacityExceeded`] if `max_abilities` records
    /// already exist, or [`AbilityError::IdsExhausted`] if no id is left.
    /// Nothing is registered on error.
    pub fn create_ability(&mut self, ability: impl Into<Ability>) -> AbilityResult<AbilityId> {
        check_capacity(self.config.max_abilities, self.records.len())?;
        let id = self.ids.allocate()?;
        self.admit(id, ability.into());
        Ok(id)
    }

    /// Mark an ability for destruction on the next tick.
    ///
    /// Returns `false` if no live ability has this id. Marking the same
    /// ability twice is harmless.
    pub fn destroy_ability(&mut self, id: AbilityId) -> bool {
        let Some(record) = self.record_mut(id) else {
            return false;
        };
        if record.lifecycle != LifecycleState::GoDestroy {
            debug!(ability_id = %id, from = ?record.lifecycle, "Ability marked for destruction");
            record.lifecycle = LifecycleState::GoDestroy;
        }
        true
    }

    /// Mark every ability for destruction. Returns how many were newly
    /// marked.
    pub fn destroy_all(&mut self) -> usize {
        let mut marked = 0_usize;
        for record in &mut self.records {
            if record.lifecycle != LifecycleState::GoDestroy {
                record.lifecycle = LifecycleState::GoDestroy;
                marked = marked.saturating_add(1);
            }
        }
        debug!(count = marked, "All abilities marked for destruction");
        marked
    }

    /// Run one tick.
    ///
    /// Every record is visited once, in registration order:
    /// - `GoCreate`: `on_create`, then `on_update`, now `Updating`;
    /// - `Updating`: `on_update`;
    /// - `GoDestroy`: `on_destroy`, then erased.
    ///
    /// Hook requests are applied afterwards, then the erased ids are
    /// returned to the pool.
    pub fn update_abilities(&mut self) -> TickReport {
        let mut report = TickReport::default();
        let mut deferred = Deferred::default();
        let mut erased = Vec::new();
        let occupied = self.records.len();
        let limit = self.config.max_abilities;
        let Self { records, ids, .. } = self;

        records.retain_mut(|record| {
            let mut ctx = AbilityContext::new(record.id, ids, &mut deferred, occupied, limit);
            match record.lifecycle {
                LifecycleState::GoCreate => {
                    record.ability.base_create(&mut ctx);
                    record.lifecycle = LifecycleState::Updating;
                    report.created = report.created.saturating_add(1);
                    record.ability.base_update(&mut ctx);
                    report.updated = report.updated.saturating_add(1);
                    true
                },
                LifecycleState::Updating => {
                    record.ability.base_update(&mut ctx);
                    report.updated = report.updated.saturating_add(1);
                    true
                },
                LifecycleState::GoDestroy => {
                    record.ability.base_destroy(&mut ctx);
                    info!(
                        ability_id = %record.id,
                        ability_type = %record.ability.ability_type(),
                        "Destroyed ability"
                    );
                    erased.push(record.id);
                    false
                },
            }
        });

        self.apply_deferred(deferred);
        report.destroyed = erased.len();
        for id in erased {
            self.ids.release(id);
        }

        trace!(
            created = report.created,
            updated = report.updated,
            destroyed = report.destroyed,
            live = self.records.len(),
            "Tick complete"
        );
        report
    }

    /// Tear everything down now.
    ///
    /// Every ability gets its deactivation hook and `on_destroy`, in
    /// registration order, including abilities still waiting for their first
    /// tick. Hooks cannot register new abilities
    /// during shutdown and their destroy requests are ignored. All ids are
    /// recycled. Returns the number of records erased.
    pub fn shutdown(&mut self) -> usize {
        let records = std::mem::take(&mut self.records);
        let count = records.len();
        let mut deferred = Deferred::default();

        for mut record in records {
            let mut ctx = AbilityContext::new(record.id, &mut self.ids, &mut deferred, 0, Some(0));
            record.ability.base_destroy(&mut ctx);
            self.ids.release(record.id);
        }

        info!(count, "Ability manager shut down");
        count
    }

    fn admit(&mut self, id: AbilityId, mut ability: Ability) {
        self.attach_database(&mut ability);
        info!(
            ability_id = %id,
            ability_type = %ability.ability_type(),
            "Registered ability"
        );
        self.records.push(AbilityRecord::new(id, ability));
    }

    fn attach_database(&self, ability: &mut Ability) {
        if !self.config.attach_app_database {
            return;
        }
        let (Some(store), Some(app)) = (&self.database, ability.as_app_mut()) else {
            return;
        };
        if app.database().is_some() {
            return;
        }

        let namespace = format!("{}:{}", self.config.app_namespace_prefix, app.info().name);
        match ScopedKvStore::new(Arc::clone(store), namespace) {
            Ok(db) => {
                debug!(app = %app.info().name, namespace = db.namespace(), "Attached app database");
                app.set_database(db);
            },
            Err(e) => {
                warn!(app = %app.info().name, error = %e, "Could not attach app database");
            },
        }
    }

    fn apply_deferred(&mut self, deferred: Deferred) {
        for (id, ability) in deferred.creates {
            self.admit(id, ability);
        }
        for id in deferred.destroys {
            if !self.destroy_ability(id) {
                debug!(ability_id = %id, "Ignoring destroy request for unknown ability");
            }
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    fn record(&self, id: AbilityId) -> Option<&AbilityRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    fn record_mut(&mut self, id: AbilityId) -> Option<&mut AbilityRecord> {
        self.records.iter_mut().find(|record| record.id == id)
    }

    /// Borrow an ability.
    #[must_use]
    pub fn ability(&self, id: AbilityId) -> Option<&Ability> {
        self.record(id).map(|record| &record.ability)
    }

    /// Borrow an ability mutably.
    pub fn ability_mut(&mut self, id: AbilityId) -> Option<&mut Ability> {
        self.record_mut(id).map(|record| &mut record.ability)
    }

    /// Every ability, in registration order.
    pub fn abilities(&self) -> impl Iterator<Item = (AbilityId, &Ability)> + '_ {
        self.records.iter().map(|record| (record.id, &record.ability))
    }

    /// Ids of every ability, in registration order.
    #[must_use]
    pub fn ids(&self) -> Vec<AbilityId> {
        self.records.iter().map(|record| record.id).collect()
    }

    /// Whether a record exists for `id`, including one marked for
    /// destruction but not yet erased.
    #[must_use]
    pub fn is_ability_exist(&self, id: AbilityId) -> bool {
        self.record(id).is_some()
    }

    /// Variant of the ability, or [`AbilityType::Base`] if there is none.
    #[must_use]
    pub fn ability_type(&self, id: AbilityId) -> AbilityType {
        self.ability(id)
            .map_or(AbilityType::Base, Ability::ability_type)
    }

    /// Number of records.
    #[must_use]
    pub fn ability_count(&self) -> usize {
        self.records.len()
    }

    /// Manager-level lifecycle of an ability.
    #[must_use]
    pub fn lifecycle_state(&self, id: AbilityId) -> Option<LifecycleState> {
        self.record(id).map(|record| record.lifecycle)
    }

    // -----------------------------------------------------------------------
    // Variant wrappers
    // -----------------------------------------------------------------------

    fn variant<T>(
        &self,
        id: AbilityId,
        expected: AbilityType,
        pick: fn(&Ability) -> Option<&T>,
    ) -> AbilityResult<&T> {
        let ability = self.ability(id).ok_or(AbilityError::NotFound(id))?;
        let actual = ability.ability_type();
        pick(ability).ok_or(AbilityError::TypeMismatch {
            id,
            expected,
            actual,
        })
    }

    fn variant_mut<T>(
        &mut self,
        id: AbilityId,
        expected: AbilityType,
        pick: fn(&mut Ability) -> Option<&mut T>,
    ) -> AbilityResult<&mut T> {
        let ability = self.ability_mut(id).ok_or(AbilityError::NotFound(id))?;
        let actual = ability.ability_type();
        pick(ability).ok_or(AbilityError::TypeMismatch {
            id,
            expected,
            actual,
        })
    }

    fn ui(&self, id: AbilityId) -> AbilityResult<&UiAbility> {
        self.variant(id, AbilityType::Ui, Ability::as_ui)
    }

    fn ui_mut(&mut self, id: AbilityId) -> AbilityResult<&mut UiAbility> {
        self.variant_mut(id, AbilityType::Ui, Ability::as_ui_mut)
    }

    fn worker(&self, id: AbilityId) -> AbilityResult<&WorkerAbility> {
        self.variant(id, AbilityType::Worker, Ability::as_worker)
    }

    fn worker_mut(&mut self, id: AbilityId) -> AbilityResult<&mut WorkerAbility> {
        self.variant_mut(id, AbilityType::Worker, Ability::as_worker_mut)
    }

    fn app(&self, id: AbilityId) -> AbilityResult<&AppAbility> {
        self.variant(id, AbilityType::App, Ability::as_app)
    }

    fn app_mut(&mut self, id: AbilityId) -> AbilityResult<&mut AppAbility> {
        self.variant_mut(id, AbilityType::App, Ability::as_app_mut)
    }

    /// Request a UI ability be shown.
    ///
    /// # Errors
    ///
    /// [`AbilityError::NotFound`] or [`AbilityError::TypeMismatch`].
    pub fn try_show_ui_ability(&mut self, id: AbilityId) -> AbilityResult<()> {
        self.ui_mut(id)?.show();
        Ok(())
    }

    /// Request a UI ability be hidden.
    ///
    /// # Errors
    ///
    /// [`AbilityError::NotFound`] or [`AbilityError::TypeMismatch`].
    pub fn try_hide_ui_ability(&mut self, id: AbilityId) -> AbilityResult<()> {
        self.ui_mut(id)?.hide();
        Ok(())
    }

    /// Visibility of a UI ability.
    ///
    /// # Errors
    ///
    /// [`AbilityError::NotFound`] or [`AbilityError::TypeMismatch`].
    pub fn try_ui_ability_state(&self, id: AbilityId) -> AbilityResult<UiState> {
        Ok(self.ui(id)?.current_state())
    }

    /// Request a worker ability pause.
    ///
    /// # Errors
    ///
    /// [`AbilityError::NotFound`] or [`AbilityError::TypeMismatch`].
    pub fn try_pause_worker_ability(&mut self, id: AbilityId) -> AbilityResult<()> {
        self.worker_mut(id)?.pause();
        Ok(())
    }

    /// Request a worker ability resume.
    ///
    /// # Errors
    ///
    /// [`AbilityError::NotFound`] or [`AbilityError::TypeMismatch`].
    pub fn try_resume_worker_ability(&mut self, id: AbilityId) -> AbilityResult<()> {
        self.worker_mut(id)?.resume();
        Ok(())
    }

    /// Run state of a worker ability.
    ///
    /// # Errors
    ///
    /// [`AbilityError::NotFound`] or [`AbilityError::TypeMismatch`].
    pub fn try_worker_ability_state(&self, id: AbilityId) -> AbilityResult<WorkerState> {
        Ok(self.worker(id)?.current_state())
    }

    /// Request an app ability open.
    ///
    /// # Errors
    ///
    /// [`AbilityError::NotFound`] or [`AbilityError::TypeMismatch`].
    pub fn try_open_app_ability(&mut self, id: AbilityId) -> AbilityResult<()> {
        self.app_mut(id)?.open();
        Ok(())
    }

    /// Request an app ability close.
    ///
    /// # Errors
    ///
    /// [`AbilityError::NotFound`] or [`AbilityError::TypeMismatch`].
    pub fn try_close_app_ability(&mut self, id: AbilityId) -> AbilityResult<()> {
        self.app_mut(id)?.close();
        Ok(())
    }

    /// Metadata of an app ability.
    ///
    /// # Errors
    ///
    /// [`AbilityError::NotFound`] or [`AbilityError::TypeMismatch`].
    pub fn try_app_ability_info(&self, id: AbilityId) -> AbilityResult<AppInfo> {
        Ok(self.app(id)?.info().clone())
    }

    /// Open state of an app ability.
    ///
    /// # Errors
    ///
    /// [`AbilityError::NotFound`] or [`AbilityError::TypeMismatch`].
    pub fn try_app_ability_state(&self, id: AbilityId) -> AbilityResult<AppState> {
        Ok(self.app(id)?.current_state())
    }

    /// Request a UI ability be shown. `false` if `id` is not a UI ability.
    pub fn show_ui_ability(&mut self, id: AbilityId) -> bool {
        self.try_show_ui_ability(id).is_ok()
    }

    /// Request a UI ability be hidden. `false` if `id` is not a UI ability.
    pub fn hide_ui_ability(&mut self, id: AbilityId) -> bool {
        self.try_hide_ui_ability(id).is_ok()
    }

    /// Visibility of a UI ability, [`UiState::Null`] if `id` is not one.
    #[must_use]
    pub fn ui_ability_state(&self, id: AbilityId) -> UiState {
        self.try_ui_ability_state(id).unwrap_or_default()
    }

    /// Request a worker pause. `false` if `id` is not a worker ability.
    pub fn pause_worker_ability(&mut self, id: AbilityId) -> bool {
        self.try_pause_worker_ability(id).is_ok()
    }

    /// Request a worker resume. `false` if `id` is not a worker ability.
    pub fn resume_worker_ability(&mut self, id: AbilityId) -> bool {
        self.try_resume_worker_ability(id).is_ok()
    }

    /// Run state of a worker, [`WorkerState::Null`] if `id` is not one.
    #[must_use]
    pub fn worker_ability_state(&self, id: AbilityId) -> WorkerState {
        self.try_worker_ability_state(id).unwrap_or_default()
    }

    /// Request an app open. `false` if `id` is not an app ability.
    pub fn open_app_ability(&mut self, id: AbilityId) -> bool {
        self.try_open_app_ability(id).is_ok()
    }

    /// Request an app close. `false` if `id` is not an app ability.
    pub fn close_app_ability(&mut self, id: AbilityId) -> bool {
        self.try_close_app_ability(id).is_ok()
    }

    /// Metadata of an app, or an empty [`AppInfo`] if `id` is not one.
    #[must_use]
    pub fn app_ability_info(&self, id: AbilityId) -> AppInfo {
        self.try_app_ability_info(id).unwrap_or_default()
    }

    /// Open state of an app, [`AppState::Null`] if `id` is not one.
    #[must_use]
    pub fn app_ability_state(&self, id: AbilityId) -> AppState {
        self.try_app_ability_state(id).unwrap_or_default()
    }
}

impl fmt::Debug for AbilityManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AbilityManager")
            .field("count", &self.records.len())
            .field("ids", &self.ids())
            .field("recycled", &self.ids.recycled_len())
            .field("config", &self.config)
            .field("has_database", &self.database.is_some())
            .finish()
    }
}
