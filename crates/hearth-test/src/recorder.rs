//! Hooks that record every call into an [`EventLog`].

use hearth_abilities::{
    Ability, AbilityContext, AbilityHooks, AbilityId, AppContext, AppHooks, UiHooks, WorkerHooks,
};

use crate::events::{EventLog, LifecycleEvent};

type Spawn = Box<dyn FnMut() -> Ability>;

/// Hooks for any ability variant that log each call.
///
/// Optionally destroys its own ability after a number of updates, or
/// registers a child ability from `on_create`.
pub struct RecordingHooks {
    log: EventLog,
    destroy_after: Option<u32>,
    spawn: Option<Spawn>,
    spawned: Vec<AbilityId>,
}

impl RecordingHooks {
    /// Record into `log`.
    #[must_use]
    pub fn new(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            destroy_after: None,
            spawn: None,
            spawned: Vec::new(),
        }
    }

    /// Call `destroy_self` on the `n`th update (1-based).
    #[must_use]
    pub fn destroy_self_after(mut self, n: u32) -> Self {
        self.destroy_after = Some(n);
        self
    }

    /// Register the ability `make` builds from `on_create`.
    #[must_use]
    pub fn spawn_on_create(mut self, make: impl FnMut() -> Ability + 'static) -> Self {
        self.spawn = Some(Box::new(make));
        self
    }

    /// Ids registered from `on_create`.
    #[must_use]
    pub fn spawned(&self) -> &[AbilityId] {
        &self.spawned
    }

    fn create(&mut self, ctx: &mut AbilityContext<'_>) {
        self.log.record(ctx.id(), LifecycleEvent::Create);
        if let Some(make) = self.spawn.as_mut()
            && let Ok(child) = ctx.create_ability(make())
        {
            self.spawned.push(child);
        }
    }

    fn update(&mut self, ctx: &mut AbilityContext<'_>) {
        self.log.record(ctx.id(), LifecycleEvent::Update);
        if let Some(remaining) = self.destroy_after.as_mut() {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                ctx.destroy_self();
                self.destroy_after = None;
            }
        }
    }

    fn note(&self, ctx: &AbilityContext<'_>, event: LifecycleEvent) {
        self.log.record(ctx.id(), event);
    }
}

impl std::fmt::Debug for RecordingHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingHooks")
            .field("destroy_after", &self.destroy_after)
            .field("spawned", &self.spawned)
            .finish_non_exhaustive()
    }
}

impl AbilityHooks for RecordingHooks {
    fn on_create(&mut self, ctx: &mut AbilityContext<'_>) {
        self.create(ctx);
    }

    fn on_update(&mut self, ctx: &mut AbilityContext<'_>) {
        self.update(ctx);
    }

    fn on_destroy(&mut self, ctx: &mut AbilityContext<'_>) {
        self.note(ctx, LifecycleEvent::Destroy);
    }
}

impl UiHooks for RecordingHooks {
    fn on_create(&mut self, ctx: &mut AbilityContext<'_>) {
        self.create(ctx);
    }

    fn on_update(&mut self, ctx: &mut AbilityContext<'_>) {
        self.update(ctx);
    }

    fn on_show(&mut self, ctx: &mut AbilityContext<'_>) {
        self.note(ctx, LifecycleEvent::Show);
    }

    fn on_foreground(&mut self, ctx: &mut AbilityContext<'_>) {
        self.note(ctx, LifecycleEvent::Foreground);
    }

    fn on_hide(&mut self, ctx: &mut AbilityContext<'_>) {
        self.note(ctx, LifecycleEvent::Hide);
    }

    fn on_background(&mut self, ctx: &mut AbilityContext<'_>) {
        self.note(ctx, LifecycleEvent::Background);
    }

    fn on_destroy(&mut self, ctx: &mut AbilityContext<'_>) {
        self.note(ctx, LifecycleEvent::Destroy);
    }
}

impl WorkerHooks for RecordingHooks {
    fn on_create(&mut self, ctx: &mut AbilityContext<'_>) {
        self.create(ctx);
    }

    fn on_update(&mut self, ctx: &mut AbilityContext<'_>) {
        self.update(ctx);
    }

    fn on_resume(&mut self, ctx: &mut AbilityContext<'_>) {
        self.note(ctx, LifecycleEvent::Resume);
    }

    fn on_running(&mut self, ctx: &mut AbilityContext<'_>) {
        self.note(ctx, LifecycleEvent::Running);
    }

    fn on_pause(&mut self, ctx: &mut AbilityContext<'_>) {
        self.note(ctx, LifecycleEvent::Pause);
    }

    fn on_paused(&mut self, ctx: &mut AbilityContext<'_>) {
        self.note(ctx, LifecycleEvent::Paused);
    }

    fn on_destroy(&mut self, ctx: &mut AbilityContext<'_>) {
        self.note(ctx, LifecycleEvent::Destroy);
    }
}

impl AppHooks for RecordingHooks {
    fn on_create(&mut self, ctx: &mut AppContext<'_, '_>) {
        self.create(ctx);
    }

    fn on_update(&mut self, ctx: &mut AppContext<'_, '_>) {
        self.update(ctx);
    }

    fn on_open(&mut self, ctx: &mut AppContext<'_, '_>) {
        self.note(ctx, LifecycleEvent::Open);
    }

    fn on_running(&mut self, ctx: &mut AppContext<'_, '_>) {
        self.note(ctx, LifecycleEvent::Running);
    }

    fn on_close(&mut self, ctx: &mut AppContext<'_, '_>) {
        self.note(ctx, LifecycleEvent::Close);
    }

    fn on_running_background(&mut self, ctx: &mut AppContext<'_, '_>) {
        self.note(ctx, LifecycleEvent::RunningBackground);
    }

    fn on_destroy(&mut self, ctx: &mut AppContext<'_, '_>) {
        self.note(ctx, LifecycleEvent::Destroy);
    }
}
