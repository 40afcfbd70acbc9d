//! The run-scoped effect engine.

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use im::Vector;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::catalog::{EffectCatalog, EffectDefinition, EffectId, SynergyTag};
use crate::core::{
    ConfigError, EffectError, EngineConfig, GameRng, GameRngState, GameTime, PickError, Stat,
    StatTarget,
};
use crate::effects::{
    Buff, BuffClock, BuffId, EffectResolver, EffectScope, HookTable, ModifierAccumulator,
    ProcSummary, ProcTracker, RuleState, SynergyTracker,
};
use crate::tactics::{ComboDetector, PlayCallController, PlayCallKind};
use crate::triggers::{
    ConditionContext, ConditionEvaluator, EventBus, EventContext, EventKind, Notification,
};

use super::dispatcher::{Binding, BindingRegistry};

/// Effect engine for one run.
///
/// Owns every piece of run-scoped effect state. The catalog is shared, so
/// cloning an engine (for a checkpoint, say) copies state, not content.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use rogue_pitch::{EffectCatalog, EffectDefinition, EffectId, Engine, EngineConfig, GameTime, Stat};
///
/// let mut catalog = EffectCatalog::new();
/// catalog
///     .register(
///         EffectDefinition::new(EffectId::new(1), "Turbo Boots")
///             .with_modifier(Stat::Speed, 10.0)
///             .with_stack_limit(3),
///     )
///     .unwrap();
///
/// let mut engine = Engine::new(Arc::new(catalog), EngineConfig::default()).unwrap();
/// for _ in 0..3 {
///     engine.pick_effect(EffectId::new(1), &mut ()).unwrap();
/// }
/// assert!(engine.pick_effect(EffectId::new(1), &mut ()).is_err());
/// assert_eq!(engine.modified_stat(10.0, Stat::Speed, GameTime(0)), 13.0);
/// ```
#[derive(Clone)]
pub struct Engine {
    catalog: Arc<EffectCatalog>,
    config: EngineConfig,
    owned: Vector<EffectId>,
    counts: FxHashMap<EffectId, u32>,
    bindings: BindingRegistry,
    modifiers: ModifierAccumulator,
    buffs: BuffClock,
    synergy: SynergyTracker,
    procs: ProcTracker,
    combo: ComboDetector,
    play_calls: PlayCallController,
    rules: RuleState,
    hooks: HookTable,
    rng: GameRng,
}

impl Engine {
    /// Create an engine with no owned effects.
    pub fn new(catalog: Arc<EffectCatalog>, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(catalog, config, HookTable::default()))
    }

    fn build(catalog: Arc<EffectCatalog>, config: EngineConfig, hooks: HookTable) -> Self {
        Self {
            owned: Vector::new(),
            counts: FxHashMap::default(),
            bindings: BindingRegistry::new(),
            modifiers: ModifierAccumulator::new(),
            buffs: BuffClock::new(),
            synergy: SynergyTracker::new(&config.synergy),
            procs: ProcTracker::new(&config.procs),
            combo: ComboDetector::new(),
            play_calls: PlayCallController::new(),
            rules: RuleState::new(),
            rng: GameRng::new(config.seed),
            hooks,
            catalog,
            config,
        }
    }

    /// A new engine for the next run: same catalog, config and hooks,
    /// nothing owned.
    #[must_use]
    pub fn fresh_run(&self) -> Self {
        debug!("fresh run");
        Self::build(Arc::clone(&self.catalog), self.config.clone(), self.hooks.clone())
    }

    /// Reset moment-scoped state: proc counters and log, buffs, the
    /// pending give-and-go and any slow motion.
    pub fn begin_moment(&mut self) {
        self.procs.reset();
        self.buffs.clear();
        self.combo.clear();
        self.rules.clear_slow_motion();
        debug!("moment state reset");
    }

    /// Register a host callback for `Hook` behaviors.
    pub fn register_hook<F>(&mut self, name: impl Into<String>, hook: F)
    where
        F: Fn(&mut EffectScope<'_>) -> Result<(), EffectError> + 'static,
    {
        self.hooks.insert(name.into(), Rc::new(hook));
    }

    // === Picks ===

    /// Pick one copy of an effect.
    ///
    /// Returns the new owned count. A rejected pick mutates nothing.
    pub fn pick_effect(&mut self, id: EffectId, bus: &mut impl EventBus) -> Result<u32, PickError> {
        let catalog = Arc::clone(&self.catalog);
        let def = catalog.get(id).ok_or(PickError::UnknownEffect(id))?;

        let owned = self.owned_count(id);
        if owned >= def.stack_limit {
            debug!(effect = %id, limit = def.stack_limit, "pick rejected at stack limit");
            return Err(PickError::StackLimitExceeded {
                effect: id,
                limit: def.stack_limit,
            });
        }

        self.modifiers
            .apply(&def.modifiers)
            .map_err(|_| PickError::NonFiniteModifier(id))?;

        let copies = owned + 1;
        self.counts.insert(id, copies);
        self.owned.push_back(id);
        self.bindings.bind(def, copies);
        debug!(effect = %id, name = %def.name, copies, "effect picked");

        for activation in self.synergy.on_pick(&def.synergy_tags) {
            if let Some(synergy) = catalog.synergy(&activation.tag) {
                if let Err(err) = self.modifiers.apply(synergy.bonus_for(activation.tier)) {
                    warn!(tag = %activation.tag, tier = activation.tier, %err, "synergy bonus skipped");
                }
            }
            bus.publish(Notification::SynergyActivated {
                tag: activation.tag,
                tier: activation.tier,
            });
        }

        bus.publish(Notification::EffectPicked { effect: id, copies });
        Ok(copies)
    }

    /// Does the run own at least one copy?
    #[must_use]
    pub fn has_effect(&self, id: EffectId) -> bool {
        self.counts.contains_key(&id)
    }

    /// Owned copies of one effect.
    #[must_use]
    pub fn owned_count(&self, id: EffectId) -> u32 {
        self.counts.get(&id).copied().unwrap_or(0)
    }

    /// Every owned copy, in pick order.
    #[must_use]
    pub fn owned_effect_ids(&self) -> Vec<EffectId> {
        self.owned.iter().copied().collect()
    }

    // === Dispatch ===

    /// Raise a gameplay event.
    ///
    /// Runs every binding for `event` in pick order. Bindings whose
    /// condition fails are skipped; a failing callback is logged, reported
    /// on the bus as `CallbackFailed` and skipped, and the rest still run.
    /// Returns how many bindings procced.
    pub fn emit(
        &mut self,
        event: EventKind,
        ctx: &EventContext,
        now: GameTime,
        bus: &mut impl EventBus,
    ) -> usize {
        match event {
            EventKind::Pass => match ctx.target {
                Some(target) => self.combo.arm(target, now),
                None => self.combo.clear(),
            },
            EventKind::Receive => self.resolve_give_and_go(ctx, now, bus),
            _ => {}
        }

        let catalog = Arc::clone(&self.catalog);
        let bindings: SmallVec<[Binding; 8]> =
            self.bindings.bindings_for(event).iter().copied().collect();
        let condition_ctx = ConditionContext::new(event, ctx);

        let mut procs = 0;
        for binding in bindings {
            let Some(def) = catalog.get(binding.effect) else {
                continue;
            };
            if !ConditionEvaluator::evaluate(&def.condition, &condition_ctx) {
                continue;
            }

            if let Err(error) = self.run_callback(def, event, ctx, now) {
                warn!(effect = %def.id, %event, %error, "effect callback failed");
                bus.publish(Notification::CallbackFailed {
                    effect: def.id,
                    event,
                    error,
                });
                continue;
            }

            procs += 1;
            let record = self.procs.record(def.id, now);
            debug!(effect = %def.id, %event, count = record.count, "proc");
            if record.feedback {
                bus.publish(Notification::ProcFeedback {
                    effect: def.id,
                    count: record.count,
                    at: now,
                });
            }
        }
        procs
    }

    fn run_callback(
        &mut self,
        def: &EffectDefinition,
        event: EventKind,
        ctx: &EventContext,
        now: GameTime,
    ) -> Result<(), EffectError> {
        for (slot, behavior) in def.behaviors.iter().enumerate() {
            let mut scope = EffectScope {
                effect: def.id,
                slot,
                event,
                context: ctx,
                now,
                buffs: &mut self.buffs,
                rules: &mut self.rules,
                rng: &mut self.rng,
            };
            EffectResolver::resolve(behavior, &mut scope, &self.hooks)?;
        }
        Ok(())
    }

    fn resolve_give_and_go(&mut self, ctx: &EventContext, now: GameTime, bus: &mut impl EventBus) {
        let Some(receiver) = ctx.player else {
            self.combo.clear();
            return;
        };
        let combo = &self.config.give_and_go;
        if !self.combo.on_receive(receiver, now, combo.window_ms) {
            return;
        }

        for stat in &combo.bonus_stats {
            if let Err(err) = self.buffs.add_or_refresh(
                BuffId::GiveAndGo(*stat),
                StatTarget::Stat(*stat),
                combo.bonus_percent,
                combo.bonus_duration_ms,
                now,
            ) {
                warn!(%stat, %err, "give-and-go bonus skipped");
            }
        }
        debug!(%receiver, %now, "give-and-go");
        bus.publish(Notification::GiveAndGo { receiver, at: now });
    }

    // === Stats ===

    /// `base` scaled by every percentage that applies to `stat` at `now`:
    /// permanent modifiers, live buffs, streaks and the active play call.
    ///
    /// Prunes expired buffs as a side effect.
    pub fn modified_stat(&mut self, base: f64, stat: Stat, now: GameTime) -> f64 {
        let percent = self.modifiers.total_for(stat)
            + self.buffs.total_for(stat, now)
            + self.rules.streak_total_for(stat)
            + self.play_call_bonus(stat, now);

        if !percent.is_finite() {
            warn!(%stat, percent, "ignoring non-finite stat modifier total");
            return base;
        }
        base * (1.0 + percent / 100.0)
    }

    fn play_call_bonus(&self, stat: Stat, now: GameTime) -> f64 {
        self.play_calls.get_active(now).map_or(0.0, |kind| {
            self.config
                .play_calls
                .bonuses_for(kind)
                .filter(|m| m.target.applies_to(stat))
                .map(|m| m.percent)
                .sum()
        })
    }

    /// Permanent modifiers only.
    #[must_use]
    pub fn modifiers(&self) -> &ModifierAccumulator {
        &self.modifiers
    }

    /// Live buffs at `now`, in arming order.
    pub fn active_buffs(&mut self, now: GameTime) -> Vec<Buff> {
        self.buffs.active_buffs(now)
    }

    /// Time-dilation factor for the host loop (1.0 = normal speed).
    #[must_use]
    pub fn time_dilation(&self, now: GameTime) -> f64 {
        self.rules.time_dilation(now)
    }

    /// Run-scoped state of stateful behaviors.
    #[must_use]
    pub fn rules(&self) -> &RuleState {
        &self.rules
    }

    // === Synergies ===

    /// Owned-effect counts per tag, sorted by tag.
    #[must_use]
    pub fn synergy_counts(&self) -> Vec<(SynergyTag, u32)> {
        self.synergy.counts()
    }

    /// Tier reached by one tag.
    #[must_use]
    pub fn synergy_tier(&self, tag: &SynergyTag) -> u8 {
        self.synergy.tier(tag)
    }

    /// Tags with a tier above zero, sorted by tag.
    #[must_use]
    pub fn active_synergies(&self) -> Vec<(SynergyTag, u8)> {
        self.synergy.active_tiers()
    }

    // === Procs ===

    /// Highest-count procs this moment.
    #[must_use]
    pub fn top_procs(&self, limit: usize) -> Vec<ProcSummary> {
        self.procs.top_procs(limit)
    }

    /// Procs of one effect this moment.
    #[must_use]
    pub fn proc_count(&self, id: EffectId) -> u64 {
        self.procs.count(id)
    }

    /// The proc tracker, for the recent-proc log.
    #[must_use]
    pub fn procs(&self) -> &ProcTracker {
        &self.procs
    }

    // === Play calls ===

    /// Make a team call. Returns `false`, changing nothing, while on cooldown.
    pub fn call_play(&mut self, kind: PlayCallKind, now: GameTime, bus: &mut impl EventBus) -> bool {
        let timing = &self.config.play_calls;
        match self
            .play_calls
            .call_play(kind, now, timing.duration_ms, timing.cooldown_ms)
        {
            Some(call) => {
                bus.publish(Notification::PlayCalled {
                    kind,
                    expires_at: call.expires_at,
                    cooldown_until: call.cooldown_until,
                });
                true
            }
            None => false,
        }
    }

    /// The call in effect at `now`.
    #[must_use]
    pub fn active_play_call(&self, now: GameTime) -> Option<PlayCallKind> {
        self.play_calls.get_active(now)
    }

    // === Accessors ===

    #[must_use]
    pub fn catalog(&self) -> &EffectCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Position of the chance-roll stream, for replay logs.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut hooks: Vec<&str> = self.hooks.keys().map(String::as_str).collect();
        hooks.sort_unstable();
        f.debug_struct("Engine")
            .field("owned", &self.owned)
            .field("modifiers", &self.modifiers)
            .field("buffs", &self.buffs)
            .field("synergy", &self.synergy)
            .field("combo", &self.combo)
            .field("play_calls", &self.play_calls)
            .field("hooks", &hooks)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::catalog::SynergyDefinition;
    use crate::core::EntityId;
    use crate::effects::EffectBehavior;
    use crate::triggers::{Flag, NotificationLog, TriggerCondition};

    fn catalog() -> Arc<EffectCatalog> {
        let mut catalog = EffectCatalog::new();
        catalog
            .register(
                EffectDefinition::new(EffectId::new(1), "Turbo Boots")
                    .with_modifier(Stat::Speed, 10.0)
                    .with_tag("pace")
                    .with_stack_limit(3),
            )
            .unwrap();
        catalog
            .register(
                EffectDefinition::new(EffectId::new(2), "Poacher")
                    .on(EventKind::Shot)
                    .with_condition(TriggerCondition::flag(Flag::IsStationary))
                    .with_behavior(EffectBehavior::buff(Stat::Power, 20.0, 2_000))
                    .with_stack_limit(2),
            )
            .unwrap();
        catalog
            .register(
                EffectDefinition::new(EffectId::new(3), "Glitch")
                    .on(EventKind::Shot)
                    .with_behavior(EffectBehavior::hook("explode")),
            )
            .unwrap();
        catalog
            .register_synergy(SynergyDefinition::new("pace").with_tier1(StatTarget::All, 5.0))
            .unwrap();
        Arc::new(catalog)
    }

    fn engine() -> Engine {
        Engine::new(catalog(), EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_pick_folds_modifiers_and_tracks_order() {
        let mut engine = engine();
        let mut log = NotificationLog::new();

        assert_eq!(engine.pick_effect(EffectId::new(1), &mut log), Ok(1));
        assert_eq!(engine.pick_effect(EffectId::new(2), &mut log), Ok(1));
        assert_eq!(engine.pick_effect(EffectId::new(1), &mut log), Ok(2));

        assert_eq!(
            engine.owned_effect_ids(),
            vec![EffectId::new(1), EffectId::new(2), EffectId::new(1)]
        );
        assert_eq!(engine.owned_count(EffectId::new(1)), 2);
        assert!(engine.has_effect(EffectId::new(2)));
        assert!(!engine.has_effect(EffectId::new(3)));
        assert_eq!(engine.modifiers().total_for(Stat::Speed), 20.0);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_rejected_picks_mutate_nothing() {
        let mut engine = engine();
        assert_eq!(
            engine.pick_effect(EffectId::new(99), &mut ()),
            Err(PickError::UnknownEffect(EffectId::new(99)))
        );
        for _ in 0..3 {
            engine.pick_effect(EffectId::new(1), &mut ()).unwrap();
        }
        let before = engine.modified_stat(10.0, Stat::Speed, GameTime(0));

        let mut log = NotificationLog::new();
        assert_eq!(
            engine.pick_effect(EffectId::new(1), &mut log),
            Err(PickError::StackLimitExceeded {
                effect: EffectId::new(1),
                limit: 3
            })
        );
        assert!(log.is_empty());
        assert_eq!(engine.owned_count(EffectId::new(1)), 3);
        assert_eq!(engine.modified_stat(10.0, Stat::Speed, GameTime(0)), before);
    }

    #[test]
    fn test_synergy_bonus_applies_once() {
        let mut engine = engine();
        let mut log = NotificationLog::new();
        for _ in 0..3 {
            engine.pick_effect(EffectId::new(1), &mut log).unwrap();
        }

        assert_eq!(engine.synergy_tier(&SynergyTag::new("pace")), 1);
        assert_eq!(
            log.count(|n| matches!(n, Notification::SynergyActivated { tier: 1, .. })),
            1
        );
        // 3 x 10% speed plus the 5% all-stat tier bonus.
        assert_eq!(engine.modifiers().total_for(Stat::Speed), 35.0);
        assert_eq!(engine.modifiers().total_for(Stat::Power), 5.0);
    }

    #[test]
    fn test_emit_respects_condition() {
        let mut engine = engine();
        engine.pick_effect(EffectId::new(2), &mut ()).unwrap();

        let moving = EventContext::new();
        assert_eq!(engine.emit(EventKind::Shot, &moving, GameTime(0), &mut ()), 0);
        assert_eq!(engine.proc_count(EffectId::new(2)), 0);

        let still = EventContext::new().stationary();
        assert_eq!(engine.emit(EventKind::Shot, &still, GameTime(10), &mut ()), 1);
        assert_eq!(engine.modified_stat(10.0, Stat::Power, GameTime(20)), 12.0);
        assert_eq!(engine.modified_stat(10.0, Stat::Power, GameTime(2_010)), 10.0);
    }

    #[test]
    fn test_buff_copies_refresh_instead_of_stacking() {
        let mut engine = engine();
        engine.pick_effect(EffectId::new(2), &mut ()).unwrap();
        engine.pick_effect(EffectId::new(2), &mut ()).unwrap();

        let still = EventContext::new().stationary();
        assert_eq!(engine.emit(EventKind::Shot, &still, GameTime(0), &mut ()), 2);
        assert_eq!(engine.active_buffs(GameTime(1)).len(), 1);
        assert_eq!(engine.modified_stat(10.0, Stat::Power, GameTime(1)), 12.0);
        assert_eq!(engine.proc_count(EffectId::new(2)), 2);
    }

    #[test]
    fn test_failing_callback_is_isolated() {
        let mut engine = engine();
        engine.pick_effect(EffectId::new(3), &mut ()).unwrap();
        engine.pick_effect(EffectId::new(2), &mut ()).unwrap();

        let mut log = NotificationLog::new();
        let still = EventContext::new().stationary();
        assert_eq!(engine.emit(EventKind::Shot, &still, GameTime(0), &mut log), 1);

        assert_eq!(engine.proc_count(EffectId::new(3)), 0);
        assert_eq!(engine.proc_count(EffectId::new(2)), 1);
        assert_eq!(
            log.count(|n| matches!(
                n,
                Notification::CallbackFailed { error: EffectError::UnknownHook(_), .. }
            )),
            1
        );
    }

    #[test]
    fn test_registered_hook_runs() {
        let mut engine = engine();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        engine.register_hook("explode", move |scope| {
            sink.borrow_mut().push(scope.event);
            Ok(())
        });
        engine.pick_effect(EffectId::new(3), &mut ()).unwrap();

        engine.emit(EventKind::Shot, &EventContext::new(), GameTime(0), &mut ());
        assert_eq!(*seen.borrow(), vec![EventKind::Shot]);

        // Hooks carry over into the next run.
        let mut next = engine.fresh_run();
        next.pick_effect(EffectId::new(3), &mut ()).unwrap();
        next.emit(EventKind::Shot, &EventContext::new(), GameTime(0), &mut ());
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_give_and_go_through_emit() {
        let mut engine = engine();
        let mut log = NotificationLog::new();
        let pass = EventContext::for_player(EntityId(1)).with_target(EntityId(2));
        let receive = EventContext::for_player(EntityId(2));

        engine.emit(EventKind::Pass, &pass, GameTime(1_000), &mut log);
        engine.emit(EventKind::Receive, &receive, GameTime(3_000), &mut log);

        assert_eq!(log.count(|n| matches!(n, Notification::GiveAndGo { .. })), 1);
        assert_eq!(engine.modified_stat(20.0, Stat::Control, GameTime(3_100)), 23.0);
        assert_eq!(engine.modified_stat(20.0, Stat::Dodge, GameTime(3_100)), 20.0);
    }

    #[test]
    fn test_play_call_bonus_in_stat() {
        let mut engine = engine();
        assert!(engine.call_play(PlayCallKind::Press, GameTime(0), &mut ()));
        assert!(!engine.call_play(PlayCallKind::Hold, GameTime(1_000), &mut ()));

        assert_eq!(engine.active_play_call(GameTime(1_000)), Some(PlayCallKind::Press));
        assert_eq!(engine.modified_stat(20.0, Stat::Tackle, GameTime(1_000)), 23.0);
        assert_eq!(engine.modified_stat(20.0, Stat::Tackle, GameTime(8_000)), 20.0);
    }

    #[test]
    fn test_begin_moment_and_fresh_run_scopes() {
        let mut engine = engine();
        engine.pick_effect(EffectId::new(1), &mut ()).unwrap();
        engine.pick_effect(EffectId::new(2), &mut ()).unwrap();
        engine.emit(EventKind::Shot, &EventContext::new().stationary(), GameTime(0), &mut ());
        engine.call_play(PlayCallKind::Hold, GameTime(0), &mut ());

        engine.begin_moment();
        assert_eq!(engine.proc_count(EffectId::new(2)), 0);
        assert!(engine.active_buffs(GameTime(1)).is_empty());
        assert!(engine.has_effect(EffectId::new(1)), "picks survive a moment reset");
        assert!(!engine.call_play(PlayCallKind::Press, GameTime(1), &mut ()));

        let next = engine.fresh_run();
        assert!(next.owned_effect_ids().is_empty());
        assert_eq!(next.modifiers().total_for(Stat::Speed), 0.0);
        assert_eq!(next.active_play_call(GameTime(1)), None);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig::default().with_synergy_thresholds(5, 5);
        assert!(Engine::new(catalog(), config).is_err());
    }
}
