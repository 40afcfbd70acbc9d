//! Effect resolution - running behaviors against engine state.
//!
//! The `EffectResolver` interprets an `EffectBehavior` inside an
//! `EffectScope`, which lends it mutable access to exactly the state a
//! behavior may touch: the buff clock, per-rule counters and the RNG.
//! Permanent modifiers are deliberately out of reach; only picks and
//! synergy tiers change those.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::catalog::EffectId;
use crate::core::{EffectError, GameRng, GameTime, Stat, StatTarget};
use crate::triggers::{EventContext, EventKind};

use super::behavior::EffectBehavior;
use super::buffs::{BuffClock, BuffId};

/// Host callback invoked by `EffectBehavior::Hook`.
pub type EffectHook = Rc<dyn Fn(&mut EffectScope<'_>) -> Result<(), EffectError>>;

/// Registered hooks by name.
pub type HookTable = FxHashMap<String, EffectHook>;

/// Key for per-rule state: the owning effect and the behavior's position
/// in its definition.
pub type RuleKey = (EffectId, usize);

#[derive(Clone, Copy, Debug, PartialEq)]
struct StreakState {
    target: StatTarget,
    step_percent: f64,
    level: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct SlowMotion {
    factor: f64,
    until: GameTime,
}

/// Run-scoped state for stateful rules.
#[derive(Clone, Debug, Default)]
pub struct RuleState {
    counters: FxHashMap<RuleKey, u32>,
    streaks: FxHashMap<RuleKey, StreakState>,
    slow_motion: Option<SlowMotion>,
}

impl RuleState {
    /// Create empty rule state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current level of a streak rule.
    #[must_use]
    pub fn streak_level(&self, key: RuleKey) -> u32 {
        self.streaks.get(&key).map_or(0, |s| s.level)
    }

    /// Percentage contributed to `stat` by every streak.
    #[must_use]
    pub fn streak_total_for(&self, stat: Stat) -> f64 {
        self.streaks
            .values()
            .filter(|s| s.target.applies_to(stat))
            .map(|s| s.step_percent * f64::from(s.level))
            .sum()
    }

    /// Firings counted so far by an every-n-th rule.
    #[must_use]
    pub fn counter(&self, key: RuleKey) -> u32 {
        self.counters.get(&key).copied().unwrap_or(0)
    }

    /// Time-dilation factor the host loop should apply at `now`.
    #[must_use]
    pub fn time_dilation(&self, now: GameTime) -> f64 {
        match self.slow_motion {
            Some(slow) if now < slow.until => slow.factor,
            _ => 1.0,
        }
    }

    /// Drop any pending slow motion.
    pub fn clear_slow_motion(&mut self) {
        self.slow_motion = None;
    }
}

/// Mutable view of engine state lent to a behavior.
pub struct EffectScope<'a> {
    /// Effect whose callback is running.
    pub effect: EffectId,
    /// Position of the behavior in the effect's definition.
    pub slot: usize,
    /// Event being dispatched.
    pub event: EventKind,
    /// Its payload.
    pub context: &'a EventContext,
    /// Caller-supplied time.
    pub now: GameTime,
    pub buffs: &'a mut BuffClock,
    pub rules: &'a mut RuleState,
    pub rng: &'a mut GameRng,
}

impl EffectScope<'_> {
    /// Arm or refresh this effect's buff on `target`.
    pub fn arm_buff(
        &mut self,
        target: StatTarget,
        percent: f64,
        duration_ms: u64,
    ) -> Result<(), EffectError> {
        let id = BuffId::Effect {
            effect: self.effect,
            target,
        };
        self.buffs.add_or_refresh(id, target, percent, duration_ms, self.now)
    }

    fn rule_key(&self) -> RuleKey {
        (self.effect, self.slot)
    }
}

/// Interprets behaviors.
pub struct EffectResolver;

impl EffectResolver {
    /// Run one behavior.
    pub fn resolve(
        behavior: &EffectBehavior,
        scope: &mut EffectScope<'_>,
        hooks: &HookTable,
    ) -> Result<(), EffectError> {
        match behavior {
            EffectBehavior::Buff {
                target,
                percent,
                duration_ms,
            } => scope.arm_buff(*target, *percent, *duration_ms),

            EffectBehavior::Chance { percent, then } => {
                if !percent.is_finite() {
                    return Err(EffectError::NonFinite("chance percent"));
                }
                if scope.rng.roll_percent(*percent) {
                    Self::resolve(then, scope, hooks)
                } else {
                    Ok(())
                }
            }

            EffectBehavior::EveryNth { n, then } => {
                let key = scope.rule_key();
                let counter = scope.rules.counters.entry(key).or_insert(0);
                *counter += 1;
                if *n > 0 && *counter % *n == 0 {
                    debug!(effect = %scope.effect, n, "every-nth rule fired");
                    Self::resolve(then, scope, hooks)
                } else {
                    Ok(())
                }
            }

            EffectBehavior::Streak {
                target,
                step_percent,
                max_level,
            } => {
                if !step_percent.is_finite() {
                    return Err(EffectError::NonFinite("streak step"));
                }
                let success = scope
                    .context
                    .flags
                    .success
                    .ok_or(EffectError::MissingContext("action outcome"))?;

                let key = scope.rule_key();
                let streak = scope.rules.streaks.entry(key).or_insert(StreakState {
                    target: *target,
                    step_percent: *step_percent,
                    level: 0,
                });
                if success {
                    streak.level = streak.level.saturating_sub(1);
                } else {
                    streak.level = (streak.level + 1).min(*max_level);
                }
                debug!(effect = %scope.effect, level = streak.level, success, "streak updated");
                Ok(())
            }

            EffectBehavior::SlowMotion {
                factor,
                duration_ms,
            } => {
                if !factor.is_finite() || *factor <= 0.0 {
                    return Err(EffectError::NonFinite("slow-motion factor"));
                }
                let factor = factor.min(1.0);
                let until = scope.now.after(*duration_ms);
                let merged = match scope.rules.slow_motion {
                    Some(active) if scope.now < active.until => SlowMotion {
                        factor: active.factor.min(factor),
                        until: active.until.max(until),
                    },
                    _ => SlowMotion { factor, until },
                };
                scope.rules.slow_motion = Some(merged);
                Ok(())
            }

            EffectBehavior::Hook(name) => {
                let hook = hooks
                    .get(name)
                    .cloned()
                    .ok_or_else(|| EffectError::UnknownHook(name.clone()))?;
                hook(scope)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    struct Fixture {
        buffs: BuffClock,
        rules: RuleState,
        rng: GameRng,
        context: EventContext,
        hooks: HookTable,
    }

    impl Fixture {
        fn new(context: EventContext) -> Self {
            Self {
                buffs: BuffClock::new(),
                rules: RuleState::new(),
                rng: GameRng::new(7),
                context,
                hooks: HookTable::default(),
            }
        }

        fn run(&mut self, behavior: &EffectBehavior, now: u64) -> Result<(), EffectError> {
            let mut scope = EffectScope {
                effect: EffectId::new(1),
                slot: 0,
                event: EventKind::Tackle,
                context: &self.context,
                now: GameTime(now),
                buffs: &mut self.buffs,
                rules: &mut self.rules,
                rng: &mut self.rng,
            };
            EffectResolver::resolve(behavior, &mut scope, &self.hooks)
        }
    }

    #[test]
    fn test_buff_behavior_arms_keyed_buff() {
        let mut fx = Fixture::new(EventContext::new());
        fx.run(&EffectBehavior::buff(Stat::Speed, 20.0, 1_000), 0).unwrap();

        let id = BuffId::Effect {
            effect: EffectId::new(1),
            target: Stat::Speed.into(),
        };
        assert_eq!(fx.buffs.get(id).unwrap().magnitude, 20.0);
    }

    #[test]
    fn test_every_nth() {
        let mut fx = Fixture::new(EventContext::new());
        let behavior = EffectBehavior::every_nth(3, EffectBehavior::buff(Stat::Power, 30.0, 500));

        fx.run(&behavior, 0).unwrap();
        fx.run(&behavior, 1).unwrap();
        assert!(fx.buffs.is_empty());
        fx.run(&behavior, 2).unwrap();
        assert_eq!(fx.buffs.len(), 1);
        assert_eq!(fx.rules.counter((EffectId::new(1), 0)), 3);
    }

    #[test]
    fn test_every_zeroth_never_fires() {
        let mut fx = Fixture::new(EventContext::new());
        let behavior = EffectBehavior::every_nth(0, EffectBehavior::buff(Stat::Power, 30.0, 500));
        for t in 0..5 {
            fx.run(&behavior, t).unwrap();
        }
        assert!(fx.buffs.is_empty());
    }

    #[test]
    fn test_chance_extremes() {
        let mut fx = Fixture::new(EventContext::new());
        fx.run(&EffectBehavior::chance(0.0, EffectBehavior::buff(Stat::Speed, 5.0, 100)), 0)
            .unwrap();
        assert!(fx.buffs.is_empty());

        fx.run(&EffectBehavior::chance(100.0, EffectBehavior::buff(Stat::Speed, 5.0, 100)), 0)
            .unwrap();
        assert_eq!(fx.buffs.len(), 1);

        let nan = EffectBehavior::chance(f64::NAN, EffectBehavior::buff(Stat::Speed, 5.0, 100));
        assert_eq!(fx.run(&nan, 0), Err(EffectError::NonFinite("chance percent")));
    }

    #[test]
    fn test_streak_grows_on_failure_decays_on_success() {
        let streak = EffectBehavior::streak(Stat::Tackle, 5.0, 3);
        let key = (EffectId::new(1), 0);

        let mut fx = Fixture::new(EventContext::new().succeeded(false));
        for t in 0..5 {
            fx.run(&streak, t).unwrap();
        }
        assert_eq!(fx.rules.streak_level(key), 3, "capped at max level");
        assert_eq!(fx.rules.streak_total_for(Stat::Tackle), 15.0);

        fx.context = EventContext::new().succeeded(true);
        fx.run(&streak, 10).unwrap();
        assert_eq!(fx.rules.streak_level(key), 2);
        assert_eq!(fx.rules.streak_total_for(Stat::Tackle), 10.0);
        assert_eq!(fx.rules.streak_total_for(Stat::Speed), 0.0);
    }

    #[test]
    fn test_streak_requires_outcome() {
        let mut fx = Fixture::new(EventContext::new());
        let result = fx.run(&EffectBehavior::streak(Stat::Tackle, 5.0, 3), 0);
        assert_eq!(result, Err(EffectError::MissingContext("action outcome")));
    }

    #[test]
    fn test_slow_motion_window_and_merge() {
        let mut fx = Fixture::new(EventContext::new());
        fx.run(&EffectBehavior::slow_motion(0.5, 1_000), 0).unwrap();
        assert_eq!(fx.rules.time_dilation(GameTime(500)), 0.5);
        assert_eq!(fx.rules.time_dilation(GameTime(1_000)), 1.0);

        fx.run(&EffectBehavior::slow_motion(0.5, 1_000), 2_000).unwrap();
        fx.run(&EffectBehavior::slow_motion(0.8, 2_000), 2_100).unwrap();
        assert_eq!(fx.rules.time_dilation(GameTime(3_500)), 0.5);
        assert_eq!(fx.rules.time_dilation(GameTime(4_100)), 1.0);

        assert!(fx.run(&EffectBehavior::slow_motion(0.0, 10), 0).is_err());
    }

    #[test]
    fn test_hook_dispatch() {
        let mut fx = Fixture::new(EventContext::new());
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let hook: EffectHook = Rc::new(move |scope| {
            seen.set(seen.get() + 1);
            scope.arm_buff(StatTarget::All, 3.0, 100)
        });
        fx.hooks.insert("spark".to_string(), hook);

        fx.run(&EffectBehavior::hook("spark"), 0).unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(fx.buffs.total_for(Stat::Dodge, GameTime(1)), 3.0);

        assert_eq!(
            fx.run(&EffectBehavior::hook("missing"), 0),
            Err(EffectError::UnknownHook("missing".to_string()))
        );
    }
}
