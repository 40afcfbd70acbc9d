//! Effect system for upgrade abilities.
//!
//! Owned effects change the game in two ways:
//! - **Permanent modifiers**, folded into the `ModifierAccumulator` once per
//!   owned copy at pick time
//! - **Behaviors**, run by the `EffectResolver` when a trigger event fires
//!
//! Around these sit the run-scoped trackers:
//! - `BuffClock`: timed buffs, refreshed rather than stacked
//! - `SynergyTracker`: per-tag counts and one-shot tier activations
//! - `ProcTracker`: proc counts and throttled feedback
//! - `RuleState`: counters and levels for stateful behaviors
//!
//! ## Example
//!
//! ```
//! use rogue_pitch::effects::{BuffClock, BuffId};
//! use rogue_pitch::{EffectId, GameTime, Stat};
//!
//! let mut clock = BuffClock::new();
//! let id = BuffId::Effect { effect: EffectId::new(1), target: Stat::Speed.into() };
//! clock.add_or_refresh(id, Stat::Speed.into(), 20.0, 2_000, GameTime(0)).unwrap();
//! clock.add_or_refresh(id, Stat::Speed.into(), 20.0, 2_000, GameTime(1_000)).unwrap();
//!
//! // Refreshed, not stacked.
//! assert_eq!(clock.total_for(Stat::Speed, GameTime(1_500)), 20.0);
//! assert_eq!(clock.total_for(Stat::Speed, GameTime(3_000)), 0.0);
//! ```

mod behavior;
mod buffs;
mod modifiers;
mod procs;
mod resolver;
mod synergy;

pub use behavior::EffectBehavior;
pub use buffs::{Buff, BuffClock, BuffId, BuffSource};
pub use modifiers::ModifierAccumulator;
pub use procs::{ProcEntry, ProcRecord, ProcSummary, ProcTracker};
pub use resolver::{EffectHook, EffectResolver, EffectScope, HookTable, RuleKey, RuleState};
pub use synergy::{SynergyActivation, SynergyTracker, MAX_TIER};
