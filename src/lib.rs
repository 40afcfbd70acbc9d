//! # rogue-pitch
//!
//! Gameplay simulation core for a roguelike sports arcade: an effect engine
//! that composes data-defined upgrades, and a per-moment objective state
//! machine feeding a run-level reward economy.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: No wall clock, no hidden randomness. The host
//!    passes `GameTime` into every time-dependent call and chance rolls use
//!    a seeded RNG, so a recorded (seed, picks, events, times) log replays
//!    exactly.
//!
//! 2. **Data-Driven**: Upgrades are catalog data built from declarative
//!    behaviors. Nothing dispatches on effect names.
//!
//! 3. **Fail Soft**: A rejected pick mutates nothing, and a failing effect
//!    callback is logged and skipped without aborting the tick.
//!
//! ## Architecture
//!
//! - **Explicit Values**: The `Engine` is a plain struct built from a shared
//!   catalog and a config. Resetting a run means building a fresh one.
//!
//! - **Typed Event Bus**: Notifications go to an `EventBus` the caller
//!   passes in, not to global subscribers.
//!
//! - **Lazy Expiry**: Buffs, combo windows and play calls are comparisons
//!   against the caller's clock; nothing runs on a timer.
//!
//! ## Modules
//!
//! - `core`: Ids, time, stats, RNG, configuration, errors
//! - `catalog`: Effect, synergy and objective definitions
//! - `triggers`: Gameplay events, trigger conditions, notification bus
//! - `effects`: Behaviors, modifiers, buffs, synergies, procs
//! - `tactics`: Give-and-go detector and play calls
//! - `engine`: The effect registry and dispatcher
//! - `objectives`: Per-moment objective state machine
//! - `run`: Run totals and rewards

pub mod catalog;
pub mod core;
pub mod effects;
pub mod engine;
pub mod objectives;
pub mod run;
pub mod tactics;
pub mod triggers;

// Re-export commonly used types
pub use crate::core::{
    CatalogError, ConfigError, EffectError, EngineConfig, EntityId, GameRng, GameTime, PickError,
    Stat, StatModifier, StatTarget,
};

pub use crate::catalog::{
    EffectCatalog, EffectDefinition, EffectId, ObjectiveDefinition, ObjectiveKind, Rarity,
    SynergyDefinition, SynergyTag,
};

pub use crate::triggers::{
    EventBus, EventContext, EventKind, Flag, Notification, NotificationLog, TriggerCondition,
};

pub use crate::effects::{Buff, BuffId, EffectBehavior, EffectScope, ProcSummary};

pub use crate::tactics::PlayCallKind;

pub use crate::engine::Engine;

pub use crate::objectives::{ObjectivePhase, ObjectiveSnapshot, ObjectiveState};

pub use crate::run::{RewardBreakdown, RewardConfig, RunAccumulator, RunSummary};
