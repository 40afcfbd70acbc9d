//! Core types: entity refs, caller-supplied time, stats, RNG, configuration, errors.
//!
//! Everything here is leaf-level and has no gameplay behavior of its own.

pub mod config;
pub mod entity;
pub mod error;
pub mod rng;
pub mod stat;
pub mod time;

pub use config::{
    EngineConfig, GiveAndGoConfig, PlayCallBonus, PlayCallConfig, ProcConfig, SynergyConfig,
};
pub use entity::EntityId;
pub use error::{CatalogError, ConfigError, EffectError, PickError};
pub use rng::{GameRng, GameRngState};
pub use stat::{Stat, StatModifier, StatTable, StatTarget};
pub use time::GameTime;
