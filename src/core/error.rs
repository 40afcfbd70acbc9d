//! Error types.
//!
//! Every fallible operation returns one of these enums. Nothing in the core
//! panics on bad content or bad input: a rejected pick leaves state
//! untouched, and a failing effect callback is isolated by the dispatcher.

use thiserror::Error;

use crate::catalog::{EffectId, SynergyTag};

/// Why a pick was rejected. No state is mutated when this is returned.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PickError {
    /// The catalog has no definition with this id.
    #[error("unknown effect {0}")]
    UnknownEffect(EffectId),

    /// The player already owns the maximum number of copies.
    #[error("{effect} already owned {limit} time(s), the stack limit")]
    StackLimitExceeded { effect: EffectId, limit: u32 },

    /// The definition's modifiers are not finite.
    #[error("{0} carries a non-finite modifier")]
    NonFiniteModifier(EffectId),
}

/// Error raised by an effect callback.
///
/// The dispatcher catches these per callback, logs them, and keeps going.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EffectError {
    /// The callback produced a `NaN` or infinite value.
    #[error("non-finite value for {0}")]
    NonFinite(&'static str),

    /// A `Hook` behavior names a hook nobody registered.
    #[error("no hook registered under `{0}`")]
    UnknownHook(String),

    /// The event context lacks something the callback needs.
    #[error("event context is missing {0}")]
    MissingContext(&'static str),

    /// A host hook reported a failure.
    #[error("hook failed: {0}")]
    Hook(String),
}

/// Error loading an effect, synergy or objective catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Malformed JSON or an unknown stat/event/kind name.
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two definitions share an id.
    #[error("duplicate definition id {0}")]
    DuplicateId(u32),

    /// A definition allows zero copies.
    #[error("{0} has a stack limit of zero")]
    InvalidStackLimit(EffectId),

    /// A permanent modifier or behavior parameter is `NaN` or infinite.
    #[error("{0} carries a non-finite modifier")]
    NonFiniteModifier(EffectId),

    /// Two synergy definitions share a tag.
    #[error("duplicate synergy tag `{0}`")]
    DuplicateTag(SynergyTag),

    /// A synergy tier bonus is `NaN` or infinite.
    #[error("synergy `{0}` carries a non-finite bonus")]
    NonFiniteBonus(SynergyTag),
}

/// Error loading or validating engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Malformed JSON.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Values parse but break an invariant.
    #[error("invalid config: {0}")]
    Invalid(String),
}
