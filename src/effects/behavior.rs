//! Effect behaviors.
//!
//! Behaviors are the declarative rules an effect runs when one of its
//! trigger events fires. The catalog describes upgrades as data built from
//! these variants, so the dispatcher never switches on effect ids or names.
//!
//! ## Stateless Rules
//!
//! - `Buff`: arm or refresh a timed stat buff (refresh, never stack)
//! - `SlowMotion`: request a time-dilation factor for a while
//! - `Hook`: call a host-registered callback by name
//!
//! ## Stateful Rules
//!
//! - `EveryNth`: run a nested behavior on every n-th firing
//! - `Chance`: run a nested behavior when a seeded roll succeeds
//! - `Streak`: a level that grows on failed triggers and decays on
//!   successful ones, contributing `step × level` percent to a stat

use serde::{Deserialize, Serialize};

use crate::core::StatTarget;

/// A rule run when an effect fires.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EffectBehavior {
    /// Arm (or refresh) a timed buff keyed by this effect and target.
    Buff {
        target: StatTarget,
        percent: f64,
        duration_ms: u64,
    },

    /// Run `then` when a roll against `percent` succeeds.
    Chance {
        percent: f64,
        then: Box<EffectBehavior>,
    },

    /// Run `then` on every `n`-th firing of this rule.
    EveryNth {
        n: u32,
        then: Box<EffectBehavior>,
    },

    /// Grow one level on a failed trigger, decay one level on a
    /// successful one, never above `max_level`.
    Streak {
        target: StatTarget,
        step_percent: f64,
        max_level: u32,
    },

    /// Ask the host loop to run at `factor` speed for a while.
    SlowMotion {
        factor: f64,
        duration_ms: u64,
    },

    /// Call the host hook registered under this name.
    Hook(String),
}

impl EffectBehavior {
    /// Create a timed buff behavior.
    pub fn buff(target: impl Into<StatTarget>, percent: f64, duration_ms: u64) -> Self {
        Self::Buff {
            target: target.into(),
            percent,
            duration_ms,
        }
    }

    /// Create a chance-gated behavior.
    pub fn chance(percent: f64, then: EffectBehavior) -> Self {
        Self::Chance {
            percent,
            then: Box::new(then),
        }
    }

    /// Create an every-n-th behavior.
    pub fn every_nth(n: u32, then: EffectBehavior) -> Self {
        Self::EveryNth {
            n,
            then: Box::new(then),
        }
    }

    /// Create a streak behavior.
    pub fn streak(target: impl Into<StatTarget>, step_percent: f64, max_level: u32) -> Self {
        Self::Streak {
            target: target.into(),
            step_percent,
            max_level,
        }
    }

    /// Create a slow-motion behavior.
    pub fn slow_motion(factor: f64, duration_ms: u64) -> Self {
        Self::SlowMotion {
            factor,
            duration_ms,
        }
    }

    /// Create a host hook behavior.
    pub fn hook(name: impl Into<String>) -> Self {
        Self::Hook(name.into())
    }

    /// Every numeric parameter (including nested ones) is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Buff { percent, .. } => percent.is_finite(),
            Self::Chance { percent, then } => percent.is_finite() && then.is_finite(),
            Self::EveryNth { then, .. } => then.is_finite(),
            Self::Streak { step_percent, .. } => step_percent.is_finite(),
            Self::SlowMotion { factor, .. } => factor.is_finite(),
            Self::Hook(_) => true,
        }
    }
}
