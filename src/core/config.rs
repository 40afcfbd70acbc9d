//! Engine configuration.
//!
//! Tuning constants the engine reads at construction:
//! - `SynergyConfig`: tier thresholds
//! - `GiveAndGoConfig`: combo window and bonus
//! - `PlayCallConfig`: active duration, cooldown and per-call bonuses
//! - `ProcConfig`: feedback log size and throttle
//!
//! Every struct has sensible defaults, so games only override what they
//! tune. Configs can be loaded from JSON and must pass `validate`.

use serde::{Deserialize, Serialize};

use crate::tactics::PlayCallKind;

use super::error::ConfigError;
use super::stat::{Stat, StatModifier};

/// Synergy tier thresholds (owned-effect counts per tag).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SynergyConfig {
    /// Count at which tier 1 activates.
    pub tier1_threshold: u32,
    /// Count at which tier 2 activates.
    pub tier2_threshold: u32,
}

impl Default for SynergyConfig {
    fn default() -> Self {
        Self {
            tier1_threshold: 3,
            tier2_threshold: 5,
        }
    }
}

/// Give-and-go combo tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GiveAndGoConfig {
    /// Maximum pass-to-return delay, inclusive.
    pub window_ms: u64,
    /// Buff magnitude applied to each bonus stat.
    pub bonus_percent: f64,
    /// Buff duration.
    pub bonus_duration_ms: u64,
    /// Stats that receive the bonus.
    pub bonus_stats: Vec<Stat>,
}

impl Default for GiveAndGoConfig {
    fn default() -> Self {
        Self {
            window_ms: 3_500,
            bonus_percent: 15.0,
            bonus_duration_ms: 3_000,
            bonus_stats: vec![Stat::Speed, Stat::Control, Stat::Power],
        }
    }
}

/// Team-wide stat bonus granted while a play call is active.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayCallBonus {
    /// The call granting the bonus.
    pub kind: PlayCallKind,
    /// The bonus itself.
    pub modifier: StatModifier,
}

/// Play-call timing and bonuses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayCallConfig {
    /// How long a call stays active.
    pub duration_ms: u64,
    /// Cooldown measured from the moment of the call.
    pub cooldown_ms: u64,
    /// Bonuses per call kind.
    pub bonuses: Vec<PlayCallBonus>,
}

impl Default for PlayCallConfig {
    fn default() -> Self {
        let bonus = |kind, stat, percent| PlayCallBonus {
            kind,
            modifier: StatModifier::new(stat, percent),
        };
        Self {
            duration_ms: 8_000,
            cooldown_ms: 20_000,
            bonuses: vec![
                bonus(PlayCallKind::Press, Stat::Speed, 10.0),
                bonus(PlayCallKind::Press, Stat::Tackle, 15.0),
                bonus(PlayCallKind::Hold, Stat::Control, 15.0),
                bonus(PlayCallKind::Hold, Stat::Stamina, 10.0),
                bonus(PlayCallKind::Counter, Stat::Power, 10.0),
                bonus(PlayCallKind::Counter, Stat::Speed, 5.0),
            ],
        }
    }
}

impl PlayCallConfig {
    /// Bonuses granted by one call kind.
    pub fn bonuses_for(&self, kind: PlayCallKind) -> impl Iterator<Item = &StatModifier> {
        self.bonuses
            .iter()
            .filter(move |b| b.kind == kind)
            .map(|b| &b.modifier)
    }
}

/// Proc log tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProcConfig {
    /// Capacity of the recent-proc ring buffer.
    pub ring_capacity: usize,
    /// Minimum gap between two feedback notifications for one effect.
    pub feedback_interval_ms: u64,
}

impl Default for ProcConfig {
    fn default() -> Self {
        Self {
            ring_capacity: 32,
            feedback_interval_ms: 400,
        }
    }
}

/// Complete engine configuration.
///
/// ```
/// use rogue_pitch::core::EngineConfig;
///
/// let config = EngineConfig::from_json(r#"{ "seed": 7, "synergy": { "tier1Threshold": 2 } }"#)
///     .unwrap();
/// assert_eq!(config.seed, 7);
/// assert_eq!(config.synergy.tier1_threshold, 2);
/// assert_eq!(config.synergy.tier2_threshold, 5);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Synergy tiers.
    pub synergy: SynergyConfig,
    /// Give-and-go combo.
    pub give_and_go: GiveAndGoConfig,
    /// Play calls.
    pub play_calls: PlayCallConfig,
    /// Proc tracking.
    pub procs: ProcConfig,
    /// Seed for chance-based effects.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            synergy: SynergyConfig::default(),
            give_and_go: GiveAndGoConfig::default(),
            play_calls: PlayCallConfig::default(),
            procs: ProcConfig::default(),
            seed: 42,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the RNG seed (builder pattern).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set synergy thresholds (builder pattern).
    #[must_use]
    pub fn with_synergy_thresholds(mut self, tier1: u32, tier2: u32) -> Self {
        self.synergy = SynergyConfig {
            tier1_threshold: tier1,
            tier2_threshold: tier2,
        };
        self
    }

    /// Set the give-and-go window (builder pattern).
    #[must_use]
    pub fn with_give_and_go_window(mut self, window_ms: u64) -> Self {
        self.give_and_go.window_ms = window_ms;
        self
    }

    /// Set play-call duration and cooldown (builder pattern).
    #[must_use]
    pub fn with_play_call_timing(mut self, duration_ms: u64, cooldown_ms: u64) -> Self {
        self.play_calls.duration_ms = duration_ms;
        self.play_calls.cooldown_ms = cooldown_ms;
        self
    }

    /// Set proc log capacity and feedback throttle (builder pattern).
    #[must_use]
    pub fn with_procs(mut self, ring_capacity: usize, feedback_interval_ms: u64) -> Self {
        self.procs = ProcConfig {
            ring_capacity,
            feedback_interval_ms,
        };
        self
    }

    /// Check invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.synergy.tier1_threshold == 0 {
            return Err(ConfigError::Invalid("tier 1 threshold must be positive".into()));
        }
        if self.synergy.tier2_threshold <= self.synergy.tier1_threshold {
            return Err(ConfigError::Invalid(format!(
                "tier 2 threshold ({}) must exceed tier 1 threshold ({})",
                self.synergy.tier2_threshold, self.synergy.tier1_threshold
            )));
        }
        if self.procs.ring_capacity == 0 {
            return Err(ConfigError::Invalid("proc ring capacity must be positive".into()));
        }
        if !self.give_and_go.bonus_percent.is_finite() {
            return Err(ConfigError::Invalid("give-and-go bonus is not finite".into()));
        }
        if self.play_calls.bonuses.iter().any(|b| !b.modifier.is_finite()) {
            return Err(ConfigError::Invalid("play-call bonus is not finite".into()));
        }
        Ok(())
    }
}
