//! Player stats and the enum-indexed modifier table.
//!
//! Stats are an exhaustive enum rather than string keys, so an effect that
//! names a stat the game doesn't have fails when the catalog is parsed
//! instead of silently contributing nothing.
//!
//! `StatTarget` adds the reserved `"all"` key: a modifier aimed at `all`
//! applies to every stat.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A player stat that effects can modify.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stat {
    /// Movement speed.
    Speed,
    /// Shot and pass power.
    Power,
    /// Ball control / dribbling.
    Control,
    /// Shot and pass accuracy.
    Accuracy,
    /// Stamina pool and regeneration.
    Stamina,
    /// Tackle reach and strength.
    Tackle,
    /// Dodge distance.
    Dodge,
}

impl Stat {
    /// Number of stats.
    pub const COUNT: usize = 7;

    /// Every stat, in table order.
    pub const ALL: [Stat; Stat::COUNT] = [
        Stat::Speed,
        Stat::Power,
        Stat::Control,
        Stat::Accuracy,
        Stat::Stamina,
        Stat::Tackle,
        Stat::Dodge,
    ];

    /// Position of this stat in a `StatTable`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Canonical lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Stat::Speed => "speed",
            Stat::Power => "power",
            Stat::Control => "control",
            Stat::Accuracy => "accuracy",
            Stat::Stamina => "stamina",
            Stat::Tackle => "tackle",
            Stat::Dodge => "dodge",
        }
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stat::ALL
            .iter()
            .copied()
            .find(|stat| stat.name() == s)
            .ok_or_else(|| format!("unknown stat `{s}`"))
    }
}

/// What a modifier or buff applies to: one stat, or every stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatTarget {
    /// The reserved `"all"` key.
    All,
    /// A single stat.
    Stat(Stat),
}

impl StatTarget {
    /// Does a contribution aimed at this target apply to `stat`?
    #[must_use]
    pub fn applies_to(self, stat: Stat) -> bool {
        match self {
            StatTarget::All => true,
            StatTarget::Stat(s) => s == stat,
        }
    }
}

impl From<Stat> for StatTarget {
    fn from(stat: Stat) -> Self {
        StatTarget::Stat(stat)
    }
}

impl FromStr for StatTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(StatTarget::All)
        } else {
            s.parse().map(StatTarget::Stat)
        }
    }
}

impl TryFrom<String> for StatTarget {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<StatTarget> for String {
    fn from(target: StatTarget) -> Self {
        target.to_string()
    }
}

impl std::fmt::Display for StatTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatTarget::All => f.write_str("all"),
            StatTarget::Stat(stat) => write!(f, "{stat}"),
        }
    }
}

/// A percentage delta aimed at a stat target, e.g. `+10% speed`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatModifier {
    /// Stat (or `all`) the delta applies to.
    pub target: StatTarget,
    /// Percentage delta; `10.0` means +10%.
    pub percent: f64,
}

impl StatModifier {
    /// Create a new modifier.
    #[must_use]
    pub fn new(target: impl Into<StatTarget>, percent: f64) -> Self {
        Self {
            target: target.into(),
            percent,
        }
    }

    /// Modifier applying to every stat.
    #[must_use]
    pub fn all(percent: f64) -> Self {
        Self::new(StatTarget::All, percent)
    }

    /// Is the delta a finite number?
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.percent.is_finite()
    }
}

/// Fixed-size table of percentage values, one slot per stat plus `all`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatTable {
    per_stat: [f64; Stat::COUNT],
    all: f64,
}

impl StatTable {
    /// Create a zeroed table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value stored for a target (no `all` folding).
    #[must_use]
    pub fn get(&self, target: StatTarget) -> f64 {
        match target {
            StatTarget::All => self.all,
            StatTarget::Stat(stat) => self.per_stat[stat.index()],
        }
    }

    /// Add `delta` to the slot for `target`.
    pub fn add(&mut self, target: StatTarget, delta: f64) {
        match target {
            StatTarget::All => self.all += delta,
            StatTarget::Stat(stat) => self.per_stat[stat.index()] += delta,
        }
    }

    /// Value for `stat` including the `all` slot.
    #[must_use]
    pub fn effective(&self, stat: Stat) -> f64 {
        self.per_stat[stat.index()] + self.all
    }

    /// Iterate over non-zero slots.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (StatTarget, f64)> + '_ {
        Stat::ALL
            .iter()
            .map(|&stat| (StatTarget::Stat(stat), self.per_stat[stat.index()]))
            .chain(std::iter::once((StatTarget::All, self.all)))
            .filter(|(_, v)| *v != 0.0)
    }

    /// Every slot, and every slot combined with `all`, is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.all.is_finite() && Stat::ALL.iter().all(|&stat| self.effective(stat).is_finite())
    }

    /// Reset every slot to zero.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
