//! Synergy definitions.

use serde::{Deserialize, Serialize};

use crate::core::{StatModifier, StatTarget};

use super::definition::SynergyTag;

/// Bonus sets granted when a tag reaches a tier.
///
/// `tier2` is the delta applied on top of `tier1`; reaching tier 2 never
/// re-applies the tier-1 set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynergyDefinition {
    pub tag: SynergyTag,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub tier1: Vec<StatModifier>,

    #[serde(default)]
    pub tier2: Vec<StatModifier>,
}

impl SynergyDefinition {
    /// Create a definition with empty bonus sets.
    pub fn new(tag: impl Into<SynergyTag>) -> Self {
        let tag = tag.into();
        Self {
            name: tag.to_string(),
            tag,
            tier1: Vec::new(),
            tier2: Vec::new(),
        }
    }

    /// Set the display name (builder pattern).
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Add a tier-1 bonus (builder pattern).
    #[must_use]
    pub fn with_tier1(mut self, target: impl Into<StatTarget>, percent: f64) -> Self {
        self.tier1.push(StatModifier::new(target, percent));
        self
    }

    /// Add a tier-2 bonus (builder pattern).
    #[must_use]
    pub fn with_tier2(mut self, target: impl Into<StatTarget>, percent: f64) -> Self {
        self.tier2.push(StatModifier::new(target, percent));
        self
    }

    /// Bonus set for a tier. Tiers outside 1..=2 grant nothing.
    #[must_use]
    pub fn bonus_for(&self, tier: u8) -> &[StatModifier] {
        match tier {
            1 => &self.tier1,
            2 => &self.tier2,
            _ => &[],
        }
    }

    /// Every bonus is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.tier1.iter().chain(&self.tier2).all(StatModifier::is_finite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Stat;

    #[test]
    fn test_bonus_for_tier() {
        let pace = SynergyDefinition::new("pace")
            .with_tier1(Stat::Speed, 10.0)
            .with_tier2(Stat::Speed, 15.0)
            .with_tier2(StatTarget::All, 2.0);

        assert_eq!(pace.name, "pace");
        assert_eq!(pace.bonus_for(1).len(), 1);
        assert_eq!(pace.bonus_for(2).len(), 2);
        assert!(pace.bonus_for(0).is_empty());
        assert!(pace.bonus_for(3).is_empty());
    }

    #[test]
    fn test_from_json() {
        let json = r#"{ "tag": "enforcer", "tier1": [{ "target": "tackle", "percent": 10 }] }"#;
        let def: SynergyDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.tag, SynergyTag::new("enforcer"));
        assert!(def.tier2.is_empty());
        assert!(def.is_finite());
    }
}
