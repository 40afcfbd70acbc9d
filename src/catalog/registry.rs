//! Effect catalog for definition lookup.
//!
//! The `EffectCatalog` stores every effect and synergy definition a game
//! ships with. It is built once, validated on the way in, and then shared
//! read-only (the engine holds it behind an `Arc`).

use rustc_hash::FxHashMap;
use serde::Deserialize;
use tracing::debug;

use crate::core::CatalogError;

use super::definition::{EffectDefinition, EffectId, SynergyTag};
use super::synergy::SynergyDefinition;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogFile {
    #[serde(default)]
    effects: Vec<EffectDefinition>,
    #[serde(default)]
    synergies: Vec<SynergyDefinition>,
}

/// Catalog of effect and synergy definitions.
///
/// ## Example
///
/// ```
/// use rogue_pitch::catalog::{EffectCatalog, EffectDefinition, EffectId};
/// use rogue_pitch::core::Stat;
///
/// let mut catalog = EffectCatalog::new();
/// catalog
///     .register(EffectDefinition::new(EffectId::new(1), "Turbo Boots").with_modifier(Stat::Speed, 10.0))
///     .unwrap();
///
/// assert_eq!(catalog.get(EffectId::new(1)).unwrap().name, "Turbo Boots");
/// assert!(catalog.register(EffectDefinition::new(EffectId::new(1), "Again")).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct EffectCatalog {
    effects: FxHashMap<EffectId, EffectDefinition>,
    synergies: FxHashMap<SynergyTag, SynergyDefinition>,
}

impl EffectCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from JSON of the form
    /// `{ "effects": [...], "synergies": [...] }`.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for effect in file.effects {
            catalog.register(effect)?;
        }
        for synergy in file.synergies {
            catalog.register_synergy(synergy)?;
        }
        debug!(
            effects = catalog.effects.len(),
            synergies = catalog.synergies.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Register an effect definition.
    ///
    /// Rejects duplicate ids, a zero stack limit and non-finite numbers.
    pub fn register(&mut self, effect: EffectDefinition) -> Result<(), CatalogError> {
        if self.effects.contains_key(&effect.id) {
            return Err(CatalogError::DuplicateId(effect.id.raw()));
        }
        if effect.stack_limit == 0 {
            return Err(CatalogError::InvalidStackLimit(effect.id));
        }
        let finite = effect.modifiers.iter().all(|m| m.is_finite())
            && effect.behaviors.iter().all(|b| b.is_finite());
        if !finite {
            return Err(CatalogError::NonFiniteModifier(effect.id));
        }
        self.effects.insert(effect.id, effect);
        Ok(())
    }

    /// Register a synergy definition.
    pub fn register_synergy(&mut self, synergy: SynergyDefinition) -> Result<(), CatalogError> {
        if self.synergies.contains_key(&synergy.tag) {
            return Err(CatalogError::DuplicateTag(synergy.tag));
        }
        if !synergy.is_finite() {
            return Err(CatalogError::NonFiniteBonus(synergy.tag));
        }
        self.synergies.insert(synergy.tag.clone(), synergy);
        Ok(())
    }

    /// Get an effect definition by ID.
    #[must_use]
    pub fn get(&self, id: EffectId) -> Option<&EffectDefinition> {
        self.effects.get(&id)
    }

    /// Check if an effect ID is registered.
    #[must_use]
    pub fn contains(&self, id: EffectId) -> bool {
        self.effects.contains_key(&id)
    }

    /// Get the synergy definition for a tag.
    #[must_use]
    pub fn synergy(&self, tag: &SynergyTag) -> Option<&SynergyDefinition> {
        self.synergies.get(tag)
    }

    /// Number of registered effects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Check if no effects are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Iterate over all effect definitions.
    pub fn iter(&self) -> impl Iterator<Item = &EffectDefinition> {
        self.effects.values()
    }

    /// Iterate over all synergy definitions.
    pub fn synergies(&self) -> impl Iterator<Item = &SynergyDefinition> {
        self.synergies.values()
    }

    /// Effects carrying `tag`.
    pub fn with_tag<'a>(&'a self, tag: &'a SynergyTag) -> impl Iterator<Item = &'a EffectDefinition> {
        self.effects.values().filter(move |e| e.synergy_tags.contains(tag))
    }

    /// Find effects matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &EffectDefinition>
    where
        F: Fn(&EffectDefinition) -> bool,
    {
        self.effects.values().filter(move |e| predicate(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Stat;
    use crate::effects::EffectBehavior;
    use crate::triggers::EventKind;

    #[test]
    fn test_register_and_get() {
        let mut catalog = EffectCatalog::new();
        catalog
            .register(EffectDefinition::new(EffectId::new(1), "Boots"))
            .unwrap();

        assert!(catalog.contains(EffectId::new(1)));
        assert_eq!(catalog.get(EffectId::new(1)).unwrap().name, "Boots");
        assert!(catalog.get(EffectId::new(99)).is_none());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_rejects_duplicate_id() {
        let mut catalog = EffectCatalog::new();
        catalog.register(EffectDefinition::new(EffectId::new(1), "A")).unwrap();
        let err = catalog
            .register(EffectDefinition::new(EffectId::new(1), "B"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(1)));
        assert_eq!(catalog.get(EffectId::new(1)).unwrap().name, "A");
    }

    #[test]
    fn test_rejects_zero_stack_limit_and_non_finite() {
        let mut catalog = EffectCatalog::new();
        let zero = EffectDefinition::new(EffectId::new(1), "Zero").with_stack_limit(0);
        assert!(matches!(
            catalog.register(zero),
            Err(CatalogError::InvalidStackLimit(_))
        ));

        let nan = EffectDefinition::new(EffectId::new(2), "NaN").with_modifier(Stat::Speed, f64::NAN);
        assert!(matches!(
            catalog.register(nan),
            Err(CatalogError::NonFiniteModifier(_))
        ));

        let inf_buff = EffectDefinition::new(EffectId::new(3), "Inf")
            .on(EventKind::Shot)
            .with_behavior(EffectBehavior::buff(Stat::Power, f64::INFINITY, 100));
        assert!(catalog.register(inf_buff).is_err());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_with_tag_and_find() {
        let mut catalog = EffectCatalog::new();
        catalog
            .register(EffectDefinition::new(EffectId::new(1), "A").with_tag("pace"))
            .unwrap();
        catalog
            .register(EffectDefinition::new(EffectId::new(2), "B").with_tag("grit"))
            .unwrap();
        catalog
            .register(EffectDefinition::new(EffectId::new(3), "C").with_tag("pace").with_stack_limit(3))
            .unwrap();

        let pace = SynergyTag::new("pace");
        assert_eq!(catalog.with_tag(&pace).count(), 2);
        assert_eq!(catalog.find(|e| e.stack_limit > 1).count(), 1);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "effects": [
                { "id": 1, "name": "Sprinter", "modifiers": [{ "target": "speed", "percent": 10 }],
                  "synergyTags": ["pace"], "stackLimit": 3 },
                { "id": 2, "name": "Poacher", "triggers": ["shot"],
                  "condition": { "flag": "isStationary" },
                  "behaviors": [{ "buff": { "target": "power", "percent": 20, "durationMs": 2000 } }] }
            ],
            "synergies": [
                { "tag": "pace", "tier1": [{ "target": "speed", "percent": 5 }] }
            ]
        }"#;
        let catalog = EffectCatalog::from_json(json).unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.get(EffectId::new(2)).unwrap().is_triggered());
        assert_eq!(catalog.synergy(&SynergyTag::new("pace")).unwrap().tier1.len(), 1);
        assert_eq!(catalog.synergies().count(), 1);
    }

    #[test]
    fn test_from_json_rejects_duplicates() {
        let json = r#"{ "effects": [{ "id": 1, "name": "A" }, { "id": 1, "name": "B" }] }"#;
        assert!(matches!(
            EffectCatalog::from_json(json),
            Err(CatalogError::DuplicateId(1))
        ));

        let json = r#"{ "synergies": [{ "tag": "pace" }, { "tag": "pace" }] }"#;
        assert!(matches!(
            EffectCatalog::from_json(json),
            Err(CatalogError::DuplicateTag(_))
        ));
    }
}
