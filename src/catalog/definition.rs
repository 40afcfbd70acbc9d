//! Effect definitions - static upgrade data.
//!
//! `EffectDefinition` holds the immutable description of an upgrade:
//! which events it listens to, what permanent stat deltas it grants, which
//! rules run when it fires, which synergy tags it carries and how many
//! copies a player may own. Definitions are referenced by id and never
//! mutated; everything a run accumulates lives in the engine.

use serde::{Deserialize, Serialize};

use crate::core::{StatModifier, StatTarget};
use crate::effects::EffectBehavior;
use crate::triggers::{EventKind, TriggerCondition};

/// Unique identifier for an effect definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EffectId(pub u32);

impl EffectId {
    /// Create a new effect ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EffectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Effect({})", self.0)
    }
}

/// Synergy tag grouping effects (e.g. "pace", "enforcer").
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SynergyTag(pub String);

impl SynergyTag {
    /// Create a new tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The tag text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SynergyTag {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for SynergyTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display rarity of an upgrade. The core doesn't interpret it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Static effect definition.
///
/// ## Example
///
/// ```
/// use rogue_pitch::catalog::{EffectDefinition, EffectId};
/// use rogue_pitch::core::Stat;
///
/// let boots = EffectDefinition::new(EffectId::new(1), "Turbo Boots")
///     .with_modifier(Stat::Speed, 10.0)
///     .with_tag("pace")
///     .with_stack_limit(3);
///
/// assert_eq!(boots.stack_limit, 3);
/// assert_eq!(boots.modifiers.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectDefinition {
    /// Unique identifier for this definition.
    pub id: EffectId,

    /// Display name.
    pub name: String,

    /// Display description.
    #[serde(default)]
    pub description: String,

    /// Display rarity.
    #[serde(default)]
    pub rarity: Rarity,

    /// Events this effect's behaviors listen for.
    #[serde(default)]
    pub triggers: Vec<EventKind>,

    /// Filter applied before the behaviors run.
    #[serde(default)]
    pub condition: TriggerCondition,

    /// Permanent percentage deltas granted per owned copy.
    #[serde(default)]
    pub modifiers: Vec<StatModifier>,

    /// Rules run when a trigger event fires and the condition holds.
    #[serde(default)]
    pub behaviors: Vec<EffectBehavior>,

    /// Synergy tags this effect counts toward.
    #[serde(default)]
    pub synergy_tags: Vec<SynergyTag>,

    /// Maximum simultaneous copies.
    #[serde(default = "default_stack_limit")]
    pub stack_limit: u32,
}

fn default_stack_limit() -> u32 {
    1
}

impl EffectDefinition {
    /// Create a new definition with a stack limit of 1 and nothing else.
    #[must_use]
    pub fn new(id: EffectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            rarity: Rarity::default(),
            triggers: Vec::new(),
            condition: TriggerCondition::Always,
            modifiers: Vec::new(),
            behaviors: Vec::new(),
            synergy_tags: Vec::new(),
            stack_limit: default_stack_limit(),
        }
    }

    /// Set the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the rarity (builder pattern).
    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Listen for an event (builder pattern).
    #[must_use]
    pub fn on(mut self, event: EventKind) -> Self {
        if !self.triggers.contains(&event) {
            self.triggers.push(event);
        }
        self
    }

    /// Set the trigger condition (builder pattern).
    #[must_use]
    pub fn with_condition(mut self, condition: TriggerCondition) -> Self {
        self.condition = condition;
        self
    }

    /// Add a permanent modifier (builder pattern).
    #[must_use]
    pub fn with_modifier(mut self, target: impl Into<StatTarget>, percent: f64) -> Self {
        self.modifiers.push(StatModifier::new(target, percent));
        self
    }

    /// Add a behavior (builder pattern).
    #[must_use]
    pub fn with_behavior(mut self, behavior: EffectBehavior) -> Self {
        self.behaviors.push(behavior);
        self
    }

    /// Add a synergy tag (builder pattern).
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<SynergyTag>) -> Self {
        self.synergy_tags.push(tag.into());
        self
    }

    /// Set the stack limit (builder pattern).
    #[must_use]
    pub fn with_stack_limit(mut self, limit: u32) -> Self {
        self.stack_limit = limit;
        self
    }

    /// Does this effect react to events at all?
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        !self.triggers.is_empty() && !self.behaviors.is_empty()
    }
}
