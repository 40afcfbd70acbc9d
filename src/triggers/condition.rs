//! Trigger conditions.
//!
//! An effect bound to an event only fires when its condition holds for the
//! event's context, e.g. "on shot, while stationary" or "on tackle, when it
//! failed". A condition that doesn't hold means the effect didn't proc.

use serde::{Deserialize, Serialize};

use crate::core::EntityId;

use super::event::{EventContext, EventKind, Flag};

/// A condition that must be met for a bound effect to fire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TriggerCondition {
    // === Event Matching ===

    /// Match a specific event kind (useful for effects bound to several).
    EventIs(EventKind),

    // === Flag Filters ===

    /// Flag must be set.
    Flag(Flag),

    /// Flag must not be set.
    NotFlag(Flag),

    // === Entity Filters ===

    /// Acting player must be a specific entity.
    PlayerIs(EntityId),

    /// Target must be a specific entity.
    TargetIs(EntityId),

    /// Event must carry a target.
    HasTarget,

    // === Combinators ===

    /// All conditions must be true.
    All(Vec<TriggerCondition>),

    /// At least one condition must be true.
    Any(Vec<TriggerCondition>),

    /// Condition must be false.
    Not(Box<TriggerCondition>),

    // === Special ===

    /// Always matches (no filter).
    #[default]
    Always,

    /// Never matches (disabled binding).
    Never,
}

impl TriggerCondition {
    /// Create a flag condition.
    pub fn flag(flag: Flag) -> Self {
        Self::Flag(flag)
    }

    /// Create an AND condition.
    pub fn all(conditions: impl IntoIterator<Item = TriggerCondition>) -> Self {
        Self::All(conditions.into_iter().collect())
    }

    /// Create an OR condition.
    pub fn any(conditions: impl IntoIterator<Item = TriggerCondition>) -> Self {
        Self::Any(conditions.into_iter().collect())
    }

    /// Negate this condition.
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Add another condition with AND.
    pub fn and(self, other: TriggerCondition) -> Self {
        match self {
            Self::Always => other,
            Self::All(mut conditions) => {
                conditions.push(other);
                Self::All(conditions)
            }
            _ => Self::All(vec![self, other]),
        }
    }

    /// Add another condition with OR.
    pub fn or(self, other: TriggerCondition) -> Self {
        match self {
            Self::Any(mut conditions) => {
                conditions.push(other);
                Self::Any(conditions)
            }
            _ => Self::Any(vec![self, other]),
        }
    }
}

/// Context for evaluating trigger conditions.
#[derive(Clone, Copy, Debug)]
pub struct ConditionContext<'a> {
    /// The event being dispatched.
    pub event: EventKind,
    /// Its payload.
    pub context: &'a EventContext,
}

impl<'a> ConditionContext<'a> {
    /// Create a new context.
    pub fn new(event: EventKind, context: &'a EventContext) -> Self {
        Self { event, context }
    }
}

/// Evaluator for trigger conditions.
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Check if a condition is satisfied.
    pub fn evaluate(condition: &TriggerCondition, ctx: &ConditionContext) -> bool {
        match condition {
            TriggerCondition::EventIs(expected) => ctx.event == *expected,

            TriggerCondition::Flag(flag) => ctx.context.flags.get(*flag),

            TriggerCondition::NotFlag(flag) => !ctx.context.flags.get(*flag),

            TriggerCondition::PlayerIs(entity) => ctx.context.player == Some(*entity),

            TriggerCondition::TargetIs(entity) => ctx.context.target == Some(*entity),

            TriggerCondition::HasTarget => ctx.context.target.is_some(),

            TriggerCondition::All(conditions) => {
                conditions.iter().all(|c| Self::evaluate(c, ctx))
            }

            TriggerCondition::Any(conditions) => {
                conditions.iter().any(|c| Self::evaluate(c, ctx))
            }

            TriggerCondition::Not(inner) => !Self::evaluate(inner, ctx),

            TriggerCondition::Always => true,

            TriggerCondition::Never => false,
        }
    }
}
