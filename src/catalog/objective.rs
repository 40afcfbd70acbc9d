//! Objective definitions - what a moment asks of the player.

use serde::{Deserialize, Serialize};

use crate::core::CatalogError;

/// Kind of objective a moment runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectiveKind {
    /// Score `target` goals.
    Score,
    /// Score `target` goals (several in one moment).
    MultiGoal,
    /// Score `target` goals from penalty corners.
    PenaltyCorner,
    /// Score `target` goals off rebounds.
    ReboundGoal,
    /// Score `target` assisted goals.
    Assist,
    /// Hold a strict lead until the timer runs out.
    Defend,
    /// Concede nothing until the timer runs out.
    Survive,
    /// Win the ball back `target` times.
    Turnover,
    /// A kind this build doesn't know. Never wins.
    #[serde(other)]
    Unknown,
}

impl ObjectiveKind {
    /// Is this one of the goal-counting kinds?
    #[must_use]
    pub fn is_scoring(self) -> bool {
        matches!(
            self,
            Self::Score | Self::MultiGoal | Self::PenaltyCorner | Self::ReboundGoal | Self::Assist
        )
    }
}

/// Static objective definition for one moment.
///
/// ## Example
///
/// ```
/// use rogue_pitch::catalog::{ObjectiveDefinition, ObjectiveKind};
///
/// let hold_on = ObjectiveDefinition::new(ObjectiveKind::Defend, 30_000)
///     .with_name("Hold the lead")
///     .with_starting_score(1, 0)
///     .boss();
///
/// assert!(hold_on.boss);
/// assert_eq!(hold_on.starting_score_for, 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveDefinition {
    #[serde(default)]
    pub name: String,

    pub kind: ObjectiveKind,

    /// Moment length.
    pub duration_ms: u64,

    /// Progress needed to win, for progress-based kinds.
    #[serde(default = "default_target")]
    pub target: u32,

    /// Boss moments count separately in the run totals.
    #[serde(default)]
    pub boss: bool,

    /// Score the moment opens with.
    #[serde(default)]
    pub starting_score_for: u32,

    #[serde(default)]
    pub starting_score_against: u32,
}

fn default_target() -> u32 {
    1
}

impl ObjectiveDefinition {
    /// Create a non-boss objective with a target of 1 and a 0-0 start.
    #[must_use]
    pub fn new(kind: ObjectiveKind, duration_ms: u64) -> Self {
        Self {
            name: String::new(),
            kind,
            duration_ms,
            target: default_target(),
            boss: false,
            starting_score_for: 0,
            starting_score_against: 0,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: u32) -> Self {
        self.target = target;
        self
    }

    /// Mark as a boss moment (builder pattern).
    #[must_use]
    pub fn boss(mut self) -> Self {
        self.boss = true;
        self
    }

    #[must_use]
    pub fn with_starting_score(mut self, score_for: u32, score_against: u32) -> Self {
        self.starting_score_for = score_for;
        self.starting_score_against = score_against;
        self
    }

    /// Parse a JSON array of objective definitions.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }
}
