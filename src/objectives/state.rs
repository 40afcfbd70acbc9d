//! Per-moment objective state machine.
//!
//! `NotStarted -> Running -> Completed { won }`. Completion is terminal:
//! once a moment is decided, events and ticks are ignored.
//!
//! Win and lose predicates are checked after every event that changes
//! state and after every tick:
//!
//! | Kind | Win | Lose |
//! |---|---|---|
//! | scoring kinds, turnover | progress reaches target | timer runs out first |
//! | defend | timer runs out with a strict lead | conceded level or behind, any time |
//! | survive | timer runs out with nothing conceded | any goal against |
//! | unknown | never | timer runs out |

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::{ObjectiveDefinition, ObjectiveKind};
use crate::triggers::{EventContext, EventKind};

/// Lifecycle phase of a moment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectivePhase {
    #[default]
    NotStarted,
    Running,
    Completed { won: bool },
}

/// Read-only view of a moment for the HUD and the run accumulator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveSnapshot {
    pub kind: ObjectiveKind,
    pub progress: u32,
    pub target: u32,
    pub time_remaining_ms: u64,
    pub score_for: u32,
    pub score_against: u32,
    pub completed: bool,
    pub won: bool,
}

/// State of one moment's objective.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveState {
    kind: ObjectiveKind,
    target: u32,
    boss: bool,
    time_remaining_ms: u64,
    score_for: u32,
    score_against: u32,
    goals_for: u32,
    goals_against: u32,
    rebound_goals: u32,
    progress: u32,
    phase: ObjectivePhase,
}

impl ObjectiveState {
    /// Fresh state for a moment, not yet started.
    #[must_use]
    pub fn new(def: &ObjectiveDefinition) -> Self {
        Self {
            kind: def.kind,
            target: def.target,
            boss: def.boss,
            time_remaining_ms: def.duration_ms,
            score_for: def.starting_score_for,
            score_against: def.starting_score_against,
            goals_for: 0,
            goals_against: 0,
            rebound_goals: 0,
            progress: 0,
            phase: ObjectivePhase::NotStarted,
        }
    }

    /// Start the moment. Does nothing unless not yet started.
    ///
    /// The predicates are checked straight away, so a `defend` moment
    /// without a starting lead is lost on the spot.
    pub fn start(&mut self) {
        if self.phase != ObjectivePhase::NotStarted {
            return;
        }
        self.phase = ObjectivePhase::Running;
        debug!(kind = ?self.kind, goal_target = self.target, time_ms = self.time_remaining_ms, "moment started");
        self.evaluate();
    }

    /// Feed a gameplay event. Returns `true` if the state changed.
    pub fn apply(&mut self, event: EventKind, ctx: &EventContext) -> bool {
        if self.phase != ObjectivePhase::Running {
            return false;
        }

        match event {
            EventKind::GoalFor => {
                self.score_for += 1;
                self.goals_for += 1;
                if ctx.flags.is_rebound {
                    self.rebound_goals += 1;
                }
                if self.counts_goal(ctx) {
                    self.progress += 1;
                }
            }
            EventKind::GoalAgainst => {
                self.score_against += 1;
                self.goals_against += 1;
            }
            EventKind::Steal if self.kind == ObjectiveKind::Turnover => {
                if ctx.flags.success == Some(false) {
                    return false;
                }
                self.progress += 1;
            }
            _ => return false,
        }

        self.evaluate();
        true
    }

    fn counts_goal(&self, ctx: &EventContext) -> bool {
        match self.kind {
            ObjectiveKind::Score | ObjectiveKind::MultiGoal => true,
            ObjectiveKind::PenaltyCorner => ctx.flags.from_penalty_corner,
            ObjectiveKind::ReboundGoal => ctx.flags.is_rebound,
            ObjectiveKind::Assist => ctx.flags.assisted,
            _ => false,
        }
    }

    /// Advance the timer. Returns `true` if this tick completed the moment.
    pub fn tick(&mut self, delta_ms: u64) -> bool {
        if self.phase != ObjectivePhase::Running {
            return false;
        }
        self.time_remaining_ms = self.time_remaining_ms.saturating_sub(delta_ms);
        self.evaluate();
        self.is_completed()
    }

    fn evaluate(&mut self) {
        let timer_done = self.time_remaining_ms == 0;
        let outcome = match self.kind {
            kind if kind.is_scoring() || kind == ObjectiveKind::Turnover => {
                if self.progress >= self.target {
                    Some(true)
                } else if timer_done {
                    Some(false)
                } else {
                    None
                }
            }
            ObjectiveKind::Defend => {
                if self.score_against >= self.score_for {
                    Some(false)
                } else if timer_done {
                    Some(true)
                } else {
                    None
                }
            }
            ObjectiveKind::Survive => {
                if self.score_against > 0 {
                    Some(false)
                } else if timer_done {
                    Some(true)
                } else {
                    None
                }
            }
            _ => timer_done.then_some(false),
        };

        if let Some(won) = outcome {
            self.phase = ObjectivePhase::Completed { won };
            info!(
                kind = ?self.kind,
                won,
                score_for = self.score_for,
                score_against = self.score_against,
                progress = self.progress,
                "moment completed"
            );
        }
    }

    // === Queries ===

    #[must_use]
    pub fn phase(&self) -> ObjectivePhase {
        self.phase
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self.phase, ObjectivePhase::Completed { .. })
    }

    /// `Some(won)` once completed.
    #[must_use]
    pub fn outcome(&self) -> Option<bool> {
        match self.phase {
            ObjectivePhase::Completed { won } => Some(won),
            _ => None,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ObjectiveKind {
        self.kind
    }

    #[must_use]
    pub fn is_boss(&self) -> bool {
        self.boss
    }

    /// Goals scored during the moment (excludes the starting score).
    #[must_use]
    pub fn goals_for(&self) -> u32 {
        self.goals_for
    }

    /// Goals conceded during the moment (excludes the starting score).
    #[must_use]
    pub fn goals_against(&self) -> u32 {
        self.goals_against
    }

    #[must_use]
    pub fn rebound_goals(&self) -> u32 {
        self.rebound_goals
    }

    /// Current values for display.
    #[must_use]
    pub fn snapshot(&self) -> ObjectiveSnapshot {
        ObjectiveSnapshot {
            kind: self.kind,
            progress: self.progress,
            target: self.target,
            time_remaining_ms: self.time_remaining_ms,
            score_for: self.score_for,
            score_against: self.score_against,
            completed: self.is_completed(),
            won: self.outcome() == Some(true),
        }
    }
}
