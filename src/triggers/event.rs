//! Gameplay events.
//!
//! Gameplay code raises these into the engine. The same events drive both
//! the effect dispatcher (as triggers) and the objective state machine (as
//! progress), so one `EventKind` vocabulary serves both.
//!
//! ## Context
//!
//! Every event carries an `EventContext`: entity references the host knows
//! about plus positional/situational flags. The core only reads the
//! context; it never resolves entity references itself.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::EntityId;

/// Kind of gameplay event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    /// A shot was taken.
    Shot,
    /// A pass was made. `target` is the intended receiver.
    Pass,
    /// A tackle was attempted. `flags.success` tells whether it won the ball.
    Tackle,
    /// The ball was stolen from an opponent.
    Steal,
    /// A pass was received. `player` is the receiver.
    Receive,
    /// Our side scored.
    GoalFor,
    /// The opposition scored.
    GoalAgainst,
    /// A dodge was performed.
    Dodge,
    /// A moment (round) started.
    MomentStart,
    /// A moment (round) ended.
    MomentEnd,
}

impl EventKind {
    /// Every event kind.
    pub const ALL: [EventKind; 10] = [
        EventKind::Shot,
        EventKind::Pass,
        EventKind::Tackle,
        EventKind::Steal,
        EventKind::Receive,
        EventKind::GoalFor,
        EventKind::GoalAgainst,
        EventKind::Dodge,
        EventKind::MomentStart,
        EventKind::MomentEnd,
    ];

    /// Canonical name used in catalogs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EventKind::Shot => "shot",
            EventKind::Pass => "pass",
            EventKind::Tackle => "tackle",
            EventKind::Steal => "steal",
            EventKind::Receive => "receive",
            EventKind::GoalFor => "goalFor",
            EventKind::GoalAgainst => "goalAgainst",
            EventKind::Dodge => "dodge",
            EventKind::MomentStart => "momentStart",
            EventKind::MomentEnd => "momentEnd",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("unknown event `{s}`"))
    }
}

/// Situational flags attached to an event.
///
/// `success` is tri-state: `None` when the event has no notion of success.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventFlags {
    pub has_possession: bool,
    pub in_attacking_zone: bool,
    pub in_defending_zone: bool,
    pub is_stationary: bool,
    pub is_losing: bool,
    pub success: Option<bool>,
    pub is_rebound: bool,
    pub from_penalty_corner: bool,
    pub assisted: bool,
}

/// A situational flag that conditions can test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Flag {
    HasPossession,
    InAttackingZone,
    InDefendingZone,
    IsStationary,
    IsLosing,
    /// True only when `success == Some(true)`.
    Succeeded,
    /// True only when `success == Some(false)`.
    Failed,
    IsRebound,
    FromPenaltyCorner,
    Assisted,
}

impl EventFlags {
    /// Read one flag.
    #[must_use]
    pub fn get(&self, flag: Flag) -> bool {
        match flag {
            Flag::HasPossession => self.has_possession,
            Flag::InAttackingZone => self.in_attacking_zone,
            Flag::InDefendingZone => self.in_defending_zone,
            Flag::IsStationary => self.is_stationary,
            Flag::IsLosing => self.is_losing,
            Flag::Succeeded => self.success == Some(true),
            Flag::Failed => self.success == Some(false),
            Flag::IsRebound => self.is_rebound,
            Flag::FromPenaltyCorner => self.from_penalty_corner,
            Flag::Assisted => self.assisted,
        }
    }
}

/// Payload handed to every callback bound to an event.
///
/// ```
/// use rogue_pitch::core::EntityId;
/// use rogue_pitch::triggers::{EventContext, Flag};
///
/// let ctx = EventContext::for_player(EntityId(7))
///     .with_target(EntityId(9))
///     .in_attacking_zone()
///     .succeeded(true);
///
/// assert_eq!(ctx.target, Some(EntityId(9)));
/// assert!(ctx.flags.get(Flag::InAttackingZone));
/// assert!(ctx.flags.get(Flag::Succeeded));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventContext {
    /// The acting player.
    pub player: Option<EntityId>,
    /// The ball, if relevant.
    pub ball: Option<EntityId>,
    /// Pass receiver, tackle victim, etc.
    pub target: Option<EntityId>,
    /// Pitch position in host units.
    pub position: Option<(f32, f32)>,
    /// Situational flags.
    pub flags: EventFlags,
}

impl EventContext {
    /// Empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for an event performed by `player`.
    #[must_use]
    pub fn for_player(player: EntityId) -> Self {
        Self {
            player: Some(player),
            ..Self::default()
        }
    }

    /// Set the ball (builder pattern).
    #[must_use]
    pub fn with_ball(mut self, ball: EntityId) -> Self {
        self.ball = Some(ball);
        self
    }

    /// Set the target entity (builder pattern).
    #[must_use]
    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the position (builder pattern).
    #[must_use]
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Some((x, y));
        self
    }

    /// Replace all flags (builder pattern).
    #[must_use]
    pub fn with_flags(mut self, flags: EventFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Mark the actor as holding the ball (builder pattern).
    #[must_use]
    pub fn with_possession(mut self) -> Self {
        self.flags.has_possession = true;
        self
    }

    /// Mark the event as in the attacking zone (builder pattern).
    #[must_use]
    pub fn in_attacking_zone(mut self) -> Self {
        self.flags.in_attacking_zone = true;
        self
    }

    /// Mark the event as in the defending zone (builder pattern).
    #[must_use]
    pub fn in_defending_zone(mut self) -> Self {
        self.flags.in_defending_zone = true;
        self
    }

    /// Mark the actor as stationary (builder pattern).
    #[must_use]
    pub fn stationary(mut self) -> Self {
        self.flags.is_stationary = true;
        self
    }

    /// Mark our side as trailing (builder pattern).
    #[must_use]
    pub fn losing(mut self) -> Self {
        self.flags.is_losing = true;
        self
    }

    /// Record whether the action succeeded (builder pattern).
    #[must_use]
    pub fn succeeded(mut self, success: bool) -> Self {
        self.flags.success = Some(success);
        self
    }

    /// Mark a goal as a rebound (builder pattern).
    #[must_use]
    pub fn rebound(mut self) -> Self {
        self.flags.is_rebound = true;
        self
    }

    /// Mark a goal as scored from a penalty corner (builder pattern).
    #[must_use]
    pub fn penalty_corner(mut self) -> Self {
        self.flags.from_penalty_corner = true;
        self
    }

    /// Mark a goal as assisted (builder pattern).
    #[must_use]
    pub fn assisted(mut self) -> Self {
        self.flags.assisted = true;
        self
    }
}
