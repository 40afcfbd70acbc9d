//! Moment objectives.
//!
//! One `ObjectiveState` exists per moment. Gameplay code feeds it the same
//! events it raises into the engine, plus a timer tick, and reads back a
//! snapshot. It never errors: an unrecognised objective kind simply runs
//! until the timer forces a loss.
//!
//! ```
//! use rogue_pitch::catalog::{ObjectiveDefinition, ObjectiveKind};
//! use rogue_pitch::objectives::ObjectiveState;
//! use rogue_pitch::triggers::{EventContext, EventKind};
//!
//! let mut moment = ObjectiveState::new(&ObjectiveDefinition::new(ObjectiveKind::Survive, 30_000));
//! moment.start();
//! moment.apply(EventKind::GoalAgainst, &EventContext::new());
//! assert_eq!(moment.outcome(), Some(false));
//! ```

mod state;

pub use state::{ObjectivePhase, ObjectiveSnapshot, ObjectiveState};
