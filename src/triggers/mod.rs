//! Gameplay events, trigger conditions and the notification bus.
//!
//! ## Key Components
//!
//! - [`EventKind`]: The closed set of gameplay events the host raises
//! - [`EventContext`]: Entity references and situational flags for an event
//! - [`TriggerCondition`]: Declarative filter an effect applies before firing
//! - [`EventBus`]: Typed sink for engine notifications
//!
//! ## Example Usage
//!
//! ```
//! use rogue_pitch::triggers::{
//!     ConditionContext, ConditionEvaluator, EventContext, EventKind, Flag, TriggerCondition,
//! };
//!
//! // "On shot, while standing still in the attacking zone"
//! let condition = TriggerCondition::flag(Flag::IsStationary)
//!     .and(TriggerCondition::flag(Flag::InAttackingZone));
//!
//! let context = EventContext::new().stationary().in_attacking_zone();
//! let ctx = ConditionContext::new(EventKind::Shot, &context);
//! assert!(ConditionEvaluator::evaluate(&condition, &ctx));
//! ```

mod bus;
mod condition;
mod event;

pub use bus::{EventBus, Notification, NotificationLog};
pub use condition::{ConditionContext, ConditionEvaluator, TriggerCondition};
pub use event::{EventContext, EventFlags, EventKind, Flag};
