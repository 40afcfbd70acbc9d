//! Typed event bus for engine notifications.
//!
//! The engine never holds subscribers. Callers pass an `EventBus` by
//! reference into the operations that can produce notifications (`emit`,
//! `pick_effect`, `call_play`), and the engine publishes into it
//! synchronously. Use `()` to drop notifications, or `NotificationLog`
//! to collect them for UI feedback and tests.

use crate::catalog::{EffectId, SynergyTag};
use crate::core::{EffectError, EntityId, GameTime};
use crate::tactics::PlayCallKind;

use super::event::EventKind;

/// Something the engine wants the outside world to know about.
#[derive(Clone, Debug, PartialEq)]
pub enum Notification {
    /// An effect was picked; `copies` is the new owned count.
    EffectPicked { effect: EffectId, copies: u32 },

    /// A synergy tag crossed a tier threshold.
    SynergyActivated { tag: SynergyTag, tier: u8 },

    /// Throttled visual feedback for an effect proc.
    ProcFeedback { effect: EffectId, count: u64, at: GameTime },

    /// A give-and-go completed and its bonus was applied.
    GiveAndGo { receiver: EntityId, at: GameTime },

    /// A play call was activated.
    PlayCalled {
        kind: PlayCallKind,
        expires_at: GameTime,
        cooldown_until: GameTime,
    },

    /// An effect callback failed and was skipped.
    CallbackFailed {
        effect: EffectId,
        event: EventKind,
        error: EffectError,
    },
}

/// Sink for engine notifications.
pub trait EventBus {
    /// Deliver one notification.
    fn publish(&mut self, notification: Notification);
}

/// Discards every notification.
impl EventBus for () {
    fn publish(&mut self, _notification: Notification) {}
}

/// Collects notifications in order.
#[derive(Clone, Debug, Default)]
pub struct NotificationLog {
    entries: Vec<Notification>,
}

impl NotificationLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything published so far.
    #[must_use]
    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count entries matching a predicate.
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Notification) -> bool,
    {
        self.entries.iter().filter(|n| predicate(n)).count()
    }

    /// Take all entries, leaving the log empty.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.entries)
    }
}

impl EventBus for NotificationLog {
    fn publish(&mut self, notification: Notification) {
        self.entries.push(notification);
    }
}
