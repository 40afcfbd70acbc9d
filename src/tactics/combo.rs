//! Give-and-go combo detector.
//!
//! A single slot: a pass arms it with the pass target, and the next receive
//! resolves it. A newer pass overwrites an older pending one.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{EntityId, GameTime};

/// A pending pass waiting for its return.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboArm {
    pub target: EntityId,
    pub armed_at: GameTime,
}

/// `Idle -> Armed -> Idle`.
#[derive(Clone, Debug, Default)]
pub struct ComboDetector {
    armed: Option<ComboArm>,
}

impl ComboDetector {
    /// Create an idle detector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm with a pass to `target`, replacing any pending arm.
    pub fn arm(&mut self, target: EntityId, now: GameTime) {
        if let Some(previous) = self.armed {
            debug!(previous = %previous.target, replaced_by = %target, "combo arm overwritten");
        }
        self.armed = Some(ComboArm {
            target,
            armed_at: now,
        });
    }

    /// Resolve a receive. Always returns to idle.
    ///
    /// Returns `true` when `receiver` is the armed target and the receive
    /// lands within `window_ms` of the pass (inclusive).
    pub fn on_receive(&mut self, receiver: EntityId, now: GameTime, window_ms: u64) -> bool {
        let Some(arm) = self.armed.take() else {
            return false;
        };
        arm.target == receiver && now >= arm.armed_at && now.since(arm.armed_at) <= window_ms
    }

    /// The pending arm, if any.
    #[must_use]
    pub fn armed(&self) -> Option<ComboArm> {
        self.armed
    }

    /// Drop any pending arm.
    pub fn clear(&mut self) {
        self.armed = None;
    }
}
