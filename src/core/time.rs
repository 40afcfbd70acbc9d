//! Caller-supplied monotonic time.
//!
//! The core never reads a wall clock. Every temporal rule (buff expiry,
//! combo window, play-call cooldown, moment timer) is a comparison against
//! a `GameTime` the host loop passes in, which keeps a recorded
//! event/time log replayable.

use serde::{Deserialize, Serialize};

/// Milliseconds on the host's monotonic clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameTime(pub u64);

impl GameTime {
    /// Time zero.
    pub const ZERO: Self = Self(0);

    /// Create a time from milliseconds.
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Get the raw millisecond value.
    #[must_use]
    pub const fn millis(self) -> u64 {
        self.0
    }

    /// The time `ms` milliseconds after this one.
    #[must_use]
    pub const fn after(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed since `earlier` (zero if `earlier` is later).
    #[must_use]
    pub const fn since(self, earlier: GameTime) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::fmt::Display for GameTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
