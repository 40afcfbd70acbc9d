//! Play-call controller.
//!
//! One call may be active at a time. The cooldown starts at call time and
//! runs independently of the active window, so depending on tuning the
//! cooldown can outlast the call or the other way round.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::GameTime;

/// The fixed set of team calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlayCallKind {
    Press,
    Hold,
    Counter,
}

impl PlayCallKind {
    pub const ALL: [PlayCallKind; 3] = [Self::Press, Self::Hold, Self::Counter];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Press => "press",
            Self::Hold => "hold",
            Self::Counter => "counter",
        }
    }
}

impl fmt::Display for PlayCallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The most recent successful call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePlayCall {
    pub kind: PlayCallKind,
    pub expires_at: GameTime,
    pub cooldown_until: GameTime,
}

/// Cooldown-gated play calls.
#[derive(Clone, Debug, Default)]
pub struct PlayCallController {
    current: Option<ActivePlayCall>,
}

impl PlayCallController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to make a call at `now`.
    ///
    /// Returns `None` without changing anything while on cooldown.
    pub fn call_play(
        &mut self,
        kind: PlayCallKind,
        now: GameTime,
        duration_ms: u64,
        cooldown_ms: u64,
    ) -> Option<ActivePlayCall> {
        if let Some(current) = self.current {
            if now < current.cooldown_until {
                debug!(%kind, cooldown_until = %current.cooldown_until, "play call on cooldown");
                return None;
            }
        }

        let call = ActivePlayCall {
            kind,
            expires_at: now.after(duration_ms),
            cooldown_until: now.after(cooldown_ms),
        };
        self.current = Some(call);
        debug!(%kind, expires_at = %call.expires_at, "play called");
        Some(call)
    }

    /// The call in effect at `now`, if any.
    #[must_use]
    pub fn get_active(&self, now: GameTime) -> Option<PlayCallKind> {
        self.current
            .filter(|call| now < call.expires_at)
            .map(|call| call.kind)
    }

    /// When the next call becomes possible.
    #[must_use]
    pub fn cooldown_until(&self) -> Option<GameTime> {
        self.current.map(|call| call.cooldown_until)
    }

    /// The last successful call, expired or not.
    #[must_use]
    pub fn last_call(&self) -> Option<ActivePlayCall> {
        self.current
    }
}
