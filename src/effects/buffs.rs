//! Buff clock - temporary, expiring stat buffs.
//!
//! At most one live buff exists per `BuffId`. Re-arming an id refreshes it:
//! the magnitude becomes the larger of the two, and the expiry becomes the
//! later of the current expiry and `now + duration`, not `now + duration`
//! alone: a short re-arm never cuts a longer buff short. Buffs never add
//! up, unlike permanent modifiers.
//!
//! Expiry is lazy. Nothing runs on a timer; expired entries are pruned when
//! the clock is read with a later `now`.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::EffectId;
use crate::core::{EffectError, GameTime, Stat, StatTarget};

/// Identity of a buff slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuffId {
    /// Armed by an effect's `Buff` behavior, one slot per target.
    Effect { effect: EffectId, target: StatTarget },
    /// Give-and-go bonus, one slot per stat.
    GiveAndGo(Stat),
}

impl BuffId {
    /// What kind of source arms this slot.
    #[must_use]
    pub fn source(self) -> BuffSource {
        match self {
            BuffId::Effect { .. } => BuffSource::Effect,
            BuffId::GiveAndGo(_) => BuffSource::Combo,
        }
    }
}

/// Kind of thing that armed a buff.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuffSource {
    Effect,
    Combo,
}

/// A live temporary buff.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Buff {
    pub id: BuffId,
    pub target: StatTarget,
    /// Percentage magnitude.
    pub magnitude: f64,
    /// First instant at which the buff no longer applies.
    pub expires_at: GameTime,
    pub source: BuffSource,
}

impl Buff {
    /// Is the buff still live at `now`?
    #[must_use]
    pub fn is_live(&self, now: GameTime) -> bool {
        now < self.expires_at
    }
}

/// Storage for temporary buffs, ordered by first arming.
#[derive(Clone, Debug, Default)]
pub struct BuffClock {
    buffs: Vec<Buff>,
}

impl BuffClock {
    /// Create an empty clock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a buff, or refresh the live one with the same id.
    ///
    /// Rejects non-finite magnitudes without touching existing state.
    pub fn add_or_refresh(
        &mut self,
        id: BuffId,
        target: StatTarget,
        magnitude: f64,
        duration_ms: u64,
        now: GameTime,
    ) -> Result<(), EffectError> {
        if !magnitude.is_finite() {
            warn!(?id, magnitude, "rejecting non-finite buff magnitude");
            return Err(EffectError::NonFinite("buff magnitude"));
        }

        let expires_at = now.after(duration_ms);

        if let Some(existing) = self.buffs.iter_mut().find(|b| b.id == id) {
            if existing.is_live(now) {
                existing.expires_at = existing.expires_at.max(expires_at);
                existing.magnitude = existing.magnitude.max(magnitude);
            } else {
                // Expired but not yet pruned: start over.
                existing.expires_at = expires_at;
                existing.magnitude = magnitude;
            }
            existing.target = target;
            debug!(?id, magnitude = existing.magnitude, expires_at = %existing.expires_at, "buff refreshed");
            return Ok(());
        }

        self.buffs.push(Buff {
            id,
            target,
            magnitude,
            expires_at,
            source: id.source(),
        });
        debug!(?id, magnitude, %expires_at, "buff armed");
        Ok(())
    }

    /// Drop every buff that has expired by `now`.
    pub fn prune(&mut self, now: GameTime) {
        self.buffs.retain(|b| b.is_live(now));
    }

    /// Live buffs at `now`. Prunes expired entries as a side effect.
    pub fn active_buffs(&mut self, now: GameTime) -> Vec<Buff> {
        self.prune(now);
        self.buffs.clone()
    }

    /// Sum of live buff magnitudes applying to `stat` (including `all`).
    pub fn total_for(&mut self, stat: Stat, now: GameTime) -> f64 {
        self.prune(now);
        self.buffs
            .iter()
            .filter(|b| b.target.applies_to(stat))
            .map(|b| b.magnitude)
            .sum()
    }

    /// Look up a stored buff (live or not yet pruned).
    #[must_use]
    pub fn get(&self, id: BuffId) -> Option<&Buff> {
        self.buffs.iter().find(|b| b.id == id)
    }

    /// Number of stored buffs (may include expired, unpruned ones).
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffs.len()
    }

    /// Check if no buffs are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffs.is_empty()
    }

    /// Remove every buff.
    pub fn clear(&mut self) {
        self.buffs.clear();
    }
}
