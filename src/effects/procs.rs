//! Proc tracker.
//!
//! Counts how often each effect fires and keeps a bounded log of recent
//! procs for UI feedback. Counting and feedback are separate: every proc is
//! counted, but a feedback notification for an effect is only due when the
//! configured interval has passed since that effect's last one.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::catalog::EffectId;
use crate::core::{GameTime, ProcConfig};

/// One entry in the recent-proc ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcEntry {
    pub effect: EffectId,
    pub at: GameTime,
}

/// Result of recording a proc.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProcRecord {
    /// Cumulative count for the effect, including this proc.
    pub count: u64,
    /// Should the caller emit visual feedback for this proc?
    pub feedback: bool,
}

/// Per-effect summary for `top_procs`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcSummary {
    pub effect: EffectId,
    pub count: u64,
    pub last_at: GameTime,
}

#[derive(Clone, Copy, Debug)]
struct ProcStats {
    count: u64,
    last_at: GameTime,
    last_feedback: Option<GameTime>,
}

/// Proc counters plus a ring buffer of recent procs.
#[derive(Clone, Debug)]
pub struct ProcTracker {
    stats: FxHashMap<EffectId, ProcStats>,
    recent: VecDeque<ProcEntry>,
    capacity: usize,
    feedback_interval_ms: u64,
}

impl ProcTracker {
    /// Create a tracker with the configured capacity and throttle.
    #[must_use]
    pub fn new(config: &ProcConfig) -> Self {
        let capacity = config.ring_capacity.max(1);
        Self {
            stats: FxHashMap::default(),
            recent: VecDeque::with_capacity(capacity),
            capacity,
            feedback_interval_ms: config.feedback_interval_ms,
        }
    }

    /// Record a proc at `now`.
    pub fn record(&mut self, effect: EffectId, now: GameTime) -> ProcRecord {
        let stats = self.stats.entry(effect).or_insert(ProcStats {
            count: 0,
            last_at: now,
            last_feedback: None,
        });
        stats.count += 1;
        stats.last_at = now;

        let feedback = stats
            .last_feedback
            .is_none_or(|last| now.since(last) >= self.feedback_interval_ms);
        if feedback {
            stats.last_feedback = Some(now);
        }
        let count = stats.count;

        if self.recent.len() == self.capacity {
            self.recent.pop_front();
        }
        self.recent.push_back(ProcEntry { effect, at: now });

        ProcRecord { count, feedback }
    }

    /// Cumulative count for one effect.
    #[must_use]
    pub fn count(&self, effect: EffectId) -> u64 {
        self.stats.get(&effect).map_or(0, |s| s.count)
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.stats.values().map(|s| s.count).sum()
    }

    /// Highest-count effects, ties broken by most recent proc.
    #[must_use]
    pub fn top_procs(&self, limit: usize) -> Vec<ProcSummary> {
        let mut summaries: Vec<ProcSummary> = self
            .stats
            .iter()
            .map(|(&effect, s)| ProcSummary {
                effect,
                count: s.count,
                last_at: s.last_at,
            })
            .collect();

        summaries.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| b.last_at.cmp(&a.last_at))
                .then_with(|| a.effect.cmp(&b.effect))
        });
        summaries.truncate(limit);
        summaries
    }

    /// Recent procs, oldest first.
    pub fn recent(&self) -> impl Iterator<Item = &ProcEntry> {
        self.recent.iter()
    }

    /// Clear counters and the log.
    pub fn reset(&mut self) {
        self.stats.clear();
        self.recent.clear();
    }
}
