//! Synergy tracker.
//!
//! Counts owned effects per synergy tag and reports when a tag reaches a
//! tier threshold. Each tier fires exactly once per run, and tiers never go
//! down because effects are never removed mid-run.

use rustc_hash::FxHashMap;
use tracing::info;

use crate::catalog::SynergyTag;
use crate::core::SynergyConfig;

/// Highest tier a tag can reach.
pub const MAX_TIER: u8 = 2;

/// A tag that just reached a new tier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SynergyActivation {
    pub tag: SynergyTag,
    pub tier: u8,
}

/// Per-tag counts and reached tiers.
#[derive(Clone, Debug)]
pub struct SynergyTracker {
    thresholds: [u32; MAX_TIER as usize],
    counts: FxHashMap<SynergyTag, u32>,
    tiers: FxHashMap<SynergyTag, u8>,
}

impl SynergyTracker {
    /// Create a tracker with the configured thresholds.
    #[must_use]
    pub fn new(config: &SynergyConfig) -> Self {
        Self {
            thresholds: [config.tier1_threshold, config.tier2_threshold],
            counts: FxHashMap::default(),
            tiers: FxHashMap::default(),
        }
    }

    /// Count a newly picked effect's tags.
    ///
    /// A tag listed more than once counts once. Returns every (tag, tier)
    /// reached for the first time by this pick, lowest tier first.
    pub fn on_pick(&mut self, tags: &[SynergyTag]) -> Vec<SynergyActivation> {
        let mut activations = Vec::new();

        for (i, tag) in tags.iter().enumerate() {
            if tags[..i].contains(tag) {
                continue;
            }
            let count = self.counts.entry(tag.clone()).or_insert(0);
            *count += 1;
            let count = *count;

            let reached = self.tiers.entry(tag.clone()).or_insert(0);
            while *reached < MAX_TIER && count >= self.thresholds[*reached as usize] {
                *reached += 1;
                info!(%tag, tier = *reached, count, "synergy tier reached");
                activations.push(SynergyActivation {
                    tag: tag.clone(),
                    tier: *reached,
                });
            }
        }

        activations
    }

    /// Owned effects carrying `tag`.
    #[must_use]
    pub fn count(&self, tag: &SynergyTag) -> u32 {
        self.counts.get(tag).copied().unwrap_or(0)
    }

    /// Highest tier reached by `tag` (0 = none).
    #[must_use]
    pub fn tier(&self, tag: &SynergyTag) -> u8 {
        self.tiers.get(tag).copied().unwrap_or(0)
    }

    /// All tag counts, sorted by tag.
    #[must_use]
    pub fn counts(&self) -> Vec<(SynergyTag, u32)> {
        let mut counts: Vec<_> = self.counts.iter().map(|(t, c)| (t.clone(), *c)).collect();
        counts.sort();
        counts
    }

    /// Tags with a tier above zero, sorted by tag.
    #[must_use]
    pub fn active_tiers(&self) -> Vec<(SynergyTag, u8)> {
        let mut tiers: Vec<_> = self
            .tiers
            .iter()
            .filter(|(_, tier)| **tier > 0)
            .map(|(t, tier)| (t.clone(), *tier))
            .collect();
        tiers.sort();
        tiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> SynergyTracker {
        SynergyTracker::new(&SynergyConfig::default())
    }

    #[test]
    fn test_tier_one_fires_once_at_threshold() {
        let mut tracker = tracker();
        let pace = [SynergyTag::new("pace")];

        assert!(tracker.on_pick(&pace).is_empty());
        assert!(tracker.on_pick(&pace).is_empty());
        let fired = tracker.on_pick(&pace);
        assert_eq!(
            fired,
            vec![SynergyActivation {
                tag: SynergyTag::new("pace"),
                tier: 1
            }]
        );
        assert!(tracker.on_pick(&pace).is_empty());
        assert_eq!(tracker.tier(&pace[0]), 1);
        assert_eq!(tracker.count(&pace[0]), 4);
    }

    #[test]
    fn test_tier_two_fires_only_tier_two() {
        let mut tracker = tracker();
        let tag = [SynergyTag::new("enforcer")];
        let mut all = Vec::new();
        for _ in 0..7 {
            all.extend(tracker.on_pick(&tag));
        }

        let tiers: Vec<u8> = all.iter().map(|a| a.tier).collect();
        assert_eq!(tiers, vec![1, 2]);
        assert_eq!(tracker.tier(&tag[0]), 2);
    }

    #[test]
    fn test_tags_are_independent() {
        let mut tracker = tracker();
        for _ in 0..3 {
            tracker.on_pick(&[SynergyTag::new("pace"), SynergyTag::new("vision")]);
        }
        tracker.on_pick(&[SynergyTag::new("grit")]);

        assert_eq!(tracker.active_tiers().len(), 2);
        assert_eq!(tracker.tier(&SynergyTag::new("grit")), 0);
        assert_eq!(
            tracker.counts(),
            vec![
                (SynergyTag::new("grit"), 1),
                (SynergyTag::new("pace"), 3),
                (SynergyTag::new("vision"), 3),
            ]
        );
    }

    #[test]
    fn test_equal_thresholds_fire_both_in_order() {
        // validate() rejects this config, but the tracker still behaves.
        let mut tracker = SynergyTracker::new(&SynergyConfig {
            tier1_threshold: 1,
            tier2_threshold: 1,
        });
        let fired = tracker.on_pick(&[SynergyTag::new("x")]);
        assert_eq!(fired.iter().map(|a| a.tier).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_repeated_tag_counts_once_per_pick() {
        let mut tracker = SynergyTracker::new(&SynergyConfig::default());
        let pace = SynergyTag::new("pace");
        let tags = [pace.clone(), pace.clone(), pace.clone()];

        assert!(tracker.on_pick(&tags).is_empty());
        assert_eq!(tracker.count(&pace), 1);
        assert_eq!(tracker.tier(&pace), 0);
    }
}
