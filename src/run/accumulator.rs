//! Run totals and the end-of-run reward.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::ObjectiveDefinition;
use crate::objectives::ObjectiveState;

/// Payout rates for the end-of-run reward.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RewardConfig {
    /// Paid for finishing a run at all.
    pub base: u32,
    pub per_moment_won: u32,
    pub per_boss_win: u32,
    pub per_clean_sheet: u32,
    pub per_rebound_goal: u32,
    /// Per goal of positive goal difference.
    pub per_goal_difference: u32,
    /// Paid when no moment was lost.
    pub flawless_bonus: u32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            base: 100,
            per_moment_won: 50,
            per_boss_win: 150,
            per_clean_sheet: 25,
            per_rebound_goal: 10,
            per_goal_difference: 5,
            flawless_bonus: 200,
        }
    }
}

/// Reward line category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RewardCategory {
    MomentsWon,
    BossWins,
    CleanSheets,
    ReboundGoals,
    GoalDifference,
    Flawless,
}

/// Base payout plus one line per earning category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardBreakdown {
    pub base: u32,
    /// Only categories that earned something, in declaration order.
    pub lines: Vec<(RewardCategory, u32)>,
    pub total: u32,
}

impl RewardBreakdown {
    /// Amount earned by one category.
    #[must_use]
    pub fn amount(&self, category: RewardCategory) -> u32 {
        self.lines
            .iter()
            .find(|(c, _)| *c == category)
            .map_or(0, |(_, amount)| *amount)
    }
}

/// Counters aggregated across a run's completed moments.
///
/// A clean sheet is a won moment with no goals conceded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTotals {
    pub moments_won: u32,
    pub moments_lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub boss_wins: u32,
    pub clean_sheets: u32,
    pub rebound_goals: u32,
}

impl RunTotals {
    #[must_use]
    pub fn moments_played(&self) -> u32 {
        self.moments_won + self.moments_lost
    }

    /// Goals for minus goals against, floored at zero.
    #[must_use]
    pub fn positive_goal_difference(&self) -> u32 {
        self.goals_for.saturating_sub(self.goals_against)
    }
}

/// Everything a run produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub totals: RunTotals,
    pub reward: RewardBreakdown,
}

/// Aggregates completed moments into run totals.
///
/// ## Example
///
/// ```
/// use rogue_pitch::catalog::{ObjectiveDefinition, ObjectiveKind};
/// use rogue_pitch::objectives::ObjectiveState;
/// use rogue_pitch::run::{RewardConfig, RunAccumulator};
/// use rogue_pitch::triggers::{EventContext, EventKind};
///
/// let def = ObjectiveDefinition::new(ObjectiveKind::Score, 30_000);
/// let mut moment = ObjectiveState::new(&def);
/// moment.start();
/// moment.apply(EventKind::GoalFor, &EventContext::new());
///
/// let mut run = RunAccumulator::new();
/// assert!(run.record_moment(&def, &moment));
///
/// let summary = run.finish(&RewardConfig::default());
/// assert_eq!(summary.totals.moments_won, 1);
/// assert!(summary.reward.total > summary.reward.base);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RunAccumulator {
    totals: RunTotals,
}

impl RunAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in a finished moment.
    ///
    /// Returns `false`, recording nothing, if the moment isn't completed.
    pub fn record_moment(&mut self, def: &ObjectiveDefinition, state: &ObjectiveState) -> bool {
        let Some(won) = state.outcome() else {
            debug!(kind = ?state.kind(), "ignoring unfinished moment");
            return false;
        };

        let totals = &mut self.totals;
        if won {
            totals.moments_won += 1;
            if def.boss {
                totals.boss_wins += 1;
            }
        } else {
            totals.moments_lost += 1;
        }
        totals.goals_for += state.goals_for();
        totals.goals_against += state.goals_against();
        totals.rebound_goals += state.rebound_goals();
        if won && state.goals_against() == 0 {
            totals.clean_sheets += 1;
        }

        debug!(name = %def.name, won, goals_for = state.goals_for(), "moment recorded");
        true
    }

    /// Totals so far.
    #[must_use]
    pub fn totals(&self) -> &RunTotals {
        &self.totals
    }

    /// End the run and compute the reward.
    #[must_use]
    pub fn finish(self, rates: &RewardConfig) -> RunSummary {
        let totals = self.totals;
        let flawless = totals.moments_played() > 0 && totals.moments_lost == 0;

        let lines: Vec<(RewardCategory, u32)> = [
            (RewardCategory::MomentsWon, totals.moments_won.saturating_mul(rates.per_moment_won)),
            (RewardCategory::BossWins, totals.boss_wins.saturating_mul(rates.per_boss_win)),
            (RewardCategory::CleanSheets, totals.clean_sheets.saturating_mul(rates.per_clean_sheet)),
            (RewardCategory::ReboundGoals, totals.rebound_goals.saturating_mul(rates.per_rebound_goal)),
            (
                RewardCategory::GoalDifference,
                totals
                    .positive_goal_difference()
                    .saturating_mul(rates.per_goal_difference),
            ),
            (RewardCategory::Flawless, if flawless { rates.flawless_bonus } else { 0 }),
        ]
        .into_iter()
        .filter(|(_, amount)| *amount > 0)
        .collect();

        let total = lines
            .iter()
            .fold(rates.base, |sum, (_, amount)| sum.saturating_add(*amount));

        info!(
            won = totals.moments_won,
            lost = totals.moments_lost,
            total,
            "run finished"
        );

        RunSummary {
            totals,
            reward: RewardBreakdown {
                base: rates.base,
                lines,
                total,
            },
        }
    }
}
