//! Run-level accumulation and rewards.
//!
//! The `RunAccumulator` consumes each completed moment's objective state
//! and, at the end of the run, turns the totals into a `RunSummary` with a
//! reward breakdown priced by `RewardConfig`.

mod accumulator;

pub use accumulator::{
    RewardBreakdown, RewardCategory, RewardConfig, RunAccumulator, RunSummary, RunTotals,
};
