//! Modifier accumulator - permanent percentage deltas.
//!
//! Every owned copy of an effect folds its modifiers in once, at pick time,
//! and synergy tiers fold in their bonus sets when reached. Contributions
//! are additive across copies and never removed during a run.

use tracing::warn;

use crate::core::{EffectError, Stat, StatModifier, StatTable, StatTarget};

/// Running total of permanent modifiers.
#[derive(Clone, Debug, Default)]
pub struct ModifierAccumulator {
    table: StatTable,
}

impl ModifierAccumulator {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a set of modifiers in.
    ///
    /// All-or-nothing: if any delta is non-finite, or the running totals
    /// would overflow to a non-finite value, nothing is applied.
    pub fn apply(&mut self, modifiers: &[StatModifier]) -> Result<(), EffectError> {
        if let Some(bad) = modifiers.iter().find(|m| !m.is_finite()) {
            warn!(stat_target = %bad.target, percent = bad.percent, "rejecting non-finite modifier");
            return Err(EffectError::NonFinite("permanent modifier"));
        }

        let mut next = self.table;
        for modifier in modifiers {
            next.add(modifier.target, modifier.percent);
        }
        if !next.is_finite() {
            warn!(count = modifiers.len(), "rejecting modifiers that overflow the stat table");
            return Err(EffectError::NonFinite("permanent modifier total"));
        }

        self.table = next;
        Ok(())
    }

    /// Permanent percentage for `stat`, including the `all` slot.
    #[must_use]
    pub fn total_for(&self, stat: Stat) -> f64 {
        self.table.effective(stat)
    }

    /// Raw slot value, without `all` folding.
    #[must_use]
    pub fn raw(&self, target: StatTarget) -> f64 {
        self.table.get(target)
    }

    /// The underlying table.
    #[must_use]
    pub fn table(&self) -> &StatTable {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copies_add_up() {
        let mut acc = ModifierAccumulator::new();
        let per_copy = [StatModifier::new(Stat::Speed, 10.0)];
        for _ in 0..3 {
            acc.apply(&per_copy).unwrap();
        }
        assert_eq!(acc.total_for(Stat::Speed), 30.0);
        assert_eq!(acc.total_for(Stat::Power), 0.0);
    }

    #[test]
    fn test_all_slot_applies_everywhere() {
        let mut acc = ModifierAccumulator::new();
        acc.apply(&[StatModifier::all(4.0), StatModifier::new(Stat::Control, 6.0)])
            .unwrap();

        assert_eq!(acc.total_for(Stat::Control), 10.0);
        assert_eq!(acc.total_for(Stat::Dodge), 4.0);
        assert_eq!(acc.raw(StatTarget::All), 4.0);
    }

    #[test]
    fn test_non_finite_is_all_or_nothing() {
        let mut acc = ModifierAccumulator::new();
        let result = acc.apply(&[
            StatModifier::new(Stat::Speed, 10.0),
            StatModifier::new(Stat::Power, f64::INFINITY),
        ]);

        assert!(result.is_err());
        assert_eq!(acc.total_for(Stat::Speed), 0.0);
        assert!(acc.total_for(Stat::Power).is_finite());
    }

    #[test]
    fn test_finite_deltas_overflowing_are_rejected() {
        let mut acc = ModifierAccumulator::new();
        acc.apply(&[StatModifier::new(Stat::Speed, 10.0)]).unwrap();
        let huge = [StatModifier::all(1e308)];
        acc.apply(&huge).unwrap();

        assert!(matches!(acc.apply(&huge), Err(EffectError::NonFinite(_))));
        assert_eq!(acc.raw(StatTarget::All), 1e308);
        assert_eq!(acc.raw(StatTarget::Stat(Stat::Speed)), 10.0);
    }

    #[test]
    fn test_slot_plus_all_overflow_is_rejected() {
        let mut acc = ModifierAccumulator::new();
        acc.apply(&[StatModifier::new(Stat::Power, 1e308)]).unwrap();

        assert!(acc.apply(&[StatModifier::all(1e308)]).is_err());
        assert_eq!(acc.raw(StatTarget::All), 0.0);
        assert!(acc.total_for(Stat::Power).is_finite());
    }
}
