//! Binding registry.
//!
//! Each picked copy of a triggered effect adds one binding per declared
//! event. `bindings_for` hands them back in pick order, which is the order
//! `emit` runs them in.

use rustc_hash::FxHashMap;

use crate::catalog::{EffectDefinition, EffectId};
use crate::triggers::EventKind;

/// Unique identifier for a binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(pub u32);

impl std::fmt::Display for BindingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Binding({})", self.0)
    }
}

/// One effect copy listening for one event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Binding {
    pub id: BindingId,
    pub effect: EffectId,
    /// Which owned copy this binding belongs to, starting at 1.
    pub copy: u32,
}

/// Event-indexed bindings in registration order.
#[derive(Clone, Debug, Default)]
pub struct BindingRegistry {
    by_event: FxHashMap<EventKind, Vec<Binding>>,
    next_id: u32,
}

impl BindingRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind copy `copy` of `effect` to each of its trigger events.
    ///
    /// Returns the number of bindings added.
    pub fn bind(&mut self, effect: &EffectDefinition, copy: u32) -> usize {
        if !effect.is_triggered() {
            return 0;
        }
        for event in &effect.triggers {
            let id = BindingId(self.next_id);
            self.next_id += 1;
            self.by_event.entry(*event).or_default().push(Binding {
                id,
                effect: effect.id,
                copy,
            });
        }
        effect.triggers.len()
    }

    /// Bindings for an event, in registration order.
    #[must_use]
    pub fn bindings_for(&self, event: EventKind) -> &[Binding] {
        self.by_event.get(&event).map_or(&[], Vec::as_slice)
    }

    /// Total bindings across all events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_event.values().map(Vec::len).sum()
    }

    /// Check if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_event.values().all(Vec::is_empty)
    }
}
