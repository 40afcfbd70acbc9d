//! Static content catalogs.
//!
//! The core never authors content. Effects, synergies and objectives come
//! in as read-only data, usually parsed from JSON:
//! - `EffectDefinition`: one upgrade (triggers, modifiers, behaviors, tags)
//! - `SynergyDefinition`: tier bonus sets for a tag
//! - `EffectCatalog`: validated lookup over both
//! - `ObjectiveDefinition`: the rules for one moment
//!
//! Unknown stat or event names fail parsing rather than being ignored.

mod definition;
mod objective;
mod registry;
mod synergy;

pub use definition::{EffectDefinition, EffectId, Rarity, SynergyTag};
pub use objective::{ObjectiveDefinition, ObjectiveKind};
pub use registry::EffectCatalog;
pub use synergy::SynergyDefinition;
