//! Entity references supplied by the host.
//!
//! The core never owns players or balls. Gameplay code hands it opaque
//! `EntityId`s inside event contexts, and the core only compares them
//! (for example to check that a give-and-go receive comes from the same
//! teammate the pass went to).
//!
//! ```
//! use rogue_pitch::core::EntityId;
//!
//! let striker = EntityId::new(9);
//! assert_eq!(striker.raw(), 9);
//! assert_eq!(format!("{}", striker), "Entity(9)");
//! ```

use serde::{Deserialize, Serialize};

/// Opaque reference to a host-side entity (player, ball, goal).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create a new entity ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id() {
        let id = EntityId::new(5);
        assert_eq!(id.raw(), 5);
        assert_eq!(format!("{}", id), "Entity(5)");
    }

    #[test]
    fn test_entity_ordering() {
        assert!(EntityId(1) < EntityId(2));
        assert_eq!(EntityId(3), EntityId::new(3));
    }
}
