//! Entity identification.
//!
//! Every card object in a game has a unique `EntityId`. Players are not
//! entities here; they are addressed by `PlayerId`.
//!
//! ```
//! use ccg_choice::core::EntityId;
//!
//! let card = EntityId(10);
//! assert_eq!(card.raw(), 10);
//! assert_eq!(card.to_string(), "Entity(10)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card object in a game.
///
/// IDs are allocated by `GameState` and never reused within a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}
