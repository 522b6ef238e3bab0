//! # ccg-choice
//!
//! Card choice resolution for card game engines: an effect offers players
//! a pool of cards, each player's agent picks, and the picks are revealed
//! and recorded on the effect's source card.
//!
//! ## Design Principles
//!
//! 1. **Agents decide, the engine validates**: every player decision goes
//!    through a `ChoiceAgent`. Answers outside the offer are errors.
//!
//! 2. **Typed configuration**: script flags are parsed once into a
//!    `ChooseCardSpec` with exactly one `ChoiceMode`.
//!
//! 3. **Deterministic**: zones keep a stable order and all randomness
//!    comes from the seeded `GameRng`.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, players, state, RNG, configuration
//! - `zones`: Zone membership and order
//! - `cards`: Card definitions, instances, and registry
//! - `catalog`: Keyed catalog readers (`ItemReader`)
//! - `effects`: Card filters and choose-card effects

pub mod core;
pub mod zones;
pub mod cards;
pub mod catalog;
pub mod effects;

// Re-export commonly used types
pub use crate::core::{
    EntityId, PlayerId, PlayerMap,
    GameRng,
    ZoneId, ZoneKind, ZoneConfig, ZoneVisibility, GameConfig,
    GameState,
};
pub use crate::cards::{CardDefinition, CardId, CardInstance, CardRegistry, CardType};
pub use crate::catalog::{CatalogError, ItemReader};
pub use crate::effects::choice::{
    ChoiceAgent, ChoiceContext, ChoiceError, ChoiceInvocation, ChoiceMode, ChoiceOutcome,
    ChoiceResolver, ChoiceStatus, ChooseCardParams, ChooseCardSpec,
};
pub use crate::effects::targeting::CardFilter;
