//! Core engine types: entities, players, state, RNG, configuration.
//!
//! This module contains the game-agnostic building blocks. Games configure
//! them via `GameConfig` rather than modifying the core.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod state;

pub use entity::EntityId;
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use config::{ZoneId, ZoneKind, ZoneConfig, ZoneVisibility, GameConfig};
pub use state::{GameState, LIMIT_SEARCH_LIBRARY, LIMITED_SEARCH_DEPTH};
