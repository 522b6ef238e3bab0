//! Zone system for card locations.
//!
//! Zones are **game-configured**. Games define their zones via `ZoneConfig`
//! at startup; the manager only tracks membership and order.

pub mod manager;

pub use manager::{ZoneManager, ZonePosition};

pub use crate::core::config::{ZoneConfig, ZoneId, ZoneKind, ZoneVisibility};
