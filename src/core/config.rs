//! Game configuration types.
//!
//! Games configure the engine at startup by providing:
//! - `ZoneConfig`: one entry per zone (shared battlefield, each library, ...)
//! - `GameConfig`: player count plus all zones
//!
//! Zone IDs stay opaque. The resolver finds zones by `ZoneKind` and owner,
//! so a game is free to lay its zones out however it likes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// Zone identifier. Games define what zones exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneId(pub u16);

impl ZoneId {
    /// Create a new zone ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Zone({})", self.0)
    }
}

/// The rules role a zone plays.
///
/// Several zones can share a kind (one library per player).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneKind {
    Battlefield,
    Stack,
    Library,
    Hand,
    Graveyard,
    Exile,
    Command,
}

impl ZoneKind {
    /// Every kind, in declaration order.
    pub const ALL: [ZoneKind; 7] = [
        ZoneKind::Battlefield,
        ZoneKind::Stack,
        ZoneKind::Library,
        ZoneKind::Hand,
        ZoneKind::Graveyard,
        ZoneKind::Exile,
        ZoneKind::Command,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ZoneKind::Battlefield => "Battlefield",
            ZoneKind::Stack => "Stack",
            ZoneKind::Library => "Library",
            ZoneKind::Hand => "Hand",
            ZoneKind::Graveyard => "Graveyard",
            ZoneKind::Exile => "Exile",
            ZoneKind::Command => "Command",
        }
    }
}

/// Case-insensitive parse, so script values like `graveyard` work.
impl FromStr for ZoneKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ZoneKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown zone '{s}'"))
    }
}

impl std::fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Zone visibility rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneVisibility {
    /// All cards visible to all players (battlefield).
    Public,
    /// Cards visible only to the zone owner (hand).
    OwnerOnly,
    /// Cards not visible to anyone (face-down library).
    Hidden,
}

/// Configuration for a single zone.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ZoneConfig {
    /// Unique identifier for this zone.
    pub id: ZoneId,

    /// Rules role of the zone.
    pub kind: ZoneKind,

    /// Zone owner. `None` for shared zones (battlefield, stack).
    pub owner: Option<PlayerId>,

    /// Visibility rules for cards in this zone.
    pub visibility: ZoneVisibility,

    /// Is card order significant? (library and stack)
    pub ordered: bool,
}

impl ZoneConfig {
    /// Create a shared, public, unordered zone.
    pub fn new(id: ZoneId, kind: ZoneKind) -> Self {
        Self {
            id,
            kind,
            owner: None,
            visibility: ZoneVisibility::Public,
            ordered: false,
        }
    }

    #[must_use]
    pub fn with_owner(mut self, owner: PlayerId) -> Self {
        self.owner = Some(owner);
        self
    }

    #[must_use]
    pub fn owner_only(mut self) -> Self {
        self.visibility = ZoneVisibility::OwnerOnly;
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visibility = ZoneVisibility::Hidden;
        self
    }

    #[must_use]
    pub fn ordered(mut self) -> Self {
        self.ordered = true;
        self
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of players (1-255).
    pub player_count: usize,

    /// Zone configurations.
    pub zones: Vec<ZoneConfig>,
}

impl GameConfig {
    /// Create a configuration with no zones.
    pub fn new(player_count: usize) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            player_count,
            zones: Vec::new(),
        }
    }

    /// The usual layout: a shared battlefield and stack, and for each player
    /// a library, hand, graveyard and exile.
    pub fn standard(player_count: usize) -> Self {
        let mut config = Self::new(player_count)
            .with_zone(ZoneConfig::new(ZoneId::new(0), ZoneKind::Battlefield))
            .with_zone(ZoneConfig::new(ZoneId::new(1), ZoneKind::Stack).ordered());

        let mut next = 2u16;
        for player in PlayerId::all(player_count) {
            let per_player = [
                ZoneConfig::new(ZoneId::new(next), ZoneKind::Library).hidden().ordered(),
                ZoneConfig::new(ZoneId::new(next + 1), ZoneKind::Hand).owner_only(),
                ZoneConfig::new(ZoneId::new(next + 2), ZoneKind::Graveyard).ordered(),
                ZoneConfig::new(ZoneId::new(next + 3), ZoneKind::Exile),
            ];
            for zone in per_player {
                config.zones.push(zone.with_owner(player));
            }
            next += 4;
        }

        config
    }

    #[must_use]
    pub fn with_zone(mut self, zone: ZoneConfig) -> Self {
        self.zones.push(zone);
        self
    }

    /// Get a zone config by ID.
    #[must_use]
    pub fn get_zone(&self, id: ZoneId) -> Option<&ZoneConfig> {
        self.zones.iter().find(|z| z.id == id)
    }

    /// All zones of a kind, in configuration order.
    pub fn zones_of(&self, kind: ZoneKind) -> impl Iterator<Item = &ZoneConfig> {
        self.zones.iter().filter(move |z| z.kind == kind)
    }

    /// Find the zone of `kind` belonging to `owner`.
    ///
    /// Falls back to a shared zone of that kind, so asking for "player 1's
    /// battlefield" finds the shared battlefield.
    #[must_use]
    pub fn zone_of(&self, kind: ZoneKind, owner: Option<PlayerId>) -> Option<ZoneId> {
        self.zones_of(kind)
            .find(|z| z.owner == owner)
            .or_else(|| self.zones_of(kind).find(|z| z.owner.is_none()))
            .map(|z| z.id)
    }
}
