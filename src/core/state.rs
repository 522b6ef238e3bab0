//! Game state: the accessor effects query while they resolve.
//!
//! `GameState` owns every card instance, the zone layout, per-player state
//! (keywords and counters), and the deterministic RNG. Queries hand back
//! cards in a stable order: zones in configuration order, cards within a
//! zone bottom first.

use rustc_hash::FxHashMap;

use super::config::{GameConfig, ZoneId, ZoneKind};
use super::entity::EntityId;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{CardDefinition, CardInstance, CardType};
use crate::zones::{ZoneManager, ZonePosition};

/// Player keyword: library searches only see the top four cards.
pub const LIMIT_SEARCH_LIBRARY: &str = "LimitSearchLibrary";

/// How many cards a limited library search exposes.
pub const LIMITED_SEARCH_DEPTH: usize = 4;

/// Full game state.
pub struct GameState {
    config: GameConfig,

    /// Zone manager for card locations.
    pub zones: ZoneManager,

    /// Card instances by entity ID.
    cards: FxHashMap<EntityId, CardInstance>,

    /// Per-player values (life, keyword flags, ...). Flags use 0/1.
    player_state: PlayerMap<FxHashMap<String, i64>>,

    /// Deterministic RNG.
    pub rng: GameRng,

    next_entity_id: u32,
}

impl GameState {
    #[must_use]
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut zones = ZoneManager::new();
        for zone in &config.zones {
            zones.init_zone(zone.id);
        }

        Self {
            player_state: PlayerMap::with_default(config.player_count),
            config,
            zones,
            cards: FxHashMap::default(),
            rng: GameRng::new(seed),
            next_entity_id: 1,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.config.player_count
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn players(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.config.player_count)
    }

    // === Entity Management ===

    pub fn alloc_entity(&mut self) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        id
    }

    /// Create an instance of `definition` on top of `owner`'s zone of `kind`.
    ///
    /// Shared zones (battlefield, stack) are used when the owner has no
    /// zone of that kind. Returns `None` if the game has no such zone.
    pub fn spawn(
        &mut self,
        definition: &CardDefinition,
        owner: PlayerId,
        kind: ZoneKind,
    ) -> Option<EntityId> {
        let zone = self.config.zone_of(kind, Some(owner))?;
        let entity = self.alloc_entity();
        self.add_card(CardInstance::from_definition(entity, definition, owner, zone));
        Some(entity)
    }

    /// Add a card instance to its zone (on top).
    pub fn add_card(&mut self, card: CardInstance) {
        let entity_id = card.entity_id;
        let zone = card.zone;
        self.cards.insert(entity_id, card);
        self.zones.add_to_zone(entity_id, zone, None);
    }

    #[must_use]
    pub fn get_card(&self, entity_id: EntityId) -> Option<&CardInstance> {
        self.cards.get(&entity_id)
    }

    pub fn get_card_mut(&mut self, entity_id: EntityId) -> Option<&mut CardInstance> {
        self.cards.get_mut(&entity_id)
    }

    /// Move a card to `kind` (the owner's zone of that kind, or the shared one).
    ///
    /// Returns false if the card or the destination doesn't exist.
    pub fn move_card(&mut self, entity: EntityId, kind: ZoneKind, position: Option<ZonePosition>) -> bool {
        let Some(owner) = self.cards.get(&entity).map(|c| c.owner) else {
            return false;
        };
        let Some(zone) = self.config.zone_of(kind, Some(owner)) else {
            return false;
        };

        self.zones.move_to_zone(entity, zone, position);
        if let Some(card) = self.cards.get_mut(&entity) {
            card.zone = zone;
        }
        true
    }

    // === Queries ===

    /// Every card in the game, ordered by entity id.
    #[must_use]
    pub fn all_cards(&self) -> Vec<EntityId> {
        let mut all: Vec<_> = self.cards.keys().copied().collect();
        all.sort_unstable();
        all
    }

    /// Cards in every zone of `kind`.
    #[must_use]
    pub fn cards_in(&self, kind: ZoneKind) -> Vec<EntityId> {
        self.config
            .zones_of(kind)
            .flat_map(|zone| self.zones.cards_in_zone(zone.id).iter().copied())
            .collect()
    }

    /// Cards in `player`'s zone of `kind`.
    ///
    /// For shared zones this is the cards the player controls.
    #[must_use]
    pub fn player_cards_in(&self, player: PlayerId, kind: ZoneKind) -> Vec<EntityId> {
        match self.owned_zone(kind, player) {
            Some(zone) => self.zones.cards_in_zone(zone).to_vec(),
            None => self
                .cards_in(kind)
                .into_iter()
                .filter(|&e| self.controller_of(e) == Some(player))
                .collect(),
        }
    }

    fn owned_zone(&self, kind: ZoneKind, player: PlayerId) -> Option<ZoneId> {
        self.config
            .zones_of(kind)
            .find(|z| z.owner == Some(player))
            .map(|z| z.id)
    }

    /// A player's library, top card first.
    #[must_use]
    pub fn library_top_first(&self, player: PlayerId) -> Vec<EntityId> {
        let mut library = self.player_cards_in(player, ZoneKind::Library);
        library.reverse();
        library
    }

    /// Creatures on the battlefield controlled by `player`.
    #[must_use]
    pub fn creatures_in_play(&self, player: PlayerId) -> Vec<EntityId> {
        self.player_cards_in(player, ZoneKind::Battlefield)
            .into_iter()
            .filter(|&e| self.get_card(e).is_some_and(|c| c.is_type(CardType::Creature)))
            .collect()
    }

    #[must_use]
    pub fn controller_of(&self, entity: EntityId) -> Option<PlayerId> {
        self.cards.get(&entity).map(|c| c.controller)
    }

    /// Net power of a card; 0 for unknown cards.
    #[must_use]
    pub fn power_of(&self, entity: EntityId) -> i64 {
        self.cards.get(&entity).map_or(0, CardInstance::net_power)
    }

    // === Player State ===

    #[must_use]
    pub fn get_player_state(&self, player: PlayerId, key: &str, default: i64) -> i64 {
        self.player_state
            .try_get(player)
            .and_then(|s| s.get(key).copied())
            .unwrap_or(default)
    }

    pub fn set_player_state(&mut self, player: PlayerId, key: impl Into<String>, value: i64) {
        self.player_state[player].insert(key.into(), value);
    }

    #[must_use]
    pub fn has_keyword(&self, player: PlayerId, keyword: &str) -> bool {
        self.get_player_state(player, keyword, 0) != 0
    }

    pub fn grant_keyword(&mut self, player: PlayerId, keyword: &str) {
        self.set_player_state(player, keyword, 1);
    }

    /// Shuffle `player`'s library.
    pub fn shuffle_library(&mut self, player: PlayerId) {
        if let Some(zone) = self.owned_zone(ZoneKind::Library, player) {
            self.zones.shuffle_zone(zone, &mut self.rng);
        }
    }
}
