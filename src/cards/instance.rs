//! Card instances - runtime card state.
//!
//! `CardInstance` is a specific card object in a game. It copies the type
//! line and printed power from its definition at creation, and tracks the
//! mutable parts: zone, controller, power modifiers, and the choice memory
//! effects leave on their source card.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::{CardDefinition, CardId, CardType};
use crate::core::config::ZoneId;
use crate::core::entity::EntityId;
use crate::core::player::PlayerId;

/// State key added to printed power to get net power.
pub const POWER_MODIFIER: &str = "power_modifier";

/// Card references an effect leaves on its source card.
///
/// `chosen` is overwritten by every choose effect; the other two lists
/// accumulate until an effect clears them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardMemory {
    /// The last chosen set.
    pub chosen: Vector<EntityId>,
    /// Remembered objects.
    pub remembered: Vector<EntityId>,
    /// Imprinted objects.
    pub imprinted: Vector<EntityId>,
    /// A card type named by an earlier effect ("Goblin", "Artifact", ...).
    #[serde(default)]
    pub chosen_type: Option<String>,
}

impl CardMemory {
    pub fn set_chosen_type(&mut self, chosen_type: impl Into<String>) {
        self.chosen_type = Some(chosen_type.into());
    }

    pub fn set_chosen(&mut self, cards: impl IntoIterator<Item = EntityId>) {
        self.chosen = cards.into_iter().collect();
    }

    /// Remember cards not already remembered.
    pub fn remember(&mut self, cards: impl IntoIterator<Item = EntityId>) {
        for card in cards {
            if !self.remembered.contains(&card) {
                self.remembered.push_back(card);
            }
        }
    }

    pub fn forget(&mut self, cards: &[EntityId]) {
        self.remembered.retain(|c| !cards.contains(c));
    }

    /// Imprint cards not already imprinted.
    pub fn imprint(&mut self, cards: impl IntoIterator<Item = EntityId>) {
        for card in cards {
            if !self.imprinted.contains(&card) {
                self.imprinted.push_back(card);
            }
        }
    }
}

/// A card instance in a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    pub entity_id: EntityId,

    /// Reference to the card definition.
    pub card_id: CardId,

    pub name: String,

    pub types: SmallVec<[CardType; 2]>,

    pub subtypes: SmallVec<[String; 2]>,

    /// Printed power. `None` for cards without power.
    pub base_power: Option<i64>,

    /// Owner (who started with this card).
    pub owner: PlayerId,

    /// Controller (who currently controls it).
    pub controller: PlayerId,

    pub zone: ZoneId,

    pub face_down: bool,

    /// Mutable instance state (counters, modifiers, tapped, ...).
    #[serde(default)]
    pub state: FxHashMap<String, i64>,

    #[serde(default)]
    pub memory: CardMemory,
}

impl CardInstance {
    /// Create an instance of `definition`, controlled by its owner.
    #[must_use]
    pub fn from_definition(
        entity_id: EntityId,
        definition: &CardDefinition,
        owner: PlayerId,
        zone: ZoneId,
    ) -> Self {
        Self {
            entity_id,
            card_id: definition.id,
            name: definition.name.clone(),
            types: definition.types.clone(),
            subtypes: definition.subtypes.clone(),
            base_power: definition.power(),
            owner,
            controller: owner,
            zone,
            face_down: false,
            state: FxHashMap::default(),
            memory: CardMemory::default(),
        }
    }

    #[must_use]
    pub fn is_type(&self, card_type: CardType) -> bool {
        self.types.contains(&card_type)
    }

    #[must_use]
    pub fn has_subtype(&self, subtype: &str) -> bool {
        self.subtypes.iter().any(|s| s == subtype)
    }

    /// Printed power plus modifiers. Cards without power count as 0.
    #[must_use]
    pub fn net_power(&self) -> i64 {
        self.base_power.unwrap_or(0) + self.get_state(POWER_MODIFIER, 0)
    }

    pub fn set_controller(&mut self, controller: PlayerId) {
        self.controller = controller;
    }

    #[must_use]
    pub fn get_state(&self, key: &str, default: i64) -> i64 {
        self.state.get(key).copied().unwrap_or(default)
    }

    pub fn set_state(&mut self, key: impl Into<String>, value: i64) {
        self.state.insert(key.into(), value);
    }

    pub fn modify_state(&mut self, key: &str, delta: i64) {
        let current = self.get_state(key, 0);
        self.state.insert(key.to_string(), current + delta);
    }
}
