//! Zone manager for card locations and movement.
//!
//! Every zone keeps its cards in a stable order so candidate pools built
//! from a zone come out the same way every time. For ordered zones
//! (library, stack) the order is meaningful: index 0 is the bottom, the
//! last index is the top.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::config::ZoneId;
use crate::core::entity::EntityId;
use crate::core::rng::GameRng;

/// Position for inserting a card into a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Add to top of zone (end of the list).
    Top,
    /// Add to bottom of zone.
    Bottom,
    /// Insert at specific index (0 = bottom).
    Index(usize),
}

/// Tracks which zone each card is in.
///
/// ```
/// use ccg_choice::zones::{ZoneManager, ZonePosition};
/// use ccg_choice::core::{ZoneId, EntityId};
///
/// let mut manager = ZoneManager::new();
/// let library = ZoneId::new(0);
///
/// manager.add_to_zone(EntityId(10), library, Some(ZonePosition::Top));
/// manager.add_to_zone(EntityId(11), library, Some(ZonePosition::Bottom));
///
/// assert_eq!(manager.cards_in_zone(library), &[EntityId(11), EntityId(10)]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ZoneManager {
    /// Card locations: entity_id -> zone_id
    locations: FxHashMap<EntityId, ZoneId>,

    /// Cards per zone, bottom first.
    contents: FxHashMap<ZoneId, Vec<EntityId>>,
}

impl ZoneManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an empty zone so it reports size 0 instead of being unknown.
    pub fn init_zone(&mut self, zone: ZoneId) {
        self.contents.entry(zone).or_default();
    }

    /// Add a card to a zone. `None` means top.
    ///
    /// Panics if the entity is already tracked.
    pub fn add_to_zone(&mut self, entity: EntityId, zone: ZoneId, position: Option<ZonePosition>) {
        if self.locations.contains_key(&entity) {
            panic!("Entity {:?} already exists in zone manager", entity);
        }

        self.locations.insert(entity, zone);
        Self::insert_at(self.contents.entry(zone).or_default(), entity, position);
    }

    /// Move a card from one zone to another.
    ///
    /// Returns the old zone, or `None` if the card wasn't found.
    pub fn move_to_zone(
        &mut self,
        entity: EntityId,
        new_zone: ZoneId,
        position: Option<ZonePosition>,
    ) -> Option<ZoneId> {
        let old_zone = self.locations.get(&entity).copied()?;

        if old_zone == new_zone {
            return Some(old_zone);
        }

        if let Some(order) = self.contents.get_mut(&old_zone) {
            order.retain(|&e| e != entity);
        }

        self.locations.insert(entity, new_zone);
        Self::insert_at(self.contents.entry(new_zone).or_default(), entity, position);

        Some(old_zone)
    }

    fn insert_at(order: &mut Vec<EntityId>, entity: EntityId, position: Option<ZonePosition>) {
        match position.unwrap_or(ZonePosition::Top) {
            ZonePosition::Top => order.push(entity),
            ZonePosition::Bottom => order.insert(0, entity),
            ZonePosition::Index(i) => {
                let idx = i.min(order.len());
                order.insert(idx, entity);
            }
        }
    }

    #[must_use]
    pub fn get_zone(&self, entity: EntityId) -> Option<ZoneId> {
        self.locations.get(&entity).copied()
    }

    /// Cards in a zone, bottom first.
    #[must_use]
    pub fn cards_in_zone(&self, zone: ZoneId) -> &[EntityId] {
        self.contents.get(&zone).map_or(&[], |v| v.as_slice())
    }

    pub fn shuffle_zone(&mut self, zone: ZoneId, rng: &mut GameRng) {
        if let Some(order) = self.contents.get_mut(&zone) {
            rng.shuffle(order);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let mut manager = ZoneManager::new();
        let zone = ZoneId::new(0);

        manager.add_to_zone(EntityId(10), zone, None);
        manager.add_to_zone(EntityId(11), zone, None);

        assert_eq!(manager.get_zone(EntityId(10)), Some(zone));
        assert_eq!(manager.get_zone(EntityId(99)), None);
        assert_eq!(manager.cards_in_zone(zone), &[EntityId(10), EntityId(11)]);
    }

    #[test]
    fn test_positions() {
        let mut manager = ZoneManager::new();
        let library = ZoneId::new(0);

        manager.add_to_zone(EntityId(10), library, Some(ZonePosition::Top));
        manager.add_to_zone(EntityId(11), library, Some(ZonePosition::Bottom));
        manager.add_to_zone(EntityId(12), library, Some(ZonePosition::Top));
        manager.add_to_zone(EntityId(13), library, Some(ZonePosition::Index(1)));

        assert_eq!(
            manager.cards_in_zone(library),
            &[EntityId(11), EntityId(13), EntityId(10), EntityId(12)]
        );
    }

    #[test]
    fn test_move_between_zones() {
        let mut manager = ZoneManager::new();
        let zone_a = ZoneId::new(0);
        let zone_b = ZoneId::new(1);

        manager.add_to_zone(EntityId(10), zone_a, None);
        let old = manager.move_to_zone(EntityId(10), zone_b, None);

        assert_eq!(old, Some(zone_a));
        assert!(manager.cards_in_zone(zone_a).is_empty());
        assert_eq!(manager.cards_in_zone(zone_b), &[EntityId(10)]);
        assert_eq!(manager.move_to_zone(EntityId(10), zone_b, None), Some(zone_b));
        assert_eq!(manager.move_to_zone(EntityId(99), zone_a, None), None);
    }

    #[test]
    fn test_shuffle() {
        let mut manager = ZoneManager::new();
        let library = ZoneId::new(0);
        for i in 0..20 {
            manager.add_to_zone(EntityId(i), library, None);
        }

        let before = manager.cards_in_zone(library).to_vec();
        manager.shuffle_zone(library, &mut GameRng::new(42));
        let after = manager.cards_in_zone(library).to_vec();

        assert_eq!(before.len(), after.len());
        assert_ne!(before, after);
    }

    #[test]
    #[should_panic(expected = "Entity")]
    fn test_duplicate_entity_panics() {
        let mut manager = ZoneManager::new();
        let zone = ZoneId::new(0);

        manager.add_to_zone(EntityId(10), zone, None);
        manager.add_to_zone(EntityId(10), zone, None);
    }
}
