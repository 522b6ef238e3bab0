//! Card registry for definition lookup.
//!
//! The `CardRegistry` stores all card definitions for a game. It is filled
//! either by hand or from any `ItemReader<CardDefinition>` catalog.

use rustc_hash::FxHashMap;
use tracing::debug;

use super::definition::{CardDefinition, CardId};
use crate::catalog::{CatalogError, ItemReader};

/// Registry of card definitions, addressable by id and by name.
///
/// ```
/// use ccg_choice::cards::{CardRegistry, CardDefinition, CardId};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::new(CardId::new(1), "Lightning Bolt"));
///
/// assert_eq!(registry.get(CardId::new(1)).unwrap().name, "Lightning Bolt");
/// assert_eq!(registry.get_by_name("Lightning Bolt").unwrap().id, CardId::new(1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
    by_name: FxHashMap<String, CardId>,
}

impl CardRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a catalog reader.
    pub fn from_reader<R>(reader: &R) -> Result<Self, CatalogError>
    where
        R: ItemReader<CardDefinition> + ?Sized,
    {
        let mut registry = Self::new();
        registry.load_from(reader)?;
        Ok(registry)
    }

    /// Register every definition a catalog reader yields.
    ///
    /// Definitions are registered in name order so id clashes are reported
    /// deterministically. Returns the number of cards added.
    pub fn load_from<R>(&mut self, reader: &R) -> Result<usize, CatalogError>
    where
        R: ItemReader<CardDefinition> + ?Sized,
    {
        let mut items: Vec<_> = reader.read_all()?.into_iter().collect();
        items.sort_by(|(a, _), (b, _)| a.cmp(b));

        let count = items.len();
        for (_, card) in items {
            self.try_register(card)?;
        }
        debug!(count, "loaded card catalog");
        Ok(count)
    }

    /// Register a card definition.
    ///
    /// Panics if a card with the same ID or name already exists.
    pub fn register(&mut self, card: CardDefinition) {
        if let Err(err) = self.try_register(card) {
            panic!("{err}");
        }
    }

    /// Register a card definition, rejecting id or name clashes.
    pub fn try_register(&mut self, card: CardDefinition) -> Result<(), CatalogError> {
        if self.cards.contains_key(&card.id) {
            return Err(CatalogError::DuplicateId(card.id));
        }
        if self.by_name.contains_key(&card.name) {
            return Err(CatalogError::DuplicateKey(card.name));
        }
        self.by_name.insert(card.name.clone(), card.id);
        self.cards.insert(card.id, card);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&CardDefinition> {
        self.by_name.get(name).and_then(|id| self.cards.get(id))
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }
}
