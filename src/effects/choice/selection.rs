//! Candidate pools and the selections picked from them.
//!
//! Both keep insertion order and never hold the same card twice.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::EntityId;

/// The ordered, duplicate-free set of cards an agent may pick from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CandidatePool {
    items: Vec<EntityId>,
}

impl CandidatePool {
    /// Build a pool, dropping repeated cards (first occurrence wins).
    pub fn new(items: impl IntoIterator<Item = EntityId>) -> Self {
        let mut seen = FxHashSet::default();
        Self {
            items: items.into_iter().filter(|e| seen.insert(*e)).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.items.contains(&entity)
    }

    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.items.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[EntityId] {
        &self.items
    }

    /// The cards passing `keep`.
    #[must_use]
    pub fn filter(&self, mut keep: impl FnMut(EntityId) -> bool) -> Self {
        Self {
            items: self.iter().filter(|&e| keep(e)).collect(),
        }
    }

    /// The cards not in `excluded`.
    #[must_use]
    pub fn without(&self, excluded: &Selection) -> Self {
        self.filter(|e| !excluded.contains(e))
    }

    /// Split into (passing, failing).
    #[must_use]
    pub fn partition(&self, pred: impl FnMut(&EntityId) -> bool) -> (Self, Self) {
        let (yes, no) = self.items.iter().copied().partition(pred);
        (Self { items: yes }, Self { items: no })
    }
}

impl FromIterator<EntityId> for CandidatePool {
    fn from_iter<I: IntoIterator<Item = EntityId>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Cards one player picked, in pick order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection(SmallVec<[EntityId; 8]>);

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.0.contains(&entity)
    }

    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[EntityId] {
        &self.0
    }

    /// Add a card; returns false if it was already selected.
    pub fn push(&mut self, entity: EntityId) -> bool {
        if self.contains(entity) {
            return false;
        }
        self.0.push(entity);
        true
    }

    /// Union, keeping this selection's order first.
    pub fn extend_from(&mut self, other: &Selection) {
        for entity in other.iter() {
            self.push(entity);
        }
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<EntityId> {
        self.0.into_vec()
    }
}

impl From<EntityId> for Selection {
    fn from(entity: EntityId) -> Self {
        let mut selection = Self::new();
        selection.push(entity);
        selection
    }
}

impl FromIterator<EntityId> for Selection {
    fn from_iter<I: IntoIterator<Item = EntityId>>(iter: I) -> Self {
        let mut selection = Self::new();
        for entity in iter {
            selection.push(entity);
        }
        selection
    }
}
