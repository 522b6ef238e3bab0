//! Card validity filters.
//!
//! `CardFilter` is the typed form of a validity expression: which cards an
//! effect may look at. Filters compose with `and`, so restrictions can be
//! accumulated while an effect resolves (each pick adding a "power differs
//! from N" clause, for instance).
//!
//! Game-specific predicates go through `CardFilter::Custom`, evaluated by
//! the callback in `FilterContext`.

use serde::{Deserialize, Serialize};

use crate::cards::{CardInstance, CardType};
use crate::core::{EntityId, GameState, PlayerId, ZoneKind};

/// Evaluator for `CardFilter::Custom` expressions.
pub type CustomFilterFn<'a> = dyn Fn(&str, &CardInstance, &GameState) -> bool + 'a;

/// A predicate over cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFilter {
    /// Every card.
    Any,

    // === Location & control ===

    /// Card is in a zone of this kind.
    InZone(ZoneKind),
    ControlledBy(PlayerId),
    NotControlledBy(PlayerId),
    OwnedBy(PlayerId),

    // === Characteristics ===

    HasType(CardType),
    HasSubtype(String),
    /// Net power at most N.
    PowerAtMost(i64),
    PowerEquals(i64),
    PowerNotEqual(i64),

    // === Generic ===

    /// Card is not the effect's source.
    NotSource,
    /// Game-specific expression, evaluated by the context callback.
    Custom(String),

    All(Vec<CardFilter>),
    AnyOf(Vec<CardFilter>),
    Not(Box<CardFilter>),
}

impl CardFilter {
    /// Conjunction, flattening nested `All`s.
    #[must_use]
    pub fn and(self, other: CardFilter) -> CardFilter {
        match (self, other) {
            (CardFilter::Any, f) | (f, CardFilter::Any) => f,
            (CardFilter::All(mut a), CardFilter::All(b)) => {
                a.extend(b);
                CardFilter::All(a)
            }
            (CardFilter::All(mut a), f) => {
                a.push(f);
                CardFilter::All(a)
            }
            (f, CardFilter::All(mut b)) => {
                b.insert(0, f);
                CardFilter::All(b)
            }
            (a, b) => CardFilter::All(vec![a, b]),
        }
    }

    /// Check a card against this filter. Unknown entities never match.
    #[must_use]
    pub fn matches(&self, ctx: &FilterContext<'_>, entity: EntityId) -> bool {
        match ctx.state.get_card(entity) {
            Some(card) => self.matches_card(ctx, card),
            None => false,
        }
    }

    fn matches_card(&self, ctx: &FilterContext<'_>, card: &CardInstance) -> bool {
        match self {
            CardFilter::Any => true,
            CardFilter::InZone(kind) => ctx
                .state
                .config()
                .get_zone(card.zone)
                .is_some_and(|z| z.kind == *kind),
            CardFilter::ControlledBy(player) => card.controller == *player,
            CardFilter::NotControlledBy(player) => card.controller != *player,
            CardFilter::OwnedBy(player) => card.owner == *player,
            CardFilter::HasType(card_type) => card.is_type(*card_type),
            CardFilter::HasSubtype(subtype) => card.has_subtype(subtype),
            CardFilter::PowerAtMost(n) => card.net_power() <= *n,
            CardFilter::PowerEquals(n) => card.net_power() == *n,
            CardFilter::PowerNotEqual(n) => card.net_power() != *n,
            CardFilter::NotSource => ctx.source != Some(card.entity_id),
            CardFilter::Custom(expr) => match ctx.custom {
                Some(eval) => eval(expr, card, ctx.state),
                // No evaluator: custom clauses don't restrict
                None => true,
            },
            CardFilter::All(filters) => filters.iter().all(|f| f.matches_card(ctx, card)),
            CardFilter::AnyOf(filters) => filters.iter().any(|f| f.matches_card(ctx, card)),
            CardFilter::Not(inner) => !inner.matches_card(ctx, card),
        }
    }
}

/// What a filter is evaluated against.
pub struct FilterContext<'a> {
    pub state: &'a GameState,
    /// The effect's source card, for `NotSource`.
    pub source: Option<EntityId>,
    pub custom: Option<&'a CustomFilterFn<'a>>,
}

impl<'a> FilterContext<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self {
            state,
            source: None,
            custom: None,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: EntityId) -> Self {
        self.source = Some(source);
        self
    }

    #[must_use]
    pub fn with_custom(mut self, custom: &'a CustomFilterFn<'a>) -> Self {
        self.custom = Some(custom);
        self
    }

    /// Keep the entities that pass `filter`, preserving order.
    pub fn select(&self, entities: impl IntoIterator<Item = EntityId>, filter: &CardFilter) -> Vec<EntityId> {
        entities
            .into_iter()
            .filter(|&e| filter.matches(self, e))
            .collect()
    }
}
