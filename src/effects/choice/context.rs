use crate::cards::CardInstance;
use crate::core::{EntityId, GameState, PlayerId};
use crate::effects::targeting::{CustomFilterFn, FilterContext};

use super::amount::{literal_amount, AmountEvalFn};

/// Game-specific collaborators for resolving a choice.
///
/// Games plug in their expression language here: amount expressions
/// ("X", "Count$..."), custom validity clauses, and whether a player can
/// be targeted by the ability.
pub struct ChoiceContext<'a> {
    /// Evaluate an amount expression.
    pub eval_amount: Box<AmountEvalFn<'a>>,
    /// Evaluate a `CardFilter::Custom` clause.
    pub eval_filter: Box<CustomFilterFn<'a>>,
    /// Whether the ability may target a player. `None` means it doesn't
    /// target players, so every participant chooses.
    pub can_target: Option<Box<dyn Fn(PlayerId, &GameState) -> bool + 'a>>,
}

impl<'a> ChoiceContext<'a> {
    /// Literal amounts only, custom clauses accept everything, no targeting.
    pub fn new() -> Self {
        Self {
            eval_amount: Box::new(literal_amount),
            eval_filter: Box::new(|_, _, _| true),
            can_target: None,
        }
    }

    /// Add an amount evaluator.
    #[must_use]
    pub fn with_amount_eval(
        mut self,
        eval: impl Fn(&str, &GameState) -> Result<i64, String> + 'a,
    ) -> Self {
        self.eval_amount = Box::new(eval);
        self
    }

    /// Add a custom filter evaluator.
    #[must_use]
    pub fn with_filter_eval(
        mut self,
        eval: impl Fn(&str, &CardInstance, &GameState) -> bool + 'a,
    ) -> Self {
        self.eval_filter = Box::new(eval);
        self
    }

    /// Make the ability player-targeting.
    #[must_use]
    pub fn with_targeting(mut self, can_target: impl Fn(PlayerId, &GameState) -> bool + 'a) -> Self {
        self.can_target = Some(Box::new(can_target));
        self
    }

    /// Whether `player` gets to choose.
    pub fn can_choose(&self, player: PlayerId, state: &GameState) -> bool {
        self.can_target
            .as_ref()
            .map_or(true, |can_target| can_target(player, state))
    }

    /// Filter context for cards seen from `source`.
    pub fn filter_context<'s>(&'s self, state: &'s GameState, source: EntityId) -> FilterContext<'s> {
        FilterContext::new(state)
            .with_source(source)
            .with_custom(&*self.eval_filter)
    }
}

impl Default for ChoiceContext<'_> {
    fn default() -> Self {
        Self::new()
    }
}
