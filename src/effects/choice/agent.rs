//! Choice agents: whoever answers a player's card choices.
//!
//! The resolver never decides for a player. It hands each decision to that
//! player's `ChoiceAgent` (a UI, an AI, a network peer) and validates the
//! answer against the pool it offered.
//!
//! ## Key Types
//!
//! - `ChoiceAgent`: the three decisions (`choose_one`, `choose_many`, `confirm`)
//! - `AgentSet`: maps players to agents for one resolution
//! - `ScriptedAgent`: replays queued answers and records what it was offered
//! - `FirstChoiceAgent`: deterministic, always the minimum legal answer
//! - `RandomAgent`: seeded random answers

use std::collections::VecDeque;

use tracing::warn;

use crate::core::{EntityId, GameRng, GameState, PlayerId, PlayerMap};

use super::reveal::DelayedReveal;
use super::selection::{CandidatePool, Selection};

/// What a decision is about.
pub struct ChoiceRequest<'a> {
    pub state: &'a GameState,
    /// The card whose effect asks.
    pub source: EntityId,
    /// The player deciding.
    pub player: PlayerId,
    pub prompt: &'a str,
}

/// Kinds of yes/no questions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmMode {
    /// "Stop choosing?" after declining an optional pick. Yes ends the choice.
    OptionalChoose,
}

/// Answers card choices for one player.
pub trait ChoiceAgent {
    /// Pick one card from `pool`, or `None` to decline (only legal when
    /// `optional`).
    fn choose_one(
        &mut self,
        request: &ChoiceRequest<'_>,
        pool: &CandidatePool,
        optional: bool,
        delayed_reveal: Option<&DelayedReveal>,
    ) -> Option<EntityId>;

    /// Pick between `min` and `max` distinct cards (zero allowed when
    /// `optional`).
    fn choose_many(
        &mut self,
        request: &ChoiceRequest<'_>,
        pool: &CandidatePool,
        min: usize,
        max: usize,
        optional: bool,
    ) -> Selection;

    fn confirm(&mut self, request: &ChoiceRequest<'_>, mode: ConfirmMode) -> bool;
}

impl<A: ChoiceAgent + ?Sized> ChoiceAgent for Box<A> {
    fn choose_one(
        &mut self,
        request: &ChoiceRequest<'_>,
        pool: &CandidatePool,
        optional: bool,
        delayed_reveal: Option<&DelayedReveal>,
    ) -> Option<EntityId> {
        (**self).choose_one(request, pool, optional, delayed_reveal)
    }

    fn choose_many(
        &mut self,
        request: &ChoiceRequest<'_>,
        pool: &CandidatePool,
        min: usize,
        max: usize,
        optional: bool,
    ) -> Selection {
        (**self).choose_many(request, pool, min, max, optional)
    }

    fn confirm(&mut self, request: &ChoiceRequest<'_>, mode: ConfirmMode) -> bool {
        (**self).confirm(request, mode)
    }
}

/// The agents taking part in a resolution.
pub trait AgentSet {
    fn agent_for(&mut self, player: PlayerId) -> Option<&mut dyn ChoiceAgent>;
}

impl<A: ChoiceAgent> AgentSet for PlayerMap<A> {
    fn agent_for(&mut self, player: PlayerId) -> Option<&mut dyn ChoiceAgent> {
        self.try_get_mut(player).map(|agent| agent as &mut dyn ChoiceAgent)
    }
}

/// Lower bound an agent must meet.
fn effective_min(pool: &CandidatePool, min: usize, optional: bool) -> usize {
    if optional {
        0
    } else {
        min.min(pool.len())
    }
}

// =============================================================================
// FirstChoiceAgent
// =============================================================================

/// Deterministic agent giving the smallest legal answer.
///
/// Declines whatever it may decline; otherwise takes cards from the front
/// of the pool. Always stops when asked.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstChoiceAgent;

impl ChoiceAgent for FirstChoiceAgent {
    fn choose_one(
        &mut self,
        _request: &ChoiceRequest<'_>,
        pool: &CandidatePool,
        optional: bool,
        _delayed_reveal: Option<&DelayedReveal>,
    ) -> Option<EntityId> {
        if optional {
            None
        } else {
            pool.iter().next()
        }
    }

    fn choose_many(
        &mut self,
        _request: &ChoiceRequest<'_>,
        pool: &CandidatePool,
        min: usize,
        _max: usize,
        optional: bool,
    ) -> Selection {
        pool.iter().take(effective_min(pool, min, optional)).collect()
    }

    fn confirm(&mut self, _request: &ChoiceRequest<'_>, _mode: ConfirmMode) -> bool {
        true
    }
}

// =============================================================================
// RandomAgent
// =============================================================================

/// Seeded agent answering uniformly at random.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: GameRng,
}

impl RandomAgent {
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(GameRng::new(seed))
    }

    /// An agent with its own stream split off the game RNG.
    pub fn forked_from(rng: &mut GameRng) -> Self {
        Self::new(rng.fork())
    }
}

impl ChoiceAgent for RandomAgent {
    fn choose_one(
        &mut self,
        _request: &ChoiceRequest<'_>,
        pool: &CandidatePool,
        optional: bool,
        _delayed_reveal: Option<&DelayedReveal>,
    ) -> Option<EntityId> {
        // Declining is one more option alongside the cards
        let options = pool.len() + usize::from(optional);
        if options == 0 {
            return None;
        }
        let pick = self.rng.gen_range_usize(0..options);
        pool.as_slice().get(pick).copied()
    }

    fn choose_many(
        &mut self,
        _request: &ChoiceRequest<'_>,
        pool: &CandidatePool,
        min: usize,
        max: usize,
        optional: bool,
    ) -> Selection {
        let upper = max.min(pool.len());
        let lower = effective_min(pool, min, optional).min(upper);
        let count = lower + self.rng.gen_inclusive(upper - lower);
        self.rng.sample(pool.as_slice(), count).into_iter().collect()
    }

    fn confirm(&mut self, _request: &ChoiceRequest<'_>, _mode: ConfirmMode) -> bool {
        self.rng.gen_inclusive(1) == 1
    }
}

// =============================================================================
// ScriptedAgent
// =============================================================================

/// One queued answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptedAnswer {
    Pick(EntityId),
    Decline,
    PickMany(Vec<EntityId>),
    Confirm(bool),
}

/// A decision a scripted agent was asked to make.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Offer {
    pub prompt: String,
    pub pool: Vec<EntityId>,
    pub optional: bool,
}

/// Replays queued answers in order, for tests and replays.
///
/// Every `choose_one`/`choose_many` call is recorded in `offers`. When the
/// queue runs dry the agent declines and answers `true` to confirmations.
///
/// ```
/// use ccg_choice::core::EntityId;
/// use ccg_choice::effects::choice::ScriptedAgent;
///
/// let agent = ScriptedAgent::new().pick(EntityId(3)).decline().confirm(false);
/// assert_eq!(agent.remaining(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScriptedAgent {
    answers: VecDeque<ScriptedAnswer>,
    offers: Vec<Offer>,
}

impl ScriptedAgent {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn pick(mut self, entity: EntityId) -> Self {
        self.answers.push_back(ScriptedAnswer::Pick(entity));
        self
    }

    #[must_use]
    pub fn decline(mut self) -> Self {
        self.answers.push_back(ScriptedAnswer::Decline);
        self
    }

    #[must_use]
    pub fn pick_many(mut self, entities: impl IntoIterator<Item = EntityId>) -> Self {
        self.answers
            .push_back(ScriptedAnswer::PickMany(entities.into_iter().collect()));
        self
    }

    #[must_use]
    pub fn confirm(mut self, answer: bool) -> Self {
        self.answers.push_back(ScriptedAnswer::Confirm(answer));
        self
    }

    /// Decisions this agent was offered, in order.
    #[must_use]
    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    /// Answers not yet used.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn record(&mut self, request: &ChoiceRequest<'_>, pool: &CandidatePool, optional: bool) {
        self.offers.push(Offer {
            prompt: request.prompt.to_string(),
            pool: pool.as_slice().to_vec(),
            optional,
        });
    }
}

impl ChoiceAgent for ScriptedAgent {
    fn choose_one(
        &mut self,
        request: &ChoiceRequest<'_>,
        pool: &CandidatePool,
        optional: bool,
        _delayed_reveal: Option<&DelayedReveal>,
    ) -> Option<EntityId> {
        self.record(request, pool, optional);
        match self.answers.pop_front() {
            Some(ScriptedAnswer::Pick(entity)) => Some(entity),
            Some(ScriptedAnswer::Decline) | None => None,
            Some(other) => {
                warn!(player = %request.player, answer = ?other, "scripted answer does not fit choose_one");
                None
            }
        }
    }

    fn choose_many(
        &mut self,
        request: &ChoiceRequest<'_>,
        pool: &CandidatePool,
        _min: usize,
        _max: usize,
        optional: bool,
    ) -> Selection {
        self.record(request, pool, optional);
        match self.answers.pop_front() {
            Some(ScriptedAnswer::PickMany(entities)) => entities.into_iter().collect(),
            Some(ScriptedAnswer::Pick(entity)) => Selection::from(entity),
            Some(ScriptedAnswer::Decline) | None => Selection::new(),
            Some(other) => {
                warn!(player = %request.player, answer = ?other, "scripted answer does not fit choose_many");
                Selection::new()
            }
        }
    }

    fn confirm(&mut self, request: &ChoiceRequest<'_>, _mode: ConfirmMode) -> bool {
        match self.answers.pop_front() {
            Some(ScriptedAnswer::Confirm(answer)) => answer,
            None => true,
            Some(other) => {
                warn!(player = %request.player, answer = ?other, "scripted answer does not fit confirm");
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;

    fn pool(raw: &[u32]) -> CandidatePool {
        raw.iter().copied().map(EntityId).collect()
    }

    fn request(state: &GameState) -> ChoiceRequest<'_> {
        ChoiceRequest {
            state,
            source: EntityId(1),
            player: PlayerId::new(0),
            prompt: "Choose a card",
        }
    }

    #[test]
    fn test_first_choice_agent_is_minimal() {
        let state = GameState::new(GameConfig::standard(2), 1);
        let req = request(&state);
        let pool = pool(&[4, 5, 6]);
        let mut agent = FirstChoiceAgent;

        assert_eq!(agent.choose_one(&req, &pool, true, None), None);
        assert_eq!(agent.choose_one(&req, &pool, false, None), Some(EntityId(4)));
        assert!(agent.choose_many(&req, &pool, 2, 3, true).is_empty());
        assert_eq!(
            agent.choose_many(&req, &pool, 2, 3, false).into_vec(),
            vec![EntityId(4), EntityId(5)]
        );
        assert!(agent.confirm(&req, ConfirmMode::OptionalChoose));
    }

    #[test]
    fn test_random_agent_stays_legal() {
        let state = GameState::new(GameConfig::standard(2), 1);
        let req = request(&state);
        let pool = pool(&[4, 5, 6, 7]);
        let mut agent = RandomAgent::from_seed(99);

        for _ in 0..100 {
            let one = agent.choose_one(&req, &pool, false, None);
            assert!(one.is_some_and(|e| pool.contains(e)));

            let many = agent.choose_many(&req, &pool, 2, 3, false);
            assert!((2..=3).contains(&many.len()));
            assert!(many.iter().all(|e| pool.contains(e)));
        }
    }

    #[test]
    fn test_random_agent_deterministic() {
        let state = GameState::new(GameConfig::standard(2), 1);
        let req = request(&state);
        let pool = pool(&[1, 2, 3, 4, 5, 6, 7, 8]);

        let mut a = RandomAgent::from_seed(5);
        let mut b = RandomAgent::from_seed(5);
        for _ in 0..20 {
            assert_eq!(
                a.choose_many(&req, &pool, 0, 8, true),
                b.choose_many(&req, &pool, 0, 8, true)
            );
        }
    }

    #[test]
    fn test_scripted_agent_replays_and_records() {
        let state = GameState::new(GameConfig::standard(2), 1);
        let req = request(&state);
        let pool = pool(&[4, 5]);
        let mut agent = ScriptedAgent::new()
            .pick(EntityId(5))
            .decline()
            .confirm(false)
            .pick_many([EntityId(4), EntityId(5)]);

        assert_eq!(agent.choose_one(&req, &pool, true, None), Some(EntityId(5)));
        assert_eq!(agent.choose_one(&req, &pool, true, None), None);
        assert!(!ChoiceAgent::confirm(&mut agent, &req, ConfirmMode::OptionalChoose));
        assert_eq!(agent.choose_many(&req, &pool, 1, 2, false).len(), 2);

        // Exhausted
        assert_eq!(agent.choose_one(&req, &pool, true, None), None);
        assert!(ChoiceAgent::confirm(&mut agent, &req, ConfirmMode::OptionalChoose));

        assert_eq!(agent.offers().len(), 4);
        assert_eq!(agent.offers()[0].pool, vec![EntityId(4), EntityId(5)]);
        assert_eq!(agent.offers()[0].prompt, "Choose a card");
    }

    #[test]
    fn test_player_map_agent_set() {
        let mut agents: PlayerMap<Box<dyn ChoiceAgent>> = PlayerMap::from_vec(vec![
            Box::new(FirstChoiceAgent),
            Box::new(RandomAgent::from_seed(3)),
        ]);

        assert!(agents.agent_for(PlayerId::new(1)).is_some());
        assert!(agents.agent_for(PlayerId::new(2)).is_none());
    }
}
