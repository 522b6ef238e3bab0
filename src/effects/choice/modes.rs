//! Per-mode selection logic.
//!
//! Every mode works through a `Chooser`, which asks one player's agent and
//! rejects answers that break the offer (cards outside the pool, repeats,
//! wrong counts, declining a mandatory pick).

use tracing::{trace, warn};

use crate::cards::{CardType, BASIC_LAND_TYPES, PARTY_TYPES};
use crate::core::{EntityId, GameState, PlayerId, ZoneKind, LIMITED_SEARCH_DEPTH, LIMIT_SEARCH_LIBRARY};
use crate::effects::targeting::{CardFilter, FilterContext};

use super::agent::{ChoiceAgent, ChoiceRequest, ConfirmMode};
use super::reveal::DelayedReveal;
use super::selection::{CandidatePool, Selection};
use super::spec::{with_article, BasicTypeScope};
use super::ChoiceError;

/// One player's side of a resolution.
pub(crate) struct Chooser<'s, 'a> {
    pub state: &'s GameState,
    pub source: EntityId,
    pub player: PlayerId,
    agent: &'a mut dyn ChoiceAgent,
}

impl<'s, 'a> Chooser<'s, 'a> {
    pub fn new(state: &'s GameState, source: EntityId, player: PlayerId, agent: &'a mut dyn ChoiceAgent) -> Self {
        Self {
            state,
            source,
            player,
            agent,
        }
    }

    fn request<'r>(&self, prompt: &'r str) -> ChoiceRequest<'r>
    where
        's: 'r,
    {
        ChoiceRequest {
            state: self.state,
            source: self.source,
            player: self.player,
            prompt,
        }
    }

    fn invalid(&self, reason: impl Into<String>) -> ChoiceError {
        let reason = reason.into();
        warn!(player = %self.player, %reason, "rejected agent answer");
        ChoiceError::InvalidResponse {
            player: self.player,
            reason,
        }
    }

    /// Ask for one card. Empty pools are never offered.
    pub fn pick_one(
        &mut self,
        pool: &CandidatePool,
        prompt: &str,
        optional: bool,
        delayed_reveal: Option<&DelayedReveal>,
    ) -> Result<Option<EntityId>, ChoiceError> {
        if pool.is_empty() {
            return Ok(None);
        }

        let request = self.request(prompt);
        let answer = self.agent.choose_one(&request, pool, optional, delayed_reveal);
        trace!(player = %self.player, pool = pool.len(), optional, ?answer, "choose_one");

        match answer {
            Some(card) if !pool.contains(card) => Err(self.invalid(format!("{card} was not offered"))),
            None if !optional => Err(self.invalid("declined a mandatory choice")),
            answer => Ok(answer),
        }
    }

    /// Ask for between `min` and `max` cards, both clamped to the pool.
    pub fn pick_many(
        &mut self,
        pool: &CandidatePool,
        prompt: &str,
        min: usize,
        max: usize,
        optional: bool,
    ) -> Result<Selection, ChoiceError> {
        let upper = max.min(pool.len());
        if upper == 0 {
            return Ok(Selection::new());
        }
        let lower = if optional { 0 } else { min.min(upper) };

        let request = self.request(prompt);
        let answer = self.agent.choose_many(&request, pool, min.min(upper), upper, optional);
        trace!(player = %self.player, pool = pool.len(), lower, upper, picked = answer.len(), "choose_many");

        if let Some(card) = answer.iter().find(|&e| !pool.contains(e)) {
            return Err(self.invalid(format!("{card} was not offered")));
        }
        if answer.len() < lower || answer.len() > upper {
            return Err(self.invalid(format!(
                "picked {} cards, expected {lower} to {upper}",
                answer.len()
            )));
        }
        Ok(answer)
    }

    pub fn confirm(&mut self, mode: ConfirmMode, prompt: &str) -> bool {
        let request = self.request(prompt);
        self.agent.confirm(&request, mode)
    }
}

/// One multi-pick over the pool.
pub(crate) fn normal(
    chooser: &mut Chooser<'_, '_>,
    pool: &CandidatePool,
    min: usize,
    max: usize,
    optional: bool,
    title: &str,
) -> Result<Selection, ChoiceError> {
    chooser.pick_many(pool, title, min, max, optional)
}

/// One card from `searched`'s library. `None` when the chooser declines.
pub(crate) fn library_search(
    chooser: &mut Chooser<'_, '_>,
    searched: PlayerId,
    filter: Option<&CardFilter>,
    filter_ctx: &FilterContext<'_>,
    optional: bool,
    title: &str,
) -> Result<Option<Selection>, ChoiceError> {
    let mut exposed = chooser.state.library_top_first(searched);
    if chooser.state.has_keyword(chooser.player, LIMIT_SEARCH_LIBRARY) {
        exposed.truncate(LIMITED_SEARCH_DEPTH);
    }

    let pool = match filter {
        Some(filter) => CandidatePool::new(filter_ctx.select(exposed.iter().copied(), filter)),
        None => CandidatePool::new(exposed.iter().copied()),
    };
    let delayed = DelayedReveal {
        cards: exposed,
        zone: ZoneKind::Library,
        owner: searched,
        title: "Looking at cards in library".to_string(),
    };

    Ok(chooser
        .pick_one(&pool, title, optional, Some(&delayed))?
        .map(Selection::from))
}

/// One optional pick per basic land type present.
///
/// A land with several basic types is offered once for each of them; picking
/// it twice still records it once.
pub(crate) fn each_basic_type(
    chooser: &mut Chooser<'_, '_>,
    scope: BasicTypeScope,
) -> Result<Selection, ChoiceError> {
    let state = chooser.state;
    let lands: Vec<EntityId> = state
        .cards_in(ZoneKind::Battlefield)
        .into_iter()
        .filter(|&e| {
            state.get_card(e).is_some_and(|card| {
                card.is_type(CardType::Land)
                    && (scope == BasicTypeScope::AllPlayers || card.controller == chooser.player)
            })
        })
        .collect();

    let mut chosen = Selection::new();
    for land_type in BASIC_LAND_TYPES {
        let pool = CandidatePool::new(
            lands
                .iter()
                .copied()
                .filter(|&e| state.get_card(e).is_some_and(|c| c.has_subtype(land_type))),
        );
        let prompt = format!("Choose {}", with_article(land_type));
        if let Some(land) = chooser.pick_one(&pool, &prompt, true, None)? {
            chosen.push(land);
        }
    }
    Ok(chosen)
}

/// At most one each of the party types among the chooser's permanents.
pub(crate) fn choose_party(chooser: &mut Chooser<'_, '_>) -> Result<Selection, ChoiceError> {
    let state = chooser.state;
    let permanents = state.player_cards_in(chooser.player, ZoneKind::Battlefield);

    let mut chosen = Selection::new();
    for party_type in PARTY_TYPES {
        let pool = CandidatePool::new(
            permanents
                .iter()
                .copied()
                .filter(|&e| !chosen.contains(e))
                .filter(|&e| state.get_card(e).is_some_and(|c| c.has_subtype(party_type))),
        );
        let prompt = format!("Choose {}", with_article(party_type));
        if let Some(card) = chooser.pick_one(&pool, &prompt, true, None)? {
            chosen.push(card);
        }
    }
    Ok(chosen)
}

/// Creatures whose total power stays within `total`.
///
/// Negative-power creatures still unchosen widen the budget by their
/// magnitude, since picking them later brings the sum back down. While the
/// chosen sum exceeds `total` the chooser may not decline.
pub(crate) fn with_total_power(chooser: &mut Chooser<'_, '_>, total: i64) -> Result<Selection, ChoiceError> {
    let state = chooser.state;
    let creatures = CandidatePool::new(state.creatures_in_play(chooser.player));

    let mut chosen = Selection::new();
    let mut chosen_power = 0i64;
    loop {
        let unchosen = creatures.without(&chosen);
        let negative = unchosen
            .iter()
            .map(|e| state.power_of(e))
            .filter(|&p| p < 0)
            .fold(0i64, i64::saturating_add);
        let budget = total.saturating_sub(chosen_power).saturating_sub(negative);

        let affordable = unchosen.filter(|e| state.power_of(e) <= budget);
        if affordable.is_empty() {
            break;
        }

        let prompt = format!(
            "Choose creatures with total power {budget} or less (selected {}, total power {chosen_power})",
            chosen.len()
        );
        let optional = chosen_power <= total;
        match chooser.pick_one(&affordable, &prompt, optional, None)? {
            Some(creature) => {
                chosen_power = chosen_power.saturating_add(state.power_of(creature));
                chosen.push(creature);
            }
            None => {
                if chooser.confirm(ConfirmMode::OptionalChoose, "Stop choosing?") {
                    break;
                }
            }
        }
    }
    Ok(chosen)
}

/// Up to `max` picks with pairwise different powers.
pub(crate) fn with_different_powers(
    chooser: &mut Chooser<'_, '_>,
    pool: &CandidatePool,
    filter_ctx: &FilterContext<'_>,
    min: usize,
    max: usize,
) -> Result<Selection, ChoiceError> {
    let state = chooser.state;
    let mut restriction = CardFilter::Any;
    let mut remaining = pool.clone();
    let mut chosen = Selection::new();

    while !remaining.is_empty() && chosen.len() < max {
        let prompt = if chosen.is_empty() {
            "Choose a creature"
        } else {
            "Choose a creature with a different power"
        };
        let optional = chosen.len() >= min;
        let Some(creature) = chooser.pick_one(&remaining, prompt, optional, None)? else {
            break;
        };

        chosen.push(creature);
        restriction = restriction.and(CardFilter::PowerNotEqual(state.power_of(creature)));
        remaining = pool.filter(|e| restriction.matches(filter_ctx, e));
    }
    Ok(chosen)
}

/// One creature per distinct power in the pool, lowest power first.
pub(crate) fn each_different_power(
    chooser: &mut Chooser<'_, '_>,
    pool: &CandidatePool,
) -> Result<Selection, ChoiceError> {
    let state = chooser.state;
    let mut powers: Vec<i64> = pool.iter().map(|e| state.power_of(e)).collect();
    powers.sort_unstable();
    powers.dedup();

    let mut chosen = Selection::new();
    for power in powers {
        let bucket = pool.filter(|e| state.power_of(e) == power);
        let prompt = format!("Choose a creature with power {power}");
        if let Some(creature) = chooser.pick_one(&bucket, &prompt, false, None)? {
            chosen.push(creature);
        }
    }
    Ok(chosen)
}

/// A pick among the chooser's own cards, then one among everyone else's.
pub(crate) fn control_and_not(
    chooser: &mut Chooser<'_, '_>,
    pool: &CandidatePool,
    min: usize,
    max: usize,
    optional: bool,
    title: &str,
) -> Result<Selection, ChoiceError> {
    let state = chooser.state;
    let player = chooser.player;
    let (mine, theirs) = pool.partition(|&e| state.controller_of(e) == Some(player));

    let mut chosen = chooser.pick_many(&mine, &format!("{title} you control"), min, max, optional)?;
    let others = chooser.pick_many(&theirs, &format!("{title} you don't control"), min, max, optional)?;
    chosen.extend_from(&others);
    Ok(chosen)
}
