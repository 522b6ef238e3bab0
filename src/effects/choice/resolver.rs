//! Resolving a choose-card effect.

use tracing::{debug, instrument};

use crate::core::{EntityId, GameState, PlayerId};

use super::agent::AgentSet;
use super::context::ChoiceContext;
use super::modes::{self, Chooser};
use super::pool::build_pool;
use super::reveal::{RevealChannel, DEFAULT_REVEAL_TITLE};
use super::selection::{CandidatePool, Selection};
use super::spec::{ChoiceMode, ChooseCardSpec, MemorySpec, PlayerRef, TitleTag};
use super::ChoiceError;

/// Who runs the effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceInvocation {
    /// The card whose effect this is; receives the bookkeeping.
    pub source: EntityId,
    pub activator: PlayerId,
    /// Players who choose, in order.
    pub players: Vec<PlayerId>,
}

impl ChoiceInvocation {
    pub fn new(source: EntityId, activator: PlayerId) -> Self {
        Self {
            source,
            activator,
            players: vec![activator],
        }
    }

    #[must_use]
    pub fn with_players(mut self, players: impl IntoIterator<Item = PlayerId>) -> Self {
        self.players = players.into_iter().collect();
        self
    }

    fn player(&self, player_ref: PlayerRef, flag: &'static str) -> Result<PlayerId, ChoiceError> {
        match player_ref {
            PlayerRef::You => Ok(self.activator),
            PlayerRef::Targeted => self
                .players
                .first()
                .copied()
                .ok_or(ChoiceError::NoPlayer(flag)),
            PlayerRef::Player(player) => Ok(player),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChoiceStatus {
    Resolved,
    /// The amount came out as zero or less; nothing happened.
    NoOp,
    /// A library search was declined; nothing was recorded.
    Aborted,
}

/// What a resolution produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceOutcome {
    pub status: ChoiceStatus,
    /// Each participant's own picks, in participation order.
    pub selections: Vec<(PlayerId, Selection)>,
}

impl ChoiceOutcome {
    fn empty(status: ChoiceStatus) -> Self {
        Self {
            status,
            selections: Vec::new(),
        }
    }

    /// Every pick, player order then pick order, each card once.
    #[must_use]
    pub fn aggregate(&self) -> Selection {
        let mut all = Selection::new();
        for (_, selection) in &self.selections {
            all.extend_from(selection);
        }
        all
    }

    #[must_use]
    pub fn selection_for(&self, player: PlayerId) -> Option<&Selection> {
        self.selections
            .iter()
            .find(|(p, _)| *p == player)
            .map(|(_, s)| s)
    }
}

/// Resolves choose-card effects.
///
/// ```
/// use ccg_choice::cards::{CardDefinition, CardId, CardType};
/// use ccg_choice::core::{GameConfig, GameState, PlayerId, PlayerMap, ZoneKind};
/// use ccg_choice::effects::choice::{
///     Amount, ChoiceContext, ChoiceInvocation, ChoiceMode, ChoiceResolver, ChooseCardSpec,
///     RevealLog, ScriptedAgent,
/// };
///
/// let mut state = GameState::new(GameConfig::standard(1), 7);
/// let bear = CardDefinition::new(CardId::new(1), "Grizzly Bears").with_type(CardType::Creature);
/// let p0 = PlayerId::new(0);
/// let source = state.spawn(&bear, p0, ZoneKind::Battlefield).unwrap();
/// let other = state.spawn(&bear, p0, ZoneKind::Battlefield).unwrap();
///
/// let spec = ChooseCardSpec::new(ChoiceMode::Normal).with_amount(Amount::Fixed(1));
/// let mut agents = PlayerMap::from_vec(vec![ScriptedAgent::new().pick(other)]);
/// let outcome = ChoiceResolver::resolve(
///     &mut state,
///     &spec,
///     &ChoiceInvocation::new(source, p0),
///     &mut agents,
///     &mut RevealLog::new(),
///     &ChoiceContext::new(),
/// )
/// .unwrap();
///
/// assert_eq!(outcome.aggregate().into_vec(), vec![other]);
/// assert_eq!(state.get_card(source).unwrap().memory.chosen.len(), 1);
/// ```
pub struct ChoiceResolver;

impl ChoiceResolver {
    /// Run `spec` for every participating player, reveal, and record the
    /// aggregate on the source card.
    #[instrument(level = "debug", skip_all, fields(source = %invocation.source, mode = spec.mode.name()))]
    pub fn resolve<S: AgentSet + ?Sized>(
        state: &mut GameState,
        spec: &ChooseCardSpec,
        invocation: &ChoiceInvocation,
        agents: &mut S,
        reveal: &mut dyn RevealChannel,
        context: &ChoiceContext<'_>,
    ) -> Result<ChoiceOutcome, ChoiceError> {
        if state.get_card(invocation.source).is_none() {
            return Err(ChoiceError::UnknownCard(invocation.source));
        }

        let pool = {
            let filter_ctx = context.filter_context(state, invocation.source);
            build_pool(state, &spec.pool, &invocation.players, &filter_ctx)?
        };

        let max = spec.amount.resolve(state, pool.len(), &*context.eval_amount)?;
        if max <= 0 {
            debug!(max, "nothing to choose");
            return Ok(ChoiceOutcome::empty(ChoiceStatus::NoOp));
        }
        let max = usize::try_from(max).unwrap_or(usize::MAX);
        let min = spec.min_amount.unwrap_or(max);
        debug!(pool = pool.len(), min, max, "resolving choice");

        let reveal_title = spec.reveal.title.as_deref().unwrap_or(DEFAULT_REVEAL_TITLE);
        let mut selections = Vec::with_capacity(invocation.players.len());

        for &player in &invocation.players {
            let Some(picked) =
                Self::choose_for(state, spec, invocation, player, &pool, min, max, agents, context)?
            else {
                debug!(%player, "library search declined, aborting");
                return Ok(ChoiceOutcome::empty(ChoiceStatus::Aborted));
            };
            debug!(%player, picked = ?picked.as_slice(), "player chose");

            if spec.reveal.enabled && !spec.reveal.secretly && !picked.is_empty() {
                let conceal = spec.mode != ChoiceMode::Random;
                reveal.reveal(picked.as_slice(), player, conceal, reveal_title);
            }
            selections.push((player, picked));
        }

        let outcome = ChoiceOutcome {
            status: ChoiceStatus::Resolved,
            selections,
        };
        let aggregate = outcome.aggregate();

        if spec.reveal.enabled && spec.reveal.secretly && !aggregate.is_empty() {
            for &player in &invocation.players {
                reveal.reveal(aggregate.as_slice(), player, true, reveal_title);
            }
        }

        Self::record(state, invocation.source, &aggregate, spec.memory)?;
        Ok(outcome)
    }

    /// One player's selection. `None` aborts the whole resolution.
    #[allow(clippy::too_many_arguments)]
    fn choose_for<S: AgentSet + ?Sized>(
        state: &mut GameState,
        spec: &ChooseCardSpec,
        invocation: &ChoiceInvocation,
        player: PlayerId,
        pool: &CandidatePool,
        min: usize,
        max: usize,
        agents: &mut S,
        context: &ChoiceContext<'_>,
    ) -> Result<Option<Selection>, ChoiceError> {
        let optional = !spec.mandatory;
        let gated = matches!(
            spec.mode,
            ChoiceMode::Normal | ChoiceMode::LibrarySearch { .. } | ChoiceMode::Random
        );
        if gated && !context.can_choose(player, state) {
            debug!(%player, "player can't be targeted, skipping");
            return Ok(Some(Selection::new()));
        }

        // Random picks need the game RNG; everything else asks an agent
        let total = match &spec.mode {
            ChoiceMode::Random => {
                return Ok(Some(state.rng.sample(pool.as_slice(), max).into_iter().collect()));
            }
            ChoiceMode::WithTotalPower { total } => {
                let creatures = state.creatures_in_play(player).len();
                Some(total.resolve(state, creatures, &*context.eval_amount)?)
            }
            _ => None,
        };

        let state: &GameState = state;
        let agent = agents
            .agent_for(player)
            .ok_or(ChoiceError::MissingAgent(player))?;
        let mut chooser = Chooser::new(state, invocation.source, player, agent);
        let filter_ctx = context.filter_context(state, invocation.source);

        let selection = match &spec.mode {
            ChoiceMode::Normal => modes::normal(
                &mut chooser,
                pool,
                min,
                max,
                optional,
                &Self::card_title(state, spec, invocation)?,
            )?,
            ChoiceMode::LibrarySearch { searched } => {
                return modes::library_search(
                    &mut chooser,
                    invocation.player(*searched, "QuasiLibrarySearch")?,
                    spec.pool.filter.as_ref(),
                    &filter_ctx,
                    optional,
                    &Self::card_title(state, spec, invocation)?,
                );
            }
            ChoiceMode::EachBasicType { scope } => modes::each_basic_type(&mut chooser, *scope)?,
            ChoiceMode::ChooseParty => modes::choose_party(&mut chooser)?,
            ChoiceMode::WithTotalPower { .. } => {
                modes::with_total_power(&mut chooser, total.unwrap_or_default())?
            }
            ChoiceMode::WithDifferentPowers => {
                modes::with_different_powers(&mut chooser, pool, &filter_ctx, min, max)?
            }
            ChoiceMode::EachDifferentPower => modes::each_different_power(&mut chooser, pool)?,
            ChoiceMode::ControlAndNot => modes::control_and_not(
                &mut chooser,
                pool,
                min,
                max,
                optional,
                spec.title.as_deref().unwrap_or("Choose a creature"),
            )?,
            ChoiceMode::Random => Selection::new(),
        };
        Ok(Some(selection))
    }

    /// Prompt for plain and library choices, with the title tag appended.
    fn card_title(
        state: &GameState,
        spec: &ChooseCardSpec,
        invocation: &ChoiceInvocation,
    ) -> Result<String, ChoiceError> {
        let title = spec.title.as_deref().unwrap_or("Choose a card");
        let tag = match spec.title_tag {
            None => String::new(),
            Some(TitleTag::Players(player_ref)) => {
                invocation.player(player_ref, "ChoiceTitleAppend")?.to_string()
            }
            Some(TitleTag::ChosenType) => state
                .get_card(invocation.source)
                .and_then(|card| card.memory.chosen_type.clone())
                .unwrap_or_default(),
        };

        if tag.is_empty() {
            Ok(title.to_string())
        } else {
            Ok(format!("{title} ({tag})"))
        }
    }

    fn record(
        state: &mut GameState,
        source: EntityId,
        chosen: &Selection,
        memory: MemorySpec,
    ) -> Result<(), ChoiceError> {
        let card = state
            .get_card_mut(source)
            .ok_or(ChoiceError::UnknownCard(source))?;

        card.memory.set_chosen(chosen.iter());
        if memory.remember {
            card.memory.remember(chosen.iter());
        }
        if memory.forget {
            card.memory.forget(chosen.as_slice());
        }
        if memory.imprint {
            card.memory.imprint(chosen.iter());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId, CardType};
    use crate::core::{GameConfig, PlayerMap, ZoneKind};
    use crate::effects::choice::agent::{FirstChoiceAgent, ScriptedAgent};
    use crate::effects::choice::amount::Amount;
    use crate::effects::choice::reveal::{NoReveal, RevealLog};

    fn setup() -> (GameState, EntityId, Vec<EntityId>) {
        let mut state = GameState::new(GameConfig::standard(2), 11);
        let bear = CardDefinition::new(CardId::new(1), "Grizzly Bears")
            .with_type(CardType::Creature)
            .with_power(2);
        let p0 = PlayerId::new(0);
        let source = state.spawn(&bear, p0, ZoneKind::Graveyard).unwrap();
        let bears = (0..3)
            .map(|_| state.spawn(&bear, p0, ZoneKind::Battlefield).unwrap())
            .collect();
        (state, source, bears)
    }

    #[test]
    fn test_zero_amount_is_noop() {
        let (mut state, source, _) = setup();
        let spec = ChooseCardSpec::new(ChoiceMode::Normal).with_amount(Amount::Fixed(0));
        let mut agents = PlayerMap::from_vec(vec![ScriptedAgent::new(), ScriptedAgent::new()]);

        let outcome = ChoiceResolver::resolve(
            &mut state,
            &spec,
            &ChoiceInvocation::new(source, PlayerId::new(0)),
            &mut agents,
            &mut NoReveal,
            &ChoiceContext::new(),
        )
        .unwrap();

        assert_eq!(outcome.status, ChoiceStatus::NoOp);
        assert!(agents[PlayerId::new(0)].offers().is_empty());
        assert!(state.get_card(source).unwrap().memory.chosen.is_empty());
    }

    #[test]
    fn test_unknown_source() {
        let (mut state, _, _) = setup();
        let spec = ChooseCardSpec::new(ChoiceMode::Normal);
        let mut agents = PlayerMap::from_vec(vec![FirstChoiceAgent, FirstChoiceAgent]);

        let err = ChoiceResolver::resolve(
            &mut state,
            &spec,
            &ChoiceInvocation::new(EntityId(999), PlayerId::new(0)),
            &mut agents,
            &mut NoReveal,
            &ChoiceContext::new(),
        )
        .unwrap_err();
        assert!(matches!(err, ChoiceError::UnknownCard(EntityId(999))));
    }

    #[test]
    fn test_missing_agent() {
        let (mut state, source, _) = setup();
        let spec = ChooseCardSpec::new(ChoiceMode::Normal);
        let mut agents = PlayerMap::from_vec(vec![FirstChoiceAgent]);

        let err = ChoiceResolver::resolve(
            &mut state,
            &spec,
            &ChoiceInvocation::new(source, PlayerId::new(0)).with_players([PlayerId::new(1)]),
            &mut agents,
            &mut NoReveal,
            &ChoiceContext::new(),
        )
        .unwrap_err();
        assert!(matches!(err, ChoiceError::MissingAgent(p) if p == PlayerId::new(1)));
    }

    #[test]
    fn test_amount_evaluator_failure() {
        let (mut state, source, _) = setup();
        let spec = ChooseCardSpec::new(ChoiceMode::Normal).with_amount(Amount::Expr("X".into()));
        let mut agents = PlayerMap::from_vec(vec![FirstChoiceAgent, FirstChoiceAgent]);

        let err = ChoiceResolver::resolve(
            &mut state,
            &spec,
            &ChoiceInvocation::new(source, PlayerId::new(0)),
            &mut agents,
            &mut NoReveal,
            &ChoiceContext::new(),
        )
        .unwrap_err();
        assert!(matches!(err, ChoiceError::Amount { .. }));
    }

    #[test]
    fn test_normal_records_and_reveals() {
        let (mut state, source, bears) = setup();
        let spec = ChooseCardSpec::new(ChoiceMode::Normal)
            .with_amount(Amount::Fixed(2))
            .reveal()
            .remember();
        let mut agents = PlayerMap::from_vec(vec![
            ScriptedAgent::new().pick_many([bears[2], bears[0]]),
            ScriptedAgent::new(),
        ]);
        let mut log = RevealLog::new();

        let outcome = ChoiceResolver::resolve(
            &mut state,
            &spec,
            &ChoiceInvocation::new(source, PlayerId::new(0)),
            &mut agents,
            &mut log,
            &ChoiceContext::new(),
        )
        .unwrap();

        assert_eq!(outcome.status, ChoiceStatus::Resolved);
        assert_eq!(outcome.aggregate().into_vec(), vec![bears[2], bears[0]]);

        let memory = &state.get_card(source).unwrap().memory;
        assert_eq!(memory.chosen.iter().copied().collect::<Vec<_>>(), vec![bears[2], bears[0]]);
        assert_eq!(memory.remembered.len(), 2);

        assert_eq!(log.len(), 1);
        assert!(log.events()[0].conceal_from_revealer);
        assert_eq!(log.events()[0].title, DEFAULT_REVEAL_TITLE);
    }

    #[test]
    fn test_outcome_aggregate_dedups() {
        let outcome = ChoiceOutcome {
            status: ChoiceStatus::Resolved,
            selections: vec![
                (PlayerId::new(0), [EntityId(1), EntityId(2)].into_iter().collect()),
                (PlayerId::new(1), [EntityId(2), EntityId(3)].into_iter().collect()),
            ],
        };

        assert_eq!(
            outcome.aggregate().into_vec(),
            vec![EntityId(1), EntityId(2), EntityId(3)]
        );
        assert_eq!(outcome.selection_for(PlayerId::new(1)).map(Selection::len), Some(2));
        assert!(outcome.selection_for(PlayerId::new(2)).is_none());
    }
}
