use crate::core::{EntityId, GameState, PlayerId, ZoneKind};
use crate::effects::targeting::FilterContext;

use super::selection::CandidatePool;
use super::spec::{PoolSource, PoolSpec};
use super::ChoiceError;

/// Build the candidate pool for one resolution.
///
/// Steps, in order: base cards, validity filter, `target_controls`,
/// `defined` (replaces everything so far), stack cards prepended.
pub fn build_pool(
    state: &GameState,
    spec: &PoolSpec,
    players: &[PlayerId],
    filter_ctx: &FilterContext<'_>,
) -> Result<CandidatePool, ChoiceError> {
    let mut cards: Vec<EntityId> = match spec.source {
        PoolSource::AllCards => state.all_cards(),
        PoolSource::Zone(kind) => state.cards_in(kind),
    };

    if let Some(filter) = &spec.filter {
        cards = filter_ctx.select(cards, filter);
    }

    if spec.target_controls {
        let first = *players.first().ok_or(ChoiceError::NoPlayer("TargetControls"))?;
        cards.retain(|&e| state.controller_of(e) == Some(first));
    }

    if let Some(defined) = &spec.defined {
        cards = defined.clone();
    }

    if spec.include_stack {
        let mut with_stack = state.cards_in(ZoneKind::Stack);
        with_stack.extend(cards);
        cards = with_stack;
    }

    Ok(CandidatePool::new(cards))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId, CardType};
    use crate::core::GameConfig;
    use crate::effects::targeting::CardFilter;

    fn board() -> (GameState, Vec<EntityId>) {
        let mut state = GameState::new(GameConfig::standard(2), 3);
        let bear = CardDefinition::new(CardId::new(1), "Grizzly Bears")
            .with_type(CardType::Creature)
            .with_power(2);
        let bolt = CardDefinition::new(CardId::new(2), "Lightning Bolt").with_type(CardType::Instant);

        let ids = vec![
            state.spawn(&bear, PlayerId::new(0), ZoneKind::Battlefield).unwrap(),
            state.spawn(&bear, PlayerId::new(1), ZoneKind::Battlefield).unwrap(),
            state.spawn(&bear, PlayerId::new(0), ZoneKind::Graveyard).unwrap(),
            state.spawn(&bolt, PlayerId::new(1), ZoneKind::Stack).unwrap(),
        ];
        (state, ids)
    }

    #[test]
    fn test_default_is_battlefield() {
        let (state, ids) = board();
        let ctx = FilterContext::new(&state);
        let pool = build_pool(&state, &PoolSpec::default(), &[PlayerId::new(0)], &ctx).unwrap();

        assert_eq!(pool.as_slice(), &ids[..2]);
    }

    #[test]
    fn test_all_cards_with_filter() {
        let (state, ids) = board();
        let ctx = FilterContext::new(&state);
        let spec = PoolSpec {
            source: PoolSource::AllCards,
            filter: Some(CardFilter::HasType(CardType::Creature)),
            ..PoolSpec::default()
        };
        let pool = build_pool(&state, &spec, &[], &ctx).unwrap();

        assert_eq!(pool.as_slice(), &ids[..3]);
    }

    #[test]
    fn test_target_controls() {
        let (state, ids) = board();
        let ctx = FilterContext::new(&state);
        let spec = PoolSpec {
            target_controls: true,
            ..PoolSpec::default()
        };

        let pool = build_pool(&state, &spec, &[PlayerId::new(1)], &ctx).unwrap();
        assert_eq!(pool.as_slice(), &[ids[1]]);

        let err = build_pool(&state, &spec, &[], &ctx).unwrap_err();
        assert!(matches!(err, ChoiceError::NoPlayer("TargetControls")));
    }

    #[test]
    fn test_defined_then_stack_dedup() {
        let (state, ids) = board();
        let ctx = FilterContext::new(&state);
        let spec = PoolSpec {
            defined: Some(vec![ids[2], ids[3], ids[2]]),
            include_stack: true,
            ..PoolSpec::default()
        };
        let pool = build_pool(&state, &spec, &[], &ctx).unwrap();

        // Stack first, then the defined cards, each once
        assert_eq!(pool.as_slice(), &[ids[3], ids[2]]);
    }
}
