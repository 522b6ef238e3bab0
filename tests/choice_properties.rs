//! Property tests for choose-card modes.

mod common;

use std::collections::HashSet;

use ccg_choice::core::{EntityId, PlayerId, PlayerMap};
use ccg_choice::effects::choice::{
    Amount, ChoiceMode, ChooseCardSpec, FirstChoiceAgent, NoReveal, RandomAgent,
};
use proptest::prelude::*;

use common::Board;

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);

fn random_agents(seed: u64) -> PlayerMap<RandomAgent> {
    PlayerMap::from_vec(vec![RandomAgent::from_seed(seed), RandomAgent::from_seed(seed.wrapping_add(1))])
}

fn board_with_powers(powers: &[i64]) -> (Board, Vec<EntityId>) {
    let mut board = Board::new(2);
    let creatures = powers.iter().map(|&p| board.creature(P0, p)).collect();
    (board, creatures)
}

proptest! {
    /// Random mode picks min(amount, pool) distinct pool cards.
    #[test]
    fn random_mode_sample_size(pool_size in 0usize..10, amount in 1i64..12) {
        let (mut board, creatures) = board_with_powers(&vec![1; pool_size]);
        let spec = ChooseCardSpec::new(ChoiceMode::Random).with_amount(Amount::Fixed(amount));
        let mut agents = PlayerMap::from_vec(vec![FirstChoiceAgent, FirstChoiceAgent]);

        let outcome = board.resolve(&spec, &[P0], &mut agents, &mut NoReveal).unwrap();
        let picked = outcome.aggregate().into_vec();

        prop_assert_eq!(picked.len(), (amount as usize).min(pool_size));
        prop_assert!(picked.iter().all(|e| creatures.contains(e)));
        let unique: HashSet<_> = picked.iter().collect();
        prop_assert_eq!(unique.len(), picked.len());
    }

    /// No two picks of the power ladder share a power.
    #[test]
    fn different_powers_are_distinct(
        powers in prop::collection::vec(-2i64..6, 1..10),
        amount in 1i64..6,
        seed in any::<u64>(),
    ) {
        let (mut board, creatures) = board_with_powers(&powers);
        let spec = ChooseCardSpec::new(ChoiceMode::WithDifferentPowers)
            .with_amount(Amount::Fixed(amount))
            .with_min_amount(0);
        let mut agents = random_agents(seed);

        let outcome = board.resolve(&spec, &[P0], &mut agents, &mut NoReveal).unwrap();
        let picked = outcome.aggregate().into_vec();

        prop_assert!(picked.len() <= amount as usize);
        prop_assert!(picked.iter().all(|e| creatures.contains(e)));
        let picked_powers: HashSet<i64> = picked.iter().map(|&e| board.power(e)).collect();
        prop_assert_eq!(picked_powers.len(), picked.len());
    }

    /// One pick per distinct power, every power covered.
    #[test]
    fn each_power_covers_every_bucket(
        powers in prop::collection::vec(0i64..5, 0..10),
        seed in any::<u64>(),
    ) {
        let (mut board, _) = board_with_powers(&powers);
        let spec = ChooseCardSpec::new(ChoiceMode::EachDifferentPower);
        let mut agents = random_agents(seed);

        let outcome = board.resolve(&spec, &[P0], &mut agents, &mut NoReveal).unwrap();
        let picked = outcome.aggregate().into_vec();

        let distinct: HashSet<i64> = powers.iter().copied().collect();
        let picked_powers: HashSet<i64> = picked.iter().map(|&e| board.power(e)).collect();
        prop_assert_eq!(picked.len(), distinct.len());
        prop_assert_eq!(picked_powers, distinct);
    }

    /// The two halves of a control split never overlap.
    #[test]
    fn control_split_is_disjoint(
        mine in 0usize..5,
        theirs in 0usize..5,
        amount in 1i64..4,
        seed in any::<u64>(),
    ) {
        let mut board = Board::new(2);
        let my_cards: Vec<EntityId> = (0..mine).map(|_| board.creature(P0, 1)).collect();
        let their_cards: Vec<EntityId> = (0..theirs).map(|_| board.creature(P1, 1)).collect();
        let spec = ChooseCardSpec::new(ChoiceMode::ControlAndNot).with_amount(Amount::Fixed(amount));
        let mut agents = random_agents(seed);

        let outcome = board.resolve(&spec, &[P0], &mut agents, &mut NoReveal).unwrap();
        let picked = outcome.aggregate().into_vec();

        let from_mine = picked.iter().filter(|e| my_cards.contains(e)).count();
        let from_theirs = picked.iter().filter(|e| their_cards.contains(e)).count();
        prop_assert_eq!(from_mine + from_theirs, picked.len());
        prop_assert!(from_mine <= amount as usize);
        prop_assert!(from_theirs <= amount as usize);
    }

    /// With non-negative powers the chosen total never exceeds the budget.
    #[test]
    fn power_budget_respected(
        powers in prop::collection::vec(0i64..6, 0..8),
        total in 0i64..12,
        seed in any::<u64>(),
    ) {
        let (mut board, _) = board_with_powers(&powers);
        let spec = ChooseCardSpec::new(ChoiceMode::WithTotalPower { total: Amount::Fixed(total) });
        let mut agents = random_agents(seed);

        let outcome = board.resolve(&spec, &[P0], &mut agents, &mut NoReveal).unwrap();
        let sum: i64 = outcome.aggregate().iter().map(|e| board.power(e)).sum();

        prop_assert!(sum <= total);
    }
}
