//! Property-based invariant tests.
//!
//! Uses proptest to generate random seeds and meld-built winning hands,
//! plays rounds with random discards, and verifies table, evaluator and
//! scoring invariants at every step.

use proptest::prelude::*;
use sparrow_core::game_loop::{RandomDiscardSelector, RoundOutcome, RoundRunner, MAX_TURNS};
use sparrow_engine::claims::{can_kong, can_pung, kong, pung};
use sparrow_engine::hand_evaluator::HandEvaluator;
use sparrow_engine::meld::{is_run, is_set};
use sparrow_engine::rule::ScoringRule;
use sparrow_engine::score::{score_decomposition, Bonus};
use sparrow_engine::types::{Direction, TileCounts};
use sparrow_engine::{GameState, Seat, Suit, Tile};

/// Any tile identity.
fn tile_strategy() -> impl Strategy<Value = Tile> {
    (0usize..34).prop_filter_map("valid index", Tile::from_index)
}

/// One set of any identity or one run in a ranked suit.
fn meld_strategy() -> impl Strategy<Value = [Tile; 3]> {
    prop_oneof![
        tile_strategy().prop_map(|t| [t, t, t]),
        (0usize..3, 1u8..=7).prop_map(|(suit, start)| {
            let suit = Suit::RANKED[suit];
            [0, 1, 2].map(|k| Tile::ranked(suit, start + k).unwrap())
        }),
    ]
}

/// A 14-tile hand assembled from four melds plus a pair, within the copy
/// limit, in shuffled order. Every such hand has a decomposition.
fn winning_hand_strategy() -> impl Strategy<Value = Vec<Tile>> {
    (prop::array::uniform4(meld_strategy()), tile_strategy())
        .prop_filter_map("more than four copies", |(melds, pair)| {
            let mut hand: Vec<Tile> = melds.iter().flatten().copied().collect();
            hand.extend([pair, pair]);
            let counts = TileCounts::from_tiles(&hand);
            Tile::all_identities()
                .all(|t| counts.get(t) <= 4)
                .then_some(hand)
        })
        .prop_shuffle()
}

/// Every identity count in every hand stays at or below four.
fn hands_within_copy_limit(state: &GameState) -> bool {
    Seat::ALL.iter().all(|&seat| {
        let counts = TileCounts::from_tiles(state.hand(seat));
        Tile::all_identities().all(|t| counts.get(t) <= 4)
    })
}

// ---------------------------------------------------------------------------
// Round invariants
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The 136-tile universe is conserved, hands stay within the copy limit
    /// and the round terminates.
    #[test]
    fn round_invariants_hold(seed in 0u64..1_000_000, discard_seed in any::<u64>()) {
        let mut runner = RoundRunner::new(Some(seed)).unwrap();
        let mut selector = RandomDiscardSelector::new(discard_seed);

        while runner.step_once(&mut selector).unwrap() {
            prop_assert!(runner.state().check_universe().is_ok(),
                "seed {seed}: universe broken at turn {}", runner.turns());
            prop_assert!(hands_within_copy_limit(runner.state()));
        }

        prop_assert!(runner.is_done());
        prop_assert!(runner.turns() <= MAX_TURNS);
        match runner.outcome() {
            Some(RoundOutcome::Win { seat, score }) => {
                prop_assert_eq!(runner.state().hand(*seat).len(), 14);
                prop_assert!(score.total >= 2);
            }
            Some(RoundOutcome::Exhausted) => {
                prop_assert!(runner.state().draw_pool().is_empty());
            }
            Some(RoundOutcome::TurnLimit) | None => {}
        }
    }

    /// Same seed, same opening table.
    #[test]
    fn seeded_deal_is_reproducible(seed in any::<u64>()) {
        let a = RoundRunner::new(Some(seed)).unwrap();
        let b = RoundRunner::new(Some(seed)).unwrap();
        prop_assert_eq!(a.state().snapshot(), b.state().snapshot());
        prop_assert_eq!(a.state().draw_pool().len(), 136 - 53);
    }
}

// ---------------------------------------------------------------------------
// Evaluator and scoring invariants
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// A built hand always wins, and its decomposition uses exactly the
    /// hand's tiles: four sets or runs plus a matching pair.
    #[test]
    fn decomposition_partitions_hand(hand in winning_hand_strategy()) {
        let d = HandEvaluator::new(&hand).unwrap().evaluate();
        prop_assert!(d.is_some(), "no decomposition for {:?}", hand);
        let d = d.unwrap();
        prop_assert_eq!(TileCounts::from_tiles(&d.tiles()), TileCounts::from_tiles(&hand));
        for m in &d.melds {
            let [a, b, c] = m.tiles;
            prop_assert!(is_set(&m.tiles) || is_run(a, b, c));
        }
        prop_assert!(is_set(&d.pair));
    }

    /// Winning scores are at least the base, an honor pair pins the score to
    /// the base, and a single ranked suit across the melds earns the flush.
    #[test]
    fn winning_scores_are_bounded(hand in winning_hand_strategy(), m in 0u8..4, s in 0u8..4) {
        let rule = ScoringRule::standard();
        let d = HandEvaluator::new(&hand).unwrap().evaluate();
        prop_assert!(d.is_some());
        let d = d.unwrap();
        let b = score_decomposition(&d, Direction::from(m), Direction::from(s), &rule);
        prop_assert!(b.total >= rule.base);

        let pair_suit = d.pair_suit();
        prop_assert_eq!(b.pair_override, !pair_suit.is_ranked());
        if b.pair_override {
            prop_assert_eq!(b.total, rule.base);
            prop_assert!(b.bonuses.is_empty());
        } else {
            let ranked: Vec<Suit> = d
                .melds
                .iter()
                .map(|m| m.suit())
                .filter(|s| s.is_ranked())
                .collect();
            let flush = ranked.first().is_some_and(|&f| ranked.iter().all(|&s| s == f));
            prop_assert_eq!(b.bonuses.contains(&(Bonus::Flush, rule.flush)), flush);
        }
    }

    #[test]
    fn set_is_reflexive(t in tile_strategy()) {
        prop_assert!(is_set(&[t, t]));
        prop_assert!(is_set(&[t, t, t]));
        prop_assert!(is_set(&[t, t, t, t]));
        prop_assert!(!is_run(t, t, t));
    }
}

// ---------------------------------------------------------------------------
// Claims preserve the universe
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn claims_move_one_tile(seed in any::<u64>(), turns in 0usize..40) {
        let mut runner = RoundRunner::new(Some(seed)).unwrap();
        let mut selector = RandomDiscardSelector::new(seed);
        for _ in 0..turns {
            if !runner.step_once(&mut selector).unwrap() {
                break;
            }
        }
        let mut state = runner.state().clone();
        let Some(tile) = state.last_discard() else {
            return Ok(());
        };
        for seat in Seat::ALL {
            if can_pung(&state, tile, seat) {
                let before = state.hand(seat).len();
                let discards = state.discard_pool().len();
                pung(&mut state, tile, seat).unwrap();
                prop_assert_eq!(state.hand(seat).len(), before + 1);
                prop_assert_eq!(state.discard_pool().len(), discards - 1);
                prop_assert!(state.check_universe().is_ok());
                break;
            }
        }
        for seat in Seat::ALL {
            let candidate = state.hand(seat).iter().copied().find(|&t| can_kong(&state, t, seat));
            if let Some(t) = candidate {
                let before = state.hand(seat).len();
                kong(&mut state, t, seat).unwrap();
                prop_assert_eq!(state.hand(seat).len(), before);
                prop_assert!(state.check_universe().is_ok());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Standalone deterministic tests
// ---------------------------------------------------------------------------

#[test]
fn rounds_never_panic_100_seeds() {
    for seed in 0..100u64 {
        let mut runner = RoundRunner::new(Some(seed)).unwrap();
        let mut selector = RandomDiscardSelector::new(seed);
        runner.run_to_completion(&mut selector).unwrap();
        assert!(runner.is_done(), "seed {seed}: round did not finish");
    }
}
