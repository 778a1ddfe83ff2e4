//! Winning-hand search.
//!
//! A 14-tile hand wins when it splits into four melds plus a pair. The
//! search lists every meld-forming triple of the hand, then walks
//! 4-combinations of those triples in discovery order, removing tiles by
//! value from a scratch histogram. The first combination whose leftover two
//! tiles form a pair is returned; no other decomposition is looked for.
//!
//! Prefixes that already over-draw a tile are skipped whole. Every
//! extension of such a prefix is infeasible too, so the first success is the
//! same one a flat scan of all quadruples would find.

use crate::errors::{EngineError, EngineResult};
use crate::meld::{is_set, Decomposition, Meld};
use crate::state::GameState;
use crate::tile::Tile;
use crate::types::{Seat, TileCounts};

/// Tiles in a hand under evaluation.
pub const HAND_SIZE: usize = 14;

/// Melds in a winning decomposition.
const MELDS_PER_HAND: usize = 4;

pub struct HandEvaluator {
    tiles: Vec<Tile>,
    counts: TileCounts,
}

impl HandEvaluator {
    pub fn new(tiles: &[Tile]) -> EngineResult<Self> {
        if tiles.len() != HAND_SIZE {
            return Err(EngineError::InvalidHandSize { found: tiles.len() });
        }
        Ok(Self {
            tiles: tiles.to_vec(),
            counts: TileCounts::from_tiles(tiles),
        })
    }

    pub fn from_state(state: &GameState, seat: Seat) -> EngineResult<Self> {
        Self::new(state.hand(seat))
    }

    /// Every index triple `i < j < k` that forms a set or run, in
    /// lexicographic order.
    pub fn meld_candidates(&self) -> Vec<Meld> {
        let n = self.tiles.len();
        let mut out = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                for k in (j + 1)..n {
                    if let Some(m) = Meld::new([self.tiles[i], self.tiles[j], self.tiles[k]]) {
                        out.push(m);
                    }
                }
            }
        }
        out
    }

    /// The first decomposition found, or `None` if the hand does not win.
    pub fn evaluate(&self) -> Option<Decomposition> {
        let candidates = self.meld_candidates();
        if candidates.len() < MELDS_PER_HAND {
            return None;
        }

        let n = candidates.len();
        for a in 0..n {
            let Some(after_a) = take_meld(&self.counts, &candidates[a]) else {
                continue;
            };
            for b in (a + 1)..n {
                let Some(after_b) = take_meld(&after_a, &candidates[b]) else {
                    continue;
                };
                for c in (b + 1)..n {
                    let Some(after_c) = take_meld(&after_b, &candidates[c]) else {
                        continue;
                    };
                    for d in (c + 1)..n {
                        let Some(rest) = take_meld(&after_c, &candidates[d]) else {
                            continue;
                        };
                        if let Some(pair) = self.closing_pair(rest) {
                            log::debug!("winning hand found at candidates ({a}, {b}, {c}, {d})");
                            return Some(Decomposition {
                                melds: [candidates[a], candidates[b], candidates[c], candidates[d]],
                                pair,
                            });
                        }
                    }
                }
            }
        }
        None
    }

    /// True if any decomposition exists.
    pub fn is_winning(&self) -> bool {
        self.evaluate().is_some()
    }

    /// The leftover tiles, in hand order, if they form a pair.
    fn closing_pair(&self, mut rest: TileCounts) -> Option<[Tile; 2]> {
        let left: Vec<Tile> = self
            .tiles
            .iter()
            .copied()
            .filter(|&t| rest.take(t))
            .collect();
        match left.as_slice() {
            &[x, y] if is_set(&[x, y]) => Some([x, y]),
            _ => None,
        }
    }
}

/// Removes the meld's tiles from a copy of `counts`; `None` on shortfall.
fn take_meld(counts: &TileCounts, meld: &Meld) -> Option<TileCounts> {
    let mut scratch = *counts;
    meld.tiles
        .iter()
        .all(|&t| scratch.take(t))
        .then_some(scratch)
}

/// Evaluates a hand slice directly.
pub fn evaluate_hand(tiles: &[Tile]) -> EngineResult<Option<Decomposition>> {
    Ok(HandEvaluator::new(tiles)?.evaluate())
}

/// Evaluates the seat's current hand: `(is_winning, decomposition)`.
pub fn is_winning_hand(
    state: &GameState,
    seat: Seat,
) -> EngineResult<(bool, Option<Decomposition>)> {
    let decomposition = HandEvaluator::from_state(state, seat)?.evaluate();
    Ok((decomposition.is_some(), decomposition))
}
