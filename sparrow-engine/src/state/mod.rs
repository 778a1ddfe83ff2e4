//! Tile pool state for one game: four hands, the draw pool, the discard
//! pool and the two direction rotations.
//!
//! Every physical tile lives in exactly one of those six collections. Adds
//! refuse a fifth copy of any identity, so the 136-tile universe can never
//! be over-filled; `check_universe` confirms the full distribution.

use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, EngineResult};
use crate::tile::{Tile, COPIES_PER_TILE, NUM_TILES, NUM_TILE_IDS};
use crate::types::{Category, Direction, DirectionCycle, Seat, TileBag, TileCounts};

pub mod wall;
use wall::{fisher_yates_shuffle, WallState};

const NP: usize = 4;

/// Tiles dealt per seat in each of the three opening rounds.
const DEAL_BLOCK: usize = 4;
const DEAL_ROUNDS: usize = 3;

/// Table state for one game.
///
/// Collections, directions and the shuffle source are private; every change
/// goes through a validated mutator.
///
/// ```compile_fail
/// let mut state = sparrow_engine::GameState::new(Some(1));
/// state.wall.digest = String::new();
/// ```
#[derive(Debug, Clone)]
pub struct GameState {
    hands: [TileBag; NP],
    draw_pool: TileBag,
    discard_pool: TileBag,
    macro_direction: DirectionCycle,
    micro_direction: DirectionCycle,
    wall: WallState,
}

/// Read-only view of the table for external encoders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub hands: [Vec<Tile>; NP],
    pub draw_pool: Vec<Tile>,
    pub discard_pool: Vec<Tile>,
    pub macro_direction: Direction,
    pub micro_directions: [Direction; NP],
}

impl GameState {
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_wall(WallState::new(seed))
    }

    pub fn from_seed_bytes(seed: [u8; 32]) -> Self {
        Self::with_wall(WallState::from_seed_bytes(seed))
    }

    fn with_wall(wall: WallState) -> Self {
        Self {
            hands: Default::default(),
            draw_pool: TileBag::new(),
            discard_pool: TileBag::new(),
            macro_direction: DirectionCycle::new(),
            micro_direction: DirectionCycle::new(),
            wall,
        }
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    #[inline]
    pub fn hand(&self, seat: Seat) -> &[Tile] {
        self.hands[seat.index()].tiles()
    }

    #[inline]
    pub fn hand_counts(&self, seat: Seat) -> &TileCounts {
        self.hands[seat.index()].counts()
    }

    #[inline]
    pub fn draw_pool(&self) -> &[Tile] {
        self.draw_pool.tiles()
    }

    #[inline]
    pub fn discard_pool(&self) -> &[Tile] {
        self.discard_pool.tiles()
    }

    #[inline]
    pub fn last_discard(&self) -> Option<Tile> {
        self.discard_pool.tiles().last().copied()
    }

    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::DrawPool => self.draw_pool.len(),
            Category::DiscardPool => self.discard_pool.len(),
            Category::Hand(seat) => self.hands[seat.index()].len(),
        }
    }

    /// Tiles across all six collections.
    pub fn total_tiles(&self) -> usize {
        self.bags().map(TileBag::len).sum()
    }

    /// Physical copies of `tile` anywhere on the table.
    pub fn copies_in_play(&self, tile: Tile) -> u8 {
        self.bags().map(|b| b.count_of(tile)).sum()
    }

    /// The table-wide (macro) direction.
    #[inline]
    pub fn macro_direction(&self) -> Direction {
        self.macro_direction.first()
    }

    /// The seat's own (micro) direction.
    #[inline]
    pub fn micro_direction(&self, seat: Seat) -> Direction {
        self.micro_direction.for_seat(seat)
    }

    pub fn draw_pool_digest(&self) -> &str {
        &self.wall.digest
    }

    /// Number of shuffles the state's RNG has produced.
    pub fn shuffle_count(&self) -> u64 {
        self.wall.shuffle_count
    }

    /// Seed the state was built from, if it was seeded by `u64`.
    pub fn seed(&self) -> Option<u64> {
        self.wall.seed
    }

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            hands: std::array::from_fn(|i| self.hands[i].tiles().to_vec()),
            draw_pool: self.draw_pool.tiles().to_vec(),
            discard_pool: self.discard_pool.tiles().to_vec(),
            macro_direction: self.macro_direction(),
            micro_directions: std::array::from_fn(|i| self.micro_direction(Seat::ALL[i])),
        }
    }

    pub fn snapshot_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    fn bags(&self) -> impl Iterator<Item = &TileBag> {
        self.hands
            .iter()
            .chain([&self.draw_pool, &self.discard_pool])
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    fn check_copy_limit(&self, tile: Tile) -> EngineResult<()> {
        if self.copies_in_play(tile) >= COPIES_PER_TILE {
            log::warn!("refusing to add {tile}: all copies already in play");
            return Err(EngineError::CopyLimitExceeded { tile });
        }
        Ok(())
    }

    pub fn add_tile_to_hand(&mut self, tile: Tile, seat: Seat) -> EngineResult<()> {
        self.check_copy_limit(tile)?;
        self.hands[seat.index()].push(tile);
        Ok(())
    }

    pub fn remove_tile_from_hand(&mut self, tile: Tile, seat: Seat) -> EngineResult<()> {
        if !self.hands[seat.index()].remove(tile) {
            log::warn!("cannot remove {tile}: not in {seat}'s hand");
            return Err(EngineError::TileNotFound {
                tile,
                location: format!("{seat}'s hand"),
            });
        }
        Ok(())
    }

    /// Empties the hand, returning what it held.
    pub fn clear_hand(&mut self, seat: Seat) -> Vec<Tile> {
        let hand = &mut self.hands[seat.index()];
        if hand.is_empty() {
            log::debug!("{seat}'s hand is already empty");
        }
        hand.clear()
    }

    pub fn add_tile_to_draw_pool(&mut self, tile: Tile) -> EngineResult<()> {
        self.check_copy_limit(tile)?;
        self.draw_pool.push(tile);
        Ok(())
    }

    /// Removing from an empty draw pool is a no-op.
    pub fn remove_tile_from_draw_pool(&mut self, tile: Tile) -> EngineResult<()> {
        remove_from_pool(&mut self.draw_pool, tile, "draw pool")
    }

    pub fn add_tile_to_discard_pool(&mut self, tile: Tile) -> EngineResult<()> {
        self.check_copy_limit(tile)?;
        self.discard_pool.push(tile);
        Ok(())
    }

    /// Removing from an empty discard pool is a no-op.
    pub fn remove_tile_from_discard_pool(&mut self, tile: Tile) -> EngineResult<()> {
        remove_from_pool(&mut self.discard_pool, tile, "discard pool")
    }

    /// Stable sort by (suit, rank); rankless suits come after ranked ones.
    pub fn sort_hand(&mut self, seat: Seat) {
        self.hands[seat.index()].sort();
    }

    /// Resets the table and fills the draw pool with a fresh shuffle of all
    /// 136 tiles.
    pub fn initialize_draw_pool(&mut self) {
        for hand in &mut self.hands {
            hand.clear();
        }
        self.discard_pool.clear();
        self.draw_pool = TileBag::from_tiles(self.wall.shuffled_tiles());
        log::debug!(
            "draw pool initialized (shuffle #{}, digest {})",
            self.wall.shuffle_count,
            self.wall.digest
        );
    }

    /// Deals 14 tiles to seat One and 13 to the others.
    ///
    /// Three rounds of four tiles per seat, one more per seat, then one
    /// extra for seat One.
    pub fn deal_tiles(&mut self) -> EngineResult<()> {
        if self.draw_pool.len() != NUM_TILES {
            log::warn!(
                "deal refused: draw pool holds {} tiles",
                self.draw_pool.len()
            );
            return Err(EngineError::PoolNotInitialized {
                found: self.draw_pool.len(),
            });
        }
        for _ in 0..DEAL_ROUNDS {
            for seat in Seat::ALL {
                for _ in 0..DEAL_BLOCK {
                    self.draw_tile(seat);
                }
            }
        }
        for seat in Seat::ALL {
            self.draw_tile(seat);
        }
        self.draw_tile(Seat::One);
        Ok(())
    }

    /// Moves the front of the draw pool into the hand. `None` once the
    /// pool is exhausted.
    pub fn draw_tile(&mut self, seat: Seat) -> Option<Tile> {
        let tile = self.draw_pool.pop_front()?;
        self.hands[seat.index()].push(tile);
        Some(tile)
    }

    /// Moves the back of the draw pool into the hand.
    pub fn draw_replacement(&mut self, seat: Seat) -> Option<Tile> {
        let tile = self.draw_pool.pop_back()?;
        self.hands[seat.index()].push(tile);
        Some(tile)
    }

    /// Moves one copy of `tile` from the hand onto the discard pool.
    pub fn discard_tile(&mut self, seat: Seat, tile: Tile) -> EngineResult<()> {
        self.remove_tile_from_hand(tile, seat)?;
        self.discard_pool.push(tile);
        Ok(())
    }

    /// Moves the oldest discard matching `tile` into the hand. Copies are
    /// equal by value, so which one is taken does not show.
    pub(crate) fn claim_from_discard(&mut self, seat: Seat, tile: Tile) -> EngineResult<()> {
        if !self.discard_pool.remove(tile) {
            return Err(EngineError::TileNotFound {
                tile,
                location: "discard pool".to_string(),
            });
        }
        self.hands[seat.index()].push(tile);
        Ok(())
    }

    pub fn step_macro_direction(&mut self) {
        self.macro_direction.step();
    }

    pub fn step_micro_direction(&mut self) {
        self.micro_direction.step();
    }

    pub fn randomize_macro_direction(&mut self) {
        fisher_yates_shuffle(self.macro_direction.order_mut(), self.wall.rng_mut());
    }

    pub fn randomize_micro_direction(&mut self) {
        fisher_yates_shuffle(self.micro_direction.order_mut(), self.wall.rng_mut());
    }

    /// Verifies that all 136 tiles are present, four of each identity.
    pub fn check_universe(&self) -> EngineResult<()> {
        let total = self.total_tiles();
        if total != NUM_TILES {
            return Err(EngineError::UniverseViolation {
                message: format!("expected {NUM_TILES} tiles, found {total}"),
            });
        }
        for id in 0..NUM_TILE_IDS {
            let Some(tile) = Tile::from_index(id) else {
                continue;
            };
            let copies = self.copies_in_play(tile);
            if copies != COPIES_PER_TILE {
                return Err(EngineError::UniverseViolation {
                    message: format!("{tile} has {copies} copies"),
                });
            }
        }
        Ok(())
    }
}

fn remove_from_pool(pool: &mut TileBag, tile: Tile, name: &str) -> EngineResult<()> {
    if pool.is_empty() {
        log::debug!("{name} is empty; nothing to remove");
        return Ok(());
    }
    if !pool.remove(tile) {
        log::warn!("cannot remove {tile}: not in {name}");
        return Err(EngineError::TileNotFound {
            tile,
            location: name.to_string(),
        });
    }
    Ok(())
}
