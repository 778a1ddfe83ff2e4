use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, EngineResult};
use crate::tile::{Suit, Tile, NUM_TILE_IDS};

/// Histogram of tile identities (0-33).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCounts {
    pub counts: [u8; NUM_TILE_IDS],
}

impl TileCounts {
    pub fn new() -> Self {
        TileCounts {
            counts: [0; NUM_TILE_IDS],
        }
    }

    pub fn from_tiles(tiles: &[Tile]) -> Self {
        let mut c = Self::new();
        for &t in tiles {
            c.add(t);
        }
        c
    }

    #[inline]
    pub fn get(&self, tile: Tile) -> u8 {
        self.counts[tile.index()]
    }

    #[inline]
    pub fn add(&mut self, tile: Tile) {
        self.counts[tile.index()] += 1;
    }

    /// Takes one occurrence; returns `false` if none is left.
    #[inline]
    pub fn take(&mut self, tile: Tile) -> bool {
        let slot = &mut self.counts[tile.index()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }
}

impl Default for TileCounts {
    fn default() -> Self {
        Self::new()
    }
}

/// An ordered bag of tiles with a histogram kept alongside, so membership
/// and copy counts are O(1) while order survives for display and draws.
///
/// Front draws advance a head offset instead of shifting the vector, so
/// dealing and drawing from the pool stay O(1).
#[derive(Debug, Clone, Default)]
pub struct TileBag {
    tiles: Vec<Tile>,
    head: usize,
    counts: TileCounts,
}

impl TileBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        let counts = TileCounts::from_tiles(&tiles);
        TileBag {
            tiles,
            head: 0,
            counts,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len() - self.head
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live tiles, front first.
    #[inline]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles[self.head..]
    }

    #[inline]
    pub fn counts(&self) -> &TileCounts {
        &self.counts
    }

    #[inline]
    pub fn count_of(&self, tile: Tile) -> u8 {
        self.counts.get(tile)
    }

    #[inline]
    pub fn contains(&self, tile: Tile) -> bool {
        self.counts.get(tile) > 0
    }

    pub fn push(&mut self, tile: Tile) {
        self.tiles.push(tile);
        self.counts.add(tile);
    }

    /// Removes the first occurrence equal to `tile`.
    pub fn remove(&mut self, tile: Tile) -> bool {
        if !self.contains(tile) {
            return false;
        }
        match self.tiles().iter().position(|&t| t == tile) {
            Some(pos) => {
                self.tiles.remove(self.head + pos);
                self.counts.take(tile);
                true
            }
            None => false,
        }
    }

    pub fn pop_front(&mut self) -> Option<Tile> {
        let tile = *self.tiles.get(self.head)?;
        self.head += 1;
        self.counts.take(tile);
        if self.head == self.tiles.len() {
            self.tiles.clear();
            self.head = 0;
        }
        Some(tile)
    }

    pub fn pop_back(&mut self) -> Option<Tile> {
        if self.is_empty() {
            return None;
        }
        let tile = self.tiles.pop()?;
        self.counts.take(tile);
        Some(tile)
    }

    pub fn clear(&mut self) -> Vec<Tile> {
        self.counts = TileCounts::new();
        let mut tiles = std::mem::take(&mut self.tiles);
        tiles.drain(..self.head);
        self.head = 0;
        tiles
    }

    /// Stable sort by (suit, rank).
    pub fn sort(&mut self) {
        self.tiles[self.head..].sort();
    }
}

impl PartialEq for TileBag {
    fn eq(&self, other: &Self) -> bool {
        self.tiles() == other.tiles()
    }
}

impl Eq for TileBag {}

// ---------------------------------------------------------------------------
// Seats and directions
// ---------------------------------------------------------------------------

/// The four fixed player seats, in turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Seat {
    One = 0,
    Two = 1,
    Three = 2,
    Four = 3,
}

impl Seat {
    pub const ALL: [Seat; 4] = [Seat::One, Seat::Two, Seat::Three, Seat::Four];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The seat that acts after this one.
    #[inline]
    pub const fn next(self) -> Seat {
        Seat::ALL[(self.index() + 1) % 4]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Seat::One => "player1",
            Seat::Two => "player2",
            Seat::Three => "player3",
            Seat::Four => "player4",
        }
    }
}

impl TryFrom<u8> for Seat {
    type Error = EngineError;

    fn try_from(val: u8) -> EngineResult<Self> {
        Seat::ALL
            .get(val as usize)
            .copied()
            .ok_or_else(|| EngineError::InvalidPlayer(val.to_string()))
    }
}

impl FromStr for Seat {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        Seat::ALL
            .into_iter()
            .find(|seat| seat.name() == s)
            .ok_or_else(|| EngineError::InvalidPlayer(s.to_string()))
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compass directions, used for the macro (table) and micro (seat) roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    East = 0,
    South = 1,
    West = 2,
    North = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::North,
    ];

    /// The tile suit that matches this direction.
    #[inline]
    pub const fn suit(self) -> Suit {
        match self {
            Direction::East => Suit::East,
            Direction::South => Suit::South,
            Direction::West => Suit::West,
            Direction::North => Suit::North,
        }
    }
}

impl From<u8> for Direction {
    fn from(val: u8) -> Self {
        Direction::ALL[(val % 4) as usize]
    }
}

/// A rotation of the four directions. Element 0 is the current macro
/// direction; element `seat` is that seat's micro direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionCycle {
    order: [Direction; 4],
}

impl DirectionCycle {
    pub fn new() -> Self {
        DirectionCycle {
            order: Direction::ALL,
        }
    }

    #[inline]
    pub fn order(&self) -> [Direction; 4] {
        self.order
    }

    #[inline]
    pub fn first(&self) -> Direction {
        self.order[0]
    }

    #[inline]
    pub fn for_seat(&self, seat: Seat) -> Direction {
        self.order[seat.index()]
    }

    /// Moves the last element to the front.
    pub fn step(&mut self) {
        self.order.rotate_right(1);
    }

    pub(crate) fn order_mut(&mut self) -> &mut [Direction; 4] {
        &mut self.order
    }
}

impl Default for DirectionCycle {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Count categories
// ---------------------------------------------------------------------------

/// The collections that `GameState::count` can report on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    DrawPool,
    DiscardPool,
    Hand(Seat),
}

impl FromStr for Category {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        match s {
            "draw_pool" => Ok(Category::DrawPool),
            "discard_pool" => Ok(Category::DiscardPool),
            other => other
                .parse::<Seat>()
                .map(Category::Hand)
                .map_err(|_| EngineError::UnknownCategory(other.to_string())),
        }
    }
}
