//! Tile representation.
//!
//! A tile is a suit plus an optional rank. The three ranked suits carry a
//! rank 1-9; the three color suits and four direction suits are rankless.
//! Each of the 34 distinct identities maps to a dense index so collections
//! can keep a per-identity histogram.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{EngineError, EngineResult};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Distinct tile identities: 3 ranked suits x 9 ranks + 7 rankless suits.
pub const NUM_TILE_IDS: usize = 34;

/// Physical copies of every identity.
pub const COPIES_PER_TILE: u8 = 4;

/// Total physical tiles in the universe.
pub const NUM_TILES: usize = 136;

/// Ranks per ranked suit (1-9).
pub const NUM_RANKS: u8 = 9;

/// First index of the rankless block.
pub const RANKLESS_START: u8 = 27;

// ---------------------------------------------------------------------------
// Suit
// ---------------------------------------------------------------------------

/// The ten suits. Declaration order is the sort order: ranked suits first,
/// then colors, then directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Circle = 0,
    Stick = 1,
    Wan = 2,
    Red = 3,
    Green = 4,
    White = 5,
    East = 6,
    South = 7,
    West = 8,
    North = 9,
}

impl Suit {
    pub const ALL: [Suit; 10] = [
        Suit::Circle,
        Suit::Stick,
        Suit::Wan,
        Suit::Red,
        Suit::Green,
        Suit::White,
        Suit::East,
        Suit::South,
        Suit::West,
        Suit::North,
    ];

    pub const RANKED: [Suit; 3] = [Suit::Circle, Suit::Stick, Suit::Wan];

    pub const RANKLESS: [Suit; 7] = [
        Suit::Red,
        Suit::Green,
        Suit::White,
        Suit::East,
        Suit::South,
        Suit::West,
        Suit::North,
    ];

    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// True for circle, stick and wan.
    #[inline]
    pub const fn is_ranked(self) -> bool {
        matches!(self, Suit::Circle | Suit::Stick | Suit::Wan)
    }

    /// True for red, green and white.
    #[inline]
    pub const fn is_color(self) -> bool {
        matches!(self, Suit::Red | Suit::Green | Suit::White)
    }

    /// True for east, south, west and north.
    #[inline]
    pub const fn is_direction(self) -> bool {
        matches!(self, Suit::East | Suit::South | Suit::West | Suit::North)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Suit::Circle => "circle",
            Suit::Stick => "stick",
            Suit::Wan => "10k",
            Suit::Red => "red",
            Suit::Green => "green",
            Suit::White => "white",
            Suit::East => "east",
            Suit::South => "south",
            Suit::West => "west",
            Suit::North => "north",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Suit {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        Suit::ALL
            .into_iter()
            .find(|suit| suit.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EngineError::InvalidTile {
                input: s.to_string(),
                message: "unknown suit".to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Tile
// ---------------------------------------------------------------------------

/// A single playing piece. Field order gives the (suit, rank) sort.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tile {
    suit: Suit,
    rank: Option<u8>,
}

impl Tile {
    /// Builds a tile, rejecting ranks outside 1-9 and rank presence that
    /// does not match the suit kind.
    pub fn new(suit: Suit, rank: Option<u8>) -> EngineResult<Self> {
        match (suit.is_ranked(), rank) {
            (true, Some(r)) if (1..=NUM_RANKS).contains(&r) => Ok(Tile { suit, rank }),
            (true, Some(r)) => Err(EngineError::InvalidTile {
                input: format!("{r} {suit}"),
                message: "rank must be within 1-9".to_string(),
            }),
            (true, None) => Err(EngineError::InvalidTile {
                input: suit.to_string(),
                message: "ranked suit requires a rank".to_string(),
            }),
            (false, None) => Ok(Tile { suit, rank }),
            (false, Some(r)) => Err(EngineError::InvalidTile {
                input: format!("{r} {suit}"),
                message: "rankless suit cannot carry a rank".to_string(),
            }),
        }
    }

    #[inline]
    pub fn ranked(suit: Suit, rank: u8) -> EngineResult<Self> {
        Self::new(suit, Some(rank))
    }

    #[inline]
    pub fn rankless(suit: Suit) -> EngineResult<Self> {
        Self::new(suit, None)
    }

    #[inline]
    pub const fn suit(self) -> Suit {
        self.suit
    }

    #[inline]
    pub const fn rank(self) -> Option<u8> {
        self.rank
    }

    /// Dense identity index in 0..34.
    #[inline]
    pub const fn index(self) -> usize {
        match self.rank {
            Some(r) => (self.suit.index() * NUM_RANKS + (r - 1)) as usize,
            None => (RANKLESS_START + self.suit.index() - Suit::Red.index()) as usize,
        }
    }

    /// Inverse of [`Tile::index`].
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < RANKLESS_START as usize {
            let suit = Suit::RANKED[index / NUM_RANKS as usize];
            let rank = (index % NUM_RANKS as usize) as u8 + 1;
            Some(Tile {
                suit,
                rank: Some(rank),
            })
        } else if index < NUM_TILE_IDS {
            Some(Tile {
                suit: Suit::RANKLESS[index - RANKLESS_START as usize],
                rank: None,
            })
        } else {
            None
        }
    }

    /// All 34 identities in index order.
    pub fn all_identities() -> impl Iterator<Item = Tile> {
        (0..NUM_TILE_IDS).filter_map(Tile::from_index)
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tile({self})")
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rank {
            Some(r) => write!(f, "{} {}", r, self.suit),
            None => write!(f, "{}", self.suit),
        }
    }
}

/// Parses `"<rank> <suit>"` or `"<suit>"`, e.g. `"5 circle"`, `"east"`.
impl FromStr for Tile {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        let invalid = |message: &str| EngineError::InvalidTile {
            input: s.to_string(),
            message: message.to_string(),
        };
        match parts.as_slice() {
            [suit] => Tile::rankless(suit.parse()?).map_err(|_| invalid("missing rank")),
            [rank, suit] => {
                let rank: u8 = rank.parse().map_err(|_| invalid("rank is not a number"))?;
                Tile::ranked(suit.parse()?, rank)
            }
            _ => Err(invalid("expected '<rank> <suit>' or '<suit>'")),
        }
    }
}

impl Serialize for Tile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Tile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
