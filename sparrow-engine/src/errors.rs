use thiserror::Error;

use crate::tile::Tile;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Seat identifier outside the four fixed seats.
    #[error("Invalid player: '{0}'")]
    InvalidPlayer(String),
    /// Removal of a tile absent from a non-empty collection.
    #[error("Tile {tile} not found in {location}")]
    TileNotFound { tile: Tile, location: String },
    /// Deal attempted without exactly 136 tiles in the draw pool.
    #[error("Draw pool not initialized: expected 136 tiles, found {found}")]
    PoolNotInitialized { found: usize },
    /// Suit text or rank outside the fixed tile universe.
    #[error("Invalid tile '{input}': {message}")]
    InvalidTile { input: String, message: String },
    /// Hand evaluation requested on a hand that is not 14 tiles.
    #[error("Invalid hand size: expected 14 tiles, found {found}")]
    InvalidHandSize { found: usize },
    /// Adding the tile would create a fifth physical copy.
    #[error("Tile {tile} already has 4 copies in play")]
    CopyLimitExceeded { tile: Tile },
    /// `count` asked about a collection that does not exist.
    #[error("Unknown category: '{0}'")]
    UnknownCategory(String),
    /// Pung/kong/chow attempted by an ineligible hand.
    #[error("Illegal claim: {message}")]
    IllegalClaim { message: String },
    /// The 136-tile distribution is broken.
    #[error("Universe violation: {message}")]
    UniverseViolation { message: String },
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Serialization {
            message: err.to_string(),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
