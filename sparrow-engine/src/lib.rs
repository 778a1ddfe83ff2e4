//! Sparrow tile-game engine.
//!
//! Tile model, tile-pool state, winning-hand search and scoring for a
//! four-seat draw game over a closed 136-tile universe.

pub mod claims;
pub mod errors;
pub mod hand_evaluator;
pub mod meld;
pub mod rule;
pub mod score;
pub mod state;
pub mod tile;
pub mod types;

pub use errors::{EngineError, EngineResult};
pub use hand_evaluator::{evaluate_hand, is_winning_hand, HandEvaluator};
pub use score::compute_score;
pub use state::GameState;
pub use tile::{Suit, Tile};
pub use types::{Direction, Seat};
