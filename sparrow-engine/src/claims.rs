//! Meld claims: pung and chow take a tile from the discard pool, kong lays
//! a copy off and draws a replacement from the back of the draw pool.
//!
//! Each claim checks eligibility and the presence of the claimed tile
//! before touching the state, so a refused claim leaves everything as it
//! was.

use crate::errors::{EngineError, EngineResult};
use crate::meld::is_run;
use crate::state::GameState;
use crate::tile::Tile;
use crate::types::Seat;

fn illegal(message: String) -> EngineError {
    log::warn!("{message}");
    EngineError::IllegalClaim { message }
}

/// At least two copies of `tile` in hand.
pub fn can_pung(state: &GameState, tile: Tile, seat: Seat) -> bool {
    state.hand_counts(seat).get(tile) >= 2
}

pub fn pung(state: &mut GameState, tile: Tile, seat: Seat) -> EngineResult<()> {
    if !can_pung(state, tile, seat) {
        return Err(illegal(format!("{seat} may not pung {tile}")));
    }
    state.claim_from_discard(seat, tile)
}

/// Exactly three copies of `tile` in hand.
pub fn can_kong(state: &GameState, tile: Tile, seat: Seat) -> bool {
    state.hand_counts(seat).get(tile) == 3
}

/// Lays one copy off onto the discard pool and draws a replacement from the
/// back of the draw pool. Returns the replacement, or `None` if the draw
/// pool was already exhausted.
pub fn kong(state: &mut GameState, tile: Tile, seat: Seat) -> EngineResult<Option<Tile>> {
    if !can_kong(state, tile, seat) {
        return Err(illegal(format!("{seat} may not kong {tile}")));
    }
    state.discard_tile(seat, tile)?;
    Ok(state.draw_replacement(seat))
}

/// Two tiles in hand complete a run with `tile`.
pub fn can_chow(state: &GameState, tile: Tile, seat: Seat) -> bool {
    let Some(rank) = tile.rank() else {
        return false;
    };
    let near: Vec<Tile> = state
        .hand(seat)
        .iter()
        .copied()
        .filter(|t| t.suit() == tile.suit() && t.rank().is_some_and(|r| r.abs_diff(rank) <= 2))
        .collect();
    near.iter()
        .enumerate()
        .any(|(i, &a)| near[i + 1..].iter().any(|&b| is_run(a, b, tile)))
}

pub fn chow(state: &mut GameState, tile: Tile, seat: Seat) -> EngineResult<()> {
    if !can_chow(state, tile, seat) {
        return Err(illegal(format!("{seat} may not chow {tile}")));
    }
    state.claim_from_discard(seat, tile)
}
