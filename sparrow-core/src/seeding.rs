//! Deterministic seeding for rounds and sessions.
//!
//! A session holds one 32-byte seed. Each round draws its own 32-byte seed
//! from it through a SHA-256 KDF and hands that to a fresh `GameState`, so a
//! round's draw pool depends only on `(session_seed, nonce, round)`: the same
//! tuple yields the same pool on any platform and any thread count.
//!
//! Shuffles use `ChaCha8Rng` with the engine's vendored Fisher-Yates, which
//! keeps the permutation stable across `rand` releases.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};
use sparrow_engine::state::wall::{fisher_yates_shuffle, full_tile_set};
use sparrow_engine::{GameState, Tile};

/// Derives the seed for one round: `SHA-256(session_seed || nonce_le || round_le)`.
pub fn derive_round_seed(session_seed: &[u8; 32], nonce: u64, round: u32) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(session_seed);
    hasher.update(nonce.to_le_bytes());
    hasher.update(round.to_le_bytes());
    hasher.finalize().into()
}

/// The shuffled 136-tile draw pool for a round, without building a state.
pub fn generate_draw_pool(session_seed: &[u8; 32], nonce: u64, round: u32) -> Vec<Tile> {
    let seed = derive_round_seed(session_seed, nonce, round);
    let mut rng = ChaCha8Rng::from_seed(seed);
    let mut pool = full_tile_set();
    fisher_yates_shuffle(&mut pool, &mut rng);
    pool
}

/// A fresh state whose RNG is seeded for the given round. Its first
/// `initialize_draw_pool` reproduces `generate_draw_pool` for the same tuple.
pub fn round_state(session_seed: &[u8; 32], nonce: u64, round: u32) -> GameState {
    GameState::from_seed_bytes(derive_round_seed(session_seed, nonce, round))
}

/// Session RNG handing out one seed per round.
///
/// ```
/// use sparrow_core::seeding::SessionRng;
///
/// let mut session = SessionRng::new([0u8; 32]);
/// let a = session.next_round_seed();
/// let b = session.next_round_seed();
/// assert_ne!(a, b);
/// ```
pub struct SessionRng {
    seed: [u8; 32],
    round_index: u64,
}

impl SessionRng {
    pub fn new(seed: [u8; 32]) -> Self {
        Self {
            seed,
            round_index: 0,
        }
    }

    /// Expands a `u64` into a session seed.
    pub fn from_u64(seed: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(seed.to_le_bytes());
        Self::new(hasher.finalize().into())
    }

    /// Number of seeds handed out so far.
    pub fn round_index(&self) -> u64 {
        self.round_index
    }

    /// `SHA-256(session_seed || round_index_le)`, then advances.
    pub fn next_round_seed(&mut self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.seed);
        hasher.update(self.round_index.to_le_bytes());
        let out: [u8; 32] = hasher.finalize().into();
        self.round_index += 1;
        out
    }
}
