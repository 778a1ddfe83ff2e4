use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

use crate::tile::{Tile, COPIES_PER_TILE};

/// Every physical tile in generation order: ranked suits by suit, rank and
/// copy, then the rankless suits by suit and copy.
pub fn full_tile_set() -> Vec<Tile> {
    Tile::all_identities()
        .flat_map(|t| std::iter::repeat(t).take(COPIES_PER_TILE as usize))
        .collect()
}

/// Vendored Fisher-Yates shuffle.
///
/// Independent of `SliceRandom`, whose internal algorithm may change across
/// rand versions; the same RNG state always yields the same permutation.
pub fn fisher_yates_shuffle<T>(slice: &mut [T], rng: &mut impl Rng) {
    for i in (1..slice.len()).rev() {
        let j = rng.random_range(0..=i);
        slice.swap(i, j);
    }
}

/// SHA-256 hex digest over the identity indices of `tiles`.
pub fn wall_digest(tiles: &[Tile]) -> String {
    let mut hasher = Sha256::new();
    for t in tiles {
        hasher.update([t.index() as u8]);
    }
    format!("{:x}", hasher.finalize())
}

/// Shuffle source for one game: the RNG plus bookkeeping about the last
/// shuffle it produced.
#[derive(Debug, Clone)]
pub struct WallState {
    rng: ChaCha8Rng,
    pub seed: Option<u64>,
    pub shuffle_count: u64,
    pub digest: String,
}

impl WallState {
    /// Seeded walls are reproducible; `None` draws the seed from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(splitmix64(s)),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        Self {
            rng,
            seed,
            shuffle_count: 0,
            digest: String::new(),
        }
    }

    /// Seeds directly from 32 bytes, e.g. a per-round seed derived upstream.
    pub fn from_seed_bytes(seed: [u8; 32]) -> Self {
        Self {
            rng: ChaCha8Rng::from_seed(seed),
            seed: None,
            shuffle_count: 0,
            digest: String::new(),
        }
    }

    /// Generates the full 136-tile set and shuffles it once.
    pub fn shuffled_tiles(&mut self) -> Vec<Tile> {
        let mut w = full_tile_set();
        fisher_yates_shuffle(&mut w, &mut self.rng);
        self.shuffle_count += 1;
        self.digest = wall_digest(&w);
        w
    }

    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }
}

fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E3779B97F4A7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}
