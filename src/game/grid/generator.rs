//! Procedural token generator.
//!
//! Base token values are never stored. Each cell derives its own RNG from the
//! world seed and a string key built from its index, so the value of a cell
//! depends only on `(seed, i, j)` and the grid can be unbounded.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::game::SPAWN_BANDS;
use crate::game::types::{CellIndex, Token};

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_bytes(mut hash: u64, bytes: &[u8]) -> u64 {
    for &b in bytes {
        hash = (hash ^ b as u64).wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Stable string key for a cell.
pub fn cell_key(cell: CellIndex) -> String {
    format!("{},{}", cell.i, cell.j)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenGenerator {
    seed: u64,
}

impl TokenGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform roll in `[0, 1)` for `key`. Same key and seed, same roll.
    pub fn luck(&self, key: &str) -> f64 {
        let hash = fnv1a_bytes(fnv1a_bytes(FNV_OFFSET, &self.seed.to_le_bytes()), key.as_bytes());
        let mut rng = ChaCha8Rng::seed_from_u64(hash);
        rng.random::<f64>()
    }

    /// Base token of a cell, before any player interaction.
    pub fn base_value(&self, cell: CellIndex) -> Option<Token> {
        value_for_roll(self.luck(&cell_key(cell)))
    }
}

/// Map a roll to a denomination through the spawn bands.
pub fn value_for_roll(roll: f64) -> Option<Token> {
    SPAWN_BANDS
        .iter()
        .find(|(upper, _)| roll < *upper)
        .map(|(_, value)| *value)
}
