//! Piece generator
//!
//! Deals pieces with a uniformly random kind and a sequential id. The RNG is
//! seeded once; the same seed always deals the same run.

use crate::piece::{Piece, PieceKind};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Random piece dealer with a monotonic id counter
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: ChaCha8Rng,
    /// Id handed to the next generated piece
    next_id: u64,
    seed: u64,
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceGenerator {
    /// Create a generator with a random seed
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a generator with a fixed seed (reproducible runs and tests)
    pub fn with_seed(seed: u64) -> Self {
        tracing::debug!("Piece generator seeded with {:016x}", seed);
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_id: 0,
            seed,
        }
    }

    /// Deal the next piece
    pub fn generate(&mut self) -> Piece {
        let kinds = PieceKind::all();
        let kind = kinds[self.rng.gen_range(0..kinds.len())];
        let piece = Piece::new(kind, self.next_id);
        self.next_id += 1;
        piece
    }

    /// Number of pieces dealt so far
    pub fn generated(&self) -> u64 {
        self.next_id
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}
