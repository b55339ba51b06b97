//! Injectable random sources for the sampler.
//!
//! No generator is ever shared between threads. The sequential path owns
//! one `StdRng`, and the concurrent path builds a fresh `StdRng` for each
//! chunk of work. Each chunk generator is derived from a base seed and the
//! chunk number, so with a fixed seed every sample depends only on its
//! index and never on which worker happened to claim it.

use rand::{rngs::StdRng, thread_rng, Rng, SeedableRng};

/// Weyl increment used to spread chunk numbers across the seed space.
const CHUNK_SEED_STEP: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandomSource {
    Entropy,
    Seeded(u64),
}

impl RandomSource {
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or(RandomSource::Entropy, RandomSource::Seeded)
    }

    pub fn rng(&self) -> StdRng {
        match self {
            RandomSource::Entropy => StdRng::from_entropy(),
            RandomSource::Seeded(seed) => StdRng::seed_from_u64(*seed),
        }
    }

    ///
    /// Fixes the base seed for one concurrent batch
    ///
    pub fn base_seed(&self) -> u64 {
        match self {
            RandomSource::Entropy => thread_rng().gen(),
            RandomSource::Seeded(seed) => *seed,
        }
    }
}

pub fn chunk_rng(base_seed: u64, chunk: usize) -> StdRng {
    StdRng::seed_from_u64(base_seed.wrapping_add((chunk as u64).wrapping_mul(CHUNK_SEED_STEP)))
}
