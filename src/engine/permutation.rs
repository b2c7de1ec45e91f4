// Randomized traversal orders for the bad memory access modes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{try_alloc_with, Result};

/// Where the permutation's randomness comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedSource {
    /// Reproducible: the same seed always yields the same permutation.
    Fixed(u64),
    /// Seeded from the wall clock, different on every run.
    Time,
}

impl SeedSource {
    pub fn from_option(seed: Option<u64>) -> Self {
        seed.map_or(SeedSource::Time, SeedSource::Fixed)
    }

    /// Resolves to the concrete seed value used for the generator.
    pub fn resolve(self) -> u64 {
        match self {
            SeedSource::Fixed(seed) => seed,
            SeedSource::Time => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_nanos() as u64)
                .unwrap_or_default(),
        }
    }
}

/// Fills a freshly allocated sequence with `seq[i] = i`.
pub fn identity(n: usize) -> Result<Vec<usize>> {
    try_alloc_with("permutation indices", n, |i| i)
}

/// In-place Fisher-Yates shuffle: walks from the last position down to the
/// second, swapping each with a uniformly chosen position at or before it.
pub fn shuffle<R: Rng + ?Sized>(seq: &mut [usize], rng: &mut R) {
    for i in (1..seq.len()).rev() {
        let j = rng.gen_range(0..=i);
        seq.swap(i, j);
    }
}

/// A random visiting order over `0..len`, plus the seed that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct IndexPermutation {
    indices: Vec<usize>,
    seed: u64,
}

impl IndexPermutation {
    pub fn random(n: usize, source: SeedSource) -> Result<Self> {
        let seed = source.resolve();
        let mut indices = identity(n)?;
        let mut rng = StdRng::seed_from_u64(seed);
        shuffle(&mut indices, &mut rng);

        tracing::debug!(n, seed, "generated index permutation");

        Ok(Self { indices, seed })
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}
