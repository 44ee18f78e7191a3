//! Test RNG — deterministic `DeterministicRng` implementations for tests.

use corpus_core::rng::DeterministicRng;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A no-op RNG that always returns `min`. Suitable for tests that do not
/// depend on specific random values.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u64_range(&mut self, min: u64, _max: u64) -> u64 {
        min
    }
}

/// An RNG that returns values from a predetermined sequence. Panics if the
/// sequence is exhausted. Used in tests that need specific draws (e.g. which
/// passage numbers the sampler visits).
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<u64>,
    index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given values.
    #[must_use]
    pub fn new(values: Vec<u64>) -> Self {
        Self { values, index: 0 }
    }

    /// Number of values handed out so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.index
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u64_range(&mut self, _min: u64, _max: u64) -> u64 {
        let val = self.values[self.index];
        self.index += 1;
        val
    }
}

/// A real uniform RNG with a fixed seed, for reproducible statistical tests.
#[derive(Debug)]
pub struct SeededRng(StdRng);

impl SeededRng {
    /// Create an RNG from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl DeterministicRng for SeededRng {
    fn next_u64_range(&mut self, min: u64, max: u64) -> u64 {
        self.0.random_range(min..=max)
    }
}
