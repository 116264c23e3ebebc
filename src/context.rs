//! Run-wide mutable state threaded through every generator.

use crate::tracker::TrackerRegistry;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// The random source and the cross-template trackers for one run.
///
/// Passed explicitly to record generator construction and to every
/// `generate` call; there is no global state.
#[derive(Debug)]
pub struct GenerationContext {
    pub rng: StdRng,
    pub trackers: TrackerRegistry,
    seed: u64,
}

impl GenerationContext {
    /// Context with a reproducible random source
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            trackers: TrackerRegistry::new(),
            seed,
        }
    }

    /// Context seeded from system entropy
    pub fn random() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}
