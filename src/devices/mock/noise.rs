//! Seeded Gaussian noise for simulation

use rand::prelude::*;
use rand::rngs::SmallRng;
use rand_distr::StandardNormal;

/// Noise generator with configurable seed for reproducibility
#[derive(Clone)]
pub struct NoiseGenerator {
    rng: SmallRng,
}

impl NoiseGenerator {
    /// Create a new noise generator
    ///
    /// A seed of 0 draws from entropy; any other seed is reproducible.
    pub fn new(seed: u64) -> Self {
        let rng = if seed == 0 {
            SmallRng::from_entropy()
        } else {
            SmallRng::seed_from_u64(seed)
        };
        Self { rng }
    }

    /// Gaussian sample with the given standard deviation
    #[inline]
    pub fn gaussian(&mut self, stddev: f64) -> f64 {
        if stddev == 0.0 {
            return 0.0;
        }
        let n: f64 = self.rng.sample(StandardNormal);
        n * stddev
    }
}
