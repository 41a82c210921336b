//! Seeded random stream for one scenario file.
//!
//! The stream is seeded with the scenario count alone, so a given count
//! always reproduces the same file for a class and perturbation kind. Files
//! for different classes or kinds that share a count draw from identical
//! streams and are therefore correlated.

use rand::distributions::{Bernoulli, Distribution};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Poisson;

use crate::errors::{Error, Result};

/// Random source for a single scenario-file generation.
#[derive(Debug, Clone)]
pub struct ScenarioRng {
    rng: StdRng,
}

impl ScenarioRng {
    /// Stream seeded from the scenario count.
    pub fn for_scenario_count(scenario_count: usize) -> Self {
        Self {
            rng: StdRng::seed_from_u64(scenario_count as u64),
        }
    }

    pub fn sample<T, D: Distribution<T>>(&mut self, distribution: &D) -> T {
        distribution.sample(&mut self.rng)
    }
}

/// Bernoulli trial with a probability checked against [0, 1].
pub fn bernoulli(probability: f64) -> Result<Bernoulli> {
    Bernoulli::new(probability).map_err(|_| Error::InvalidProbability { probability })
}

/// A uniform [0, 1) draw rounded to 0 or 1; exactly 0.5 rounds down.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundedUniform;

impl Distribution<f64> for RoundedUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let draw: f64 = rng.gen();
        if draw > 0.5 {
            1.0
        } else {
            0.0
        }
    }
}

/// Poisson distribution with the given mean, drawn as `f64`.
pub fn poisson(mean: f64) -> Result<Poisson<f64>> {
    Poisson::new(mean).map_err(|_| Error::InvalidMean { mean })
}
