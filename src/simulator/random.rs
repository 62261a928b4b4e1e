use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, OpenClosed01};

use crate::errors::{Error, Result};

/// Source of independent uniform samples in `(0, 1]`.
///
/// Zero is never returned so `ln(u)` stays finite in the Box-Muller transform.
pub trait RandomSource {
    fn next_uniform(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }
}

/// `StdRng` backed source, seedable for reproducible runs.
#[derive(Debug, Clone)]
pub struct StdRandomSource {
    rng: StdRng,
}

impl StdRandomSource {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for StdRandomSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for StdRandomSource {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        OpenClosed01.sample(&mut self.rng)
    }
}

/// Replays a fixed list of samples, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    samples: Vec<f64>,
    cursor: usize,
}

impl ReplaySource {
    pub fn new(samples: Vec<f64>) -> Result<Self> {
        if samples.is_empty() {
            return Err(Error::invalid("samples", "at least one sample is required"));
        }
        if let Some(bad) = samples.iter().find(|u| !(**u > 0.0 && **u <= 1.0)) {
            return Err(Error::invalid(
                "samples",
                format!("{bad} is outside the interval (0, 1]"),
            ));
        }
        Ok(Self { samples, cursor: 0 })
    }
}

impl RandomSource for ReplaySource {
    fn next_uniform(&mut self) -> f64 {
        let u = self.samples[self.cursor];
        self.cursor = (self.cursor + 1) % self.samples.len();
        u
    }
}
