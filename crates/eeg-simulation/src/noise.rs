//! Noise sources feeding the simulator
//!
//! Randomness sits behind [`NoiseSource`] so callers can swap the entropy
//! seeded default for a fixed seed or for silence.

use eeg_core::{EegError, EegResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Standard deviation of the additive noise term
pub const DEFAULT_NOISE_STD: f32 = 0.5;

/// Produces one additive noise value per sample
pub trait NoiseSource {
    fn sample(&mut self) -> f32;

    /// Fill `out` with consecutive samples
    fn fill(&mut self, out: &mut [f32]) {
        for value in out.iter_mut() {
            *value = self.sample();
        }
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for Box<N> {
    fn sample(&mut self) -> f32 {
        (**self).sample()
    }

    fn fill(&mut self, out: &mut [f32]) {
        (**self).fill(out)
    }
}

/// Zero-mean Gaussian noise
pub struct GaussianNoise {
    rng: StdRng,
    normal_dist: Normal<f32>,
}

impl GaussianNoise {
    /// Gaussian noise with the given standard deviation.
    ///
    /// With `seed == None` the generator is seeded from OS entropy.
    pub fn new(std_dev: f32, seed: Option<u64>) -> EegResult<Self> {
        let normal_dist = Normal::new(0.0, std_dev)
            .map_err(|_| EegError::InvalidParameter {
                name: "noise_std",
                value: std_dev,
                reason: "must be a non-negative finite number",
            })?;

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(GaussianNoise { rng, normal_dist })
    }
}

impl NoiseSource for GaussianNoise {
    fn sample(&mut self) -> f32 {
        self.normal_dist.sample(&mut self.rng)
    }
}

/// Noise source that contributes nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNoise;

impl NoiseSource for SilentNoise {
    fn sample(&mut self) -> f32 {
        0.0
    }
}
