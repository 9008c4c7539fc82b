use nalgebra::Vector3;

use crate::config::Config;

use super::SampleGenerator;

/// Uniform random samples, reproducible with a seed
pub struct NoiseGenerator {
    rng: fastrand::Rng,
}

impl NoiseGenerator {
    pub fn from_config(config: &Config) -> NoiseGenerator {
        let rng = fastrand::Rng::new();
        if let Some(seed) = config.seed {
            rng.seed(seed);
        }
        NoiseGenerator { rng }
    }
}

impl SampleGenerator for NoiseGenerator {
    fn sample_at(&self, _coords: Vector3<u32>) -> i16 {
        self.rng.i16(0..=i16::MAX)
    }
}
