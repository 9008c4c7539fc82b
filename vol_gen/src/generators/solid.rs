use nalgebra::{vector, Vector3};

use crate::config::{Config, GeneratorConfig};

use super::SampleGenerator;

/// Solid volume with a zero border
/// All interior sample values are the same
pub struct SolidGenerator {
    sample: i16,
    pad: u32,
    dims: Vector3<u32>,
}

impl SolidGenerator {
    pub fn from_config(config: &Config) -> SolidGenerator {
        let sample = match config.generator {
            GeneratorConfig::Solid { sample } => sample,
            _ => panic!("Bad generator config"),
        };

        // Border shrinks with tiny volumes so the interior never vanishes
        let pad = config.dims.min().saturating_sub(2).min(5) / 2;

        SolidGenerator {
            sample,
            pad,
            dims: config.dims,
        }
    }
}

impl SampleGenerator for SolidGenerator {
    fn sample_at(&self, coords: Vector3<u32>) -> i16 {
        let pad_end = self.dims.map(|d| d.saturating_sub(1 + self.pad));
        if coords.x < self.pad
            || coords.y < self.pad
            || coords.z < self.pad
            || coords.x > pad_end.x
            || coords.y > pad_end.y
            || coords.z > pad_end.z
        {
            0
        } else {
            self.sample
        }
    }
}
