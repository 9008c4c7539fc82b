use std::ops::RangeBounds;

use nalgebra::{vector, Vector3};

use crate::config::{Config, GeneratorConfig};

use super::SampleGenerator;

/// Volume with a number of randomly placed shapes
pub struct ShapesGenerator {
    shapes: Vec<ShapeInfo>,
}

impl ShapesGenerator {
    pub fn from_config(config: &Config) -> ShapesGenerator {
        let dims = config.dims;
        let (n_of_shapes, sample, obj_size) = match config.generator {
            GeneratorConfig::Shapes {
                n_of_shapes,
                sample,
                obj_size,
            } => (n_of_shapes, sample, obj_size),
            _ => panic!("Bad generator config"),
        };

        let size = vector![obj_size, obj_size, obj_size];
        let size_variance = size.map(|v| v / 10);

        let random_shape_gen =
            ShapeInfoGenerator::new(dims, size, size_variance, sample, 10, config.seed);
        let shapes = random_shape_gen.get_shapes(n_of_shapes);
        ShapesGenerator { shapes }
    }
}

impl SampleGenerator for ShapesGenerator {
    fn sample_at(&self, coords: Vector3<u32>) -> i16 {
        for shape in &self.shapes {
            if coords.x >= shape.position_low.x
                && coords.y >= shape.position_low.y
                && coords.z >= shape.position_low.z
                && coords.x <= shape.position_high.x
                && coords.y <= shape.position_high.y
                && coords.z <= shape.position_high.z
            {
                let offset = coords - shape.position_low;
                return shape.render_at(offset);
            }
        }
        0
    }
}

const N_OF_SHAPE_KINDS: u8 = 2;

pub enum ShapeType {
    Cuboid,
    Sphere,
}

/// One shape in volume
pub struct ShapeInfo {
    pub position_low: Vector3<u32>,
    pub position_high: Vector3<u32>,
    pub shape_type: ShapeType,
    pub sample: i16,
}

impl ShapeInfo {
    #[must_use]
    pub fn new(
        position_low: Vector3<u32>,
        position_high: Vector3<u32>,
        shape_type: ShapeType,
        sample: i16,
    ) -> Self {
        Self {
            position_low,
            position_high,
            shape_type,
            sample,
        }
    }

    fn render_at(&self, offset: Vector3<u32>) -> i16 {
        match self.shape_type {
            ShapeType::Cuboid => self.sample,
            ShapeType::Sphere => self.render_sphere(offset),
        }
    }

    fn render_sphere(&self, offset: Vector3<u32>) -> i16 {
        let offset_f = offset.cast::<f32>();
        let pos_low_f = self.position_low.cast::<f32>();
        let pos_hi_f = self.position_high.cast::<f32>();

        let center = (pos_low_f + pos_hi_f) / 2.0 - pos_low_f;

        let r = (pos_hi_f.x - pos_low_f.x) / 2.0;
        let length = offset_f - center;

        if length.magnitude() <= r {
            self.sample
        } else {
            0
        }
    }
}

/// Generate shapes
/// Helper type
pub struct ShapeInfoGenerator {
    rng: fastrand::Rng,
    vol_dims: Vector3<u32>,
    size: Vector3<u32>,
    size_variance: Vector3<u32>,
    sample: i16,
    sample_variance: i16,
}

impl ShapeInfoGenerator {
    #[must_use]
    pub fn new(
        vol_dims: Vector3<u32>,
        size: Vector3<u32>,
        size_variance: Vector3<u32>,
        sample: i16,
        sample_variance: i16,
        seed: Option<u64>,
    ) -> Self {
        let rng = fastrand::Rng::new();
        if let Some(seed) = seed {
            rng.seed(seed);
        }

        Self {
            rng,
            vol_dims,
            size,
            size_variance,
            sample,
            sample_variance,
        }
    }

    fn random_shape(&self) -> ShapeType {
        let ran = self.rng.u8(0..N_OF_SHAPE_KINDS);
        match ran {
            0 => ShapeType::Cuboid,
            _ => ShapeType::Sphere,
        }
    }

    fn random_vector<R>(&self, ranges: Vector3<R>) -> Vector3<u32>
    where
        R: RangeBounds<u32> + Clone,
    {
        let rand_x = self.rng.u32(ranges[0].clone());
        let rand_y = self.rng.u32(ranges[1].clone());
        let rand_z = self.rng.u32(ranges[2].clone());
        vector![rand_x, rand_y, rand_z]
    }

    pub fn get_shapes(&self, n: usize) -> Vec<ShapeInfo> {
        (0..n).map(|_| self.get_shape()).collect()
    }

    pub fn get_shape(&self) -> ShapeInfo {
        let shape_type = self.random_shape();

        let size_min = self.size.zip_map(&self.size_variance, |s, v| s.saturating_sub(v).max(1));
        let size_max = self.size + self.size_variance;

        let size_ranges = vector![
            size_min.x..=size_max.x,
            size_min.y..=size_max.y,
            size_min.z..=size_max.z
        ];
        let size = self.random_vector(size_ranges);

        // Clamp so the shape fits inside the volume
        let size = size.zip_map(&self.vol_dims, |s, d| s.min(d.saturating_sub(1)));

        let pos_ranges = vector![
            0..=(self.vol_dims.x - 1 - size.x),
            0..=(self.vol_dims.y - 1 - size.y),
            0..=(self.vol_dims.z - 1 - size.z)
        ];
        let position_low = self.random_vector(pos_ranges);
        let position_high = position_low + size;

        let sample = self.random_sample();

        ShapeInfo::new(position_low, position_high, shape_type, sample)
    }

    fn random_sample(&self) -> i16 {
        let low = self.sample.saturating_sub(self.sample_variance);
        let high = self.sample.saturating_add(self.sample_variance);
        self.rng.i16(low..=high)
    }
}
