use std::mem::size_of;

use nalgebra::{vector, Vector3};

/// Gradient precomputation knobs.
///
/// `memory_budget` bounds the full-resolution f32 RGB buffer; a
/// volume over budget gets its gradient grid shrunk by `reduction`
/// per axis instead of failing the load.
#[derive(Debug, Clone, Copy)]
pub struct GradientConfig {
    pub memory_budget: usize,
    pub reduction: usize,
    /// Largest-component magnitude below which a region counts as flat
    pub flat_threshold: f32,
}

impl Default for GradientConfig {
    fn default() -> Self {
        GradientConfig {
            memory_budget: 2 * 1024 * 1024 * 1024,
            reduction: 2,
            flat_threshold: 0.025,
        }
    }
}

/// Per-voxel central-difference gradients, direction-only.
///
/// Each stored vector is divided by its largest-magnitude component,
/// so shading gets a direction and relative magnitude is lost.
pub struct GradientField {
    data: Vec<Vector3<f32>>,
    grid_size: Vector3<usize>,
    reduction: usize,
}

impl GradientField {
    pub fn precompute(
        scalars: &[f32],
        size: Vector3<usize>,
        config: &GradientConfig,
    ) -> GradientField {
        let full_bytes = size.x * size.y * size.z * 3 * size_of::<f32>();
        let reduction = if full_bytes > config.memory_budget {
            config.reduction.max(1)
        } else {
            1
        };

        if reduction > 1 {
            log::info!(
                "gradient buffer over budget ({full_bytes} B), computing at 1/{reduction} per axis"
            );
        }

        let grid_size = size.map(|d| (d + reduction - 1) / reduction);

        let value_at = |x: isize, y: isize, z: isize| -> f32 {
            let cx = x.clamp(0, size.x as isize - 1) as usize;
            let cy = y.clamp(0, size.y as isize - 1) as usize;
            let cz = z.clamp(0, size.z as isize - 1) as usize;
            scalars[cx + cy * size.x + cz * size.x * size.y]
        };

        let mut data = Vec::with_capacity(grid_size.x * grid_size.y * grid_size.z);
        for gz in 0..grid_size.z {
            for gy in 0..grid_size.y {
                for gx in 0..grid_size.x {
                    let (x, y, z) = (
                        (gx * reduction) as isize,
                        (gy * reduction) as isize,
                        (gz * reduction) as isize,
                    );
                    let mut g = vector![
                        (value_at(x - 1, y, z) - value_at(x + 1, y, z)) / 2.0,
                        (value_at(x, y - 1, z) - value_at(x, y + 1, z)) / 2.0,
                        (value_at(x, y, z - 1) - value_at(x, y, z + 1)) / 2.0
                    ];

                    let factor = g.abs().max();
                    if factor > config.flat_threshold {
                        g /= factor;
                    } else {
                        g = Vector3::zeros();
                    }
                    data.push(g);
                }
            }
        }

        GradientField {
            data,
            grid_size,
            reduction,
        }
    }

    /// Gradient at voxel coordinates.
    ///
    /// When the field was computed at reduced resolution, the
    /// coordinates index through the reduced grid by dividing by the
    /// same reduction factor.
    pub fn at(&self, x: usize, y: usize, z: usize) -> Vector3<f32> {
        let gx = (x / self.reduction).min(self.grid_size.x - 1);
        let gy = (y / self.reduction).min(self.grid_size.y - 1);
        let gz = (z / self.reduction).min(self.grid_size.z - 1);
        self.data[gx + gy * self.grid_size.x + gz * self.grid_size.x * self.grid_size.y]
    }

    pub fn grid_size(&self) -> Vector3<usize> {
        self.grid_size
    }

    pub fn reduction(&self) -> usize {
        self.reduction
    }

    pub fn raw(&self) -> &[Vector3<f32>] {
        &self.data
    }
}

#[cfg(test)]
mod test {
    use super::*;

    // 0..26 along x, constant in y and z
    fn x_ramp(n: usize) -> (Vec<f32>, Vector3<usize>) {
        let size = vector![n, n, n];
        let mut scalars = Vec::with_capacity(n * n * n);
        for _z in 0..n {
            for _y in 0..n {
                for x in 0..n {
                    scalars.push(x as f32 / (n - 1) as f32);
                }
            }
        }
        (scalars, size)
    }

    #[test]
    fn ramp_gradient_points_down_x() {
        let (scalars, size) = x_ramp(5);
        let field = GradientField::precompute(&scalars, size, &GradientConfig::default());

        // interior voxel: ramp rises with x, so the difference is negative
        let g = field.at(2, 2, 2);
        assert_eq!(g.x, -1.0);
        assert_eq!(g.y, 0.0);
        assert_eq!(g.z, 0.0);
    }

    #[test]
    fn interior_max_component_is_unit() {
        let (scalars, size) = x_ramp(5);
        let field = GradientField::precompute(&scalars, size, &GradientConfig::default());

        for z in 1..4 {
            for y in 1..4 {
                for x in 1..4 {
                    let g = field.at(x, y, z);
                    let m = g.abs().max();
                    assert!(m == 1.0 || g == Vector3::zeros());
                }
            }
        }
    }

    #[test]
    fn flat_region_is_zero() {
        let size = vector![4, 4, 4];
        let scalars = vec![0.5; 64];
        let field = GradientField::precompute(&scalars, size, &GradientConfig::default());

        for g in field.raw() {
            assert_eq!(*g, Vector3::zeros());
        }
    }

    #[test]
    fn over_budget_reduces_grid() {
        let (scalars, size) = x_ramp(8);
        let config = GradientConfig {
            memory_budget: 64, // force fallback
            ..Default::default()
        };
        let field = GradientField::precompute(&scalars, size, &config);

        assert_eq!(field.reduction(), 2);
        assert_eq!(field.grid_size(), vector![4, 4, 4]);
        // lookups at full-res coordinates still resolve
        let g = field.at(7, 7, 7);
        assert!(g.x <= 0.0);
    }
}
