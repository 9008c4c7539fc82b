use nalgebra::{Matrix4, Point3, Vector3};

use crate::DataError;

use super::{
    vol_builder::VolumeMetadata,
    {GradientConfig, GradientField},
};

/// Normalized scalar grid with precomputed gradients and anisotropy.
///
/// Built once per dataset load and read-only afterwards; switching
/// datasets replaces the whole store.
pub struct VolumeStore {
    size: Vector3<usize>,
    scalars: Vec<f32>,
    gradients: GradientField,
    anisotropy: Matrix4<f32>,
}

impl std::fmt::Debug for VolumeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VolumeStore")
            .field("size", &self.size)
            .field("scalars len", &self.scalars.len())
            .field("gradient grid", &self.gradients.grid_size())
            .finish()
    }
}

impl VolumeStore {
    /// Build a store from stream bytes described by `metadata`.
    ///
    /// Samples are little-endian i16, x fastest, then y, then z.
    /// Fails with [`DataError`] on a truncated stream; no partial
    /// store is produced.
    pub fn load(
        metadata: VolumeMetadata,
        stream: &[u8],
        gradient: GradientConfig,
    ) -> Result<VolumeStore, DataError> {
        let size = metadata.size;
        let voxels = size.x * size.y * size.z;

        if stream.len() < metadata.data_offset {
            return Err(DataError::TruncatedData {
                expected: voxels,
                got: 0,
            });
        }
        let bytes = &stream[metadata.data_offset..];
        let available = bytes.len() / 2;
        if available < voxels {
            return Err(DataError::TruncatedData {
                expected: voxels,
                got: available,
            });
        }

        let samples = bytes
            .chunks_exact(2)
            .take(voxels)
            .map(|b| i16::from_le_bytes([b[0], b[1]]));

        // Single scan for the dataset maximum, then divide through.
        // An all-non-positive volume stays at zero instead of
        // dividing by zero.
        let max = samples.clone().max().unwrap_or(0);
        let scalars: Vec<f32> = if max > 0 {
            let max = max as f32;
            samples.map(|s| (s as f32 / max).clamp(0.0, 1.0)).collect()
        } else {
            vec![0.0; voxels]
        };

        let gradients = GradientField::precompute(&scalars, size, &gradient);
        let anisotropy = anisotropy_matrix(size, metadata.spacing);

        log::info!(
            "loaded volume {}x{}x{}, max raw sample {max}, gradient grid {:?}",
            size.x,
            size.y,
            size.z,
            gradients.grid_size()
        );

        Ok(VolumeStore {
            size,
            scalars,
            gradients,
            anisotropy,
        })
    }

    fn get_3d_index(&self, x: usize, y: usize, z: usize) -> usize {
        x + y * self.size.x + z * self.size.x * self.size.y
    }

    pub fn get_data(&self, x: usize, y: usize, z: usize) -> Option<f32> {
        if x >= self.size.x || y >= self.size.y || z >= self.size.z {
            return None;
        }
        self.scalars.get(self.get_3d_index(x, y, z)).copied()
    }

    fn get_clamped(&self, x: usize, y: usize, z: usize) -> f32 {
        let x = x.min(self.size.x - 1);
        let y = y.min(self.size.y - 1);
        let z = z.min(self.size.z - 1);
        self.scalars[self.get_3d_index(x, y, z)]
    }

    /// Trilinear sample at fractional voxel coordinates, clamped to
    /// the volume. Used by the slice-view readback paths.
    pub fn sample_at(&self, pos: Point3<f32>) -> f32 {
        let x = pos.x.max(0.0) as usize;
        let y = pos.y.max(0.0) as usize;
        let z = pos.z.max(0.0) as usize;

        let x_t = pos.x.max(0.0).fract();
        let y_t = pos.y.max(0.0).fract();
        let z_t = pos.z.max(0.0).fract();

        let c00 = lerp(self.get_clamped(x, y, z), self.get_clamped(x + 1, y, z), x_t);
        let c10 = lerp(
            self.get_clamped(x, y + 1, z),
            self.get_clamped(x + 1, y + 1, z),
            x_t,
        );
        let c01 = lerp(
            self.get_clamped(x, y, z + 1),
            self.get_clamped(x + 1, y, z + 1),
            x_t,
        );
        let c11 = lerp(
            self.get_clamped(x, y + 1, z + 1),
            self.get_clamped(x + 1, y + 1, z + 1),
            x_t,
        );

        let c0 = lerp(c00, c10, y_t);
        let c1 = lerp(c01, c11, y_t);
        lerp(c0, c1, z_t)
    }

    pub fn gradient_at(&self, x: usize, y: usize, z: usize) -> Vector3<f32> {
        self.gradients.at(x, y, z)
    }

    pub fn get_size(&self) -> Vector3<usize> {
        self.size
    }

    pub fn scalars(&self) -> &[f32] {
        &self.scalars
    }

    pub fn gradients(&self) -> &GradientField {
        &self.gradients
    }

    /// Scale transform mapping the unit cube to physically correct
    /// proportions, column-major.
    pub fn anisotropy(&self) -> Matrix4<f32> {
        self.anisotropy
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Per-axis spacing times voxel count, divided by the largest raw
/// dimension, renormalized to unit length. Keeps the rendered cube
/// proportionate inside a unit bounding box.
fn anisotropy_matrix(size: Vector3<usize>, spacing: Vector3<f32>) -> Matrix4<f32> {
    let max_dim = size.max() as f32;
    let extents = Vector3::new(
        spacing.x * size.x as f32,
        spacing.y * size.y as f32,
        spacing.z * size.z as f32,
    ) / max_dim;
    let extents = extents.normalize();
    Matrix4::new_nonuniform_scaling(&extents)
}
