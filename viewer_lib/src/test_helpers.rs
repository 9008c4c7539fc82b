//! Module with helper functions
//! Saves repetition in unit tests

use nalgebra::{vector, Vector3};

use crate::volumetric::{parse, GradientConfig, VolumeStore};

/// Assemble a raw stream: three little-endian i16 dimensions
/// followed by the samples
pub fn stream_from_samples(dims: Vector3<i16>, samples: &[i16]) -> Vec<u8> {
    let mut out = Vec::with_capacity(6 + 2 * samples.len());
    for d in [dims.x, dims.y, dims.z] {
        out.extend_from_slice(&d.to_le_bytes());
    }
    for &s in samples {
        out.extend_from_slice(&s.to_le_bytes());
    }
    out
}

/// Build a store from in-memory samples, unit spacing
pub fn store_from_samples(dims: Vector3<i16>, samples: &[i16]) -> VolumeStore {
    let stream = stream_from_samples(dims, samples);
    let meta = parse::stream_header(&stream).unwrap();
    VolumeStore::load(meta, &stream, GradientConfig::default()).unwrap()
}

/// The 2x2x2 ramp volume: samples 0,10,..,70, maximum 70
pub fn ramp_store() -> VolumeStore {
    store_from_samples(vector![2, 2, 2], &[0, 10, 20, 30, 40, 50, 60, 70])
}

/// Cube of a single value with a one-voxel zero border, large enough
/// to have interior voxels
pub fn solid_store(side: i16, value: i16) -> VolumeStore {
    let s = side as usize;
    let mut samples = vec![0i16; s * s * s];
    for z in 1..s - 1 {
        for y in 1..s - 1 {
            for x in 1..s - 1 {
                samples[x + y * s + z * s * s] = value;
            }
        }
    }
    store_from_samples(vector![side, side, side], &samples)
}
