use std::{fs::File, path::Path};

use memmap::{Mmap, MmapOptions};
use nalgebra::{vector, Vector3};

use crate::DataError;

use super::{parse, GradientConfig, VolumeStore};

/// Load a volume from a raw stream file.
///
/// Convenience over [`DataSource::from_file`] followed by
/// [`VolumeStore::load`]. `spacing` is the per-axis voxel spacing
/// metadata delivered alongside the stream.
pub fn from_file<P>(
    path: P,
    spacing: Vector3<f32>,
    gradient: GradientConfig,
) -> Result<VolumeStore, DataError>
where
    P: AsRef<Path>,
{
    let ds = DataSource::from_file(path)?;
    let slice = ds.get_slice();
    let mut metadata = parse::stream_header(slice)?;
    metadata.spacing = spacing;
    VolumeStore::load(metadata, slice, gradient)
}

/// Raw stream bytes, owned or memory-mapped
pub enum DataSource {
    Vec(Vec<u8>),
    Mmap(Mmap),
}

impl DataSource {
    pub fn get_slice(&self) -> &[u8] {
        match self {
            DataSource::Vec(v) => v.as_slice(),
            DataSource::Mmap(m) => &m[..],
        }
    }

    pub fn from_vec(vec: Vec<u8>) -> DataSource {
        DataSource::Vec(vec)
    }

    pub fn from_file<P>(path: P) -> Result<DataSource, DataError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(DataError::NotAFile);
        }

        let file = File::open(path)?;
        let mmap = unsafe { MmapOptions::new().map(&file)? };

        Ok(DataSource::Mmap(mmap))
    }
}

/// Parsed stream header plus spacing metadata
#[derive(Debug, Clone, Copy)]
pub struct VolumeMetadata {
    /// Voxel counts per axis
    pub size: Vector3<usize>,
    /// Physical voxel spacing per axis
    pub spacing: Vector3<f32>,
    /// Byte offset where samples begin
    pub data_offset: usize,
}

impl VolumeMetadata {
    pub fn new(size: Vector3<usize>, data_offset: usize) -> VolumeMetadata {
        VolumeMetadata {
            size,
            spacing: vector![1.0, 1.0, 1.0],
            data_offset,
        }
    }
}
