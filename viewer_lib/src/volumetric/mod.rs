mod gradient;
pub mod parse;
mod vol_builder;
mod volume;

pub use gradient::{GradientConfig, GradientField};
pub use vol_builder::{from_file, DataSource, VolumeMetadata};
pub use volume::VolumeStore;
