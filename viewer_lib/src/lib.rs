pub mod camera;
pub mod common;
mod error;
pub mod premade;
pub mod render;
pub mod test_helpers;
pub mod transfer_function;
pub mod volumetric;

pub use camera::{ArcballCamera, CameraConfig, InputState};
pub use error::DataError;
pub use render::{AdaptiveQuality, QualityConfig, RenderLoop};
pub use transfer_function::TransferFunction;
pub use volumetric::VolumeStore;

pub mod color {
    use nalgebra::{vector, Vector3};

    /// Color channels in <0;1>
    pub type RGB = Vector3<f32>;

    pub fn new(r: f32, g: f32, b: f32) -> RGB {
        vector![r, g, b]
    }

    pub fn black() -> RGB {
        vector![0.0, 0.0, 0.0]
    }

    pub fn white() -> RGB {
        vector![1.0, 1.0, 1.0]
    }

    pub fn mono(v: f32) -> RGB {
        vector![v, v, v]
    }
}
