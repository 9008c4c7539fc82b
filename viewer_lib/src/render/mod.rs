mod quality;
mod render_loop;

pub use quality::{AdaptiveQuality, QualityConfig};
pub use render_loop::{FrameParams, RenderBackend, RenderLoop};
