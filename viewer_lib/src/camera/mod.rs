mod arcball;
mod input;

pub use arcball::{ArcballCamera, CameraConfig};
pub use input::{InputState, MoveKey};
