use nalgebra::{Matrix4, Vector2};

use crate::{
    camera::ArcballCamera, common::ChangeFlag, transfer_function::TransferFunction,
    volumetric::VolumeStore, AdaptiveQuality,
};

/// Everything the GPU boundary needs for one frame, as named fields
/// resolved at compile time rather than a string-keyed uniform map.
pub struct FrameParams<'a> {
    pub resolution: Vector2<u32>,
    /// Camera-to-world transform, column-major
    pub camera_to_world: Matrix4<f32>,
    /// Voxel-spacing scale for the unit volume cube
    pub anisotropy: Matrix4<f32>,
    /// 256 RGBA texels
    pub tf_table: &'a [u8],
}

/// The out-of-scope GPU side: shader programs, render-target textures
/// and viewport compositing live behind this trait.
pub trait RenderBackend {
    /// Resize the backing render target.
    /// Must be a no-op when the requested size equals the current one.
    fn resize(&mut self, resolution: Vector2<u32>);

    fn draw(&mut self, frame: &FrameParams);
}

/// Per-frame orchestration for one render target.
///
/// The order inside [`frame`](Self::frame) is load-bearing: the
/// camera and settings flags are edge-triggered and drained exactly
/// once, before the render decision, and the transfer function is
/// rebaked only when its own dirty flag is set.
pub struct RenderLoop {
    quality: AdaptiveQuality,
}

impl RenderLoop {
    pub fn new(quality: AdaptiveQuality) -> RenderLoop {
        RenderLoop { quality }
    }

    pub fn quality(&self) -> &AdaptiveQuality {
        &self.quality
    }

    pub fn quality_mut(&mut self) -> &mut AdaptiveQuality {
        &mut self.quality
    }

    /// One display-synchronized callback.
    /// Returns whether a frame was drawn.
    pub fn frame<B: RenderBackend>(
        &mut self,
        camera: &mut ArcballCamera,
        settings_changed: &mut ChangeFlag,
        volume: &VolumeStore,
        transfer_function: &mut TransferFunction,
        backend: &mut B,
    ) -> bool {
        let camera_updated = camera.drain_updated();
        let settings_updated = settings_changed.drain();

        if !self
            .quality
            .should_render_frame(camera_updated, settings_updated)
        {
            return false;
        }

        let table = transfer_function.bake();
        let frame = FrameParams {
            resolution: self.quality.resolution(),
            camera_to_world: camera.get_transform(),
            anisotropy: volume.anisotropy(),
            tf_table: table,
        };

        backend.resize(frame.resolution);
        backend.draw(&frame);
        true
    }
}
