use nalgebra::{vector, Matrix4, Rotation3, Unit, Vector2, Vector3};

use super::InputState;

/// Arcball interaction constants
#[derive(Debug, Clone, Copy)]
pub struct CameraConfig {
    /// Multiplicative zoom per scroll tick
    pub zoom_factor: f32,
    /// Clamp on the transform's uniform scale component
    pub zoom_range: (f32, f32),
    /// Local-space translation per held-key tick
    pub pan_step: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            zoom_factor: 1.1,
            zoom_range: (1.0, 32.0),
            pan_step: 1.0 / 60.0,
        }
    }
}

/// Virtual trackball camera over a single 4x4 transform.
///
/// Pointer coordinates are normalized widget coordinates in <-1;1>.
/// `drain_updated` is the edge-triggered dirty read: exactly one
/// consumer polls it once per frame.
pub struct ArcballCamera {
    transform: Matrix4<f32>,
    last_pointer: Option<Vector2<f32>>,
    dragging: bool,
    updated: bool,
    /// Installed when this camera's axes must follow a separately
    /// rotating parent view (light-direction widget)
    aux_transform: Option<Matrix4<f32>>,
    observers: Vec<Box<dyn FnMut()>>,
    config: CameraConfig,
}

impl std::fmt::Debug for ArcballCamera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArcballCamera")
            .field("transform", &self.transform)
            .field("dragging", &self.dragging)
            .field("updated", &self.updated)
            .finish()
    }
}

impl ArcballCamera {
    pub fn new() -> ArcballCamera {
        ArcballCamera::with_config(CameraConfig::default())
    }

    pub fn with_config(config: CameraConfig) -> ArcballCamera {
        ArcballCamera {
            transform: Matrix4::identity(),
            last_pointer: None,
            dragging: false,
            updated: true,
            aux_transform: None,
            observers: Vec::new(),
            config,
        }
    }

    /// Current camera-to-world transform, column-major
    pub fn get_transform(&self) -> Matrix4<f32> {
        self.transform
    }

    /// Read and clear the dirty flag
    pub fn drain_updated(&mut self) -> bool {
        std::mem::take(&mut self.updated)
    }

    /// Register a change listener; the camera does not own the
    /// listener's lifetime beyond dropping the closure with itself
    pub fn on_change<F: FnMut() + 'static>(&mut self, callback: F) {
        self.observers.push(Box::new(callback));
    }

    pub fn set_aux_transform(&mut self, aux: Option<Matrix4<f32>>) {
        self.aux_transform = aux;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn on_pointer_down(&mut self) {
        self.dragging = true;
    }

    pub fn on_pointer_up(&mut self) {
        self.dragging = false;
    }

    pub fn on_pointer_leave(&mut self) {
        self.dragging = false;
    }

    /// Incremental arcball rotation between the previous and current
    /// pointer samples. Degenerate moves (repeated sample, NaN
    /// projection, zero-length axis) are ignored.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        let current = vector![x, y];

        if !self.dragging {
            self.last_pointer = Some(current);
            return;
        }

        let last = match self.last_pointer {
            Some(p) => p,
            None => {
                self.last_pointer = Some(current);
                return;
            }
        };
        if last == current {
            return;
        }
        self.last_pointer = Some(current);

        let va = hemisphere_point(last);
        let vb = hemisphere_point(current);
        if va.iter().any(|v| v.is_nan()) || vb.iter().any(|v| v.is_nan()) {
            return;
        }

        let angle = va.dot(&vb).clamp(-1.0, 1.0).acos();
        let axis = va.cross(&vb);

        let inverse = match self.transform.try_inverse() {
            Some(m) => m,
            None => return,
        };
        // rotate about the axis expressed in camera-local space, so
        // increments compose regardless of current orientation
        let local_axis = inverse.transform_vector(&axis);
        let local_axis = match Unit::try_new(local_axis, 1e-6) {
            Some(a) => a,
            None => return,
        };

        self.transform *= Rotation3::from_axis_angle(&local_axis, angle).to_homogeneous();
        self.mark_updated();
    }

    /// Scroll delta becomes a discrete zoom step; the resulting
    /// uniform scale is clamped to the configured range.
    pub fn on_scroll(&mut self, delta_y: f32) {
        let direction = if delta_y > 0.0 {
            1.0
        } else if delta_y < 0.0 {
            -1.0
        } else {
            return;
        };

        let factor = self.config.zoom_factor.powf(direction);
        let scale = self.scale();
        let (min, max) = self.config.zoom_range;
        let target = (scale * factor).clamp(min, max);

        let ratio = target / scale;
        if (ratio - 1.0).abs() < f32::EPSILON {
            return;
        }

        self.transform *= Matrix4::new_scaling(ratio);
        self.mark_updated();
    }

    /// Apply held-key translation, once per frame
    pub fn tick(&mut self, input: &InputState) {
        let dir = input.direction();
        if dir == Vector3::zeros() {
            return;
        }

        let base = match self.aux_transform {
            Some(aux) => aux * self.transform,
            None => self.transform,
        };
        let inverse = match base.try_inverse() {
            Some(m) => m,
            None => return,
        };
        let step = inverse.transform_vector(&(dir.normalize() * self.config.pan_step));

        self.transform *= Matrix4::new_translation(&step);
        self.mark_updated();
    }

    /// Uniform scale component read back from the transform
    pub fn scale(&self) -> f32 {
        self.transform.column(0).xyz().magnitude()
    }

    fn mark_updated(&mut self) {
        self.updated = true;
        for callback in self.observers.iter_mut() {
            callback();
        }
    }
}

impl Default for ArcballCamera {
    fn default() -> Self {
        ArcballCamera::new()
    }
}

/// Classic arcball mapping: hit the unit dome when the pointer is
/// inside the unit disc, otherwise hit the rim.
fn hemisphere_point(p: Vector2<f32>) -> Vector3<f32> {
    let d = p.x * p.x + p.y * p.y;
    if d < 1.0 {
        vector![p.x, p.y, (1.0 - d).sqrt()]
    } else {
        vector![p.x, p.y, 0.0].normalize()
    }
}

#[cfg(test)]
mod test {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    fn drag(camera: &mut ArcballCamera, from: (f32, f32), to: (f32, f32)) {
        camera.on_pointer_move(from.0, from.1);
        camera.on_pointer_down();
        camera.on_pointer_move(to.0, to.1);
        camera.on_pointer_up();
    }

    #[test]
    fn rotation_keeps_transform_invertible() {
        let mut camera = ArcballCamera::new();
        drag(&mut camera, (0.0, 0.0), (0.3, 0.2));
        drag(&mut camera, (0.9, 0.9), (-0.5, 0.1));
        camera.on_scroll(120.0);

        let det = camera.get_transform().determinant();
        assert!(det.abs() > 1e-6);
    }

    #[test]
    fn repeated_pointer_sample_is_ignored() {
        let mut camera = ArcballCamera::new();
        camera.on_pointer_move(0.1, 0.1);
        camera.on_pointer_down();
        camera.drain_updated();

        camera.on_pointer_move(0.1, 0.1);
        assert!(!camera.drain_updated());
        assert_eq!(camera.get_transform(), Matrix4::identity());
    }

    #[test]
    fn move_without_drag_does_not_rotate() {
        let mut camera = ArcballCamera::new();
        camera.drain_updated();
        camera.on_pointer_move(0.0, 0.0);
        camera.on_pointer_move(0.5, 0.5);

        assert_eq!(camera.get_transform(), Matrix4::identity());
        assert!(!camera.drain_updated());
    }

    #[test]
    fn rim_points_still_rotate() {
        let mut camera = ArcballCamera::new();
        // both samples outside the unit disc
        drag(&mut camera, (1.5, 0.0), (0.0, 1.5));
        assert!(camera.drain_updated());

        let det = camera.get_transform().determinant();
        assert!(det.abs() > 1e-6);
    }

    #[test]
    fn zoom_stays_in_range() {
        let mut camera = ArcballCamera::new();
        let (min, max) = CameraConfig::default().zoom_range;

        for _ in 0..100 {
            camera.on_scroll(1.0);
        }
        assert!(camera.scale() <= max * 1.001);

        for _ in 0..300 {
            camera.on_scroll(-1.0);
        }
        assert!(camera.scale() >= min * 0.999);

        let det = camera.get_transform().determinant();
        assert!(det.abs() > 1e-6);
    }

    #[test]
    fn drain_is_edge_triggered() {
        let mut camera = ArcballCamera::new();
        assert!(camera.drain_updated()); // construction counts as a change
        assert!(!camera.drain_updated());

        camera.on_scroll(1.0);
        assert!(camera.drain_updated());
        assert!(!camera.drain_updated());
    }

    #[test]
    fn held_keys_translate_each_tick() {
        use crate::camera::MoveKey;

        let mut camera = ArcballCamera::new();
        let mut input = InputState::new();
        input.set_key(MoveKey::Forward, true);

        let before = camera.get_transform();
        camera.tick(&input);
        let after = camera.get_transform();
        assert_ne!(before, after);

        let moved = (after.column(3).xyz() - before.column(3).xyz()).magnitude();
        assert!((moved - CameraConfig::default().pan_step).abs() < 1e-5);
    }

    #[test]
    fn observers_fire_on_mutation() {
        let fired = Rc::new(Cell::new(0));
        let seen = fired.clone();

        let mut camera = ArcballCamera::new();
        camera.on_change(move || seen.set(seen.get() + 1));

        camera.on_scroll(1.0);
        drag(&mut camera, (0.0, 0.0), (0.2, 0.1));
        assert_eq!(fired.get(), 2);
    }
}
