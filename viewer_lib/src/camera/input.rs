use nalgebra::{vector, Vector3};

/// Camera movement keys, already mapped from whatever physical keys
/// the widget binds (WASD, arrows, space, shift)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKey {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
}

const KEY_COUNT: usize = 6;

/// Held-key state for one camera.
///
/// Owned by the controller that composes a camera with a canvas, so
/// two cameras can never race on a shared global key map.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    held: [bool; KEY_COUNT],
}

impl InputState {
    pub fn new() -> InputState {
        InputState::default()
    }

    pub fn set_key(&mut self, key: MoveKey, down: bool) {
        self.held[key as usize] = down;
    }

    pub fn is_down(&self, key: MoveKey) -> bool {
        self.held[key as usize]
    }

    pub fn any_down(&self) -> bool {
        self.held.iter().any(|&h| h)
    }

    /// Sum of the held movement directions in camera-local axes
    /// (x right, y up, z towards the viewer). Zero when idle or when
    /// opposing keys cancel out.
    pub fn direction(&self) -> Vector3<f32> {
        let mut dir = Vector3::zeros();
        if self.is_down(MoveKey::Forward) {
            dir += vector![0.0, 0.0, -1.0];
        }
        if self.is_down(MoveKey::Back) {
            dir += vector![0.0, 0.0, 1.0];
        }
        if self.is_down(MoveKey::Left) {
            dir += vector![-1.0, 0.0, 0.0];
        }
        if self.is_down(MoveKey::Right) {
            dir += vector![1.0, 0.0, 0.0];
        }
        if self.is_down(MoveKey::Up) {
            dir += vector![0.0, 1.0, 0.0];
        }
        if self.is_down(MoveKey::Down) {
            dir += vector![0.0, -1.0, 0.0];
        }
        dir
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn opposing_keys_cancel() {
        let mut input = InputState::new();
        input.set_key(MoveKey::Left, true);
        input.set_key(MoveKey::Right, true);
        assert_eq!(input.direction(), Vector3::zeros());
        assert!(input.any_down());

        input.set_key(MoveKey::Right, false);
        assert_eq!(input.direction(), vector![-1.0, 0.0, 0.0]);
    }
}
