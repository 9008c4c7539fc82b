//! Order in which samples are laid out in the stream

use nalgebra::{vector, Vector3};

/// Walks the volume in stream order, x fastest, then y, then z
#[derive(Debug)]
pub struct LinearCoordIterator {
    pub dims: Vector3<u32>,
    pub state: Vector3<u32>,
    done: bool,
    started: bool,
}

impl LinearCoordIterator {
    pub fn from_dims(dims: Vector3<u32>) -> LinearCoordIterator {
        LinearCoordIterator {
            dims,
            state: vector![0, 0, 0],
            done: false,
            started: false,
        }
    }
}

impl Iterator for LinearCoordIterator {
    type Item = Vector3<u32>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.state);
        }
        self.state.x += 1;
        if self.state.x == self.dims.x {
            self.state.x = 0;
            self.state.y += 1;
        }
        if self.state.y == self.dims.y {
            self.state.y = 0;
            self.state.z += 1;
        }
        if self.state.z == self.dims.z {
            self.state.z = 0;
            self.done = true;
            return None;
        }

        Some(self.state)
    }
}
