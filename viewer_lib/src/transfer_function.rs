//! Piecewise-linear transfer function editor and its bake to a
//! 256-texel RGBA lookup table.
//!
//! Edits that would break point ordering or touch a fixed endpoint
//! are silent no-ops; on the interactive path an exception per
//! rejected drag would be disruptive, so acceptance is reported by
//! the returned `bool` instead.

use crate::color::RGB;

/// Texels in the baked lookup table
pub const TABLE_SIZE: usize = 256;

/// Closest two neighbouring points may sit on the position axis
const POSITION_MARGIN: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    /// Normalized scalar value in <0;1>
    pub position: f32,
    /// Unshaped opacity in <0;1>
    pub opacity: f32,
    pub color: RGB,
}

impl ControlPoint {
    pub fn new(position: f32, opacity: f32, color: RGB) -> ControlPoint {
        ControlPoint {
            position,
            opacity,
            color,
        }
    }
}

pub struct TransferFunction {
    points: Vec<ControlPoint>,
    /// Shaping exponent applied to opacity in the baked table only
    alpha_power: f32,
    table: [u8; 4 * TABLE_SIZE],
    dirty: bool,
}

impl std::fmt::Debug for TransferFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferFunction")
            .field("points", &self.points)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl TransferFunction {
    /// Construct from a position-sorted point list.
    ///
    /// First and last points pin the domain boundaries at 0.0 and
    /// 1.0; their positions are forced there.
    pub fn new(mut points: Vec<ControlPoint>) -> TransferFunction {
        assert!(points.len() >= 2, "transfer function needs >= 2 points");
        debug_assert!(points.windows(2).all(|w| w[0].position < w[1].position));

        let last = points.len() - 1;
        points[0].position = 0.0;
        points[last].position = 1.0;

        TransferFunction {
            points,
            alpha_power: 1.0,
            table: [0; 4 * TABLE_SIZE],
            dirty: true,
        }
    }

    pub fn control_points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_alpha_power(&mut self, power: f32) {
        self.alpha_power = power.max(0.0);
        self.dirty = true;
    }

    /// Insert an interior point in sorted order.
    ///
    /// Rejected when the position does not fall strictly between its
    /// would-be neighbours (this covers collisions with the fixed
    /// boundary points).
    pub fn add_point(&mut self, position: f32, opacity: f32, color: RGB) -> bool {
        if !position.is_finite() || !opacity.is_finite() {
            return false;
        }
        let index = self.points.partition_point(|p| p.position < position);
        if index == 0 || index == self.points.len() {
            return false;
        }
        let left = self.points[index - 1].position;
        let right = self.points[index].position;
        if position <= left || position >= right {
            return false;
        }

        self.points.insert(
            index,
            ControlPoint::new(position, opacity.clamp(0.0, 1.0), color),
        );
        self.dirty = true;
        true
    }

    /// Move a point.
    ///
    /// Interior points have their position clamped strictly between
    /// the immediate neighbours; endpoints keep their position and
    /// only take the opacity.
    pub fn move_point(&mut self, index: usize, position: f32, opacity: f32) -> bool {
        if index >= self.points.len() || !position.is_finite() || !opacity.is_finite() {
            return false;
        }

        let last = self.points.len() - 1;
        if index > 0 && index < last {
            let left = self.points[index - 1].position + POSITION_MARGIN;
            let right = self.points[index + 1].position - POSITION_MARGIN;
            // neighbours closer than twice the margin leave no room
            if left <= right {
                self.points[index].position = position.clamp(left, right);
            }
        }
        self.points[index].opacity = opacity.clamp(0.0, 1.0);
        self.dirty = true;
        true
    }

    pub fn set_color(&mut self, index: usize, color: RGB) -> bool {
        match self.points.get_mut(index) {
            Some(p) => {
                p.color = color;
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Delete an interior point; endpoints are fixed.
    pub fn remove_point(&mut self, index: usize) -> bool {
        if index == 0 || index + 1 >= self.points.len() {
            return false;
        }
        self.points.remove(index);
        self.dirty = true;
        true
    }

    /// Bake the 256x RGBA lookup table.
    ///
    /// Walks the equally spaced sample positions `i/256` with a
    /// cursor into the point list, interpolating opacity and color
    /// within the active segment. Recomputes only when an edit was
    /// made since the last bake.
    pub fn bake(&mut self) -> &[u8] {
        if !self.dirty {
            return &self.table;
        }

        let mut cursor = 0;
        for i in 0..TABLE_SIZE {
            let pos = i as f32 / TABLE_SIZE as f32;

            while cursor + 2 < self.points.len() && pos > self.points[cursor + 1].position {
                cursor += 1;
            }
            let c1 = self.points[cursor];
            let c2 = self.points[cursor + 1];

            let span = c2.position - c1.position;
            let (opacity, color) = if span <= f32::EPSILON {
                // degenerate segment, avoid dividing by zero
                (c1.opacity, c1.color)
            } else {
                let t = ((pos - c1.position) / span).clamp(0.0, 1.0);
                (
                    c1.opacity + (c2.opacity - c1.opacity) * t,
                    c1.color.lerp(&c2.color, t),
                )
            };

            let alpha = opacity.powf(self.alpha_power);
            self.table[4 * i] = channel_byte(color.x);
            self.table[4 * i + 1] = channel_byte(color.y);
            self.table[4 * i + 2] = channel_byte(color.z);
            self.table[4 * i + 3] = channel_byte(alpha);
        }

        self.dirty = false;
        &self.table
    }

    /// Cached table from the last bake
    pub fn table(&self) -> &[u8] {
        &self.table
    }
}

impl Default for TransferFunction {
    /// Three-point grey ramp
    fn default() -> Self {
        use crate::color;
        TransferFunction::new(vec![
            ControlPoint::new(0.0, 0.0, color::black()),
            ControlPoint::new(0.5, 0.5, color::mono(0.5)),
            ControlPoint::new(1.0, 1.0, color::white()),
        ])
    }
}

fn channel_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::color;

    fn peak_tf() -> TransferFunction {
        TransferFunction::new(vec![
            ControlPoint::new(0.0, 0.0, color::black()),
            ControlPoint::new(0.5, 1.0, color::white()),
            ControlPoint::new(1.0, 0.0, color::black()),
        ])
    }

    #[test]
    fn bake_is_idempotent() {
        let mut tf = peak_tf();
        let first = tf.bake().to_vec();
        let second = tf.bake().to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn accepted_edit_changes_table() {
        let mut tf = peak_tf();
        let before = tf.bake().to_vec();

        assert!(tf.move_point(1, 0.5, 0.2));
        let after = tf.bake().to_vec();
        assert_ne!(before, after);
    }

    #[test]
    fn peak_bakes_white_at_midpoint() {
        let mut tf = peak_tf();
        let table = tf.bake();
        // i = 128 -> position 0.5, the white fully-opaque point
        assert_eq!(&table[4 * 128..4 * 128 + 4], &[255, 255, 255, 255]);
    }

    #[test]
    fn baked_values_stay_between_segment_endpoints() {
        let mut tf = peak_tf();
        let table = tf.bake().to_vec();

        // linear segments: every texel lies between its segment
        // endpoints, so channels rise to the peak and fall after it
        for i in 1..=128 {
            assert!(table[4 * i + 3] >= table[4 * (i - 1) + 3]);
            assert!(table[4 * i] >= table[4 * (i - 1)]);
        }
        for i in 129..TABLE_SIZE {
            assert!(table[4 * i + 3] <= table[4 * (i - 1) + 3]);
        }
    }

    #[test]
    fn add_point_keeps_order() {
        let mut tf = peak_tf();
        assert!(tf.add_point(0.25, 0.3, color::mono(0.3)));

        // collision with an existing position
        assert!(!tf.add_point(0.25, 0.9, color::white()));
        // outside the pinned domain
        assert!(!tf.add_point(0.0, 0.9, color::white()));
        assert!(!tf.add_point(1.2, 0.9, color::white()));

        let positions: Vec<f32> = tf.control_points().iter().map(|p| p.position).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn move_point_clamps_between_neighbours() {
        let mut tf = peak_tf();

        // try to drag the middle point past both neighbours
        assert!(tf.move_point(1, -3.0, 0.5));
        let left = tf.control_points()[0].position;
        assert!(tf.control_points()[1].position > left);

        assert!(tf.move_point(1, 3.0, 0.5));
        let right = tf.control_points()[2].position;
        assert!(tf.control_points()[1].position < right);
    }

    #[test]
    fn crowded_neighbours_keep_point_in_place() {
        let mut tf = peak_tf();
        assert!(tf.add_point(0.4995, 0.3, color::mono(0.3)));
        assert!(tf.add_point(0.5005, 0.3, color::mono(0.3)));

        // the peak's neighbours are closer than twice the margin, so
        // the drag moves only the opacity
        assert!(tf.move_point(2, 0.7, 0.5));
        assert_eq!(tf.control_points()[2].position, 0.5);
        assert_eq!(tf.control_points()[2].opacity, 0.5);

        let positions: Vec<f32> = tf.control_points().iter().map(|p| p.position).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn non_finite_move_is_rejected() {
        let mut tf = peak_tf();

        assert!(!tf.move_point(1, f32::NAN, 0.5));
        assert!(!tf.move_point(1, f32::INFINITY, 0.5));
        assert!(!tf.move_point(1, 0.5, f32::NAN));
        assert!(!tf.add_point(0.25, f32::NAN, color::mono(0.3)));

        let positions: Vec<f32> = tf.control_points().iter().map(|p| p.position).collect();
        assert_eq!(positions, vec![0.0, 0.5, 1.0]);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn endpoints_keep_position() {
        let mut tf = peak_tf();
        assert!(tf.move_point(0, 0.4, 0.9));
        assert_eq!(tf.control_points()[0].position, 0.0);
        assert_eq!(tf.control_points()[0].opacity, 0.9);

        assert!(tf.move_point(2, 0.1, 0.9));
        assert_eq!(tf.control_points()[2].position, 1.0);
    }

    #[test]
    fn endpoints_cannot_be_removed() {
        let mut tf = peak_tf();
        assert!(!tf.remove_point(0));
        assert!(!tf.remove_point(2));
        assert!(tf.remove_point(1));
        assert_eq!(tf.control_points().len(), 2);
        assert!(!tf.remove_point(1));
    }

    #[test]
    fn alpha_power_shapes_table_only() {
        let mut tf = peak_tf();
        tf.set_alpha_power(2.0);

        // quarter point of the rising segment: opacity 0.25, shaped 0.0625
        let i = 32;
        let alpha = tf.bake()[4 * i + 3];
        assert_eq!(alpha, channel_byte(0.25f32.powf(2.0)));
        // control points expose the unshaped opacity
        assert_eq!(tf.control_points()[1].opacity, 1.0);
    }
}
