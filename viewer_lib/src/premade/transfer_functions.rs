//! Prewritten transfer functions for common CT datasets.
//! Used as initial editor state; every point stays user-editable.

use crate::{
    color,
    transfer_function::{ControlPoint, TransferFunction},
};

/// Neutral grey ramp, opacity rising with density
pub fn grey_ramp() -> TransferFunction {
    TransferFunction::default()
}

/// CT preset: translucent skin tones over low densities, opaque
/// bone white at the top of the range
pub fn skin_bone() -> TransferFunction {
    TransferFunction::new(vec![
        ControlPoint::new(0.0, 0.0, color::black()),
        ControlPoint::new(0.2, 0.02, color::new(0.91, 0.76, 0.65)),
        ControlPoint::new(0.45, 0.05, color::new(0.91, 0.76, 0.65)),
        ControlPoint::new(0.65, 0.8, color::new(0.89, 0.86, 0.79)),
        ControlPoint::new(1.0, 1.0, color::white()),
    ])
}

/// Highlights a single density band, everything else transparent
pub fn band(center: f32, width: f32) -> TransferFunction {
    let center = center.clamp(0.05, 0.95);
    let half = (width / 2.0).clamp(0.01, 0.4);
    let lo = (center - half).max(0.01);
    let hi = (center + half).min(0.99);

    TransferFunction::new(vec![
        ControlPoint::new(0.0, 0.0, color::black()),
        ControlPoint::new(lo, 0.0, color::black()),
        ControlPoint::new(center, 0.9, color::new(0.8, 0.1, 0.1)),
        ControlPoint::new(hi, 0.0, color::black()),
        ControlPoint::new(1.0, 0.0, color::black()),
    ])
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn presets_are_sorted_and_pinned() {
        for mut tf in [grey_ramp(), skin_bone(), band(0.5, 0.2)] {
            let points = tf.control_points();
            assert!(points.len() >= 2);
            assert_eq!(points.first().unwrap().position, 0.0);
            assert_eq!(points.last().unwrap().position, 1.0);
            assert!(points.windows(2).all(|w| w[0].position < w[1].position));
            tf.bake();
        }
    }
}
