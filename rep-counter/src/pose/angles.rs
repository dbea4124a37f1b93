//! Joint angle calculation
//!
//! The angle at a joint is measured between the rays joint→parent and
//! joint→child, e.g. hip→knee→ankle for the knee or shoulder→elbow→wrist
//! for the elbow.

use nalgebra::Vector2;

/// Interior angle at vertex `b` in degrees
///
/// Uses atan2(|cross|, dot) so the result is always in [0, 180]:
/// - 180° = fully straight (limb extended)
/// - 90° = right-angle bend
///
/// Coincident points give 0°; callers gate on keypoint score first.
pub fn joint_angle(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> f64 {
    let ba = Vector2::new(a.0 - b.0, a.1 - b.1);
    let bc = Vector2::new(c.0 - b.0, c.1 - b.1);

    let cross = ba.perp(&bc);
    let dot = ba.dot(&bc);

    cross.atan2(dot).abs().to_degrees()
}

/// Horizontal spread of a joint chain relative to its length
///
/// Small values mean the chain is nearly vertical in the camera's X axis.
/// Scale-free, so pixel and normalized coordinates give the same ratio.
pub fn horizontal_spread_ratio(points: &[(f64, f64)]) -> Option<f64> {
    if points.len() < 2 {
        return None;
    }

    let min_x = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);

    let length: f64 = points
        .windows(2)
        .map(|pair| (Vector2::new(pair[1].0, pair[1].1) - Vector2::new(pair[0].0, pair[0].1)).norm())
        .sum();

    if length < 1e-9 {
        return None;
    }

    Some((max_x - min_x) / length)
}
