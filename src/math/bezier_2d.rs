//! 2D cubic Bezier utilities.
//!
//! Curved walls store one cubic segment per 4-point group
//! `[start, ctrl1, ctrl2, end]`. All sampling in the kernel uses the same
//! uniform parameter grid so hit-testing and meshing agree on the shape.

use super::{Point2, Vector2};

/// Number of uniform parameter samples used when flattening a cubic
/// Bezier to a polyline (t = 0..=1 in steps of 1/20).
pub const BEZIER_SAMPLES: usize = 21;

/// Evaluates a cubic Bezier at parameter `t` via the Bernstein form.
#[must_use]
pub fn bezier_point_at(p0: Point2, p1: Point2, p2: Point2, p3: Point2, t: f64) -> Point2 {
    let u = 1.0 - t;
    let b0 = u * u * u;
    let b1 = 3.0 * u * u * t;
    let b2 = 3.0 * u * t * t;
    let b3 = t * t * t;

    Point2::new(
        b0 * p0.x + b1 * p1.x + b2 * p2.x + b3 * p3.x,
        b0 * p0.y + b1 * p1.y + b2 * p2.y + b3 * p3.y,
    )
}

/// Flattens a cubic Bezier into [`BEZIER_SAMPLES`] points on a uniform
/// parameter grid, endpoints included.
#[must_use]
pub fn sample_bezier(p0: Point2, p1: Point2, p2: Point2, p3: Point2) -> Vec<Point2> {
    (0..BEZIER_SAMPLES)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64 / (BEZIER_SAMPLES - 1) as f64;
            bezier_point_at(p0, p1, p2, p3, t)
        })
        .collect()
}

/// Computes the default control points for a freshly committed curve wall.
///
/// Each control point sits 30% of the chord length along the chord from its
/// endpoint and is displaced perpendicular to the chord by half that amount,
/// which gives a gentle symmetric bow the user can then reshape.
///
/// A zero-length chord yields control points coincident with the endpoints.
#[must_use]
pub fn default_control_points(start: Point2, end: Point2) -> (Point2, Point2) {
    let chord: Vector2 = end - start;
    let len = chord.norm();
    if len < super::TOLERANCE {
        return (start, end);
    }

    let along = chord * 0.3;
    let perp = Vector2::new(-chord.y, chord.x) / len * (len * 0.3 * 0.5);

    (start + along + perp, end - along + perp)
}
