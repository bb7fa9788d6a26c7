//! Per-vertex miter offsets for closed wall centerlines.
//!
//! At each polygon vertex the two side faces of the wall meet; the vertex is
//! displaced along the bisector of the adjacent edge normals so the faces
//! join in a clean corner. The offset distance grows as the corner sharpens
//! and is clamped to bound miter spikes at acute corners.

use super::{Point2, Vector2, TOLERANCE};

/// Angle floor for the miter denominator: `sin(half_angle)` is never
/// evaluated below `sin(MIN_HALF_ANGLE)`, which keeps collinear and
/// doubled-back vertices finite.
pub const MIN_HALF_ANGLE: f64 = 0.1;

/// Miter displacement for one vertex of a closed centerline polygon.
#[derive(Debug, Clone, Copy)]
pub struct MiterVertex {
    /// Unit bisector of the adjacent edge normals, pointing to the outer
    /// side of the wall.
    pub bisector: Vector2,
    /// Displacement distance along the bisector, in
    /// `[half_thickness, 2 * half_thickness]`.
    pub offset: f64,
}

/// Computes the miter displacement at every vertex of a closed polygon.
///
/// Neighbors wrap around: vertex 0's previous neighbor is the last vertex.
/// Degenerate edges (zero length) fall back to a plain `half_thickness`
/// offset along whichever edge normal is available, so the result never
/// contains NaN.
#[must_use]
pub fn miter_offsets(points: &[Point2], half_thickness: f64) -> Vec<MiterVertex> {
    let n = points.len();
    let mut out = Vec::with_capacity(n);

    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let curr = points[i];
        let next = points[(i + 1) % n];

        let prev_dir = unit_or_none(curr - prev);
        let next_dir = unit_or_none(next - curr);

        let vertex = match (prev_dir, next_dir) {
            (Some(pd), Some(nd)) => miter_at(pd, nd, half_thickness),
            (Some(d), None) | (None, Some(d)) => MiterVertex {
                bisector: rotate90(d),
                offset: half_thickness,
            },
            (None, None) => MiterVertex {
                bisector: Vector2::new(0.0, 1.0),
                offset: half_thickness,
            },
        };
        out.push(vertex);
    }

    out
}

fn miter_at(prev_dir: Vector2, next_dir: Vector2, half_thickness: f64) -> MiterVertex {
    let prev_normal = rotate90(prev_dir);
    let next_normal = rotate90(next_dir);

    let sum = prev_normal + next_normal;
    let bisector = if sum.norm() < TOLERANCE {
        // Edges double back exactly: the normal sum cancels. Fall back to
        // the incoming edge normal; the offset clamp bounds the spike.
        prev_normal
    } else {
        sum.normalize()
    };

    // Interior angle between the two edges meeting at the vertex.
    let interior = (-prev_dir).dot(&next_dir).clamp(-1.0, 1.0).acos();
    let half_angle = (interior * 0.5).max(MIN_HALF_ANGLE);

    let offset = (half_thickness / half_angle.sin()).clamp(half_thickness, 2.0 * half_thickness);

    MiterVertex { bisector, offset }
}

/// Rotates a vector 90 degrees counter-clockwise.
#[must_use]
pub fn rotate90(v: Vector2) -> Vector2 {
    Vector2::new(-v.y, v.x)
}

fn unit_or_none(v: Vector2) -> Option<Vector2> {
    let len = v.norm();
    if len < TOLERANCE {
        None
    } else {
        Some(v / len)
    }
}
