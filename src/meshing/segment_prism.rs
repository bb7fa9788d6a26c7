//! Per-segment extrusion for open wall centerlines.
//!
//! Each centerline segment becomes an independent rectangular prism of
//! size thickness × height × segment length, aligned with the segment.
//! Adjacent prisms are not mitered together; the seam at a shared corner
//! is an accepted trade-off against full miter joins for open chains.

use crate::math::miter_2d::rotate90;
use crate::math::{Point2, Point3, Vector3, MIN_SEGMENT_LENGTH, TOLERANCE};

use super::{ExtrudeParams, TriangleMesh};

/// Builds one prism per centerline segment, skipping segments shorter
/// than [`MIN_SEGMENT_LENGTH`].
#[must_use]
pub fn build(points: &[Point2], params: ExtrudeParams) -> TriangleMesh {
    let mut mesh = TriangleMesh::default();
    for pair in points.windows(2) {
        if (pair[1] - pair[0]).norm() < MIN_SEGMENT_LENGTH {
            continue;
        }
        mesh.merge(&prism(pair[0], pair[1], params));
    }
    mesh
}

/// A box from `a` to `b`, thickness across the segment and `height` up:
/// 24 vertices (4 per face) so each face carries its own flat normal.
fn prism(a: Point2, b: Point2, params: ExtrudeParams) -> TriangleMesh {
    let dir = b - a;
    let len = dir.norm();
    let mut mesh = TriangleMesh::default();
    if len < TOLERANCE {
        return mesh;
    }
    let dir = dir / len;
    let side = rotate90(dir) * params.half_thickness;
    let h = params.height;

    // Footprint corners: c0/c1 on the left of travel, c3/c2 on the right.
    let c0 = a + side;
    let c1 = b + side;
    let c2 = b - side;
    let c3 = a - side;

    let lift = |p: Point2, z: f64| Point3::new(p.x, p.y, z);
    // `dir` is unit length, so its rotation is already a unit normal.
    let side_n = Vector3::new(-dir.y, dir.x, 0.0);
    let dir_n = Vector3::new(dir.x, dir.y, 0.0);

    push_quad(
        &mut mesh,
        [lift(c3, h), lift(c2, h), lift(c1, h), lift(c0, h)],
        Vector3::z(),
    );
    push_quad(
        &mut mesh,
        [lift(c0, 0.0), lift(c1, 0.0), lift(c2, 0.0), lift(c3, 0.0)],
        -Vector3::z(),
    );
    push_quad(
        &mut mesh,
        [lift(c1, 0.0), lift(c0, 0.0), lift(c0, h), lift(c1, h)],
        side_n,
    );
    push_quad(
        &mut mesh,
        [lift(c3, 0.0), lift(c2, 0.0), lift(c2, h), lift(c3, h)],
        -side_n,
    );
    push_quad(
        &mut mesh,
        [lift(c2, 0.0), lift(c1, 0.0), lift(c1, h), lift(c2, h)],
        dir_n,
    );
    push_quad(
        &mut mesh,
        [lift(c0, 0.0), lift(c3, 0.0), lift(c3, h), lift(c0, h)],
        -dir_n,
    );

    mesh
}

fn push_quad(mesh: &mut TriangleMesh, corners: [Point3; 4], normal: Vector3) {
    #[allow(clippy::cast_possible_truncation)]
    let base = mesh.vertices.len() as u32;
    mesh.vertices.extend_from_slice(&corners);
    mesh.normals.extend_from_slice(&[normal; 4]);
    mesh.indices.push([base, base + 1, base + 2]);
    mesh.indices.push([base, base + 2, base + 3]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ExtrudeParams {
        ExtrudeParams {
            half_thickness: 5.0,
            height: 100.0,
        }
    }

    #[test]
    fn one_prism_per_long_segment() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(100.0, 0.0),
            Point2::new(100.0, 100.0),
        ];
        let mesh = build(&pts, params());
        assert_eq!(mesh.vertices.len(), 2 * 24);
        assert_eq!(mesh.indices.len(), 2 * 12);
        assert!(!mesh.has_non_finite());
    }

    #[test]
    fn short_segments_are_skipped() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 0.0), // under the 5-unit minimum
            Point2::new(100.0, 0.0),
        ];
        let mesh = build(&pts, params());
        assert_eq!(mesh.vertices.len(), 24);
    }

    #[test]
    fn prism_spans_thickness_and_height() {
        let mesh = build(
            &[Point2::new(0.0, 0.0), Point2::new(100.0, 0.0)],
            params(),
        );
        let min_y = mesh.vertices.iter().map(|v| v.y).fold(f64::INFINITY, f64::min);
        let max_y = mesh.vertices.iter().map(|v| v.y).fold(f64::NEG_INFINITY, f64::max);
        let max_z = mesh.vertices.iter().map(|v| v.z).fold(f64::NEG_INFINITY, f64::max);
        assert!((min_y + 5.0).abs() < 1e-12);
        assert!((max_y - 5.0).abs() < 1e-12);
        assert!((max_z - 100.0).abs() < 1e-12);
    }

    #[test]
    fn every_face_winds_with_its_normal() {
        let mesh = build(
            &[Point2::new(0.0, 0.0), Point2::new(30.0, 40.0)],
            params(),
        );
        for tri in &mesh.indices {
            let [a, b, c] = tri.map(|i| mesh.vertices[i as usize]);
            let winding = (b - a).cross(&(c - a));
            let declared = mesh.normals[tri[0] as usize];
            assert!(
                winding.dot(&declared) > 0.0,
                "triangle {tri:?} winds against its normal {declared:?}"
            );
        }
    }

    #[test]
    fn single_point_yields_empty_mesh() {
        let mesh = build(&[Point2::new(0.0, 0.0)], params());
        assert!(mesh.vertices.is_empty());
    }
}
