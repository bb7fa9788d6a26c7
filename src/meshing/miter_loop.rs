//! Unified miter mesh for closed wall centerlines.
//!
//! A closed loop of N centerline points becomes exactly 4N vertices: at
//! each point, outer and inner positions are displaced along the miter
//! bisector, each at floor level and at the extrusion height. Side faces
//! stitch consecutive points; caps are triangle fans anchored at point 0.
//!
//! The fan caps are correct only when the polygon is star-shaped with
//! respect to its first vertex; strongly concave rooms can produce cap
//! triangles that leave the footprint. A general triangulation is out of
//! scope here.

use crate::math::miter_2d::miter_offsets;
use crate::math::{Point2, Point3, Vector3, CLOSE_TOLERANCE};

use super::{ExtrudeParams, TriangleMesh};

/// Builds the unified miter mesh for a closed centerline polygon.
///
/// A duplicated closing point (last within [`CLOSE_TOLERANCE`] of first)
/// is dropped so the loop is represented once.
#[must_use]
pub fn build(points: &[Point2], params: ExtrudeParams) -> TriangleMesh {
    let mut loop_points = points;
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        if points.len() > 3 && (first - last).norm() <= CLOSE_TOLERANCE {
            loop_points = &points[..points.len() - 1];
        }
    }

    let n = loop_points.len();
    let mut mesh = TriangleMesh::default();
    if n < 3 {
        return mesh;
    }

    let miters = miter_offsets(loop_points, params.half_thickness);

    // Vertex layout per point i:
    //   4i     outer bottom
    //   4i + 1 outer top
    //   4i + 2 inner bottom
    //   4i + 3 inner top
    for (p, m) in loop_points.iter().zip(&miters) {
        let outer = p + m.bisector * m.offset;
        let inner = p - m.bisector * m.offset;
        let out_n = Vector3::new(m.bisector.x, m.bisector.y, 0.0);

        mesh.vertices.push(Point3::new(outer.x, outer.y, 0.0));
        mesh.vertices.push(Point3::new(outer.x, outer.y, params.height));
        mesh.vertices.push(Point3::new(inner.x, inner.y, 0.0));
        mesh.vertices.push(Point3::new(inner.x, inner.y, params.height));

        mesh.normals.push(out_n);
        mesh.normals.push(out_n);
        mesh.normals.push(-out_n);
        mesh.normals.push(-out_n);
    }

    #[allow(clippy::cast_possible_truncation)]
    let idx = |point: usize, corner: u32| (point * 4) as u32 + corner;

    // Side faces: one outer and one inner quad per edge, inner winding
    // reversed so both faces look away from the wall body.
    for i in 0..n {
        let j = (i + 1) % n;

        mesh.indices.push([idx(i, 0), idx(j, 0), idx(j, 1)]);
        mesh.indices.push([idx(i, 0), idx(j, 1), idx(i, 1)]);

        mesh.indices.push([idx(i, 2), idx(j, 3), idx(j, 2)]);
        mesh.indices.push([idx(i, 2), idx(i, 3), idx(j, 3)]);
    }

    // Cap fans anchored at point 0, over the outer and inner rings, top
    // and bottom. Star-shaped assumption (see module docs).
    for k in 1..n - 1 {
        // Top: outer fan up, inner fan reversed.
        mesh.indices.push([idx(0, 1), idx(k, 1), idx(k + 1, 1)]);
        mesh.indices.push([idx(0, 3), idx(k + 1, 3), idx(k, 3)]);
        // Bottom: opposite winding so the faces point down.
        mesh.indices.push([idx(0, 0), idx(k + 1, 0), idx(k, 0)]);
        mesh.indices.push([idx(0, 2), idx(k, 2), idx(k + 1, 2)]);
    }

    mesh
}
