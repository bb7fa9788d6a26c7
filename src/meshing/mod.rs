mod mesh_wall;
mod miter_loop;
mod segment_prism;

pub use mesh_wall::MeshWall;

use crate::error::MeshError;
use crate::math::{Point3, Vector3};
use crate::topology::WallStyle;

/// Parameters for extruding a wall centerline into a solid.
#[derive(Debug, Clone, Copy)]
pub struct ExtrudeParams {
    /// Half of the wall thickness; side faces sit this far from the
    /// centerline before mitering.
    pub half_thickness: f64,
    /// Extrusion height along the vertical axis.
    pub height: f64,
}

impl ExtrudeParams {
    /// Derives extrusion parameters from a wall's style.
    ///
    /// # Errors
    ///
    /// Returns an error if thickness or height is not strictly positive.
    pub fn from_style(style: &WallStyle) -> Result<Self, MeshError> {
        if style.thickness <= 0.0 || style.height <= 0.0 {
            return Err(MeshError::InvalidParameters(format!(
                "thickness {} and height {} must be positive",
                style.thickness, style.height
            )));
        }
        Ok(Self {
            half_thickness: style.thickness * 0.5,
            height: style.height,
        })
    }
}

/// A triangle mesh in plan space: XY is the floor plane, Z is up.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Per-vertex normals, parallel to `vertices`.
    pub normals: Vec<Vector3>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Appends another mesh, re-basing its indices.
    pub fn merge(&mut self, other: &Self) {
        #[allow(clippy::cast_possible_truncation)]
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.indices
            .extend(other.indices.iter().map(|t| t.map(|i| i + base)));
    }

    /// True when any vertex coordinate or normal component is not finite.
    #[must_use]
    pub fn has_non_finite(&self) -> bool {
        self.vertices
            .iter()
            .any(|v| !(v.x.is_finite() && v.y.is_finite() && v.z.is_finite()))
            || self
                .normals
                .iter()
                .any(|n| !(n.x.is_finite() && n.y.is_finite() && n.z.is_finite()))
    }
}
