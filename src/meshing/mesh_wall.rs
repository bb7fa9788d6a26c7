use crate::error::{MeshError, Result};
use crate::topology::{PlanStore, WallId};

use super::{miter_loop, segment_prism, ExtrudeParams, TriangleMesh};

/// Compiles a completed wall into a 3D triangle mesh.
///
/// Closed walls get the unified miter mesh; open walls get one prism per
/// centerline segment. Curved walls are flattened to their sampled
/// centerline first, so both paths see plain polylines.
#[derive(Debug)]
pub struct MeshWall {
    wall: WallId,
    params: Option<ExtrudeParams>,
}

impl MeshWall {
    /// Creates a new `MeshWall` operation deriving extrusion parameters
    /// from the wall's style.
    #[must_use]
    pub fn new(wall: WallId) -> Self {
        Self { wall, params: None }
    }

    /// Overrides the style-derived extrusion parameters.
    #[must_use]
    pub fn with_params(mut self, params: ExtrudeParams) -> Self {
        self.params = Some(params);
        self
    }

    /// Executes the compilation.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not found, is not completed, or has
    /// a non-positive thickness or height.
    pub fn execute(&self, store: &PlanStore) -> Result<TriangleMesh> {
        let wall = store.wall(self.wall)?;
        if !wall.completed {
            return Err(MeshError::WallNotCompleted.into());
        }

        let params = match self.params {
            Some(p) => p,
            None => ExtrudeParams::from_style(&wall.style)?,
        };

        let centerline = wall.centerline();
        let mesh = if store.is_closed(self.wall)? {
            miter_loop::build(&centerline, params)
        } else {
            segment_prism::build(&centerline, params)
        };
        Ok(mesh)
    }
}
