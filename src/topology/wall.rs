use crate::math::bezier_2d::sample_bezier;
use crate::math::{Point2, CLOSE_TOLERANCE, TOLERANCE};

use super::SharedPointId;

slotmap::new_key_type! {
    /// Unique identifier for a wall in the plan store.
    pub struct WallId;
}

/// Centerline interpretation of a wall's point sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallKind {
    /// Points form a polyline (≥ 2 points).
    Straight,
    /// Points form cubic Bezier segments, one `[start, ctrl1, ctrl2, end]`
    /// group of 4 per segment.
    Curved,
}

/// Rendering style carried by each wall.
#[derive(Debug, Clone, PartialEq)]
pub struct WallStyle {
    /// Wall thickness in plan units (full width of the extruded solid).
    pub thickness: f64,
    /// 2D stroke width used by the plan view.
    pub width: f64,
    /// Extrusion height of the 3D solid.
    pub height: f64,
    /// RGB color, each channel in `[0, 1]`.
    pub color: [f32; 3],
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Default for WallStyle {
    fn default() -> Self {
        Self {
            thickness: 10.0,
            width: 2.0,
            height: 100.0,
            color: [0.78, 0.76, 0.72],
            opacity: 1.0,
        }
    }
}

/// Data associated with a wall.
///
/// `point_ids` runs parallel to `points`: entry `i` names the shared
/// junction point that owns `points[i]`, or `None` for a free point. All
/// mutators keep the two vectors the same length.
#[derive(Debug, Clone)]
pub struct WallData {
    pub kind: WallKind,
    pub points: Vec<Point2>,
    pub point_ids: Vec<Option<SharedPointId>>,
    pub style: WallStyle,
    /// True once the authoring interaction committed the wall.
    pub completed: bool,
}

impl WallData {
    /// Creates a new, empty in-progress wall.
    #[must_use]
    pub fn new(kind: WallKind, style: WallStyle) -> Self {
        Self {
            kind,
            points: Vec::new(),
            point_ids: Vec::new(),
            style,
            completed: false,
        }
    }

    /// Appends a centerline point, padding `point_ids` to stay aligned.
    pub fn push_point(&mut self, p: Point2) {
        self.points.push(p);
        self.point_ids.push(None);
    }

    /// Returns the indices of the two endpoints, or `None` for walls with
    /// fewer than 2 points.
    #[must_use]
    pub fn endpoint_indices(&self) -> Option<(usize, usize)> {
        if self.points.len() < 2 {
            None
        } else {
            Some((0, self.points.len() - 1))
        }
    }

    /// Returns true when every point coincides with the first, i.e. the
    /// wall has no spatial extent.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        match self.points.first() {
            None => true,
            Some(first) => self
                .points
                .iter()
                .all(|p| (p - first).norm() < TOLERANCE),
        }
    }

    /// Geometric half of the closed-wall classification: first and last
    /// centerline points within [`CLOSE_TOLERANCE`] of each other.
    #[must_use]
    pub fn is_loop_geometric(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(a), Some(b)) if self.points.len() >= 3 => (a - b).norm() <= CLOSE_TOLERANCE,
            _ => false,
        }
    }

    /// Expands the stored points into a flat centerline polyline.
    ///
    /// Straight walls return their points as-is. Curved walls flatten each
    /// 4-point Bezier group on the kernel's uniform sample grid, deduping
    /// the shared endpoint between consecutive groups. A trailing partial
    /// group (possible mid-authoring) is passed through untouched.
    #[must_use]
    pub fn centerline(&self) -> Vec<Point2> {
        match self.kind {
            WallKind::Straight => self.points.clone(),
            WallKind::Curved => {
                let mut out: Vec<Point2> = Vec::new();
                let mut i = 0;
                while i + 4 <= self.points.len() {
                    let samples = sample_bezier(
                        self.points[i],
                        self.points[i + 1],
                        self.points[i + 2],
                        self.points[i + 3],
                    );
                    let skip = usize::from(!out.is_empty());
                    out.extend(samples.into_iter().skip(skip));
                    i += 4;
                }
                out.extend(self.points[i..].iter().copied());
                out
            }
        }
    }

    /// Iterates the wall's Bezier groups as `(start_index, [p0, p1, p2, p3])`.
    /// Empty for straight walls.
    pub fn curve_groups(&self) -> impl Iterator<Item = (usize, [Point2; 4])> + '_ {
        let take = if self.kind == WallKind::Curved {
            self.points.len() / 4
        } else {
            0
        };
        (0..take).map(move |g| {
            let i = g * 4;
            (
                i,
                [
                    self.points[i],
                    self.points[i + 1],
                    self.points[i + 2],
                    self.points[i + 3],
                ],
            )
        })
    }
}
