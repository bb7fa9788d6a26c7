pub mod shared_point;
pub mod wall;

pub use shared_point::{SharedPointData, SharedPointId};
pub use wall::{WallData, WallId, WallKind, WallStyle};

use tracing::{debug, trace};

use crate::error::TopologyError;
use crate::math::Point2;
use slotmap::SlotMap;

/// Outcome of running the endpoint merge protocol for one wall endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointMerge {
    /// The endpoint snapped onto an existing junction.
    Joined(SharedPointId),
    /// A new junction was created binding this endpoint to another wall's
    /// free endpoint.
    Created(SharedPointId),
    /// No junction within range; the endpoint stays free.
    Free,
}

/// Central arena that owns all walls and shared junction points.
///
/// Walls reference junctions via typed IDs (generational indices); the
/// store is the single writer of both sides of that relation, so every
/// `&mut self` method leaves the cross-references consistent before it
/// returns. That completion boundary is what makes junction moves atomic
/// with respect to the host's render pass.
#[derive(Debug, Default)]
pub struct PlanStore {
    walls: SlotMap<WallId, WallData>,
    points: SlotMap<SharedPointId, SharedPointData>,
    /// Walls in the order they were committed, for draw submission.
    wall_order: Vec<WallId>,
}

impl PlanStore {
    /// Creates a new, empty plan store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Wall operations ---

    /// Inserts a wall and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::CoincidentEndpoints`] if the wall has no
    /// spatial extent (all points coincide).
    pub fn add_wall(&mut self, data: WallData) -> Result<WallId, TopologyError> {
        if data.is_degenerate() {
            return Err(TopologyError::CoincidentEndpoints);
        }
        let id = self.walls.insert(data);
        self.wall_order.push(id);
        debug!(?id, "wall added");
        Ok(id)
    }

    /// Returns a reference to the wall data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn wall(&self, id: WallId) -> Result<&WallData, TopologyError> {
        self.walls
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("wall".into()))
    }

    /// Returns a mutable reference to the wall data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn wall_mut(&mut self, id: WallId) -> Result<&mut WallData, TopologyError> {
        self.walls
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("wall".into()))
    }

    /// Returns true if the wall exists.
    #[must_use]
    pub fn contains_wall(&self, id: WallId) -> bool {
        self.walls.contains_key(id)
    }

    /// Iterates all walls in commit order.
    pub fn walls(&self) -> impl Iterator<Item = (WallId, &WallData)> {
        self.wall_order
            .iter()
            .filter_map(|&id| self.walls.get(id).map(|w| (id, w)))
    }

    /// Number of walls in the store.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    /// Removes a wall, detaching every junction reference it holds first
    /// so the registry invariant survives the removal.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not found.
    pub fn remove_wall(&mut self, id: WallId) -> Result<(), TopologyError> {
        if !self.walls.contains_key(id) {
            return Err(TopologyError::EntityNotFound("wall".into()));
        }

        let ids: Vec<(usize, SharedPointId)> = self.walls[id]
            .point_ids
            .iter()
            .enumerate()
            .filter_map(|(i, pid)| pid.map(|p| (i, p)))
            .collect();
        for (index, pid) in ids {
            self.detach(pid, id, index);
        }

        self.wall_order.retain(|&w| w != id);
        self.walls.remove(id);
        debug!(?id, "wall removed");
        Ok(())
    }

    /// Whether the wall's centerline forms a closed loop: first/last points
    /// geometrically coincident, or first/last bound to the same live
    /// junction.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not found.
    pub fn is_closed(&self, id: WallId) -> Result<bool, TopologyError> {
        let wall = self.wall(id)?;
        if wall.is_loop_geometric() {
            return Ok(true);
        }
        let (Some(&first), Some(&last)) = (wall.point_ids.first(), wall.point_ids.last()) else {
            return Ok(false);
        };
        match (first, last) {
            (Some(a), Some(b)) => {
                Ok(a == b && wall.points.len() > 2 && self.points.contains_key(a))
            }
            _ => Ok(false),
        }
    }

    // --- Junction (shared point) operations ---

    /// Allocates a new junction with no attachments.
    pub fn create_shared_point(&mut self, position: Point2) -> SharedPointId {
        let id = self.points.insert(SharedPointData::new(position));
        trace!(?id, x = position.x, y = position.y, "shared point created");
        id
    }

    /// Returns a reference to the junction data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn shared_point(&self, id: SharedPointId) -> Result<&SharedPointData, TopologyError> {
        self.points
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("shared point".into()))
    }

    /// Returns true if the junction exists.
    #[must_use]
    pub fn contains_shared_point(&self, id: SharedPointId) -> bool {
        self.points.contains_key(id)
    }

    /// Number of junctions in the store.
    #[must_use]
    pub fn shared_point_count(&self) -> usize {
        self.points.len()
    }

    /// Linear scan for the first junction within `threshold` of `p`.
    ///
    /// O(n) over junctions; acceptable at floor-plan scale, and the single
    /// place a spatial index would slot in for very large plans.
    #[must_use]
    pub fn find_nearby_shared_point(&self, p: Point2, threshold: f64) -> Option<SharedPointId> {
        self.points
            .iter()
            .find(|(_, sp)| (sp.position - p).norm() <= threshold)
            .map(|(id, _)| id)
    }

    /// Attaches a wall point to a junction (idempotent) and records the
    /// junction on the wall's parallel `point_ids` vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the junction or wall is not found, or the index
    /// is out of range.
    pub fn attach(
        &mut self,
        point_id: SharedPointId,
        wall: WallId,
        index: usize,
    ) -> Result<(), TopologyError> {
        if !self.points.contains_key(point_id) {
            return Err(TopologyError::EntityNotFound("shared point".into()));
        }
        let wall_data = self.wall_mut(wall)?;
        let Some(entry) = wall_data.point_ids.get_mut(index) else {
            return Err(TopologyError::InvalidTopology(format!(
                "point index {index} out of range"
            )));
        };
        *entry = Some(point_id);
        self.points[point_id].attach(wall, index);
        trace!(?point_id, ?wall, index, "endpoint attached");
        Ok(())
    }

    /// Detaches a wall point from a junction. Removes the junction when its
    /// last attachment goes. Unknown ids are a no-op — detaching is part of
    /// teardown paths that must not fail.
    pub fn detach(&mut self, point_id: SharedPointId, wall: WallId, index: usize) {
        let Some(sp) = self.points.get_mut(point_id) else {
            return;
        };
        sp.detach(wall, index);
        let empty = sp.connected.is_empty();

        if let Some(wall_data) = self.walls.get_mut(wall) {
            if let Some(entry) = wall_data.point_ids.get_mut(index) {
                if *entry == Some(point_id) {
                    *entry = None;
                }
            }
        }

        if empty {
            self.points.remove(point_id);
            trace!(?point_id, "shared point removed (last detach)");
        }
    }

    /// Moves a junction and propagates the new position to every attached
    /// wall point in the same call. Stale attachments (removed wall, out of
    /// range index) are pruned rather than propagated.
    ///
    /// # Errors
    ///
    /// Returns an error if the junction is not found.
    pub fn move_shared_point(
        &mut self,
        id: SharedPointId,
        position: Point2,
    ) -> Result<(), TopologyError> {
        let sp = self
            .points
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("shared point".into()))?;
        sp.position = position;
        let connected = sp.connected.clone();

        let mut live = Vec::with_capacity(connected.len());
        for (wall, index) in connected {
            match self.walls.get_mut(wall) {
                Some(wall_data) if index < wall_data.points.len() => {
                    wall_data.points[index] = position;
                    live.push((wall, index));
                }
                _ => {}
            }
        }
        self.points[id].connected = live;

        trace!(?id, x = position.x, y = position.y, "shared point moved");
        Ok(())
    }

    /// Moves one wall point, routing through the junction when the point
    /// is attached so every connected wall follows. A `point_ids` entry
    /// whose junction no longer exists is treated as absent and cleared.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not found or the index is out of
    /// range.
    pub fn move_wall_point(
        &mut self,
        wall: WallId,
        index: usize,
        position: Point2,
    ) -> Result<(), TopologyError> {
        let wall_data = self.wall_mut(wall)?;
        if index >= wall_data.points.len() {
            return Err(TopologyError::InvalidTopology(format!(
                "point index {index} out of range"
            )));
        }

        let entry = wall_data.point_ids[index];
        match entry {
            Some(pid) if self.points.contains_key(pid) => self.move_shared_point(pid, position),
            stale => {
                if stale.is_some() {
                    self.walls[wall].point_ids[index] = None;
                }
                self.walls[wall].points[index] = position;
                Ok(())
            }
        }
    }

    // --- Endpoint merge protocol ---

    /// Where an endpoint at `p` would land after snapping: the position of
    /// a junction or free endpoint within `threshold` world units, else
    /// `p`. Read-only counterpart of [`Self::merge_endpoint`], used for
    /// authoring previews. Callers working in screen space divide
    /// [`crate::math::MERGE_THRESHOLD`] by their zoom scale.
    #[must_use]
    pub fn snap_position(&self, p: Point2, exclude: Option<WallId>, threshold: f64) -> Point2 {
        if let Some(id) = self.find_nearby_shared_point(p, threshold) {
            return self.points[id].position;
        }
        if let Some((_, _, pos)) = self.find_nearby_free_endpoint(p, exclude, threshold) {
            return pos;
        }
        p
    }

    /// Runs the merge protocol for one committed wall endpoint:
    ///
    /// 1. a junction within `threshold` world units → attach, snap the
    ///    endpoint to the junction's authoritative position;
    /// 2. another wall's free endpoint within range → create a junction at
    ///    that endpoint's position and attach both;
    /// 3. otherwise the endpoint stays free.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not found or the index is out of
    /// range.
    pub fn merge_endpoint(
        &mut self,
        wall: WallId,
        index: usize,
        threshold: f64,
    ) -> Result<EndpointMerge, TopologyError> {
        let wall_data = self.wall(wall)?;
        let Some(&p) = wall_data.points.get(index) else {
            return Err(TopologyError::InvalidTopology(format!(
                "point index {index} out of range"
            )));
        };

        if let Some(id) = self.find_nearby_shared_point(p, threshold) {
            // Snap to the junction's stored position, not the click point.
            let snapped = self.points[id].position;
            self.attach(id, wall, index)?;
            self.walls[wall].points[index] = snapped;
            debug!(?wall, index, ?id, "endpoint joined junction");
            return Ok(EndpointMerge::Joined(id));
        }

        if let Some((other_wall, other_index, pos)) =
            self.find_nearby_free_endpoint(p, Some(wall), threshold)
        {
            let id = self.create_shared_point(pos);
            self.attach(id, other_wall, other_index)?;
            self.attach(id, wall, index)?;
            self.walls[wall].points[index] = pos;
            debug!(?wall, index, ?other_wall, other_index, ?id, "junction created");
            return Ok(EndpointMerge::Created(id));
        }

        Ok(EndpointMerge::Free)
    }

    /// Scans other walls' raw endpoints for a free one within `threshold`
    /// of `p`.
    fn find_nearby_free_endpoint(
        &self,
        p: Point2,
        exclude: Option<WallId>,
        threshold: f64,
    ) -> Option<(WallId, usize, Point2)> {
        for (id, wall) in self.walls() {
            if Some(id) == exclude {
                continue;
            }
            let Some((first, last)) = wall.endpoint_indices() else {
                continue;
            };
            for index in [first, last] {
                if wall.point_ids[index].is_some() {
                    continue;
                }
                let q = wall.points[index];
                if (q - p).norm() <= threshold {
                    return Some((id, index, q));
                }
            }
        }
        None
    }
}
