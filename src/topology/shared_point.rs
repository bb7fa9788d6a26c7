use crate::math::Point2;

use super::WallId;

slotmap::new_key_type! {
    /// Unique identifier for a shared junction point.
    pub struct SharedPointId;
}

/// A junction point shared by one or more wall endpoints.
///
/// `connected` lists every `(wall, point index)` that sits at this
/// junction; the registry keeps those wall points in lockstep with
/// `position`. A shared point with an empty `connected` list has no reason
/// to exist and is removed by the registry.
#[derive(Debug, Clone)]
pub struct SharedPointData {
    /// Current junction position.
    pub position: Point2,
    /// Wall points attached to this junction.
    pub connected: Vec<(WallId, usize)>,
}

impl SharedPointData {
    /// Creates a new junction at the given position with no attachments.
    #[must_use]
    pub fn new(position: Point2) -> Self {
        Self {
            position,
            connected: Vec::new(),
        }
    }

    /// Adds an attachment; a no-op if the pair is already present.
    pub fn attach(&mut self, wall: WallId, index: usize) {
        if !self.connected.contains(&(wall, index)) {
            self.connected.push((wall, index));
        }
    }

    /// Removes an attachment, returning true if it was present.
    pub fn detach(&mut self, wall: WallId, index: usize) -> bool {
        let before = self.connected.len();
        self.connected.retain(|&pair| pair != (wall, index));
        self.connected.len() != before
    }
}
