pub mod events;

pub use events::{Key, Modifiers, PointerEvent};

use tracing::debug;

use crate::error::{Result, TopologyError};
use crate::math::bezier_2d::default_control_points;
use crate::math::{Point2, Vector2, MERGE_THRESHOLD};
use crate::query::{HitTarget, HitTest};
use crate::topology::{PlanStore, WallData, WallId, WallKind, WallStyle};

/// The active authoring tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Select,
    StraightWall,
    CurvedWall,
}

/// Tagged interaction state of the authoring session.
///
/// Every transition is explicit; `Escape` collapses any state back to
/// `Idle` without leaving partial walls, drags, or marquees behind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuthoringState {
    Idle,
    /// First click of a straight wall placed; awaiting the second.
    DrawingLine { start: Point2 },
    /// First click of a curve placed; awaiting the end click.
    DrawingCurve { start: Point2 },
    /// A wall was just committed; its endpoint is the next start, so a
    /// single click extends the run.
    ConnectingChain { start: Point2 },
    /// A completed curve is open for control-point editing; `control` is
    /// the point index being dragged, if any.
    EditingCurveControl {
        wall: WallId,
        control: Option<usize>,
    },
    /// Marquee selection in progress.
    Selecting { anchor: Point2, corner: Point2 },
}

/// Non-fatal warnings surfaced to the host instead of errors; continuous
/// interaction treats "do nothing" as the failure mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// A wall commit was rejected because its endpoints coincide.
    CoincidentEndpointsRejected,
}

/// Dashed-preview geometry for the host renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Preview {
    Line { start: Point2, end: Point2 },
    Curve { points: [Point2; 4] },
}

/// Interprets pointer and keyboard events into plan-store mutations.
///
/// The session holds only transient interaction state; the [`PlanStore`]
/// passed into each event handler is the single authoritative store, and
/// every handler finishes its full mutation before returning, which is
/// what keeps multi-wall junction updates tear-free for the renderer.
#[derive(Debug)]
pub struct AuthoringSession {
    tool: Tool,
    state: AuthoringState,
    cursor: Point2,
    hover: Option<HitTarget>,
    selected_walls: Vec<WallId>,
    selected_endpoint: Option<(WallId, usize)>,
    dragging_endpoint: Option<(WallId, usize)>,
    style: WallStyle,
    zoom: f64,
    feedback: Vec<Feedback>,
}

impl Default for AuthoringSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthoringSession {
    /// Creates an idle session with the select tool armed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tool: Tool::Select,
            state: AuthoringState::Idle,
            cursor: Point2::origin(),
            hover: None,
            selected_walls: Vec::new(),
            selected_endpoint: None,
            dragging_endpoint: None,
            style: WallStyle::default(),
            zoom: 1.0,
            feedback: Vec::new(),
        }
    }

    // --- Accessors for the host ---

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.tool
    }

    #[must_use]
    pub fn state(&self) -> AuthoringState {
        self.state
    }

    #[must_use]
    pub fn hover(&self) -> Option<HitTarget> {
        self.hover
    }

    #[must_use]
    pub fn selected_walls(&self) -> &[WallId] {
        &self.selected_walls
    }

    #[must_use]
    pub fn selected_endpoint(&self) -> Option<(WallId, usize)> {
        self.selected_endpoint
    }

    /// Style applied to newly committed walls.
    #[must_use]
    pub fn style(&self) -> &WallStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: WallStyle) {
        self.style = style;
    }

    /// Current zoom scale, used to keep hit radii constant in screen space.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom > 0.0 {
            self.zoom = zoom;
        }
    }

    /// Drains warnings accumulated since the last call.
    pub fn take_feedback(&mut self) -> Vec<Feedback> {
        std::mem::take(&mut self.feedback)
    }

    /// Dashed-preview geometry for the current in-progress wall, with the
    /// floating end snapped the same way a commit would snap it.
    #[must_use]
    pub fn preview(&self, store: &PlanStore) -> Option<Preview> {
        let start = match self.state {
            AuthoringState::DrawingLine { start }
            | AuthoringState::DrawingCurve { start }
            | AuthoringState::ConnectingChain { start } => start,
            _ => return None,
        };
        let end = store.snap_position(self.cursor, None, self.snap_radius());
        match self.tool {
            Tool::StraightWall => Some(Preview::Line { start, end }),
            Tool::CurvedWall => {
                let (c1, c2) = default_control_points(start, end);
                Some(Preview::Curve {
                    points: [start, c1, c2, end],
                })
            }
            Tool::Select => None,
        }
    }

    /// Marquee rectangle while a drag-select is in progress.
    #[must_use]
    pub fn marquee(&self) -> Option<(Point2, Point2)> {
        match self.state {
            AuthoringState::Selecting { anchor, corner } => Some((anchor, corner)),
            _ => None,
        }
    }

    // --- Transitions ---

    /// Switches tools, discarding any in-progress interaction.
    pub fn set_tool(&mut self, tool: Tool) {
        debug!(?tool, "tool selected");
        self.tool = tool;
        self.state = AuthoringState::Idle;
        self.dragging_endpoint = None;
    }

    /// Handles a pointer-down event.
    ///
    /// # Errors
    ///
    /// Returns an error only on store inconsistencies (unknown ids);
    /// ordinary geometric rejections surface as [`Feedback`].
    pub fn pointer_down(&mut self, store: &mut PlanStore, event: PointerEvent) -> Result<()> {
        let p = event.position;
        self.cursor = p;

        match self.tool {
            Tool::StraightWall | Tool::CurvedWall => self.draw_click(store, p),
            Tool::Select => {
                self.select_click(store, event);
                Ok(())
            }
        }
    }

    /// Handles pointer movement: endpoint and control drags, marquee
    /// growth, hover tracking.
    ///
    /// # Errors
    ///
    /// Returns an error on store inconsistencies during a drag.
    pub fn pointer_move(&mut self, store: &mut PlanStore, event: PointerEvent) -> Result<()> {
        let p = event.position;
        self.cursor = p;

        if let Some((wall, index)) = self.dragging_endpoint {
            store.move_wall_point(wall, index, p)?;
        } else if let AuthoringState::EditingCurveControl {
            wall,
            control: Some(index),
        } = self.state
        {
            // Control points are never shared; mutate the owning wall only.
            let wall_data = store.wall_mut(wall)?;
            if index < wall_data.points.len() {
                wall_data.points[index] = p;
            }
        } else if let AuthoringState::Selecting { anchor, .. } = self.state {
            self.state = AuthoringState::Selecting { anchor, corner: p };
        }

        self.hover = HitTest::new(p, self.zoom).hover_endpoint(store);
        Ok(())
    }

    /// Handles pointer-up: finishes drags and marquee selection.
    pub fn pointer_up(&mut self, store: &PlanStore, event: PointerEvent) {
        self.dragging_endpoint = None;

        match self.state {
            AuthoringState::EditingCurveControl { wall, control } => {
                if control.is_some() {
                    // Drag finished; the wall stays selected for further
                    // edits but the machine returns to idle.
                    self.state = AuthoringState::Idle;
                    self.selected_walls = vec![wall];
                }
            }
            AuthoringState::Selecting { anchor, .. } => {
                self.finish_marquee(store, anchor, event.position, event.modifiers);
                self.state = AuthoringState::Idle;
            }
            _ => {}
        }
    }

    /// Handles a double-click: opens a completed curved wall for
    /// control-point editing.
    pub fn double_click(&mut self, store: &PlanStore, event: PointerEvent) {
        let hit = HitTest::new(event.position, self.zoom).execute(store);
        let wall_id = match hit {
            Some(
                HitTarget::WallBody { wall, .. } | HitTarget::Endpoint { wall, index: _ },
            ) => wall,
            _ => return,
        };
        let Ok(wall) = store.wall(wall_id) else {
            return;
        };
        if wall.kind == WallKind::Curved && wall.completed {
            debug!(?wall_id, "editing curve controls");
            self.state = AuthoringState::EditingCurveControl {
                wall: wall_id,
                control: None,
            };
            self.selected_walls = vec![wall_id];
            self.selected_endpoint = None;
        }
    }

    /// Handles a key press.
    ///
    /// # Errors
    ///
    /// Returns an error on store inconsistencies during a nudge or commit.
    pub fn key(&mut self, store: &mut PlanStore, key: Key, modifiers: Modifiers) -> Result<()> {
        match key {
            Key::Escape => self.panic_reset(),
            Key::Enter => {
                // Commit the in-progress wall at the cursor, then stop
                // chaining.
                if matches!(
                    self.state,
                    AuthoringState::DrawingLine { .. }
                        | AuthoringState::DrawingCurve { .. }
                        | AuthoringState::ConnectingChain { .. }
                ) {
                    self.draw_click(store, self.cursor)?;
                    self.state = AuthoringState::Idle;
                }
            }
            Key::Delete | Key::Backspace => self.delete_selection(store),
            Key::ArrowLeft | Key::ArrowRight | Key::ArrowUp | Key::ArrowDown => {
                self.nudge(store, key, modifiers)?;
            }
        }
        Ok(())
    }

    /// Endpoint snap radius in world units: constant in screen space, so
    /// it shrinks as the user zooms in, like the hit-test radii.
    fn snap_radius(&self) -> f64 {
        MERGE_THRESHOLD / self.zoom
    }

    /// The universal panic transition: back to idle, nothing dangling.
    fn panic_reset(&mut self) {
        debug!("authoring reset");
        self.state = AuthoringState::Idle;
        self.dragging_endpoint = None;
        self.hover = None;
        self.selected_walls.clear();
        self.selected_endpoint = None;
    }

    // --- Drawing ---

    fn draw_click(&mut self, store: &mut PlanStore, p: Point2) -> Result<()> {
        match self.state {
            AuthoringState::Idle | AuthoringState::EditingCurveControl { .. } => {
                let start = store.snap_position(p, None, self.snap_radius());
                self.state = match self.tool {
                    Tool::CurvedWall => AuthoringState::DrawingCurve { start },
                    _ => AuthoringState::DrawingLine { start },
                };
                debug!(x = start.x, y = start.y, "wall started");
                Ok(())
            }
            AuthoringState::DrawingLine { start }
            | AuthoringState::DrawingCurve { start }
            | AuthoringState::ConnectingChain { start } => self.commit_wall(store, start, p),
            AuthoringState::Selecting { .. } => Ok(()),
        }
    }

    /// Commits a wall from `start` to the snapped click position and
    /// chains, making the committed endpoint the next start.
    fn commit_wall(&mut self, store: &mut PlanStore, start: Point2, click: Point2) -> Result<()> {
        let end = store.snap_position(click, None, self.snap_radius());

        let mut wall = WallData::new(
            match self.tool {
                Tool::CurvedWall => WallKind::Curved,
                _ => WallKind::Straight,
            },
            self.style.clone(),
        );
        wall.push_point(start);
        if wall.kind == WallKind::Curved {
            let (c1, c2) = default_control_points(start, end);
            wall.push_point(c1);
            wall.push_point(c2);
        }
        wall.push_point(end);
        wall.completed = true;
        let last = wall.points.len() - 1;

        let id = match store.add_wall(wall) {
            Ok(id) => id,
            Err(TopologyError::CoincidentEndpoints) => {
                debug!("wall commit rejected: endpoints coincide");
                self.feedback.push(Feedback::CoincidentEndpointsRejected);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        store.merge_endpoint(id, 0, self.snap_radius())?;
        store.merge_endpoint(id, last, self.snap_radius())?;

        let chained = store.wall(id)?.points[last];
        self.state = AuthoringState::ConnectingChain { start: chained };
        debug!(?id, "wall committed");
        Ok(())
    }

    // --- Selection ---

    fn select_click(&mut self, store: &PlanStore, event: PointerEvent) {
        let mut query = HitTest::new(event.position, self.zoom);
        if let AuthoringState::EditingCurveControl { wall, .. } = self.state {
            query = query.with_control_points(wall);
        }

        match query.execute(store) {
            Some(HitTarget::CurveControl { wall, index }) => {
                self.state = AuthoringState::EditingCurveControl {
                    wall,
                    control: Some(index),
                };
            }
            Some(HitTarget::Endpoint { wall, index }) => {
                self.select_wall(wall, event.modifiers);
                self.selected_endpoint = Some((wall, index));
                self.dragging_endpoint = Some((wall, index));
            }
            Some(HitTarget::WallBody { wall, .. }) => {
                self.select_wall(wall, event.modifiers);
                self.selected_endpoint = None;
            }
            None => {
                if !event.modifiers.ctrl {
                    self.selected_walls.clear();
                    self.selected_endpoint = None;
                }
                self.state = AuthoringState::Selecting {
                    anchor: event.position,
                    corner: event.position,
                };
            }
        }
    }

    fn select_wall(&mut self, wall: WallId, modifiers: Modifiers) {
        if modifiers.ctrl {
            if !self.selected_walls.contains(&wall) {
                self.selected_walls.push(wall);
            }
        } else if !self.selected_walls.contains(&wall) {
            self.selected_walls = vec![wall];
        }
    }

    fn finish_marquee(
        &mut self,
        store: &PlanStore,
        anchor: Point2,
        corner: Point2,
        modifiers: Modifiers,
    ) {
        let min = Point2::new(anchor.x.min(corner.x), anchor.y.min(corner.y));
        let max = Point2::new(anchor.x.max(corner.x), anchor.y.max(corner.y));

        if !modifiers.ctrl {
            self.selected_walls.clear();
        }
        for (id, wall) in store.walls() {
            if !wall.completed {
                continue;
            }
            let inside = wall
                .points
                .iter()
                .any(|p| p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y);
            if inside && !self.selected_walls.contains(&id) {
                self.selected_walls.push(id);
            }
        }
        debug!(count = self.selected_walls.len(), "marquee selection");
    }

    fn delete_selection(&mut self, store: &mut PlanStore) {
        for id in std::mem::take(&mut self.selected_walls) {
            // Removal detaches junctions first; a stale id is a no-op.
            let _ = store.remove_wall(id);
        }
        self.selected_endpoint = None;
        self.hover = None;
    }

    fn nudge(&mut self, store: &mut PlanStore, key: Key, modifiers: Modifiers) -> Result<()> {
        let Some((wall, index)) = self.selected_endpoint else {
            return Ok(());
        };
        let step = if modifiers.shift { 10.0 } else { 1.0 };
        let delta = match key {
            Key::ArrowLeft => Vector2::new(-step, 0.0),
            Key::ArrowRight => Vector2::new(step, 0.0),
            Key::ArrowUp => Vector2::new(0.0, -step),
            Key::ArrowDown => Vector2::new(0.0, step),
            _ => return Ok(()),
        };
        let current = store.wall(wall)?.points[index];
        store.move_wall_point(wall, index, current + delta)?;
        Ok(())
    }
}
