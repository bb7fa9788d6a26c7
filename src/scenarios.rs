//! End-to-end scenarios exercising the store, the authoring machine, and
//! the mesh compiler together, plus whole-store invariant sweeps.

#![allow(clippy::unwrap_used)]

use crate::authoring::{AuthoringSession, Key, Modifiers, PointerEvent, Tool};
use crate::math::Point2;
use crate::meshing::MeshWall;
use crate::topology::{PlanStore, WallData, WallKind, WallStyle};

/// Asserts the two structural invariants the registry maintains:
/// `points`/`point_ids` alignment on every wall, and full agreement
/// between junctions and the wall points attached to them.
fn assert_store_consistent(store: &PlanStore) {
    let mut attachments = 0;
    for (id, wall) in store.walls() {
        assert_eq!(
            wall.points.len(),
            wall.point_ids.len(),
            "alignment broken on wall {id:?}"
        );
        for (index, pid) in wall.point_ids.iter().enumerate() {
            let Some(pid) = pid else { continue };
            attachments += 1;
            let sp = store.shared_point(*pid).unwrap();
            assert!(
                sp.connected.contains(&(id, index)),
                "junction {pid:?} does not list wall {id:?} index {index}"
            );
            assert_eq!(
                wall.points[index], sp.position,
                "wall {id:?} point {index} drifted from junction {pid:?}"
            );
        }
    }

    let mut listed = 0;
    for sp_id in store_shared_point_ids(store) {
        let sp = store.shared_point(sp_id).unwrap();
        assert!(!sp.connected.is_empty(), "orphan junction {sp_id:?}");
        for &(wall, index) in &sp.connected {
            listed += 1;
            let wall_data = store.wall(wall).unwrap();
            assert_eq!(wall_data.point_ids[index], Some(sp_id));
        }
    }
    assert_eq!(attachments, listed);
}

fn store_shared_point_ids(store: &PlanStore) -> Vec<crate::topology::SharedPointId> {
    store
        .walls()
        .flat_map(|(_, w)| w.point_ids.iter().copied().flatten())
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn click(session: &mut AuthoringSession, store: &mut PlanStore, x: f64, y: f64) {
    session.pointer_down(store, PointerEvent::at(x, y)).unwrap();
}

/// Opt-in event logging for debugging a failing scenario
/// (`RUST_LOG=muralis=trace cargo test`).
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[test]
fn shared_move_propagates_to_every_attached_wall() {
    // Scenario: one junction, three walls attached; a single move call
    // lands on all of them.
    let mut store = PlanStore::new();
    let mut ids = Vec::new();
    for end in [(100.0, 0.0), (0.0, 100.0), (-100.0, -100.0)] {
        let mut w = WallData::new(WallKind::Straight, WallStyle::default());
        w.push_point(Point2::new(0.0, 0.0));
        w.push_point(Point2::new(end.0, end.1));
        w.completed = true;
        ids.push(store.add_wall(w).unwrap());
    }
    let sp = store.create_shared_point(Point2::new(0.0, 0.0));
    for &id in &ids {
        store.attach(sp, id, 0).unwrap();
    }

    store.move_shared_point(sp, Point2::new(10.0, 10.0)).unwrap();

    for &id in &ids {
        assert_eq!(store.wall(id).unwrap().points[0], Point2::new(10.0, 10.0));
    }
    assert_store_consistent(&store);
}

#[test]
fn snap_drawing_creates_exactly_one_junction() {
    // Draw (0,0)→(100,0), then start a second wall by clicking within the
    // merge radius of (100,0): exactly one junction, referenced by both.
    let mut store = PlanStore::new();
    let mut session = AuthoringSession::new();

    session.set_tool(Tool::StraightWall);
    click(&mut session, &mut store, 0.0, 0.0);
    click(&mut session, &mut store, 100.0, 0.0);

    session.set_tool(Tool::StraightWall); // drop the chain
    click(&mut session, &mut store, 108.0, 6.0);
    click(&mut session, &mut store, 100.0, 100.0);

    assert_eq!(store.wall_count(), 2);
    assert_eq!(store.shared_point_count(), 1);

    let walls: Vec<_> = store.walls().map(|(id, _)| id).collect();
    let sp = store
        .find_nearby_shared_point(Point2::new(100.0, 0.0), 1.0)
        .unwrap();
    let connected = &store.shared_point(sp).unwrap().connected;
    assert!(connected.contains(&(walls[0], 1)));
    assert!(connected.contains(&(walls[1], 0)));
    assert_store_consistent(&store);
}

#[test]
fn chained_square_closes_the_loop_with_junctions() {
    // Four chained clicks around a square, the last landing back on the
    // first wall's start: every corner becomes a junction.
    let mut store = PlanStore::new();
    let mut session = AuthoringSession::new();

    session.set_tool(Tool::StraightWall);
    click(&mut session, &mut store, 0.0, 0.0);
    click(&mut session, &mut store, 100.0, 0.0);
    click(&mut session, &mut store, 100.0, 100.0);
    click(&mut session, &mut store, 0.0, 100.0);
    click(&mut session, &mut store, 3.0, 2.0); // snaps back to (0, 0)

    assert_eq!(store.wall_count(), 4);
    assert_eq!(store.shared_point_count(), 4);
    for sp_id in store_shared_point_ids(&store) {
        assert_eq!(store.shared_point(sp_id).unwrap().connected.len(), 2);
    }
    // The closing endpoint snapped onto the opening one.
    let last = store.walls().last().unwrap().1;
    assert_eq!(*last.points.last().unwrap(), Point2::new(0.0, 0.0));
    assert_store_consistent(&store);
}

#[test]
fn closed_square_wall_compiles_to_unified_miter_mesh() {
    // A single closed centerline: classification closes via geometry and
    // the compiled mesh is the 4-points-per-vertex miter solid.
    let mut store = PlanStore::new();
    let mut w = WallData::new(WallKind::Straight, WallStyle::default());
    for p in [
        (0.0, 0.0),
        (100.0, 0.0),
        (100.0, 100.0),
        (0.0, 100.0),
        (0.0, 0.0),
    ] {
        w.push_point(Point2::new(p.0, p.1));
    }
    w.completed = true;
    let id = store.add_wall(w).unwrap();

    assert!(store.is_closed(id).unwrap());
    let mesh = MeshWall::new(id).execute(&store).unwrap();
    assert_eq!(mesh.vertices.len(), 16);
    assert!(!mesh.has_non_finite());

    // Miter bound: every emitted vertex within [h, 2h] of its corner.
    let h = store.wall(id).unwrap().style.thickness * 0.5;
    let corners = [
        Point2::new(0.0, 0.0),
        Point2::new(100.0, 0.0),
        Point2::new(100.0, 100.0),
        Point2::new(0.0, 100.0),
    ];
    for (i, corner) in corners.iter().enumerate() {
        for c in 0..4 {
            let v = mesh.vertices[i * 4 + c];
            let d = ((v.x - corner.x).powi(2) + (v.y - corner.y).powi(2)).sqrt();
            assert!(d >= h - 1e-9 && d <= 2.0 * h + 1e-9, "offset {d} out of bound");
        }
    }
}

#[test]
fn coincident_wall_leaves_no_trace() {
    let mut store = PlanStore::new();
    let mut session = AuthoringSession::new();

    session.set_tool(Tool::StraightWall);
    click(&mut session, &mut store, 40.0, 40.0);
    click(&mut session, &mut store, 40.0, 40.0);

    assert_eq!(store.wall_count(), 0);
    assert_eq!(store.shared_point_count(), 0);
    assert!(!session.take_feedback().is_empty());
}

#[test]
fn deleting_a_wall_preserves_other_walls_junctions() {
    // Middle wall of a U shares one junction with each neighbor; deleting
    // it leaves both junctions alive with one reference fewer.
    let mut store = PlanStore::new();
    let mut session = AuthoringSession::new();

    session.set_tool(Tool::StraightWall);
    click(&mut session, &mut store, 0.0, 0.0);
    click(&mut session, &mut store, 100.0, 0.0);
    click(&mut session, &mut store, 200.0, 0.0);
    click(&mut session, &mut store, 300.0, 0.0);

    let walls: Vec<_> = store.walls().map(|(id, _)| id).collect();
    assert_eq!(walls.len(), 3);
    assert_eq!(store.shared_point_count(), 2);

    store.remove_wall(walls[1]).unwrap();

    assert_eq!(store.wall_count(), 2);
    assert_eq!(store.shared_point_count(), 2);
    for sp_id in store_shared_point_ids(&store) {
        let sp = store.shared_point(sp_id).unwrap();
        assert_eq!(sp.connected.len(), 1);
        assert_ne!(sp.connected[0].0, walls[1]);
    }
    assert_store_consistent(&store);
}

#[test]
fn invariants_hold_through_a_mixed_editing_session() {
    init_tracing();
    let mut store = PlanStore::new();
    let mut session = AuthoringSession::new();

    // Draw a room with a chain, a free-standing wall, and a curve.
    session.set_tool(Tool::StraightWall);
    click(&mut session, &mut store, 0.0, 0.0);
    click(&mut session, &mut store, 200.0, 0.0);
    click(&mut session, &mut store, 200.0, 150.0);
    assert_store_consistent(&store);

    session.set_tool(Tool::CurvedWall);
    click(&mut session, &mut store, 400.0, 400.0);
    click(&mut session, &mut store, 600.0, 400.0);
    assert_store_consistent(&store);

    // Drag the chain junction around.
    session.set_tool(Tool::Select);
    session
        .pointer_down(&mut store, PointerEvent::at(200.0, 2.0))
        .unwrap();
    session
        .pointer_move(&mut store, PointerEvent::at(250.0, -30.0))
        .unwrap();
    session.pointer_up(&store, PointerEvent::at(250.0, -30.0));
    assert_store_consistent(&store);

    // Nudge it, then delete the selected wall.
    session
        .key(&mut store, Key::ArrowDown, Modifiers { shift: true, ctrl: false })
        .unwrap();
    assert_store_consistent(&store);

    session
        .key(&mut store, Key::Delete, Modifiers::default())
        .unwrap();
    assert_store_consistent(&store);

    // Every completed wall still compiles without NaN.
    let ids: Vec<_> = store.walls().map(|(id, _)| id).collect();
    for id in ids {
        let mesh = MeshWall::new(id).execute(&store).unwrap();
        assert!(!mesh.has_non_finite());
    }
}
