//! Integration tests for full editing workflows through the harness:
//! history depth, cut-list aggregation, and snapshot persistence.

use shared::{SnapIncrement, ToolMode};
use woodshop_gui_lib::harness::TestHarness;
use woodshop_gui_lib::state::{BuilderStore, Command, HISTORY_DEPTH};

#[test]
fn test_history_depth_caps_at_twenty() {
    let mut h = TestHarness::new();
    let id = h.add_lumber("stud-2x4");

    // 24 more state-changing commands, 25 total
    for i in 0..24 {
        h.dispatch(Command::UpdateEntity {
            id: id.clone(),
            name: Some(format!("Step {i}")),
            profile_id: None,
            locked: None,
            visible: None,
        });
    }

    let mut undone = 0;
    while h.undo() {
        undone += 1;
    }
    assert_eq!(undone, HISTORY_DEPTH);
    // The oldest 5 states were evicted, so the walk back stops after the
    // 5th command rather than at the initial empty workspace.
    assert_eq!(h.entity_count(), 1);
    assert_eq!(h.snapshot().entity(&id).unwrap().name, "Step 3");
}

#[test]
fn test_redo_replays_the_full_stack() {
    let mut h = TestHarness::new();
    h.add_lumber("stud-2x4");
    h.add_lumber("beam-4x4");
    h.add_lumber("board-1x6");

    while h.undo() {}
    assert_eq!(h.entity_count(), 0);

    let mut redone = 0;
    while h.redo() {
        redone += 1;
    }
    assert_eq!(redone, 3);
    assert_eq!(h.entity_count(), 3);
}

#[test]
fn test_tool_and_snap_ride_the_history() {
    let mut h = TestHarness::new();
    h.dispatch(Command::SetTool { tool: ToolMode::Rotate });
    h.dispatch(Command::SetSnap { snap: SnapIncrement::Whole });

    assert_eq!(h.snapshot().tool, ToolMode::Rotate);
    assert_eq!(h.snapshot().preferences.snap_increment, SnapIncrement::Whole);

    h.undo();
    assert_eq!(h.snapshot().preferences.snap_increment, SnapIncrement::Quarter);
    h.undo();
    assert_eq!(h.snapshot().tool, ToolMode::Translate);
}

#[test]
fn test_cut_list_aggregates_profiles() {
    let mut h = TestHarness::new();
    h.add_lumber("stud-2x4");
    h.add_lumber("stud-2x4");
    h.add_lumber("beam-4x4");

    let rows = h.cut_list();
    assert_eq!(rows.len(), 2);

    let studs = rows.iter().find(|r| r.profile_id == "stud-2x4").unwrap();
    assert_eq!(studs.count, 2);
    // 2 × (1.5 × 3.5 × 96 / 144) = 7.0
    assert_eq!(studs.board_feet, 7.0);
    assert_eq!(studs.species, "Douglas Fir / Pine");

    let posts = rows.iter().find(|r| r.profile_id == "beam-4x4").unwrap();
    assert_eq!(posts.count, 1);
    assert_eq!(posts.board_feet, 8.17);
}

#[test]
fn test_cut_list_reflects_scaled_pieces() {
    let mut h = TestHarness::new();
    let id = h.add_lumber("stud-2x4");

    let mut transform = shared::Transform::new();
    transform.scale = [1.0, 1.0, 2.0];
    h.dispatch(Command::SetTransform { id, transform });

    let rows = h.cut_list();
    assert_eq!(rows[0].board_feet, 7.0);
    assert_eq!(rows[0].length_inches, 192.0);
}

#[test]
fn test_snapshot_survives_disk_roundtrip() {
    let dir = std::env::temp_dir().join("woodshop-harness-roundtrip");
    let path = dir.join("workspace.json");

    let mut h = TestHarness::new();
    let id = h.add_lumber("panel-3-4");
    h.dispatch(Command::ToggleLock { id });
    h.dispatch(Command::SetSnap { snap: SnapIncrement::Half });
    h.store.save_to(&path);

    let loaded = BuilderStore::load_from(&path).unwrap();
    assert_eq!(loaded, *h.snapshot());

    // Hydrating a fresh harness from disk reproduces the scene
    let mut h2 = TestHarness::new();
    h2.dispatch(Command::Hydrate { snapshot: loaded });
    h2.sync();
    assert_eq!(h2.object_count(), 1);
    assert!(h2.scene.objects().values().next().unwrap().locked);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_unknown_profile_entity_persists_but_never_renders() {
    let mut h = TestHarness::new();
    h.dispatch(Command::AddEntity {
        profile_id: "discontinued-profile".into(),
        name: None,
    });
    h.sync();

    // Still in the model and the cut list skips it; no visual object
    assert_eq!(h.entity_count(), 1);
    assert_eq!(h.object_count(), 0);
    assert!(h.cut_list().is_empty());

    // Re-pointing the entity at a real profile makes it appear
    let id = h.snapshot().entities[0].id.clone();
    h.dispatch(Command::UpdateEntity {
        id,
        name: None,
        profile_id: Some("stud-2x4".into()),
        locked: None,
        visible: None,
    });
    h.sync();
    assert_eq!(h.object_count(), 1);
}
