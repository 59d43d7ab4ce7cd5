//! Headless test harness for programmatic workspace manipulation.
//!
//! Wires the builder store, the scene graph, and an arc-ball camera
//! together the same way the viewport does, without a window. Integration
//! tests and the JSON command interface drive the core through this.

use glam::Vec2;

use shared::{EntityId, Snapshot};

use crate::cutlist::{self, CutListRow};
use crate::gizmo::{resolve_attachment, GizmoAttachment};
use crate::scene::{SceneGraph, SyncStats};
use crate::state::{BuilderStore, Command};
use crate::viewport::camera::ArcBallCamera;

/// Headless harness — manages store, scene graph, and picking camera
pub struct TestHarness {
    pub store: BuilderStore,
    pub scene: SceneGraph,
    pub camera: ArcBallCamera,
    /// Logical viewport size for pointer picking
    pub viewport: Vec2,
}

impl TestHarness {
    /// Create a new empty harness.
    pub fn new() -> Self {
        Self {
            store: BuilderStore::new(),
            scene: SceneGraph::new(),
            camera: ArcBallCamera::new(),
            viewport: Vec2::new(800.0, 600.0),
        }
    }

    // ── State manipulation ────────────────────────────────────

    /// Dispatch a command
    pub fn dispatch(&mut self, command: Command) {
        self.store.dispatch(command);
    }

    /// Place a piece of the given profile and return its id
    pub fn add_lumber(&mut self, profile_id: &str) -> EntityId {
        self.dispatch(Command::AddEntity {
            profile_id: profile_id.to_string(),
            name: None,
        });
        self.store
            .snapshot()
            .primary_selection()
            .cloned()
            .unwrap_or_default()
    }

    /// Undo the last operation
    pub fn undo(&mut self) -> bool {
        if self.store.can_undo() {
            self.dispatch(Command::Undo);
            true
        } else {
            false
        }
    }

    /// Redo the last undone operation
    pub fn redo(&mut self) -> bool {
        if self.store.can_redo() {
            self.dispatch(Command::Redo);
            true
        } else {
            false
        }
    }

    // ── Scene synchronization ─────────────────────────────────

    /// Run one reconciliation pass against the current snapshot
    pub fn sync(&mut self) -> SyncStats {
        self.scene
            .sync(&self.store.snapshot().entities, self.store.version())
    }

    // ── Picking ───────────────────────────────────────────────

    /// Resolve a pointer position to an entity id (visible objects only)
    pub fn pick_at(&self, x: f32, y: f32) -> Option<EntityId> {
        let ray = self.camera.screen_ray(Vec2::new(x, y), self.viewport);
        self.scene.pick(&ray).cloned()
    }

    /// Simulate a click: pick, apply the selection policy, dispatch
    pub fn click_at(&mut self, x: f32, y: f32, additive: bool) {
        let ray = self.camera.screen_ray(Vec2::new(x, y), self.viewport);
        let next =
            self.scene
                .pick_selection(&ray, &self.store.snapshot().selection, additive);
        if let Some(ids) = next {
            self.dispatch(Command::SetSelection { ids });
        }
    }

    /// Current gizmo attachment for the snapshot
    pub fn gizmo_attachment(&self) -> GizmoAttachment {
        resolve_attachment(self.store.snapshot())
    }

    // ── Inspection ────────────────────────────────────────────

    pub fn snapshot(&self) -> &Snapshot {
        self.store.snapshot()
    }

    /// Number of entities in the model
    pub fn entity_count(&self) -> usize {
        self.store.snapshot().entities.len()
    }

    /// Number of selected entities
    pub fn selection_count(&self) -> usize {
        self.store.snapshot().selection.len()
    }

    /// Number of live visual objects
    pub fn object_count(&self) -> usize {
        self.scene.len()
    }

    /// Aggregate the current entity list into a cut list
    pub fn cut_list(&self) -> Vec<CutListRow> {
        cutlist::generate_cut_list(&self.store.snapshot().entities)
    }

    // ── Load / export ─────────────────────────────────────────

    /// Export the current snapshot as JSON
    pub fn export_state_json(&self) -> String {
        serde_json::to_string_pretty(self.store.snapshot()).unwrap_or_default()
    }

    /// Hydrate the snapshot from a JSON string
    pub fn load_state_json(&mut self, json: &str) -> Result<(), String> {
        let snapshot: Snapshot =
            serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))?;
        self.dispatch(Command::Hydrate { snapshot });
        Ok(())
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_harness_empty() {
        let h = TestHarness::new();
        assert_eq!(h.entity_count(), 0);
        assert_eq!(h.object_count(), 0);
    }

    #[test]
    fn test_add_and_sync() {
        let mut h = TestHarness::new();
        let id = h.add_lumber("stud-2x4");
        assert!(!id.is_empty());
        h.sync();
        assert_eq!(h.object_count(), 1);
    }

    #[test]
    fn test_undo_redo_cycle() {
        let mut h = TestHarness::new();
        h.add_lumber("stud-2x4");
        assert_eq!(h.entity_count(), 1);
        assert!(h.undo());
        assert_eq!(h.entity_count(), 0);
        assert!(h.redo());
        assert_eq!(h.entity_count(), 1);
    }

    #[test]
    fn test_undo_empty_returns_false() {
        let mut h = TestHarness::new();
        assert!(!h.undo());
        assert!(!h.redo());
    }

    #[test]
    fn test_export_load_roundtrip() {
        let mut h = TestHarness::new();
        h.add_lumber("board-1x6");
        let json = h.export_state_json();

        let mut h2 = TestHarness::new();
        h2.load_state_json(&json).unwrap();
        assert_eq!(h2.entity_count(), 1);
        assert_eq!(h2.snapshot(), h.snapshot());
    }

    #[test]
    fn test_load_invalid_json_errors() {
        let mut h = TestHarness::new();
        assert!(h.load_state_json("not valid json").is_err());
    }

    #[test]
    fn test_click_on_empty_space_clears_selection() {
        let mut h = TestHarness::new();
        h.add_lumber("stud-2x4");
        h.sync();
        assert_eq!(h.selection_count(), 1);
        // Top-left corner: the ray passes well above the piece at origin
        h.click_at(2.0, 2.0, false);
        assert_eq!(h.selection_count(), 0);
    }
}
