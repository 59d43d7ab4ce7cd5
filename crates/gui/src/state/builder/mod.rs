//! Builder state machine
//!
//! This module holds the canonical entity model behind a command reducer
//! with bounded undo/redo history. Every state-changing command produces a
//! fresh snapshot; commands that change nothing leave the history stacks
//! and version counter untouched.

mod display;
mod entity_ops;
mod history;
mod persistence;
mod transform_ops;

pub use display::{display_name, short_id};

use serde::{Deserialize, Serialize};
use shared::{EntityId, SnapIncrement, Snapshot, ToolMode, Transform};

/// Maximum depth of the undo stack; the oldest entry is evicted beyond this.
pub const HISTORY_DEPTH: usize = 20;

/// A command applied to the builder state.
///
/// Unknown entity ids are silently ignored — the UI only dispatches ids it
/// currently holds, so a stale id is a no-op rather than an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Place a new lumber piece and select it
    AddEntity {
        profile_id: String,
        #[serde(default)]
        name: Option<String>,
    },
    /// Patch entity fields other than id/transform
    UpdateEntity {
        id: EntityId,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        profile_id: Option<String>,
        #[serde(default)]
        locked: Option<bool>,
        #[serde(default)]
        visible: Option<bool>,
    },
    /// Replace an entity's transform wholesale
    SetTransform { id: EntityId, transform: Transform },
    /// Remove a batch of entities (and scrub them from the selection)
    DeleteEntities { ids: Vec<EntityId> },
    /// Replace the selection wholesale; callers compute additive/toggle
    /// semantics before dispatching
    SetSelection { ids: Vec<EntityId> },
    SetTool { tool: ToolMode },
    SetSnap { snap: SnapIncrement },
    ToggleVisibility { id: EntityId },
    ToggleLock { id: EntityId },
    /// Replace the entire snapshot (startup load); pushes no history
    Hydrate { snapshot: Snapshot },
    Undo,
    Redo,
}

/// Builder state with snapshot and undo/redo history
#[derive(Default)]
pub struct BuilderStore {
    /// Current snapshot
    snapshot: Snapshot,
    /// Undo stack - previous snapshots, oldest first
    pub(crate) past: Vec<Snapshot>,
    /// Redo stack - undone snapshots
    pub(crate) future: Vec<Snapshot>,
    /// Monotonically increasing version counter for cache invalidation
    pub(crate) version: u64,
}

impl BuilderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Current version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Apply a command. State-changing commands push the prior snapshot
    /// onto the undo stack and clear the redo stack; no-ops do neither.
    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
            Command::Hydrate { snapshot } => self.hydrate(snapshot),
            other => {
                let next = self.reduce(other);
                if let Some(next) = next {
                    if next != self.snapshot {
                        self.push_history();
                        self.snapshot = next;
                        self.version += 1;
                    }
                }
            }
        }
    }

    fn reduce(&self, command: Command) -> Option<Snapshot> {
        let current = &self.snapshot;
        match command {
            Command::AddEntity { profile_id, name } => {
                Some(entity_ops::add_entity(current, profile_id, name))
            }
            Command::UpdateEntity {
                id,
                name,
                profile_id,
                locked,
                visible,
            } => entity_ops::update_entity(current, &id, name, profile_id, locked, visible),
            Command::SetTransform { id, transform } => {
                transform_ops::set_transform(current, &id, transform)
            }
            Command::DeleteEntities { ids } => entity_ops::delete_entities(current, &ids),
            Command::SetSelection { ids } => Some(entity_ops::set_selection(current, ids)),
            Command::SetTool { tool } => Some(entity_ops::set_tool(current, tool)),
            Command::SetSnap { snap } => Some(entity_ops::set_snap(current, snap)),
            Command::ToggleVisibility { id } => entity_ops::toggle_visibility(current, &id),
            Command::ToggleLock { id } => entity_ops::toggle_lock(current, &id),
            // Handled in dispatch
            Command::Hydrate { .. } | Command::Undo | Command::Redo => None,
        }
    }

    /// Replace the snapshot from persisted storage. Runs before any user
    /// edit, so it is deliberately not undoable.
    fn hydrate(&mut self, snapshot: Snapshot) {
        self.snapshot = snapshot;
        self.version += 1;
    }

    /// Save current snapshot to the undo stack, bounded to `HISTORY_DEPTH`
    pub(crate) fn push_history(&mut self) {
        self.past.push(self.snapshot.clone());
        if self.past.len() > HISTORY_DEPTH {
            self.past.remove(0);
        }
        self.future.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Theme;

    fn add(store: &mut BuilderStore) -> EntityId {
        store.dispatch(Command::AddEntity {
            profile_id: "stud-2x4".into(),
            name: None,
        });
        store.snapshot().entities.last().unwrap().id.clone()
    }

    #[test]
    fn test_add_entity_selects_it() {
        let mut store = BuilderStore::new();
        let id = add(&mut store);
        assert_eq!(store.snapshot().entities.len(), 1);
        assert_eq!(store.snapshot().selection, vec![id.clone()]);
        let entity = store.snapshot().entity(&id).unwrap();
        assert_eq!(entity.name, "Lumber 1");
        assert!(entity.visible);
        assert!(!entity.locked);
    }

    #[test]
    fn test_sequential_default_names() {
        let mut store = BuilderStore::new();
        add(&mut store);
        add(&mut store);
        let names: Vec<_> = store
            .snapshot()
            .entities
            .iter()
            .map(|e| e.name.clone())
            .collect();
        assert_eq!(names, vec!["Lumber 1", "Lumber 2"]);
    }

    #[test]
    fn test_unknown_id_is_silent_noop() {
        let mut store = BuilderStore::new();
        add(&mut store);
        let version = store.version();
        store.dispatch(Command::ToggleLock { id: "ghost".into() });
        store.dispatch(Command::SetTransform {
            id: "ghost".into(),
            transform: Transform::new(),
        });
        assert_eq!(store.version(), version);
        assert_eq!(store.past.len(), 1);
    }

    #[test]
    fn test_delete_scrubs_selection_atomically() {
        let mut store = BuilderStore::new();
        let a = add(&mut store);
        let b = add(&mut store);
        store.dispatch(Command::SetSelection {
            ids: vec![a.clone(), b.clone()],
        });
        store.dispatch(Command::DeleteEntities { ids: vec![a.clone()] });
        assert_eq!(store.snapshot().selection, vec![b]);
        assert!(store.snapshot().entity(&a).is_none());
    }

    #[test]
    fn test_delete_unknown_ids_ignored() {
        let mut store = BuilderStore::new();
        let a = add(&mut store);
        let before = store.version();
        store.dispatch(Command::DeleteEntities {
            ids: vec!["ghost".into()],
        });
        assert_eq!(store.version(), before);
        assert!(store.snapshot().entity(&a).is_some());
    }

    #[test]
    fn test_selection_always_subset_of_entities() {
        let mut store = BuilderStore::new();
        let a = add(&mut store);
        let b = add(&mut store);
        let commands = vec![
            Command::SetSelection { ids: vec![a.clone(), b.clone()] },
            Command::ToggleLock { id: a.clone() },
            Command::DeleteEntities { ids: vec![a.clone()] },
            Command::Undo,
            Command::Redo,
            Command::SetTool { tool: ToolMode::Rotate },
        ];
        for command in commands {
            store.dispatch(command);
            let snapshot = store.snapshot();
            for id in &snapshot.selection {
                assert!(snapshot.entity(id).is_some(), "dangling selection {id}");
            }
        }
    }

    #[test]
    fn test_undo_restores_exact_prior_snapshot() {
        let mut store = BuilderStore::new();
        add(&mut store);
        let before = store.snapshot().clone();
        let id = add(&mut store);
        let after = store.snapshot().clone();

        store.dispatch(Command::Undo);
        assert_eq!(*store.snapshot(), before);
        store.dispatch(Command::Redo);
        assert_eq!(*store.snapshot(), after);
        assert!(store.snapshot().entity(&id).is_some());
    }

    #[test]
    fn test_undo_on_empty_history_is_noop() {
        let mut store = BuilderStore::new();
        let version = store.version();
        store.dispatch(Command::Undo);
        store.dispatch(Command::Redo);
        assert_eq!(store.version(), version);
    }

    #[test]
    fn test_new_command_clears_redo_stack() {
        let mut store = BuilderStore::new();
        add(&mut store);
        store.dispatch(Command::Undo);
        assert!(store.can_redo());
        add(&mut store);
        assert!(!store.can_redo());
    }

    #[test]
    fn test_history_caps_at_depth_evicting_oldest() {
        let mut store = BuilderStore::new();
        let id = add(&mut store);
        // 24 more state-changing commands: 25 total
        for i in 0..24 {
            store.dispatch(Command::UpdateEntity {
                id: id.clone(),
                name: Some(format!("Piece {i}")),
                profile_id: None,
                locked: None,
                visible: None,
            });
        }
        assert_eq!(store.past.len(), HISTORY_DEPTH);
        for _ in 0..HISTORY_DEPTH {
            store.dispatch(Command::Undo);
        }
        // The first 5 states were evicted: we land on the state after the
        // 5th command, not the initial empty one.
        assert!(!store.can_undo());
        assert_eq!(store.snapshot().entity(&id).unwrap().name, "Piece 3");
    }

    #[test]
    fn test_hydrate_replaces_without_history() {
        let mut store = BuilderStore::new();
        let snapshot = Snapshot {
            entities: vec![],
            selection: vec![],
            tool: ToolMode::Scale,
            preferences: shared::Preferences {
                snap_increment: SnapIncrement::Whole,
                theme: Theme::Light,
            },
        };
        store.dispatch(Command::Hydrate { snapshot: snapshot.clone() });
        assert_eq!(*store.snapshot(), snapshot);
        assert!(!store.can_undo());
    }

    #[test]
    fn test_set_selection_drops_unknown_and_duplicate_ids() {
        let mut store = BuilderStore::new();
        let a = add(&mut store);
        store.dispatch(Command::SetSelection {
            ids: vec![a.clone(), "ghost".into(), a.clone()],
        });
        assert_eq!(store.snapshot().selection, vec![a]);
    }

    #[test]
    fn test_identical_selection_does_not_push_history() {
        let mut store = BuilderStore::new();
        let a = add(&mut store);
        store.dispatch(Command::SetSelection { ids: vec![a.clone()] });
        let depth = store.past.len();
        // Same ids again: snapshot is value-identical, so no history entry
        store.dispatch(Command::SetSelection { ids: vec![a] });
        assert_eq!(store.past.len(), depth);
    }

    #[test]
    fn test_toggle_visibility_and_lock() {
        let mut store = BuilderStore::new();
        let id = add(&mut store);
        store.dispatch(Command::ToggleVisibility { id: id.clone() });
        assert!(!store.snapshot().entity(&id).unwrap().visible);
        store.dispatch(Command::ToggleLock { id: id.clone() });
        assert!(store.snapshot().entity(&id).unwrap().locked);
        store.dispatch(Command::ToggleVisibility { id: id.clone() });
        assert!(store.snapshot().entity(&id).unwrap().visible);
    }
}
