//! Factory functions for creating test data.
//!
//! Convenient helpers to construct `Entity` and `Snapshot` values used in
//! unit and integration tests.

use shared::{Entity, Preferences, Snapshot, ToolMode, Transform};

/// Create a visible, unlocked entity at the origin.
pub fn entity(id: &str, profile_id: &str) -> Entity {
    Entity {
        id: id.to_string(),
        name: format!("Lumber {id}"),
        profile_id: profile_id.to_string(),
        transform: Transform::new(),
        locked: false,
        visible: true,
    }
}

/// Create an entity at a specific position (inches).
pub fn entity_at(id: &str, profile_id: &str, position: [f64; 3]) -> Entity {
    let mut e = entity(id, profile_id);
    e.transform.position = position;
    e
}

/// Create a snapshot from entities with the given selection.
pub fn snapshot(entities: Vec<Entity>, selection: &[&str]) -> Snapshot {
    Snapshot {
        entities,
        selection: selection.iter().map(|s| s.to_string()).collect(),
        tool: ToolMode::Translate,
        preferences: Preferences::default(),
    }
}
