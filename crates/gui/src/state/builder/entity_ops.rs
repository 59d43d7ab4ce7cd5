//! Entity CRUD and selection/preference reducers.
//!
//! Each function takes the current snapshot and returns the next one, or
//! `None` when the command refers to an unknown id and nothing changes.

use shared::{Entity, EntityId, SnapIncrement, Snapshot, ToolMode, Transform};

/// Place a new piece at the origin with a fresh id; selection becomes
/// exactly the new piece.
pub fn add_entity(current: &Snapshot, profile_id: String, name: Option<String>) -> Snapshot {
    let id = uuid::Uuid::new_v4().to_string();
    let name = name.unwrap_or_else(|| format!("Lumber {}", current.entities.len() + 1));

    let mut next = current.clone();
    next.entities.push(Entity {
        id: id.clone(),
        name,
        profile_id,
        transform: Transform::new(),
        locked: false,
        visible: true,
    });
    next.selection = vec![id];
    next
}

/// Patch entity fields other than id/transform
pub fn update_entity(
    current: &Snapshot,
    id: &str,
    name: Option<String>,
    profile_id: Option<String>,
    locked: Option<bool>,
    visible: Option<bool>,
) -> Option<Snapshot> {
    current.entity(id)?;

    let mut next = current.clone();
    let entity = next.entities.iter_mut().find(|e| e.id == id)?;
    if let Some(name) = name {
        entity.name = name;
    }
    if let Some(profile_id) = profile_id {
        entity.profile_id = profile_id;
    }
    if let Some(locked) = locked {
        entity.locked = locked;
    }
    if let Some(visible) = visible {
        entity.visible = visible;
    }
    Some(next)
}

/// Remove all matching ids from both the entity list and the selection in
/// one transition; ids not found are ignored.
pub fn delete_entities(current: &Snapshot, ids: &[EntityId]) -> Option<Snapshot> {
    if !ids.iter().any(|id| current.entity(id).is_some()) {
        return None;
    }

    let mut next = current.clone();
    next.entities.retain(|e| !ids.contains(&e.id));
    next.selection.retain(|id| !ids.contains(id));
    Some(next)
}

/// Replace the selection wholesale. Ids without a matching entity and
/// repeats are dropped so the selection stays an ordered set over the
/// entity list, whatever the caller sends.
pub fn set_selection(current: &Snapshot, ids: Vec<EntityId>) -> Snapshot {
    let mut next = current.clone();
    next.selection.clear();
    for id in ids {
        if current.entity(&id).is_some() && !next.selection.contains(&id) {
            next.selection.push(id);
        }
    }
    next
}

pub fn set_tool(current: &Snapshot, tool: ToolMode) -> Snapshot {
    let mut next = current.clone();
    next.tool = tool;
    next
}

pub fn set_snap(current: &Snapshot, snap: SnapIncrement) -> Snapshot {
    let mut next = current.clone();
    next.preferences.snap_increment = snap;
    next
}

pub fn toggle_visibility(current: &Snapshot, id: &str) -> Option<Snapshot> {
    let mut next = current.clone();
    let entity = next.entities.iter_mut().find(|e| e.id == id)?;
    entity.visible = !entity.visible;
    Some(next)
}

pub fn toggle_lock(current: &Snapshot, id: &str) -> Option<Snapshot> {
    let mut next = current.clone();
    let entity = next.entities.iter_mut().find(|e| e.id == id)?;
    entity.locked = !entity.locked;
    Some(next)
}
