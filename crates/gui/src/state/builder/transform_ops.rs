//! Transform reducers

use shared::{Snapshot, Transform};

/// Replace an entity's transform wholesale. The gizmo emits one of these
/// per completed drag, already converted to inches/degrees.
pub fn set_transform(current: &Snapshot, id: &str, transform: Transform) -> Option<Snapshot> {
    let mut next = current.clone();
    let entity = next.entities.iter_mut().find(|e| e.id == id)?;
    entity.transform = transform;
    Some(next)
}
