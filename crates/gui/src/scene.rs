//! Scene reconciliation
//!
//! `SceneGraph` owns the map from entity id to live visual object — it is
//! the only writer. Each pass aligns the map with the current entity list:
//! create for new entities, overwrite flags/transform for existing ones,
//! dispose for removed ones. Passes are gated on the store version, so
//! re-running against an unchanged entity list performs no work.

use std::collections::{HashMap, HashSet};

use glam::{EulerRot, Mat4, Quat, Vec3};

use shared::{Entity, EntityId};

use crate::units::{degrees_to_radians, inches_to_meters};
use crate::viewport::mesh::{self, MeshData};
use crate::viewport::picking::{ray_obb, selection_after_pick, Aabb, Ray};

/// The renderable object bound 1:1 to an entity id. Holds the converted
/// scene-space transform (meters/radians) and the flags picking reads.
pub struct SceneObject {
    pub entity_id: EntityId,
    /// Profile the mesh was built from; a change forces a rebuild
    pub profile_id: String,
    pub mesh: MeshData,
    /// Local box half extents in meters, before scale
    pub half_extents: Vec3,
    /// Position in meters
    pub position: Vec3,
    /// Rotation in radians
    pub rotation: Vec3,
    pub scale: Vec3,
    pub visible: bool,
    pub locked: bool,
}

impl SceneObject {
    /// Object-to-world matrix
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z),
            self.position,
        )
    }

    /// Local bounding box (scale is carried by the model matrix)
    pub fn local_aabb(&self) -> Aabb {
        Aabb::from_half_extents(self.half_extents)
    }

    fn write_from(&mut self, entity: &Entity) {
        self.visible = entity.visible;
        self.locked = entity.locked;
        let t = &entity.transform;
        self.position = Vec3::new(
            inches_to_meters(t.position[0]) as f32,
            inches_to_meters(t.position[1]) as f32,
            inches_to_meters(t.position[2]) as f32,
        );
        self.rotation = Vec3::new(
            degrees_to_radians(t.rotation[0]) as f32,
            degrees_to_radians(t.rotation[1]) as f32,
            degrees_to_radians(t.rotation[2]) as f32,
        );
        self.scale = Vec3::new(t.scale[0] as f32, t.scale[1] as f32, t.scale[2] as f32);
    }
}

/// Counts of scene-graph mutations performed by one reconciliation pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncStats {
    pub created: usize,
    pub updated: usize,
    pub disposed: usize,
}

/// Owner of the entity-id → visual-object map
#[derive(Default)]
pub struct SceneGraph {
    objects: HashMap<EntityId, SceneObject>,
    /// Store version of the last pass, for idempotence
    last_version: Option<u64>,
    /// Total objects released since creation
    disposed_total: u64,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile against the current entity list. A repeat call with the
    /// same version returns immediately with zero stats.
    pub fn sync(&mut self, entities: &[Entity], version: u64) -> SyncStats {
        if self.last_version == Some(version) {
            return SyncStats::default();
        }
        self.last_version = Some(version);
        self.apply(entities)
    }

    fn apply(&mut self, entities: &[Entity]) -> SyncStats {
        let mut stats = SyncStats::default();
        let mut seen: HashSet<&str> = HashSet::with_capacity(entities.len());

        for entity in entities {
            let needs_build = match self.objects.get(&entity.id) {
                Some(object) => object.profile_id != entity.profile_id,
                None => true,
            };

            if needs_build {
                if self.objects.remove(&entity.id).is_some() {
                    self.disposed_total += 1;
                    stats.disposed += 1;
                }
                match shared::resolve_profile(&entity.profile_id) {
                    Some(profile) => {
                        self.objects.insert(entity.id.clone(), build_object(entity, profile));
                        stats.created += 1;
                    }
                    None => {
                        // Unknown profile: the entity stays in the model but
                        // gets no visual object until its profile_id changes
                        tracing::warn!(
                            "No catalog profile '{}' for entity {}",
                            entity.profile_id,
                            entity.id
                        );
                        continue;
                    }
                }
            }

            if let Some(object) = self.objects.get_mut(&entity.id) {
                object.write_from(entity);
                stats.updated += 1;
                seen.insert(entity.id.as_str());
            }
        }

        // Dispose objects whose entity is gone
        let stale: Vec<EntityId> = self
            .objects
            .keys()
            .filter(|id| !seen.contains(id.as_str()))
            .cloned()
            .collect();
        for id in stale {
            self.objects.remove(&id);
            self.disposed_total += 1;
            stats.disposed += 1;
        }

        stats
    }

    /// Read-only view for the render loop and picking
    pub fn objects(&self) -> &HashMap<EntityId, SceneObject> {
        &self.objects
    }

    pub fn get(&self, id: &str) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Total objects released over the graph's lifetime
    pub fn disposed_total(&self) -> u64 {
        self.disposed_total
    }

    /// Resolve a pointer ray to the nearest visible object's entity id
    pub fn pick(&self, ray: &Ray) -> Option<&EntityId> {
        let mut best: Option<(&EntityId, f32)> = None;

        for (id, object) in &self.objects {
            if !object.visible {
                continue;
            }
            let inverse = object.model_matrix().inverse();
            if let Some(dist) = ray_obb(ray, &inverse, &object.local_aabb()) {
                if best.is_none_or(|(_, d)| dist < d) {
                    best = Some((id, dist));
                }
            }
        }

        best.map(|(id, _)| id)
    }

    /// Pick for selection: hits on locked objects count as no hit.
    /// Returns the next selection per the click policy, or `None` when the
    /// selection must stay unchanged.
    pub fn pick_selection(
        &self,
        ray: &Ray,
        current: &[EntityId],
        additive: bool,
    ) -> Option<Vec<EntityId>> {
        let hit = self
            .pick(ray)
            .filter(|id| self.objects.get(*id).is_some_and(|o| !o.locked));
        selection_after_pick(current, hit, additive)
    }
}

fn build_object(entity: &Entity, profile: &shared::LumberProfile) -> SceneObject {
    let size = profile.size_inches;
    let w = inches_to_meters(size.width) as f32;
    let h = inches_to_meters(size.height) as f32;
    let l = inches_to_meters(size.length) as f32;

    let mut object = SceneObject {
        entity_id: entity.id.clone(),
        profile_id: entity.profile_id.clone(),
        mesh: mesh::timber_box(w, h, l, profile.material.rgb()),
        half_extents: Vec3::new(w, h, l) * 0.5,
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
        visible: entity.visible,
        locked: entity.locked,
    };
    object.write_from(entity);
    object
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_sync_creates_objects_for_entities() {
        let mut graph = SceneGraph::new();
        let entities = vec![
            fixtures::entity("a", "stud-2x4"),
            fixtures::entity("b", "beam-4x4"),
        ];
        let stats = graph.sync(&entities, 1);
        assert_eq!(stats, SyncStats { created: 2, updated: 2, disposed: 0 });
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_sync_same_version_is_idempotent() {
        let mut graph = SceneGraph::new();
        let entities = vec![fixtures::entity("a", "stud-2x4")];
        graph.sync(&entities, 1);
        let stats = graph.sync(&entities, 1);
        assert_eq!(stats, SyncStats::default());
    }

    #[test]
    fn test_sync_disposes_removed_entities_once() {
        let mut graph = SceneGraph::new();
        let entities = vec![
            fixtures::entity("a", "stud-2x4"),
            fixtures::entity("b", "stud-2x4"),
        ];
        graph.sync(&entities, 1);

        let remaining = vec![fixtures::entity("b", "stud-2x4")];
        let stats = graph.sync(&remaining, 2);
        assert_eq!(stats.disposed, 1);
        assert!(graph.get("a").is_none());
        assert_eq!(graph.disposed_total(), 1);

        // Repeating with the same list disposes nothing further
        let stats = graph.sync(&remaining, 3);
        assert_eq!(stats.disposed, 0);
        assert_eq!(graph.disposed_total(), 1);
    }

    #[test]
    fn test_unresolved_profile_is_skipped() {
        let mut graph = SceneGraph::new();
        let entities = vec![
            fixtures::entity("a", "no-such-profile"),
            fixtures::entity("b", "stud-2x4"),
        ];
        let stats = graph.sync(&entities, 1);
        assert_eq!(stats.created, 1);
        assert!(graph.get("a").is_none());
        assert!(graph.get("b").is_some());
    }

    #[test]
    fn test_profile_change_rebuilds_object() {
        let mut graph = SceneGraph::new();
        graph.sync(&[fixtures::entity("a", "stud-2x4")], 1);
        let old_extents = graph.get("a").unwrap().half_extents;

        let stats = graph.sync(&[fixtures::entity("a", "panel-3-4")], 2);
        assert_eq!(stats.created, 1);
        assert_eq!(stats.disposed, 1);
        assert_ne!(graph.get("a").unwrap().half_extents, old_extents);
    }

    #[test]
    fn test_transform_converted_to_scene_units() {
        let mut graph = SceneGraph::new();
        let mut entity = fixtures::entity("a", "stud-2x4");
        entity.transform.position = [96.0, 0.0, 0.0];
        entity.transform.rotation = [0.0, 90.0, 0.0];
        entity.transform.scale = [1.0, 1.0, 2.0];
        graph.sync(&[entity], 1);

        let object = graph.get("a").unwrap();
        assert!((object.position.x - 2.4384).abs() < 1e-4);
        assert!((object.rotation.y - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
        assert_eq!(object.scale.z, 2.0);
    }

    #[test]
    fn test_pick_ignores_invisible_objects() {
        let mut graph = SceneGraph::new();
        let mut hidden = fixtures::entity("a", "stud-2x4");
        hidden.visible = false;
        graph.sync(&[hidden], 1);

        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 5.0),
            direction: Vec3::NEG_Z,
        };
        assert!(graph.pick(&ray).is_none());
    }

    #[test]
    fn test_pick_returns_nearest() {
        let mut graph = SceneGraph::new();
        let near = fixtures::entity_at("near", "beam-4x4", [0.0, 0.0, 40.0]);
        let far = fixtures::entity_at("far", "beam-4x4", [0.0, 0.0, 0.0]);
        graph.sync(&[near, far], 1);

        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 10.0),
            direction: Vec3::NEG_Z,
        };
        assert_eq!(graph.pick(&ray).map(String::as_str), Some("near"));
    }

    #[test]
    fn test_locked_hit_counts_as_no_hit_for_selection() {
        let mut graph = SceneGraph::new();
        let mut entity = fixtures::entity("a", "beam-4x4");
        entity.locked = true;
        graph.sync(&[entity], 1);

        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 5.0),
            direction: Vec3::NEG_Z,
        };
        // Plain click on a locked piece clears the selection
        let next = graph.pick_selection(&ray, &["a".to_string()], false);
        assert_eq!(next, Some(vec![]));
        // Modified click on a locked piece keeps it
        let next = graph.pick_selection(&ray, &["a".to_string()], true);
        assert_eq!(next, None);
    }
}
