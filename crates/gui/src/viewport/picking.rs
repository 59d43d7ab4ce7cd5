use glam::{Mat4, Vec3};

use shared::EntityId;

/// A ray in world space
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Axis-aligned bounding box
#[derive(Clone, Copy)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Box centered at the origin with the given half extents
    pub fn from_half_extents(half: Vec3) -> Self {
        Self { min: -half, max: half }
    }

    /// Center of the bounding box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// Ray-AABB intersection using the slab method.
/// Returns the distance along the ray to the nearest hit, or None.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let inv_dir = Vec3::new(
        1.0 / ray.direction.x,
        1.0 / ray.direction.y,
        1.0 / ray.direction.z,
    );

    let t1 = (aabb.min.x - ray.origin.x) * inv_dir.x;
    let t2 = (aabb.max.x - ray.origin.x) * inv_dir.x;
    let t3 = (aabb.min.y - ray.origin.y) * inv_dir.y;
    let t4 = (aabb.max.y - ray.origin.y) * inv_dir.y;
    let t5 = (aabb.min.z - ray.origin.z) * inv_dir.z;
    let t6 = (aabb.max.z - ray.origin.z) * inv_dir.z;

    let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
    let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

    if tmax < 0.0 || tmin > tmax {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Ray intersection against an oriented box: the ray is carried into the
/// box's local space by the inverse model matrix and slab-tested there.
/// The returned parameter is valid in world space as long as the model
/// matrix has no shear (ours are scale·rotation·translation).
pub fn ray_obb(ray: &Ray, model_inverse: &Mat4, local: &Aabb) -> Option<f32> {
    let local_origin = model_inverse.transform_point3(ray.origin);
    let local_dir = model_inverse.transform_vector3(ray.direction);

    let len = local_dir.length();
    if len < 1e-12 {
        return None;
    }

    let local_ray = Ray {
        origin: local_origin,
        direction: local_dir / len,
    };
    // Rescale the local-space parameter back to world units
    ray_aabb(&local_ray, local).map(|t| t / len)
}

/// Selection update policy for a pick result.
///
/// Returns the next selection, or `None` when the selection must stay
/// untouched (a modified click on empty space deliberately keeps it).
/// Locked targets must be filtered to `None` by the caller before this
/// runs — a locked hit counts as empty space.
pub fn selection_after_pick(
    current: &[EntityId],
    hit: Option<&EntityId>,
    additive: bool,
) -> Option<Vec<EntityId>> {
    match (hit, additive) {
        (Some(id), false) => Some(vec![id.clone()]),
        (None, false) => Some(Vec::new()),
        (Some(id), true) => {
            let mut next = current.to_vec();
            if let Some(pos) = next.iter().position(|s| s == id) {
                next.remove(pos);
            } else {
                next.push(id.clone());
            }
            Some(next)
        }
        (None, true) => None,
    }
}
