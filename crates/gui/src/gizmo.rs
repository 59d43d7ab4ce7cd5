//! Gizmo attachment and drag conversion.
//!
//! The manipulation handle follows the primary selection: it detaches on an
//! empty selection, a locked primary, or a missing visual object, and
//! re-binds whenever the target entity or tool mode changes. Drag output is
//! converted back into model units (inches/degrees) with a fixed precision
//! floor before it is dispatched as a `SetTransform`.

use glam::Vec3;

use shared::{EntityId, SnapIncrement, Snapshot, ToolMode, Transform};

use crate::units::{
    degrees_to_radians, inches_to_meters, meters_to_inches, radians_to_degrees, round_to,
};
use crate::viewport::mesh::{push_line_vert, LineMeshData};
use crate::viewport::picking::Ray;

/// Which axis a gizmo handle belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GizmoAxis {
    X,
    Y,
    Z,
}

impl GizmoAxis {
    pub fn direction(&self) -> Vec3 {
        match self {
            GizmoAxis::X => Vec3::X,
            GizmoAxis::Y => Vec3::Y,
            GizmoAxis::Z => Vec3::Z,
        }
    }
}

/// Attachment state of the manipulation handle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GizmoAttachment {
    #[default]
    Detached,
    Attached { entity_id: EntityId, mode: ToolMode },
}

impl GizmoAttachment {
    pub fn entity_id(&self) -> Option<&EntityId> {
        match self {
            GizmoAttachment::Detached => None,
            GizmoAttachment::Attached { entity_id, .. } => Some(entity_id),
        }
    }
}

/// Resolve the attachment from (selection, tool, locked flag of primary).
/// Only the primary selection ever receives the gizmo; multi-selection is
/// for list operations.
pub fn resolve_attachment(snapshot: &Snapshot) -> GizmoAttachment {
    let Some(primary) = snapshot.primary_selection() else {
        return GizmoAttachment::Detached;
    };
    match snapshot.entity(primary) {
        Some(entity) if !entity.locked => GizmoAttachment::Attached {
            entity_id: primary.clone(),
            mode: snapshot.tool,
        },
        _ => GizmoAttachment::Detached,
    }
}

/// Convert a scene-space transform back into model units with the
/// precision floor applied: 3 decimals for position and scale, 2 for
/// rotation.
pub fn scene_to_model_transform(position: Vec3, rotation: Vec3, scale: Vec3) -> Transform {
    Transform {
        position: [
            round_to(meters_to_inches(position.x as f64), 3),
            round_to(meters_to_inches(position.y as f64), 3),
            round_to(meters_to_inches(position.z as f64), 3),
        ],
        rotation: [
            round_to(radians_to_degrees(rotation.x as f64), 2),
            round_to(radians_to_degrees(rotation.y as f64), 2),
            round_to(radians_to_degrees(rotation.z as f64), 2),
        ],
        scale: [
            round_to(scale.x as f64, 3),
            round_to(scale.y as f64, 3),
            round_to(scale.z as f64, 3),
        ],
    }
}

/// Convert a model transform into scene-space (meters/radians) components
pub fn model_to_scene_transform(transform: &Transform) -> (Vec3, Vec3, Vec3) {
    let p = &transform.position;
    let r = &transform.rotation;
    let s = &transform.scale;
    (
        Vec3::new(
            inches_to_meters(p[0]) as f32,
            inches_to_meters(p[1]) as f32,
            inches_to_meters(p[2]) as f32,
        ),
        Vec3::new(
            degrees_to_radians(r[0]) as f32,
            degrees_to_radians(r[1]) as f32,
            degrees_to_radians(r[2]) as f32,
        ),
        Vec3::new(s[0] as f32, s[1] as f32, s[2] as f32),
    )
}

/// Active snap step in scene units
pub fn snap_step_meters(snap: SnapIncrement) -> f32 {
    inches_to_meters(snap.inches()) as f32
}

/// Snap an axis-constrained translation to the nearest step multiple
pub fn snap_translation(value: f32, step: f32) -> f32 {
    if step <= 0.0 {
        return value;
    }
    (value / step).round() * step
}

/// Test if a ray hits one of the gizmo axes.
/// Returns the axis if the ray passes within a threshold of an axis line.
pub fn gizmo_hit_test(ray: &Ray, center: Vec3, axis_length: f32) -> Option<GizmoAxis> {
    let axes = [GizmoAxis::X, GizmoAxis::Y, GizmoAxis::Z];

    let threshold = 0.15;
    let mut best: Option<(GizmoAxis, f32)> = None;

    for axis in axes {
        let line_start = center;
        let line_end = center + axis.direction() * axis_length;

        let dist = ray_line_distance(ray, line_start, line_end);

        if dist < threshold && best.is_none_or(|(_, d)| dist < d) {
            best = Some((axis, dist));
        }
    }

    best.map(|(axis, _)| axis)
}

/// Build gizmo line mesh at the given center point.
pub fn build_gizmo_lines(center: Vec3, length: f32) -> LineMeshData {
    let mut vertices = Vec::new();

    let red = [0.9_f32, 0.2, 0.2, 1.0];
    let green = [0.2_f32, 0.8, 0.2, 1.0];
    let blue = [0.2_f32, 0.3, 0.9, 1.0];

    // X axis line
    push_line_vert(&mut vertices, center.x, center.y, center.z, red);
    push_line_vert(&mut vertices, center.x + length, center.y, center.z, red);

    // Y axis line
    push_line_vert(&mut vertices, center.x, center.y, center.z, green);
    push_line_vert(&mut vertices, center.x, center.y + length, center.z, green);

    // Z axis line
    push_line_vert(&mut vertices, center.x, center.y, center.z, blue);
    push_line_vert(&mut vertices, center.x, center.y, center.z + length, blue);

    // Arrowhead lines for X
    let arrow = length * 0.15;
    let tip_x = center.x + length;
    push_line_vert(&mut vertices, tip_x, center.y, center.z, red);
    push_line_vert(&mut vertices, tip_x - arrow, center.y + arrow * 0.5, center.z, red);
    push_line_vert(&mut vertices, tip_x, center.y, center.z, red);
    push_line_vert(&mut vertices, tip_x - arrow, center.y - arrow * 0.5, center.z, red);

    // Arrowhead lines for Y
    let tip_y = center.y + length;
    push_line_vert(&mut vertices, center.x, tip_y, center.z, green);
    push_line_vert(&mut vertices, center.x + arrow * 0.5, tip_y - arrow, center.z, green);
    push_line_vert(&mut vertices, center.x, tip_y, center.z, green);
    push_line_vert(&mut vertices, center.x - arrow * 0.5, tip_y - arrow, center.z, green);

    // Arrowhead lines for Z
    let tip_z = center.z + length;
    push_line_vert(&mut vertices, center.x, center.y, tip_z, blue);
    push_line_vert(&mut vertices, center.x, center.y + arrow * 0.5, tip_z - arrow, blue);
    push_line_vert(&mut vertices, center.x, center.y, tip_z, blue);
    push_line_vert(&mut vertices, center.x, center.y - arrow * 0.5, tip_z - arrow, blue);

    LineMeshData { vertices }
}

/// Minimum distance between a ray and a line segment.
fn ray_line_distance(ray: &Ray, line_start: Vec3, line_end: Vec3) -> f32 {
    let u = ray.direction;
    let v = line_end - line_start;
    let w = ray.origin - line_start;

    let a = u.dot(u); // always >= 0
    let b = u.dot(v);
    let c = v.dot(v); // always >= 0
    let d = u.dot(w);
    let e = v.dot(w);

    let denom = a * c - b * b;

    let (sc, tc);

    if denom < 1e-7 {
        // Nearly parallel
        sc = 0.0;
        tc = if b > c { d / b } else { e / c };
    } else {
        sc = (b * e - c * d) / denom;
        tc = (a * e - b * d) / denom;
    }

    // Clamp tc to [0,1] (line segment)
    let tc = tc.clamp(0.0, 1.0);
    // Only consider positive ray parameter
    let sc = sc.max(0.0);

    let closest_ray = ray.origin + u * sc;
    let closest_line = line_start + v * tc;

    (closest_ray - closest_line).length()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_detached_on_empty_selection() {
        let snapshot = fixtures::snapshot(vec![fixtures::entity("a", "stud-2x4")], &[]);
        assert_eq!(resolve_attachment(&snapshot), GizmoAttachment::Detached);
    }

    #[test]
    fn test_attached_to_primary_selection() {
        let snapshot = fixtures::snapshot(
            vec![
                fixtures::entity("a", "stud-2x4"),
                fixtures::entity("b", "stud-2x4"),
            ],
            &["b", "a"],
        );
        assert_eq!(
            resolve_attachment(&snapshot),
            GizmoAttachment::Attached {
                entity_id: "b".into(),
                mode: ToolMode::Translate,
            }
        );
    }

    #[test]
    fn test_detached_when_primary_locked() {
        let mut entity = fixtures::entity("a", "stud-2x4");
        entity.locked = true;
        let snapshot = fixtures::snapshot(vec![entity], &["a"]);
        // Selection is non-empty, but a locked primary still detaches
        assert_eq!(resolve_attachment(&snapshot), GizmoAttachment::Detached);
    }

    #[test]
    fn test_rebinds_on_tool_change() {
        let mut snapshot = fixtures::snapshot(vec![fixtures::entity("a", "stud-2x4")], &["a"]);
        let before = resolve_attachment(&snapshot);
        snapshot.tool = ToolMode::Rotate;
        let after = resolve_attachment(&snapshot);
        assert_ne!(before, after);
        assert_eq!(
            after,
            GizmoAttachment::Attached {
                entity_id: "a".into(),
                mode: ToolMode::Rotate,
            }
        );
    }

    #[test]
    fn test_scene_to_model_rounding() {
        let t = scene_to_model_transform(
            Vec3::new(inches_to_meters(12.00049) as f32, 0.0, 0.0),
            Vec3::new(std::f32::consts::FRAC_PI_2, 0.0, 0.0),
            Vec3::new(1.23456, 1.0, 1.0),
        );
        assert!((t.position[0] - 12.0).abs() < 2e-3);
        assert!((t.rotation[0] - 90.0).abs() < 1e-6);
        assert!((t.scale[0] - 1.235).abs() < 1e-9);
    }

    #[test]
    fn test_model_scene_roundtrip() {
        let original = Transform {
            position: [10.0, 20.0, 30.0],
            rotation: [45.0, 0.0, -90.0],
            scale: [1.0, 2.0, 0.5],
        };
        let (p, r, s) = model_to_scene_transform(&original);
        let back = scene_to_model_transform(p, r, s);
        for axis in 0..3 {
            assert!((back.position[axis] - original.position[axis]).abs() < 1e-2);
            assert!((back.rotation[axis] - original.rotation[axis]).abs() < 1e-2);
            assert!((back.scale[axis] - original.scale[axis]).abs() < 1e-3);
        }
    }

    #[test]
    fn test_snap_translation() {
        let step = snap_step_meters(SnapIncrement::Whole);
        assert!((snap_translation(0.03, step) - 0.0254).abs() < 1e-6);
        assert_eq!(snap_translation(0.1, 0.0), 0.1);
    }

    #[test]
    fn test_gizmo_hit_test_x_axis() {
        let center = Vec3::ZERO;
        // Ray passing right next to the X axis handle
        let ray = Ray {
            origin: Vec3::new(1.0, 0.05, 5.0),
            direction: Vec3::NEG_Z,
        };
        assert_eq!(gizmo_hit_test(&ray, center, 2.0), Some(GizmoAxis::X));
    }

    #[test]
    fn test_gizmo_hit_test_miss() {
        let ray = Ray {
            origin: Vec3::new(5.0, 5.0, 5.0),
            direction: Vec3::NEG_Z,
        };
        assert_eq!(gizmo_hit_test(&ray, Vec3::ZERO, 2.0), None);
    }
}
