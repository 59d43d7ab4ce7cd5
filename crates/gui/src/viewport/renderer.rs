//! Software wireframe fallback, used when no GL context is available

use egui::Ui;
use glam::{Vec2, Vec3};

use shared::EntityId;

use super::camera::ArcBallCamera;
use crate::scene::SceneGraph;

/// Box edge list as corner-index pairs
const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 2), (2, 3), (3, 0), // bottom
    (4, 5), (5, 6), (6, 7), (7, 4), // top
    (0, 4), (1, 5), (2, 6), (3, 7), // verticals
];

pub fn paint_viewport(
    ui: &mut Ui,
    rect: egui::Rect,
    camera: &ArcBallCamera,
    scene: &SceneGraph,
    selection: &[EntityId],
) {
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(35, 35, 35));

    let size = Vec2::new(rect.width(), rect.height());
    let to_screen = |p: Vec2| egui::pos2(rect.min.x + p.x, rect.min.y + p.y);

    for (id, object) in scene.objects() {
        if !object.visible {
            continue;
        }

        let model = object.model_matrix();
        let half = object.half_extents;
        let corners = [
            Vec3::new(-half.x, -half.y, -half.z),
            Vec3::new(half.x, -half.y, -half.z),
            Vec3::new(half.x, -half.y, half.z),
            Vec3::new(-half.x, -half.y, half.z),
            Vec3::new(-half.x, half.y, -half.z),
            Vec3::new(half.x, half.y, -half.z),
            Vec3::new(half.x, half.y, half.z),
            Vec3::new(-half.x, half.y, half.z),
        ];

        let projected: Vec<Option<Vec2>> = corners
            .iter()
            .map(|c| camera.project(model.transform_point3(*c), size))
            .collect();

        let color = if selection.contains(id) {
            egui::Color32::from_rgb(235, 180, 110)
        } else {
            egui::Color32::from_rgb(150, 150, 155)
        };
        let stroke = egui::Stroke::new(1.0, color);

        for (a, b) in BOX_EDGES {
            if let (Some(pa), Some(pb)) = (projected[a], projected[b]) {
                painter.line_segment([to_screen(pa), to_screen(pb)], stroke);
            }
        }
    }
}
