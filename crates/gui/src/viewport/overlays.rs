//! 2D overlays painted on top of the GL viewport

use glam::{Vec2, Vec3};

use super::camera::ArcBallCamera;

/// Draw X/Y/Z labels at the tips of the origin axes
pub fn draw_axis_labels(painter: &egui::Painter, rect: egui::Rect, camera: &ArcBallCamera) {
    let size = Vec2::new(rect.width(), rect.height());
    let labels = [
        (Vec3::new(2.2, 0.0, 0.0), "X", egui::Color32::from_rgb(230, 80, 80)),
        (Vec3::new(0.0, 2.2, 0.0), "Y", egui::Color32::from_rgb(80, 210, 80)),
        (Vec3::new(0.0, 0.0, 2.2), "Z", egui::Color32::from_rgb(90, 110, 230)),
    ];

    for (point, label, color) in labels {
        if let Some(pos) = camera.project(point, size) {
            painter.text(
                egui::pos2(rect.min.x + pos.x, rect.min.y + pos.y),
                egui::Align2::CENTER_CENTER,
                label,
                egui::FontId::monospace(12.0),
                color,
            );
        }
    }
}
