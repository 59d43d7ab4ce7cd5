//! 3D viewport panel with OpenGL rendering

mod gl_renderer;
mod overlays;
mod renderer;
pub use woodshop_gui_lib::viewport::{camera, mesh, picking};

use std::sync::{Arc, Mutex};

use egui::Ui;
use glam::{Vec2, Vec3};

use shared::{EntityId, ToolMode};

use crate::gizmo::{
    self, build_gizmo_lines, gizmo_hit_test, resolve_attachment, snap_step_meters,
    snap_translation, GizmoAttachment, GizmoAxis,
};
use crate::scene::SceneGraph;
use crate::state::{AppState, Command};
use camera::ArcBallCamera;
use gl_renderer::{GlRenderer, RenderObject, RenderParams};
use mesh::LineMeshData;
use picking::Ray;

const GIZMO_LENGTH: f32 = 1.5;

/// In-progress gizmo drag. The store is only written once at drag end;
/// until then the preview transform below is what gets rendered.
struct GizmoDrag {
    entity_id: EntityId,
    axis: GizmoAxis,
    mode: ToolMode,
    /// Preview transform in scene units
    position: Vec3,
    rotation: Vec3,
    scale: Vec3,
}

/// 3D viewport panel with OpenGL rendering
pub struct ViewportPanel {
    camera: ArcBallCamera,
    gl_renderer: Option<Arc<Mutex<GlRenderer>>>,
    /// Reconciled visual objects, owned by the viewport as render surface
    scene: SceneGraph,
    attachment: GizmoAttachment,
    drag: Option<GizmoDrag>,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self {
            camera: ArcBallCamera::new(),
            gl_renderer: None,
            scene: SceneGraph::new(),
            attachment: GizmoAttachment::Detached,
            drag: None,
        }
    }

    /// Initialize GL renderer (must be called with a GL context)
    pub fn init_gl(&mut self, gl: &glow::Context) {
        let renderer = GlRenderer::new(gl);
        self.gl_renderer = Some(Arc::new(Mutex::new(renderer)));
    }

    pub fn reset_camera(&mut self) {
        self.camera = ArcBallCamera::new();
    }

    /// Aim the camera at a specific point
    pub fn focus_on(&mut self, target: Vec3) {
        self.camera.target = target;
    }

    /// Scene-space position of an entity's visual object (if any)
    pub fn object_position(&self, id: &str) -> Option<Vec3> {
        self.scene.get(id).map(|object| object.position)
    }

    pub fn show(&mut self, ui: &mut Ui, state: &mut AppState) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        // ── Reconcile the scene graph with the current snapshot ──
        self.scene
            .sync(&state.store.snapshot().entities, state.store.version());

        // ── Gizmo attachment follows (selection, tool, lock) ────
        let attachment = resolve_attachment(state.store.snapshot());
        if attachment != self.attachment {
            // Re-bind: any drag on the old target is abandoned
            self.attachment = attachment;
            self.drag = None;
        }

        // ── Gizmo drag and camera controls ──────────────────────
        self.handle_gizmo_and_camera(&response, ui, rect, state);

        // ── Scroll zoom ─────────────────────────────────────────
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll.abs() > 0.1 {
            self.camera.zoom(scroll * 0.01);
        }

        // ── Selection via click ─────────────────────────────────
        self.handle_selection(&response, ui, rect, state);

        if !ui.is_rect_visible(rect) {
            return;
        }

        // ── Render ──────────────────────────────────────────────
        let gizmo_lines = self.build_gizmo_lines();
        self.render_gl(ui, rect, state, gizmo_lines);

        // ── Overlays ────────────────────────────────────────────
        self.draw_overlays(ui, rect, state);
    }

    // ── Coordinate helpers ────────────────────────────────────

    fn viewport_size(rect: egui::Rect) -> Vec2 {
        Vec2::new(rect.width(), rect.height())
    }

    fn screen_ray(&self, pos: egui::Pos2, rect: egui::Rect) -> Ray {
        let local = Vec2::new(pos.x - rect.min.x, pos.y - rect.min.y);
        self.camera.screen_ray(local, Self::viewport_size(rect))
    }

    /// Center of the gizmo: the bound object's position, or the drag
    /// preview position while a drag is in progress.
    fn gizmo_center(&self) -> Option<Vec3> {
        if let Some(drag) = &self.drag {
            return Some(drag.position);
        }
        let id = self.attachment.entity_id()?;
        self.scene.get(id).map(|object| object.position)
    }

    // ── Interaction ───────────────────────────────────────────

    fn handle_gizmo_and_camera(
        &mut self,
        response: &egui::Response,
        ui: &Ui,
        rect: egui::Rect,
        state: &mut AppState,
    ) {
        if self.drag.is_some() {
            if response.dragged_by(egui::PointerButton::Primary) {
                let delta = response.drag_delta();
                let snap = snap_step_meters(state.store.snapshot().preferences.snap_increment);
                self.apply_drag_delta(delta, rect, snap);
            }
            // Commit once when the button is released
            if response.drag_stopped() || !response.dragged_by(egui::PointerButton::Primary) {
                if let Some(drag) = self.drag.take() {
                    state.store.dispatch(Command::SetTransform {
                        id: drag.entity_id,
                        transform: gizmo::scene_to_model_transform(
                            drag.position,
                            drag.rotation,
                            drag.scale,
                        ),
                    });
                }
            }
            return;
        }

        // ── Camera controls (only when not dragging the gizmo) ──
        if response.dragged_by(egui::PointerButton::Middle)
            || (response.dragged_by(egui::PointerButton::Primary)
                && ui.input(|i| i.modifiers.alt))
        {
            let delta = response.drag_delta();
            self.camera.rotate(delta.x * 0.5, delta.y * 0.5);
        }

        if response.dragged_by(egui::PointerButton::Secondary) {
            let delta = response.drag_delta();
            self.camera.pan(delta.x * 0.01, delta.y * 0.01);
        }

        // ── Gizmo drag start on LMB drag ────────────────────────
        if response.drag_started_by(egui::PointerButton::Primary)
            && !ui.input(|i| i.modifiers.alt)
        {
            let GizmoAttachment::Attached { entity_id, mode } = self.attachment.clone() else {
                return;
            };
            let pointer = response
                .interact_pointer_pos()
                .or_else(|| response.hover_pos());
            let (Some(pos), Some(object)) = (pointer, self.scene.get(&entity_id)) else {
                return;
            };
            let ray = self.screen_ray(pos, rect);
            if let Some(axis) = gizmo_hit_test(&ray, object.position, GIZMO_LENGTH) {
                self.drag = Some(GizmoDrag {
                    entity_id,
                    axis,
                    mode,
                    position: object.position,
                    rotation: object.rotation,
                    scale: object.scale,
                });
            }
        }
    }

    /// Apply one frame of drag movement to the preview transform
    fn apply_drag_delta(&mut self, screen_delta: egui::Vec2, rect: egui::Rect, snap: f32) {
        let camera = &self.camera;
        let Some(drag) = self.drag.as_mut() else {
            return;
        };

        let world_delta =
            compute_drag_delta(camera, drag.position, drag.axis, screen_delta, rect);
        let idx = match drag.axis {
            GizmoAxis::X => 0,
            GizmoAxis::Y => 1,
            GizmoAxis::Z => 2,
        };

        match drag.mode {
            ToolMode::Translate => {
                drag.position += drag.axis.direction() * world_delta;
                // Axis-constrained drags snap to the active increment
                drag.position[idx] = snap_translation(drag.position[idx], snap);
            }
            ToolMode::Rotate => {
                drag.rotation[idx] += screen_delta.x * 0.01;
            }
            ToolMode::Scale => {
                drag.scale[idx] = (drag.scale[idx] * (1.0 + screen_delta.x * 0.01)).max(0.01);
            }
        }
    }

    fn handle_selection(
        &mut self,
        response: &egui::Response,
        ui: &Ui,
        rect: egui::Rect,
        state: &mut AppState,
    ) {
        if !response.clicked() || ui.input(|i| i.modifiers.alt) || self.drag.is_some() {
            return;
        }

        let Some(pos) = response.interact_pointer_pos() else {
            return;
        };

        let ray = self.screen_ray(pos, rect);

        // If the gizmo is visible, don't pick through it
        if let Some(center) = self.gizmo_center() {
            if gizmo_hit_test(&ray, center, GIZMO_LENGTH).is_some() {
                return;
            }
        }

        let additive = ui.input(|i| i.modifiers.shift);
        let next =
            self.scene
                .pick_selection(&ray, &state.store.snapshot().selection, additive);
        if let Some(ids) = next {
            state.store.dispatch(Command::SetSelection { ids });
        }
    }

    // ── Rendering ─────────────────────────────────────────────

    fn build_gizmo_lines(&self) -> Option<LineMeshData> {
        self.gizmo_center()
            .map(|center| build_gizmo_lines(center, GIZMO_LENGTH))
    }

    fn render_gl(
        &self,
        ui: &mut Ui,
        rect: egui::Rect,
        state: &AppState,
        gizmo_lines: Option<LineMeshData>,
    ) {
        let selection = &state.store.snapshot().selection;

        // Snapshot render objects for the paint callback; the dragged
        // piece is shown at its preview transform.
        let objects: Vec<RenderObject> = self
            .scene
            .objects()
            .values()
            .map(|object| {
                let model = match &self.drag {
                    Some(drag) if drag.entity_id == object.entity_id => {
                        glam::Mat4::from_scale_rotation_translation(
                            drag.scale,
                            glam::Quat::from_euler(
                                glam::EulerRot::XYZ,
                                drag.rotation.x,
                                drag.rotation.y,
                                drag.rotation.z,
                            ),
                            drag.position,
                        )
                    }
                    _ => object.model_matrix(),
                };
                RenderObject {
                    entity_id: object.entity_id.clone(),
                    mesh: object.mesh.clone(),
                    model,
                    visible: object.visible,
                    selected: selection.contains(&object.entity_id),
                }
            })
            .collect();

        let Some(gl_renderer) = &self.gl_renderer else {
            // Fallback: software wireframe rendering
            renderer::paint_viewport(ui, rect, &self.camera, &self.scene, selection);
            return;
        };

        let renderer_clone = gl_renderer.clone();
        let camera_yaw = self.camera.yaw;
        let camera_pitch = self.camera.pitch;
        let camera_distance = self.camera.distance;
        let camera_target = self.camera.target;
        let camera_fov = self.camera.fov;
        let version = state.store.version();

        let callback = egui::PaintCallback {
            rect,
            callback: Arc::new(eframe::egui_glow::CallbackFn::new(move |info, painter| {
                let gl = painter.gl();

                let camera = ArcBallCamera {
                    yaw: camera_yaw,
                    pitch: camera_pitch,
                    distance: camera_distance,
                    target: camera_target,
                    fov: camera_fov,
                };

                let clip = info.clip_rect_in_pixels();
                let viewport = [
                    clip.left_px as f32,
                    clip.from_bottom_px as f32,
                    clip.width_px as f32,
                    clip.height_px as f32,
                ];

                if let Ok(mut r) = renderer_clone.lock() {
                    r.sync_objects(gl, &objects, version);
                    r.sync_gizmo(gl, gizmo_lines.as_ref());
                    r.paint(gl, &camera, &RenderParams { viewport });
                }
            })),
        };

        ui.painter().add(callback);
    }

    fn draw_overlays(&self, ui: &mut Ui, rect: egui::Rect, state: &AppState) {
        let painter = ui.painter_at(rect);

        overlays::draw_axis_labels(&painter, rect, &self.camera);

        if state.store.snapshot().entities.is_empty() {
            painter.text(
                egui::pos2(rect.center().x, rect.bottom() - 20.0),
                egui::Align2::CENTER_BOTTOM,
                "Add lumber from the toolbar · LMB select · MMB orbit · RMB pan",
                egui::FontId::proportional(11.0),
                egui::Color32::from_rgb(100, 100, 110),
            );
        }
    }
}

/// Compute the world-space movement for a gizmo drag: the screen-space
/// drag delta projected along the axis direction in screen space, scaled
/// back to world units.
fn compute_drag_delta(
    camera: &ArcBallCamera,
    center: Vec3,
    axis: GizmoAxis,
    screen_delta: egui::Vec2,
    rect: egui::Rect,
) -> f32 {
    let size = ViewportPanel::viewport_size(rect);

    // Project axis direction to screen space
    let p0 = camera.project(center, size);
    let p1 = camera.project(center + axis.direction(), size);

    let (Some(p0), Some(p1)) = (p0, p1) else {
        return 0.0;
    };

    let screen_axis = egui::vec2(p1.x - p0.x, p1.y - p0.y);
    let screen_axis_len = screen_axis.length();

    if screen_axis_len < 1.0 {
        return 0.0;
    }

    // Dot product of the drag delta with the screen axis direction,
    // converted back to world units (1 world unit = screen_axis_len px)
    let projected = screen_delta.dot(screen_axis / screen_axis_len);
    projected / screen_axis_len
}
