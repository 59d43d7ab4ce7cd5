//! Inspector panel - properties of the primary selected piece

use egui::Ui;

use shared::{board_feet, resolve_profile, resolve_species};

use crate::state::{short_id, AppState, Command};
use crate::units::format_inches;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Inspector");
    ui.separator();

    let Some(primary) = state.store.snapshot().primary_selection().cloned() else {
        ui.weak("Nothing selected");
        return;
    };
    let Some(entity) = state.store.snapshot().entity(&primary).cloned() else {
        return;
    };

    let mut commands: Vec<Command> = Vec::new();

    // ── Identity ──────────────────────────────────────────────
    ui.horizontal(|ui| {
        ui.label("Name");
        let mut name = entity.name.clone();
        let response = ui.text_edit_singleline(&mut name);
        if response.lost_focus() && name != entity.name {
            commands.push(Command::UpdateEntity {
                id: entity.id.clone(),
                name: Some(name),
                profile_id: None,
                locked: None,
                visible: None,
            });
        }
    });
    ui.weak(format!("id {}", short_id(&entity.id)));

    let selected_count = state.store.snapshot().selection.len();
    if selected_count > 1 {
        ui.weak(format!("{selected_count} selected — editing primary"));
    }

    ui.add_space(4.0);

    // ── Profile ───────────────────────────────────────────────
    match resolve_profile(&entity.profile_id) {
        Some(profile) => {
            let species = resolve_species(profile.species);
            ui.label(format!("{} · {}", profile.label, species.label));
            let size = profile.size_inches;
            ui.weak(format!(
                "{} × {} × {}",
                format_inches(size.width),
                format_inches(size.height),
                format_inches(size.length),
            ));
            if let Some(notes) = profile.notes {
                ui.weak(notes);
            }
            let bf = board_feet(profile, entity.transform.scale);
            ui.label(format!("Board feet: {:.2}", bf));
        }
        None => {
            ui.colored_label(
                egui::Color32::from_rgb(220, 120, 80),
                format!("Unknown profile '{}' — not shown in scene", entity.profile_id),
            );
        }
    }

    ui.add_space(4.0);
    ui.separator();

    // ── Flags ─────────────────────────────────────────────────
    ui.horizontal(|ui| {
        let mut visible = entity.visible;
        if ui.checkbox(&mut visible, "Visible").changed() {
            commands.push(Command::ToggleVisibility { id: entity.id.clone() });
        }
        let mut locked = entity.locked;
        if ui.checkbox(&mut locked, "Locked").changed() {
            commands.push(Command::ToggleLock { id: entity.id.clone() });
        }
    });

    ui.add_space(4.0);

    // ── Transform (inches / degrees) ──────────────────────────
    let mut transform = entity.transform.clone();
    let mut transform_changed = false;

    ui.add_enabled_ui(!entity.locked, |ui| {
        egui::Grid::new("transform_grid")
            .num_columns(4)
            .spacing([6.0, 4.0])
            .show(ui, |ui| {
                ui.label("Position (in)");
                for axis in 0..3 {
                    transform_changed |= ui
                        .add(
                            egui::DragValue::new(&mut transform.position[axis])
                                .speed(0.25)
                                .fixed_decimals(3),
                        )
                        .changed();
                }
                ui.end_row();

                ui.label("Rotation (°)");
                for axis in 0..3 {
                    transform_changed |= ui
                        .add(
                            egui::DragValue::new(&mut transform.rotation[axis])
                                .speed(1.0)
                                .fixed_decimals(2),
                        )
                        .changed();
                }
                ui.end_row();

                ui.label("Scale");
                for axis in 0..3 {
                    transform_changed |= ui
                        .add(
                            egui::DragValue::new(&mut transform.scale[axis])
                                .speed(0.05)
                                .range(0.01..=100.0)
                                .fixed_decimals(3),
                        )
                        .changed();
                }
                ui.end_row();
            });
    });

    if transform_changed {
        commands.push(Command::SetTransform {
            id: entity.id.clone(),
            transform,
        });
    }

    for command in commands {
        state.store.dispatch(command);
    }
}
