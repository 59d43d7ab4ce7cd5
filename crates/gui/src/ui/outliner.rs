//! Outliner panel - lists placed pieces with visibility/lock controls.
//!
//! Locked pieces are unselectable in the viewport but stay listed here so
//! they can be unlocked or hidden by id.

use egui::Ui;

use crate::state::{display_name, AppState, Command};

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading("Pieces");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .small_button("➕")
                .on_hover_text("Add default lumber")
                .clicked()
            {
                state.store.dispatch(Command::AddEntity {
                    profile_id: shared::default_profile_id().to_string(),
                    name: None,
                });
            }
            let count = state.store.snapshot().entities.len();
            ui.weak(format!("({count})"));
        });
    });
    ui.separator();

    if state.store.snapshot().entities.is_empty() {
        ui.add_space(20.0);
        ui.vertical_centered(|ui| {
            ui.weak("No lumber placed");
            ui.add_space(4.0);
            if ui.button("Add a 2×4").clicked() {
                state.store.dispatch(Command::AddEntity {
                    profile_id: shared::default_profile_id().to_string(),
                    name: None,
                });
            }
        });
        return;
    }

    // Collect row info to avoid borrow conflicts with dispatch below
    let rows: Vec<(String, String, bool, bool, bool)> = state
        .store
        .snapshot()
        .entities
        .iter()
        .map(|entity| {
            (
                entity.id.clone(),
                display_name(entity),
                state.store.snapshot().selection.contains(&entity.id),
                entity.visible,
                entity.locked,
            )
        })
        .collect();

    let mut commands: Vec<Command> = Vec::new();

    egui::ScrollArea::vertical()
        .id_salt("outliner_scroll")
        .show(ui, |ui| {
            for (id, name, selected, visible, locked) in &rows {
                ui.horizontal(|ui| {
                    let label_color = if !visible {
                        egui::Color32::from_rgb(100, 100, 100)
                    } else if *selected {
                        egui::Color32::from_rgb(235, 180, 110)
                    } else {
                        egui::Color32::from_rgb(200, 200, 200)
                    };

                    let response = ui.selectable_label(
                        *selected,
                        egui::RichText::new(name).color(label_color),
                    );
                    if response.clicked() {
                        let additive = ui.input(|i| i.modifiers.command);
                        let current = &state.store.snapshot().selection;
                        let ids = if additive {
                            let mut next = current.clone();
                            if let Some(pos) = next.iter().position(|s| s == id) {
                                next.remove(pos);
                            } else {
                                next.push(id.clone());
                            }
                            next
                        } else {
                            vec![id.clone()]
                        };
                        commands.push(Command::SetSelection { ids });
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .small_button("✖")
                            .on_hover_text("Delete piece")
                            .clicked()
                        {
                            commands.push(Command::DeleteEntities { ids: vec![id.clone()] });
                        }

                        let lock_icon = if *locked { "🔒" } else { "🔓" };
                        if ui
                            .small_button(lock_icon)
                            .on_hover_text("Toggle lock")
                            .clicked()
                        {
                            commands.push(Command::ToggleLock { id: id.clone() });
                        }

                        let eye_icon = if *visible { "👁" } else { "—" };
                        if ui
                            .small_button(eye_icon)
                            .on_hover_text("Toggle visibility")
                            .clicked()
                        {
                            commands.push(Command::ToggleVisibility { id: id.clone() });
                        }
                    });
                });
            }
        });

    for command in commands {
        state.store.dispatch(command);
    }
}
