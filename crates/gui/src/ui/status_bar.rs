use egui::Ui;

use shared::ToolMode;

use crate::cutlist::{generate_cut_list, total_board_feet};
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui| {
        let snapshot = state.store.snapshot();

        ui.weak(format!("Pieces: {}", snapshot.entities.len()));

        ui.separator();

        let tool = match snapshot.tool {
            ToolMode::Translate => "Move",
            ToolMode::Rotate => "Rotate",
            ToolMode::Scale => "Scale",
        };
        ui.label(format!(
            "{tool} · snap {}″",
            snapshot.preferences.snap_increment.inches()
        ));

        ui.separator();

        let selected = snapshot.selection.len();
        if selected > 0 {
            ui.label(format!("Selected: {selected}"));
        } else {
            ui.weak("Ready");
        }

        let rows = generate_cut_list(&snapshot.entities);
        if !rows.is_empty() {
            ui.separator();
            ui.weak(format!("{:.2} bd ft", total_board_feet(&rows)));
        }

        // Right-aligned version
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak("Woodshop v0.1");
        });
    });
}
