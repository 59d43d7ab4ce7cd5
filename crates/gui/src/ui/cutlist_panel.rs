//! Cut list panel - aggregated lumber report

use egui::Ui;

use crate::cutlist::{generate_cut_list, total_board_feet};
use crate::state::AppState;
use crate::ui::toolbar;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Cut List");
    ui.separator();

    let rows = generate_cut_list(&state.store.snapshot().entities);

    if rows.is_empty() {
        ui.weak("Nothing to cut yet");
        return;
    }

    egui::ScrollArea::vertical()
        .id_salt("cutlist_scroll")
        .show(ui, |ui| {
            egui::Grid::new("cutlist_grid")
                .num_columns(4)
                .striped(true)
                .spacing([10.0, 3.0])
                .show(ui, |ui| {
                    ui.strong("Profile");
                    ui.strong("Qty");
                    ui.strong("Length");
                    ui.strong("Bd ft");
                    ui.end_row();

                    for row in &rows {
                        ui.vertical(|ui| {
                            ui.label(&row.label);
                            ui.weak(&row.species);
                        });
                        ui.label(row.count.to_string());
                        ui.label(format!("{}″", row.length_inches));
                        ui.label(format!("{:.2}", row.board_feet));
                        ui.end_row();
                    }
                });
        });

    ui.separator();
    ui.horizontal(|ui| {
        ui.strong(format!("Total: {:.2} bd ft", total_board_feet(&rows)));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Export…").clicked() {
                toolbar::action_export_cut_list(state);
            }
        });
    });
}
