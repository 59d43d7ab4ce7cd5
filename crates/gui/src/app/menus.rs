//! Menu bar

use eframe::egui;

use shared::Snapshot;

use crate::state::{AppState, BuilderStore, Command};
use crate::ui::toolbar;
use crate::viewport::ViewportPanel;

pub fn file_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button("File", |ui| {
        if ui.button("New workspace").clicked() {
            state.store.dispatch(Command::Hydrate {
                snapshot: Snapshot::default(),
            });
            ui.close_menu();
        }

        if ui.button("Open…").clicked() {
            open_project(state);
            ui.close_menu();
        }

        if ui.button("Save as…").clicked() {
            save_project(state);
            ui.close_menu();
        }

        ui.separator();

        if ui.button("Export cut list…").clicked() {
            toolbar::action_export_cut_list(state);
            ui.close_menu();
        }
    });
}

pub fn edit_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button("Edit", |ui| {
        let can_undo = state.store.can_undo();
        if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
            state.store.dispatch(Command::Undo);
            ui.close_menu();
        }

        let can_redo = state.store.can_redo();
        if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
            state.store.dispatch(Command::Redo);
            ui.close_menu();
        }

        ui.separator();

        let has_selection = !state.store.snapshot().selection.is_empty();
        if ui
            .add_enabled(has_selection, egui::Button::new("Delete selected"))
            .clicked()
        {
            toolbar::action_delete_selected(state);
            ui.close_menu();
        }
    });
}

pub fn create_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button("Create", |ui| {
        for profile in shared::LUMBER_PROFILES {
            if ui.button(profile.label).clicked() {
                toolbar::action_add_lumber(state, profile.id);
                ui.close_menu();
            }
        }
    });
}

pub fn view_menu(ui: &mut egui::Ui, state: &mut AppState, viewport: &mut ViewportPanel) {
    ui.menu_button("View", |ui| {
        ui.checkbox(&mut state.panels.outliner, "Outliner");
        ui.checkbox(&mut state.panels.inspector, "Inspector");
        ui.checkbox(&mut state.panels.cut_list, "Cut list");

        ui.separator();

        if ui.button("Reset camera").clicked() {
            viewport.reset_camera();
            ui.close_menu();
        }
    });
}

fn open_project(state: &mut AppState) {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("Woodshop project", &["json"])
        .pick_file()
    else {
        return;
    };
    match BuilderStore::load_from(&path) {
        Some(snapshot) => {
            state.store.dispatch(Command::Hydrate { snapshot });
            tracing::info!("Opened project {}", path.display());
        }
        None => tracing::warn!("Could not load project from {}", path.display()),
    }
}

fn save_project(state: &mut AppState) {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("Woodshop project", &["json"])
        .set_file_name("workspace.json")
        .save_file()
    else {
        return;
    };
    state.store.save_to(&path);
    tracing::info!("Saved project to {}", path.display());
}
