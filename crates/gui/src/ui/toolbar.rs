//! Toolbar actions and UI

use egui::Ui;

use shared::{SnapIncrement, ToolMode};

use crate::state::{AppState, Command};

// ── Public actions (callable from menus and shortcuts too) ───

pub fn action_add_lumber(state: &mut AppState, profile_id: &str) {
    state.store.dispatch(Command::AddEntity {
        profile_id: profile_id.to_string(),
        name: None,
    });
}

pub fn action_delete_selected(state: &mut AppState) {
    let ids = state.store.snapshot().selection.clone();
    if !ids.is_empty() {
        state.store.dispatch(Command::DeleteEntities { ids });
    }
}

/// Write the cut list to a user-chosen CSV or JSON file, best-effort
pub fn action_export_cut_list(state: &mut AppState) {
    let entities = &state.store.snapshot().entities;
    if entities.is_empty() {
        tracing::warn!("Export cut list: workspace is empty");
        return;
    }

    let Some(path) = rfd::FileDialog::new()
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .set_file_name("cut-list.csv")
        .save_file()
    else {
        return;
    };

    let contents = if path.extension().is_some_and(|ext| ext == "json") {
        crate::cutlist::export_json(entities)
    } else {
        crate::cutlist::export_csv(entities)
    };

    if let Err(e) = std::fs::write(&path, contents) {
        tracing::warn!("Failed to write cut list to {}: {e}", path.display());
    } else {
        tracing::info!("Exported cut list to {}", path.display());
    }
}

// ── Toolbar UI ───────────────────────────────────────────────

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        let tool = state.store.snapshot().tool;

        for (mode, label) in [
            (ToolMode::Translate, "Move (G)"),
            (ToolMode::Rotate, "Rotate (R)"),
            (ToolMode::Scale, "Scale (S)"),
        ] {
            if ui.selectable_label(tool == mode, label).clicked() && tool != mode {
                state.store.dispatch(Command::SetTool { tool: mode });
            }
        }

        ui.separator();

        ui.weak("Snap");
        let snap = state.store.snapshot().preferences.snap_increment;
        for increment in SnapIncrement::all() {
            let label = format!("{}″", increment.inches());
            if ui.selectable_label(snap == *increment, label).clicked() && snap != *increment {
                state.store.dispatch(Command::SetSnap { snap: *increment });
            }
        }

        ui.separator();

        ui.weak("Add");
        for profile in shared::LUMBER_PROFILES {
            if ui.button(profile.label).clicked() {
                action_add_lumber(state, profile.id);
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let has_pieces = !state.store.snapshot().entities.is_empty();
            if ui
                .add_enabled(has_pieces, egui::Button::new("Export Cut List"))
                .clicked()
            {
                action_export_cut_list(state);
            }
        });
    });
}
