//! Keyboard shortcut handling

use eframe::egui;

use shared::ToolMode;

use crate::state::{AppState, Command};
use crate::ui::toolbar;
use crate::viewport::ViewportPanel;

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(ctx: &egui::Context, state: &mut AppState, viewport: &mut ViewportPanel) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    let mut commands: Vec<Command> = Vec::new();

    ctx.input(|i| {
        // Ctrl+Z — undo
        if i.modifiers.command && i.key_pressed(egui::Key::Z) && !i.modifiers.shift {
            commands.push(Command::Undo);
        }
        // Ctrl+Shift+Z or Ctrl+Y — redo
        if (i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::Z))
            || (i.modifiers.command && i.key_pressed(egui::Key::Y))
        {
            commands.push(Command::Redo);
        }
        // G/R/S — tool modes
        if i.key_pressed(egui::Key::G) && !i.modifiers.command {
            commands.push(Command::SetTool { tool: ToolMode::Translate });
        }
        if i.key_pressed(egui::Key::R) && !i.modifiers.command {
            commands.push(Command::SetTool { tool: ToolMode::Rotate });
        }
        if i.key_pressed(egui::Key::S) && !i.modifiers.command {
            commands.push(Command::SetTool { tool: ToolMode::Scale });
        }
        // Escape — clear selection
        if i.key_pressed(egui::Key::Escape) {
            commands.push(Command::SetSelection { ids: Vec::new() });
        }
        // Delete/Backspace — remove selected pieces
        if i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace) {
            let ids = state.store.snapshot().selection.clone();
            if !ids.is_empty() {
                commands.push(Command::DeleteEntities { ids });
            }
        }
        // Ctrl+A — select all
        if i.modifiers.command && i.key_pressed(egui::Key::A) {
            let ids = state
                .store
                .snapshot()
                .entities
                .iter()
                .map(|e| e.id.clone())
                .collect();
            commands.push(Command::SetSelection { ids });
        }
        // Shift+A — quick-add the default profile
        if i.modifiers.shift && i.key_pressed(egui::Key::A) && !i.modifiers.command {
            commands.push(Command::AddEntity {
                profile_id: shared::default_profile_id().to_string(),
                name: None,
            });
        }
    });

    for command in commands {
        state.store.dispatch(command);
    }

    // F — focus camera on the primary selection
    if ctx.input(|i| i.key_pressed(egui::Key::F) && !i.modifiers.command) {
        if let Some(id) = state.store.snapshot().primary_selection() {
            if let Some(position) = viewport.object_position(id) {
                viewport.focus_on(position);
            }
        }
    }

    // Ctrl+E — export cut list
    if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::E)) {
        toolbar::action_export_cut_list(state);
    }
}
