//! Main application module

mod keyboard;
mod menus;
mod styles;

use eframe::egui;

use shared::Theme;

use crate::state::{AppState, Command};
use crate::ui::{cutlist_panel, inspector, outliner, status_bar, toolbar};
use crate::viewport::ViewportPanel;

/// Main application
pub struct WorkshopApp {
    state: AppState,
    viewport: ViewportPanel,
    /// Last persisted store version (saves are coalesced to one per frame)
    last_saved_version: u64,
    /// Last applied theme (to detect preference changes)
    last_theme: Theme,
}

impl WorkshopApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        initial_snapshot: Option<shared::Snapshot>,
    ) -> Self {
        let mut state = AppState::default();

        // Hydrate once at startup: CLI argument takes priority, then autosave
        if let Some(snapshot) = initial_snapshot {
            state.store.dispatch(Command::Hydrate { snapshot });
        } else if let Some(snapshot) = crate::state::BuilderStore::load_autosave() {
            state.store.dispatch(Command::Hydrate { snapshot });
            tracing::info!("Loaded autosaved workspace");
        }

        let theme = state.store.snapshot().preferences.theme;
        styles::configure_styles(&cc.egui_ctx, theme);

        let mut viewport = ViewportPanel::new();

        // Initialize GL renderer if glow context is available
        if let Some(gl) = cc.gl.as_ref() {
            viewport.init_gl(gl);
        }

        let last_saved_version = state.store.version();

        Self {
            state,
            viewport,
            last_saved_version,
            last_theme: theme,
        }
    }
}

impl eframe::App for WorkshopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply theme if the preference changed
        let theme = self.state.store.snapshot().preferences.theme;
        if theme != self.last_theme {
            styles::configure_styles(ctx, theme);
            self.last_theme = theme;
        }

        // Autosave at most once per frame, only when the store changed.
        // A failed save is logged inside and never touches the snapshot.
        let current_version = self.state.store.version();
        if current_version != self.last_saved_version {
            self.state.store.autosave();
            self.last_saved_version = current_version;
        }

        keyboard::handle_keyboard(ctx, &mut self.state, &mut self.viewport);

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::file_menu(ui, &mut self.state);
                menus::edit_menu(ui, &mut self.state);
                menus::create_menu(ui, &mut self.state);
                menus::view_menu(ui, &mut self.state, &mut self.viewport);
            });
        });

        // ── Toolbar ───────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                toolbar::show(ui, &mut self.state);
            });

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_bar::show(ui, &self.state);
            });

        // ── Left panel: Outliner ─────────────────────────────
        if self.state.panels.outliner {
            egui::SidePanel::left("outliner")
                .default_width(220.0)
                .width_range(150.0..=400.0)
                .resizable(true)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)),
                )
                .show(ctx, |ui| {
                    outliner::show(ui, &mut self.state);
                });
        }

        // ── Right panel: Inspector + Cut list ────────────────
        self.show_right_panel(ctx);

        // ── Central panel: 3D viewport ───────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport.show(ui, &mut self.state);
            });
    }
}

impl WorkshopApp {
    fn show_right_panel(&mut self, ctx: &egui::Context) {
        let show_inspector = self.state.panels.inspector;
        let show_cut_list = self.state.panels.cut_list;
        if !show_inspector && !show_cut_list {
            return;
        }

        egui::SidePanel::right("right_panel")
            .default_width(290.0)
            .width_range(220.0..=500.0)
            .resizable(true)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)),
            )
            .show(ctx, |ui| {
                if show_inspector && show_cut_list {
                    let total = ui.available_height();
                    let inspector_height = (total * 0.55).max(120.0);

                    egui::ScrollArea::vertical()
                        .id_salt("inspector_scroll")
                        .max_height(inspector_height)
                        .show(ui, |ui| {
                            inspector::show(ui, &mut self.state);
                        });

                    ui.add_space(2.0);
                    ui.separator();
                    ui.add_space(2.0);

                    cutlist_panel::show(ui, &mut self.state);
                } else if show_inspector {
                    egui::ScrollArea::vertical()
                        .id_salt("inspector_scroll_full")
                        .show(ui, |ui| {
                            inspector::show(ui, &mut self.state);
                        });
                } else {
                    cutlist_panel::show(ui, &mut self.state);
                }
            });
    }
}
