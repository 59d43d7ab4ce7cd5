//! Application style configuration

use eframe::egui;

use shared::Theme;

/// Configure application styles for the active theme
pub fn configure_styles(ctx: &egui::Context, theme: Theme) {
    let mut style = (*ctx.style()).clone();

    style.visuals = match theme {
        Theme::Dark => egui::Visuals::dark(),
        Theme::Light => egui::Visuals::light(),
    };

    // Rounding
    style.visuals.window_corner_radius = egui::CornerRadius::same(6);
    style.visuals.menu_corner_radius = egui::CornerRadius::same(4);
    style.visuals.widgets.noninteractive.corner_radius = egui::CornerRadius::same(3);
    style.visuals.widgets.inactive.corner_radius = egui::CornerRadius::same(3);
    style.visuals.widgets.hovered.corner_radius = egui::CornerRadius::same(3);
    style.visuals.widgets.active.corner_radius = egui::CornerRadius::same(3);

    // Spacing
    style.spacing.item_spacing = egui::vec2(6.0, 4.0);
    style.spacing.button_padding = egui::vec2(6.0, 3.0);
    style.spacing.menu_margin = egui::Margin::same(4);

    if theme == Theme::Dark {
        style.visuals.panel_fill = egui::Color32::from_rgb(30, 30, 34);
        style.visuals.window_fill = egui::Color32::from_rgb(35, 35, 40);
        // Warm selection highlight to match the lumber palette
        style.visuals.selection.bg_fill = egui::Color32::from_rgb(140, 95, 40);
    }

    ctx.set_style(style);
}
