//! Board palette and egui visuals. Pure styling; no controller state lives here.

use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardPalette {
    pub app_background: egui::Color32,
    pub toolbar_background: egui::Color32,
    pub toolbar_text: egui::Color32,
    pub row_background: egui::Color32,
    pub row_text: egui::Color32,
    pub overlay_background: egui::Color32,
    pub error_fill: egui::Color32,
    pub error_stroke: egui::Color32,
}

impl Default for BoardPalette {
    fn default() -> Self {
        Self {
            app_background: egui::Color32::from_rgb(28, 30, 36),
            toolbar_background: egui::Color32::from_rgb(52, 59, 200),
            toolbar_text: egui::Color32::WHITE,
            row_background: egui::Color32::from_rgb(40, 43, 52),
            row_text: egui::Color32::from_rgb(236, 237, 241),
            overlay_background: egui::Color32::from_rgb(52, 59, 200),
            error_fill: egui::Color32::from_rgb(111, 53, 53),
            error_stroke: egui::Color32::from_rgb(175, 96, 96),
        }
    }
}

pub fn visuals_for_palette(palette: BoardPalette) -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = palette.app_background;
    visuals.window_fill = palette.app_background;
    visuals.extreme_bg_color = palette.row_background;
    visuals.selection.bg_fill = palette.toolbar_background;
    visuals.widgets.active.bg_fill = palette.toolbar_background;
    visuals.widgets.hovered.bg_fill = palette.toolbar_background.gamma_multiply(0.85);
    visuals.window_corner_radius = egui::CornerRadius::same(6);
    visuals
}
