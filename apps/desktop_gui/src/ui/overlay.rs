//! Roll overlay shell. Stays mounted for the app's lifetime and only shows while active.

use eframe::egui;

use crate::controller::actions::OverlayAction;
use crate::ui::theme::BoardPalette;

#[derive(Debug, Default)]
pub struct RollOverlay {
    was_active: bool,
    times_opened: u32,
}

impl RollOverlay {
    pub fn times_opened(&self) -> u32 {
        self.times_opened
    }

    /// Tracks activation edges. Returns true when the overlay just became active.
    pub fn observe(&mut self, is_active: bool) -> bool {
        let opened = is_active && !self.was_active;
        if opened {
            self.times_opened = self.times_opened.saturating_add(1);
        }
        self.was_active = is_active;
        opened
    }

    pub fn show(
        &mut self,
        ctx: &egui::Context,
        palette: BoardPalette,
        is_active: bool,
        student_count: usize,
    ) -> Option<OverlayAction> {
        if self.observe(is_active) {
            tracing::debug!(times_opened = self.times_opened, "roll overlay opened");
        }
        if !is_active {
            return None;
        }

        let mut action = None;
        egui::TopBottomPanel::bottom("roll_overlay")
            .frame(
                egui::Frame::NONE
                    .fill(palette.overlay_background)
                    .inner_margin(egui::Margin::symmetric(18, 14)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new("Attendance")
                            .strong()
                            .size(18.0)
                            .color(palette.toolbar_text),
                    );
                    ui.label(
                        egui::RichText::new(format!("{student_count} students on the board"))
                            .color(palette.toolbar_text),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Exit").clicked() {
                            action = Some(OverlayAction::Exit);
                        }
                    });
                });
            });
        action
    }
}
