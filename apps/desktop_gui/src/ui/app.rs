use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::config::StartupConfig;
use crate::controller::{
    actions::ToolbarAction,
    events::{classify_fetch_failure, UiError, UiErrorCategory, UiErrorContext, UiEvent},
    orchestration::dispatch_backend_command,
    reducer::{
        BoardBody, BoardView, FetchOutcome, FetchTicket, FetchTrigger, LoadStatus, SettleResult,
        StudentRow,
    },
};
use crate::ui::{
    overlay::RollOverlay,
    theme::{visuals_for_palette, BoardPalette},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

pub struct HomeBoardApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    board: BoardView,
    fetch_trigger: FetchTrigger,
    pending_fetch: Option<FetchTicket>,
    overlay: RollOverlay,

    status: String,
    status_banner: Option<StatusBanner>,

    palette: BoardPalette,
    theme_applied: bool,
}

impl HomeBoardApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: &StartupConfig,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            board: BoardView::new(),
            fetch_trigger: FetchTrigger::new(startup.server_url.clone()),
            pending_fetch: None,
            overlay: RollOverlay::default(),
            status: format!("Roster server: {}", startup.server_url),
            status_banner: None,
            palette: BoardPalette::default(),
            theme_applied: false,
        }
    }

    /// Per-frame controller work: drain backend events, then evaluate the mount effect.
    fn tick(&mut self) {
        self.process_ui_events();
        self.mount_board();
    }

    /// Mount effect, evaluated every frame. Only the first evaluation per trigger fetches.
    fn mount_board(&mut self) {
        let Some(ticket) = self.board.on_mount(&self.fetch_trigger) else {
            return;
        };
        let queued = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::FetchRoster { ticket },
            &mut self.status,
        );
        if queued {
            self.pending_fetch = Some(ticket);
        } else {
            // Nothing will ever settle this ticket; fail it now so the board leaves loading.
            self.board.settle_fetch(ticket, FetchOutcome::Failed);
            let message = self.status.clone();
            self.raise_banner(message);
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::RosterSettled {
                    ticket,
                    outcome,
                    error,
                } => self.apply_settlement(ticket, outcome, error),
                UiEvent::Error(err) => {
                    let message = match err.context() {
                        UiErrorContext::FetchRoster => classify_fetch_failure(err.message()),
                        UiErrorContext::BackendStartup | UiErrorContext::General => {
                            format!("{} error: {}", err_label(err.category()), err.message())
                        }
                    };
                    tracing::warn!(context = ?err.context(), "{}", err.message());
                    if err.context() == UiErrorContext::BackendStartup {
                        // The worker is gone, so a queued fetch will never come back.
                        if let Some(ticket) = self.pending_fetch.take() {
                            self.board.settle_fetch(ticket, FetchOutcome::Failed);
                        }
                    }
                    self.status = message.clone();
                    self.raise_banner(message);
                }
            }
        }
    }

    fn apply_settlement(
        &mut self,
        ticket: FetchTicket,
        outcome: FetchOutcome,
        error: Option<UiError>,
    ) {
        if self.pending_fetch == Some(ticket) {
            self.pending_fetch = None;
        }
        if self.board.settle_fetch(ticket, outcome) != SettleResult::Applied {
            return;
        }
        let loaded = match self.board.status() {
            LoadStatus::Loaded(roster) => Some(roster.len()),
            _ => None,
        };
        match loaded {
            Some(count) => {
                self.status = format!("Roster loaded ({count} students)");
            }
            None => {
                let message = match &error {
                    Some(err) => {
                        tracing::warn!(context = ?err.context(), "{}", err.message());
                        classify_fetch_failure(err.message())
                    }
                    None => "Roster request failed".to_string(),
                };
                self.status = message.clone();
                self.raise_banner(message);
            }
        }
    }

    fn raise_banner(&mut self, message: String) {
        self.status_banner = Some(StatusBanner {
            severity: StatusBannerSeverity::Error,
            message,
        });
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if !self.theme_applied {
            ctx.set_visuals(visuals_for_palette(self.palette));
            self.theme_applied = true;
        }
    }

    fn show_toolbar(&mut self, ctx: &egui::Context) {
        let palette = self.palette;
        let mut actions = Vec::new();

        egui::TopBottomPanel::top("home_board_toolbar")
            .frame(
                egui::Frame::NONE
                    .fill(palette.toolbar_background)
                    .inner_margin(egui::Margin::symmetric(14, 6)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let toolbar = self.board.toolbar_mut();
                    let header = ui.add(
                        egui::Label::new(
                            egui::RichText::new("First Name")
                                .strong()
                                .color(palette.toolbar_text),
                        )
                        .sense(egui::Sense::click()),
                    );
                    if header.clicked() {
                        actions.push(toolbar.click_column_header());
                    }

                    ui.add_space(24.0);
                    if toolbar.show_search_field() {
                        let response = ui.add(
                            egui::TextEdit::singleline(toolbar.draft_mut())
                                .hint_text("Search")
                                .desired_width(220.0),
                        );
                        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
                        {
                            actions.push(toolbar.submit_search());
                        }
                        if ui.small_button("✕").clicked() {
                            actions.push(toolbar.click_clear());
                        }
                    } else {
                        let label = ui.add(
                            egui::Label::new(
                                egui::RichText::new("Search").color(palette.toolbar_text),
                            )
                            .sense(egui::Sense::click()),
                        );
                        if label.clicked() {
                            toolbar.click_search_label();
                        }
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .button(egui::RichText::new("Start Roll").strong())
                            .clicked()
                        {
                            actions.push(toolbar.click_start_roll());
                        }
                    });
                });
            });

        for action in actions {
            self.apply_toolbar_action(action);
        }
    }

    fn apply_toolbar_action(&mut self, action: ToolbarAction) {
        tracing::debug!(action = action.name(), "toolbar action");
        self.board.apply_toolbar_action(action);
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("home_board_status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&self.status).small());
            });
        });
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let (fill, stroke) = match banner.severity {
                StatusBannerSeverity::Error => (
                    self.palette.error_fill,
                    egui::Stroke::new(1.0, self.palette.error_stroke),
                ),
            };

            egui::Frame::NONE
                .fill(fill)
                .stroke(stroke)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
            ui.add_space(8.0);
        }
    }

    fn show_board(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_status_banner(ui);

            let palette = self.palette;
            let render = self.board.render();
            match &render.body {
                BoardBody::Empty => {}
                BoardBody::Loading => {
                    ui.centered_and_justified(|ui| {
                        ui.add(egui::Spinner::new().size(32.0));
                    });
                }
                BoardBody::Error => {
                    ui.centered_and_justified(|ui| {
                        ui.label("Failed to load");
                    });
                }
                BoardBody::Rows(rows) => {
                    egui::ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            for row in rows {
                                render_student_row(ui, palette, row);
                            }
                        });
                }
            }
        });
    }
}

fn render_student_row(ui: &mut egui::Ui, palette: BoardPalette, row: &StudentRow<'_>) {
    egui::Frame::NONE
        .fill(palette.row_background)
        .corner_radius(6.0)
        .inner_margin(egui::Margin::symmetric(14, 10))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(row.student.full_name())
                        .strong()
                        .color(palette.row_text),
                );
                if row.is_roll_mode {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(egui::RichText::new("○").color(palette.row_text));
                    });
                }
            });
        });
    ui.add_space(4.0);
}

impl eframe::App for HomeBoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_theme_if_needed(ctx);
        self.tick();

        self.show_toolbar(ctx);

        let (overlay_active, student_count) = {
            let render = self.board.render();
            (render.overlay_active, render.row_count())
        };
        if let Some(action) = self
            .overlay
            .show(ctx, self.palette, overlay_active, student_count)
        {
            self.board.apply_overlay_action(action);
        }

        self.show_status_bar(ctx);
        self.show_board(ctx);

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
