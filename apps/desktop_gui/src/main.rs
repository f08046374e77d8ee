mod backend_bridge;
mod config;
mod controller;
mod ui;

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::config::{load_startup_config, CliArgs};
use crate::controller::events::UiEvent;
use crate::ui::HomeBoardApp;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let startup = load_startup_config(&args).context("failed to load startup config")?;

    tracing_subscriber::fmt()
        .with_env_filter(startup.log_filter.as_str())
        .init();
    tracing::info!(server_url = %startup.server_url, "starting home board");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(
        cmd_rx,
        ui_tx,
        &startup.server_url,
        startup.request_timeout(),
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Home Board")
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Home Board",
        options,
        Box::new(move |_cc| Ok(Box::new(HomeBoardApp::new(cmd_tx, ui_rx, &startup)))),
    )
    .map_err(|err| anyhow::anyhow!("desktop shell exited with error: {err}"))
}
