mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::load_settings;
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::TrackerApp;

#[derive(Parser, Debug)]
struct Args {
    /// Backend base URL; overrides streak.toml and the environment.
    #[arg(long)]
    server_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    backend_bridge::runtime::launch(settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Session Streak")
            .with_inner_size([420.0, 360.0])
            .with_min_inner_size([320.0, 260.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Session Streak",
        options,
        Box::new(|_cc| Ok(Box::new(TrackerApp::new(cmd_tx, ui_rx)))),
    )
}
