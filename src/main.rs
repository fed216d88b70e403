//! Poverty & Millionaire Dashboard
//!
//! Loads a per-state poverty / millionaire spreadsheet and charts it three ways.

mod charts;
mod config;
mod data;
mod gui;
mod logging;
mod views;

use eframe::egui;
use gui::DashboardApp;

fn main() -> anyhow::Result<()> {
    if let Err(err) = logging::init() {
        eprintln!("{err}");
    }

    let config = config::load_or_default();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([config.window.min_width, config.window.min_height])
            .with_title(gui::DASHBOARD_TITLE),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Poverty & Millionaire Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
    .map_err(|err| anyhow::anyhow!("Dashboard exited with error: {err}"))
}
