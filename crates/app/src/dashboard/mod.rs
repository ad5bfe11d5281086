//! egui dashboard: threshold-highlighted table, risk bar chart, and
//! probability/severity scatter plot, all driven from one render pass.

mod state;
mod ui;

use anyhow::{anyhow, Result};
use eframe::egui;

use crate::cli::DashboardOptions;
use state::DashboardApp;

pub fn run(options: DashboardOptions) -> Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_title("NEO Risk Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "NEO Risk Dashboard",
        native_options,
        Box::new(move |_cc| {
            DashboardApp::new(options)
                .map(|app| Box::new(app) as Box<dyn eframe::App>)
                .map_err(|err| err.into())
        }),
    )
    .map_err(|err| anyhow!("dashboard terminated: {err}"))
}
