//! Balanço - Financial CSV Analysis & Interactive Dashboard
//!
//! Fetches a spreadsheet export of expenses and income, cleans the currency
//! columns, aggregates totals and top categories, and shows the results in
//! an interactive dashboard.

mod charts;
mod config;
mod data;
mod format;
mod gui;
mod pipeline;
mod stats;

use eframe::egui;
use gui::BalancoApp;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 860.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("Balanço - Expenses vs Income"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Balanço",
        options,
        Box::new(|cc| Ok(Box::new(BalancoApp::new(cc)))),
    )
}
