//! Student Performance Analyzer - CSV Score Statistics & Charts
//!
//! Loads a sheet of per-student subject scores and shows summaries,
//! rankings and charts in a single window.

mod charts;
mod config;
mod data;
mod gui;
mod session;
mod stats;

use config::AppConfig;
use eframe::egui;
use gui::StudentAnalyzerApp;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> eframe::Result<()> {
    let config_path = AppConfig::resolve_path();
    let config_result = AppConfig::load_from(&config_path);
    let config = config_result.as_ref().cloned().unwrap_or_default();

    // RUST_LOG wins over the configured filter
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    fmt::Subscriber::builder().with_env_filter(env).init();

    if let Err(e) = &config_result {
        warn!(error = %e, "using default configuration");
    }
    info!(config = %config_path.display(), "startup");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([600.0, 450.0])
            .with_title("Student Performance Analyzer"),
        ..Default::default()
    };

    eframe::run_native(
        "Student Performance Analyzer",
        options,
        Box::new(move |cc| Ok(Box::new(StudentAnalyzerApp::new(cc, &config)))),
    )
}
