mod analytics;
mod app;
mod color;
mod config;
mod data;
mod error;
mod format;
mod state;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use app::DashboardApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{e:#}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = DashboardConfig::load()?;

    let path = data_path(&config).context("no dataset selected")?;
    let dataset = data::loader::load_file(&path)
        .with_context(|| format!("loading {}", path.display()))?;
    log::info!(
        "Loaded {} records with columns {:?} from {}",
        dataset.len(),
        dataset.column_names,
        path.display()
    );
    if dataset.is_empty() {
        log::warn!("{} contains no records", path.display());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let state = AppState::new(Arc::new(dataset), config);
    eframe::run_native(
        "Descriptive Analytics",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("running the dashboard: {e}"))
}

/// Command-line argument, then the configured path, then a file dialog.
fn data_path(config: &DashboardConfig) -> Option<PathBuf> {
    std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| config.data_path.clone())
        .or_else(|| {
            rfd::FileDialog::new()
                .set_title("Open investment data")
                .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
                .add_filter("CSV", &["csv"])
                .add_filter("JSON", &["json"])
                .add_filter("Parquet", &["parquet", "pq"])
                .pick_file()
        })
}
