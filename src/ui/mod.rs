//! Desktop front end built on eframe/egui.

use anyhow::{anyhow, Result};
use eframe::egui;
use tokio::runtime::Handle;
use tracing::info;

pub mod app;
pub mod components;
pub mod results_viewer;
pub mod theme;

pub use app::ScraperApp;

use crate::config::AppConfig;
use crate::core::ProductScraper;

const WINDOW_TITLE: &str = "Product Scraper";

/// Open the main window and block until it is closed.
///
/// Scrapes are spawned onto `runtime`, so it must outlive the window.
pub fn run(config: AppConfig, runtime: Handle) -> Result<()> {
    let core = ProductScraper::new(config)?;
    let ui_config = core.config().ui.clone();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([ui_config.window_width, ui_config.window_height])
            .with_min_inner_size([640.0, 480.0])
            .with_resizable(true),
        ..Default::default()
    };

    info!("Starting GUI");
    eframe::run_native(
        WINDOW_TITLE,
        native_options,
        Box::new(move |_cc| Box::new(ScraperApp::new(core, runtime))),
    )
    .map_err(|e| anyhow!("Failed to start GUI: {}", e))
}
