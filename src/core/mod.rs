use std::sync::Arc;
use tracing::info;

pub mod messages;
pub mod session;
pub mod table;

use crate::config::AppConfig;
use crate::error::ScrapeResult;
use crate::export::ExportManager;
use crate::scraper::ScrapingEngine;

/// Long-lived pieces shared by every session of a front end
pub struct ProductScraper {
    config: AppConfig,
    engine: Arc<ScrapingEngine>,
    export_manager: ExportManager,
}

impl ProductScraper {
    /// Initialize the scraping engine and export manager from `config`
    pub fn new(config: AppConfig) -> ScrapeResult<Self> {
        info!("Initializing product scraper core");

        let engine = Arc::new(ScrapingEngine::new(&config.scraping)?);
        let export_manager = ExportManager::new(&config.export);

        Ok(Self {
            config,
            engine,
            export_manager,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Shared handle to the engine, for running scrapes on another task
    pub fn engine(&self) -> Arc<ScrapingEngine> {
        Arc::clone(&self.engine)
    }

    pub fn export_manager(&self) -> &ExportManager {
        &self.export_manager
    }
}
