//! Product Scraper - selector-driven product extraction from a single web page
//!
//! This library provides:
//! - An HTTP fetch plus CSS-selector extraction engine producing [`Record`]s
//! - A presenter session with user-facing status messages
//! - CSV and JSON export of the scraped table
//! - Configuration and logging shared by the GUI and the CLI

pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod logging;
pub mod record;
pub mod scraper;

#[cfg(feature = "ui")]
pub mod ui;

// Re-export main types for convenience
pub use crate::config::AppConfig;
pub use crate::core::session::ScrapeSession;
pub use crate::core::ProductScraper;
pub use crate::error::{ScrapeError, ScrapeResult};
pub use crate::record::Record;
pub use crate::scraper::{ScrapeRequest, ScrapingEngine};
