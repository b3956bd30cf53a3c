use anyhow::Result;
use tracing::{error, info};

use product_scraper::config::AppConfig;
use product_scraper::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load()?;

    init_logging(&config.logging)?;
    info!("Starting Product Scraper v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = product_scraper::ui::run(config, tokio::runtime::Handle::current()) {
        error!("GUI execution failed: {}", e);
        return Err(e);
    }

    info!("Product Scraper shutting down");
    Ok(())
}
