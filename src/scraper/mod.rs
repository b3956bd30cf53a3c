use tracing::{debug, info};
use url::Url;

pub mod extract;
pub mod http_client;

use crate::config::ScrapingConfig;
use crate::core::messages::MessageSink;
use crate::error::{ScrapeError, ScrapeResult};
use crate::logging::LogContext;
use crate::record::Record;
use crate::{log_error, log_info, log_warn};

pub use extract::SelectorSet;

pub const DEFAULT_URL: &str = "https://example.com/products";
pub const DEFAULT_CONTAINER_SELECTOR: &str = "div.product-card";
pub const DEFAULT_NAME_SELECTOR: &str = "h2.product-title";
pub const DEFAULT_PRICE_SELECTOR: &str = "span.product-price";
pub const DEFAULT_IMAGE_SELECTOR: &str = "img.product-image";

/// Inputs of a single scrape: the page and the four selectors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeRequest {
    pub url: String,
    pub container_selector: String,
    pub name_selector: String,
    pub price_selector: String,
    pub image_selector: String,
}

impl Default for ScrapeRequest {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            container_selector: DEFAULT_CONTAINER_SELECTOR.to_string(),
            name_selector: DEFAULT_NAME_SELECTOR.to_string(),
            price_selector: DEFAULT_PRICE_SELECTOR.to_string(),
            image_selector: DEFAULT_IMAGE_SELECTOR.to_string(),
        }
    }
}

impl ScrapeRequest {
    /// Parse the page URL; only http and https are accepted
    pub fn parse_url(&self) -> ScrapeResult<Url> {
        let raw = self.url.trim();
        let url = Url::parse(raw).map_err(|e| ScrapeError::invalid_url(raw, e.to_string()))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ScrapeError::invalid_url(
                raw,
                format!("unsupported scheme '{}', expected http or https", other),
            )),
        }
    }
}

/// Fetches a page and turns its containers into records
pub struct ScrapingEngine {
    http_client: http_client::HttpClient,
}

impl ScrapingEngine {
    /// Create new scraping engine
    pub fn new(config: &ScrapingConfig) -> ScrapeResult<Self> {
        info!("Initializing scraping engine");
        let http_client = http_client::HttpClient::new(config)?;
        Ok(Self { http_client })
    }

    /// Fetch the request's page and extract one record per container.
    ///
    /// URL and selectors are checked before anything is sent. An empty vector
    /// means the page was fetched but no container matched.
    pub async fn extract(&self, request: &ScrapeRequest) -> ScrapeResult<Vec<Record>> {
        let context = LogContext::new("scraper", "extract").with_url(request.url.trim());

        let url = request.parse_url()?;
        let selectors = SelectorSet::compile(request)?;
        debug!(
            "Selectors compiled: container='{}' name='{}' price='{}' image='{}'",
            request.container_selector,
            request.name_selector,
            request.price_selector,
            request.image_selector
        );

        let page = self.http_client.fetch_page(&url).await?;
        let records = extract::extract_records(&page.body, &selectors);

        let context = context
            .with_status(page.status.to_string())
            .with_record_count(records.len())
            .with_duration(page.elapsed);
        if records.is_empty() {
            log_warn!(context, "No container matched '{}'", request.container_selector);
        } else {
            log_info!(context, "Scrape finished with {} records", records.len());
        }

        Ok(records)
    }

    /// Extract, reporting a failure to `sink` instead of returning it.
    ///
    /// Exactly one error message is emitted on failure, and the result is then
    /// empty. Success emits nothing; that is the presenter's job.
    pub async fn scrape(&self, request: &ScrapeRequest, sink: &mut dyn MessageSink) -> Vec<Record> {
        match self.extract(request).await {
            Ok(records) => records,
            Err(e) => {
                report_failure(request, &e, sink);
                Vec::new()
            }
        }
    }
}

/// Log a failed scrape and push its user-facing message
pub(crate) fn report_failure(request: &ScrapeRequest, error: &ScrapeError, sink: &mut dyn MessageSink) {
    let context = LogContext::new("scraper", "extract")
        .with_url(request.url.trim())
        .with_error_category(error.category());
    log_error!(context, "Scrape failed: {}", error);
    sink.error(error.user_message());
}
