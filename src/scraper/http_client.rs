use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::ScrapingConfig;
use crate::error::{ScrapeError, ScrapeResult};

/// Thin wrapper over a reqwest client issuing one plain GET per page
pub struct HttpClient {
    client: Client,
}

/// Body of a successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
    pub elapsed: Duration,
}

impl HttpClient {
    /// Create new HTTP client.
    ///
    /// No default headers and no cookie store; the only knob is the optional
    /// request timeout.
    pub fn new(config: &ScrapingConfig) -> ScrapeResult<Self> {
        let mut builder = Client::builder();
        if let Some(seconds) = config.request_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        let client = builder
            .build()
            .map_err(|e| ScrapeError::config(format!("failed to build HTTP client: {}", e)))?;

        info!(
            "HTTP client initialized (timeout: {})",
            config
                .request_timeout_seconds
                .map(|s| format!("{}s", s))
                .unwrap_or_else(|| "none".to_string())
        );

        Ok(Self { client })
    }

    /// GET `url` and return its body; anything but 200 is a status failure
    pub async fn fetch_page(&self, url: &Url) -> ScrapeResult<FetchedPage> {
        let start_time = Instant::now();
        debug!("HTTP GET: {}", url);

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| ScrapeError::network(url.as_str(), e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("HTTP GET {} returned {}", url, status);
            return Err(ScrapeError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| {
            if e.is_decode() {
                ScrapeError::parse(format!("could not decode body of {}: {}", url, e))
            } else {
                ScrapeError::network(url.as_str(), e.to_string())
            }
        })?;

        let elapsed = start_time.elapsed();
        debug!("HTTP GET {} -> {} bytes in {}ms", url, body.len(), elapsed.as_millis());

        Ok(FetchedPage {
            status: status.as_u16(),
            body,
            elapsed,
        })
    }
}
