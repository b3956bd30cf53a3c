//! Selector compilation and the per-container extraction loop.
//!
//! Nothing in here touches the network: the engine hands over a fetched
//! body and gets records back. The parsed document lives only for the
//! duration of [`extract_records`].

use ::scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::{ScrapeError, ScrapeResult, SelectorRole};
use crate::record::{Record, PLACEHOLDER};
use super::ScrapeRequest;

/// The four selectors of a request, compiled
#[derive(Debug, Clone)]
pub struct SelectorSet {
    pub container: Selector,
    pub name: Selector,
    pub price: Selector,
    pub image: Selector,
}

impl SelectorSet {
    /// Compile every selector of the request, failing on the first bad one
    pub fn compile(request: &ScrapeRequest) -> ScrapeResult<Self> {
        Ok(Self {
            container: parse_selector(SelectorRole::Container, &request.container_selector)?,
            name: parse_selector(SelectorRole::Name, &request.name_selector)?,
            price: parse_selector(SelectorRole::Price, &request.price_selector)?,
            image: parse_selector(SelectorRole::Image, &request.image_selector)?,
        })
    }
}

/// Parse a CSS selector, tagging a failure with the selector's role
pub fn parse_selector(role: SelectorRole, selector: &str) -> ScrapeResult<Selector> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector {
        role,
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Parse `html` and build one record per container match
pub fn extract_records(html: &str, selectors: &SelectorSet) -> Vec<Record> {
    let document = Html::parse_document(html);

    let records: Vec<Record> = document
        .select(&selectors.container)
        .map(|container| extract_record(container, selectors))
        .collect();

    debug!("Extracted {} records", records.len());
    records
}

/// Build the record for a single container
pub fn extract_record(container: ElementRef<'_>, selectors: &SelectorSet) -> Record {
    let name = find_first(container, &selectors.name).map(stripped_text);
    let price = find_first(container, &selectors.price).map(stripped_text);
    let image_url = find_first(container, &selectors.image)
        .and_then(|image| image.value().attr("src"))
        .map(str::to_string);

    Record {
        name: or_placeholder(name),
        price: or_placeholder(price),
        image_url: or_placeholder(image_url),
    }
}

/// First descendant of `scope` matching `selector`
pub fn find_first<'a>(scope: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    scope.select(selector).next()
}

/// Text of an element with every text node trimmed and blank nodes dropped
pub fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

/// Substitute the placeholder for a missing value
pub fn or_placeholder(value: Option<String>) -> String {
    value.unwrap_or_else(|| PLACEHOLDER.to_string())
}
