use serde::{Deserialize, Serialize};

/// Value stored in a field whose selector matched nothing
pub const PLACEHOLDER: &str = "N/A";

/// One scraped product.
///
/// Field order is the column order of the table and of both export formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Image URL")]
    pub image_url: String,
}

impl Record {
    /// Column titles in display order
    pub const COLUMNS: [&'static str; 3] = ["Name", "Price", "Image URL"];

    pub fn new(name: impl Into<String>, price: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            image_url: image_url.into(),
        }
    }

    /// Field values in column order
    pub fn cells(&self) -> [&str; 3] {
        [&self.name, &self.price, &self.image_url]
    }
}
