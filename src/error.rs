use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Failure taxonomy for a scrape and its exports
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to fetch the URL. Status code: {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Failed to parse response: {message}")]
    Parse { message: String },

    #[error("Invalid {role} selector '{selector}': {message}")]
    Selector {
        role: SelectorRole,
        selector: String,
        message: String,
    },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("File write failed: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Which of the four request selectors a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorRole {
    Container,
    Name,
    Price,
    Image,
}

impl fmt::Display for SelectorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorRole::Container => write!(f, "container"),
            SelectorRole::Name => write!(f, "name"),
            SelectorRole::Price => write!(f, "price"),
            SelectorRole::Image => write!(f, "image"),
        }
    }
}

/// Discriminant of [`ScrapeError`], for callers that branch on the failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidUrl,
    Status,
    Network,
    Parse,
    Selector,
    Export,
    Io,
    Config,
}

impl ScrapeError {
    /// Create an invalid URL error
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into(), reason: reason.into() }
    }

    /// Create a network error
    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network { url: url.into(), message: message.into() }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse { message: message.into() }
    }

    /// Create an export error
    pub fn export(message: impl Into<String>) -> Self {
        Self::Export { message: message.into() }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidUrl { .. } => ErrorKind::InvalidUrl,
            Self::HttpStatus { .. } => ErrorKind::Status,
            Self::Network { .. } => ErrorKind::Network,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::Selector { .. } => ErrorKind::Selector,
            Self::Export { .. } => ErrorKind::Export,
            Self::Io { .. } => ErrorKind::Io,
            Self::Config { .. } => ErrorKind::Config,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self.kind() {
            ErrorKind::InvalidUrl | ErrorKind::Selector => "input",
            ErrorKind::Status | ErrorKind::Network => "network",
            ErrorKind::Parse => "parse",
            ErrorKind::Export | ErrorKind::Io => "export",
            ErrorKind::Config => "configuration",
        }
    }

    /// Text shown to the user for a failed scrape.
    ///
    /// A bad status is reported as is; everything else is prefixed the way
    /// an unexpected failure is.
    pub fn user_message(&self) -> String {
        match self {
            Self::HttpStatus { .. } => self.to_string(),
            other => format!("An error occurred: {}", other),
        }
    }
}

/// Result type alias for the crate
pub type ScrapeResult<T> = std::result::Result<T, ScrapeError>;

impl From<csv::Error> for ScrapeError {
    fn from(err: csv::Error) -> Self {
        Self::Export { message: err.to_string() }
    }
}

impl From<serde_json::Error> for ScrapeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Export { message: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_wording() {
        let error = ScrapeError::HttpStatus { url: "https://example.com".into(), status: 404 };
        assert_eq!(error.kind(), ErrorKind::Status);
        assert_eq!(error.user_message(), "Failed to fetch the URL. Status code: 404");
    }

    #[test]
    fn test_other_errors_are_prefixed() {
        let error = ScrapeError::network("https://example.com", "connection refused");
        assert_eq!(error.category(), "network");
        assert!(error.user_message().starts_with("An error occurred: "));
        assert!(error.user_message().contains("connection refused"));
    }

    #[test]
    fn test_client_setup_failure_is_configuration() {
        let error = ScrapeError::config("failed to build HTTP client: bad TLS backend");
        assert_eq!(error.kind(), ErrorKind::Config);
        assert_eq!(error.category(), "configuration");
        assert!(error.user_message().contains("failed to build HTTP client"));
    }

    #[test]
    fn test_selector_error_names_role() {
        let error = ScrapeError::Selector {
            role: SelectorRole::Price,
            selector: "span[".into(),
            message: "unexpected end".into(),
        };
        assert_eq!(error.kind(), ErrorKind::Selector);
        assert_eq!(error.category(), "input");
        assert!(error.to_string().contains("price selector 'span['"));
    }
}
