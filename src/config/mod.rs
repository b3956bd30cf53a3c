use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{ScrapeError, ScrapeResult};
use crate::logging::LoggingConfig;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scraping: ScrapingConfig,
    pub export: ExportConfig,
    pub ui: UIConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapingConfig {
    /// Whole-request timeout; `None` leaves the client's own behaviour
    pub request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_directory: PathBuf,
    pub pretty_json: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_directory: get_data_directory().join("exports"),
            pretty_json: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UIConfig {
    pub window_width: f32,
    pub window_height: f32,
    pub enable_dark_mode: bool,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            window_width: 1000.0,
            window_height: 720.0,
            enable_dark_mode: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location, falling back to defaults.
    ///
    /// Environment overrides are applied either way.
    pub fn load() -> ScrapeResult<Self> {
        let config_path = get_config_path();

        if config_path.exists() {
            return Self::load_from_file_with_overrides(&config_path);
        }

        info!("No configuration file found, using defaults");
        let mut config = Self::default();
        ConfigOverrides::apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Load `path`, apply environment overrides, then validate the result
    pub fn load_from_file_with_overrides<P: AsRef<Path>>(path: P) -> ScrapeResult<Self> {
        Self::load_from_file_with(path, |key| std::env::var(key).ok())
    }

    /// Load `path` with overrides read through `lookup`; validation runs on
    /// the overridden values
    pub fn load_from_file_with<P, F>(path: P, lookup: F) -> ScrapeResult<Self>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::read_file(path.as_ref())?;
        ConfigOverrides::apply_from(&mut config, lookup);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ScrapeResult<Self> {
        let config = Self::read_file(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    fn read_file(path: &Path) -> ScrapeResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScrapeError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: AppConfig = toml::from_str(&content).map_err(|e| {
            ScrapeError::config(format!("invalid {}: {}", path.display(), e))
        })?;

        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Save configuration to `path`, or the default location
    pub fn save(&self, path: Option<&Path>) -> ScrapeResult<PathBuf> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(get_config_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ScrapeError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(&config_path, self.to_toml()?).map_err(|source| ScrapeError::Io {
            path: config_path.clone(),
            source,
        })?;

        info!("Configuration saved to: {}", config_path.display());
        Ok(config_path)
    }

    pub fn to_toml(&self) -> ScrapeResult<String> {
        toml::to_string_pretty(self).map_err(|e| ScrapeError::config(e.to_string()))
    }

    /// Validate configuration values
    pub fn validate(&self) -> ScrapeResult<()> {
        if self.scraping.request_timeout_seconds == Some(0) {
            return Err(ScrapeError::config("scraping.request_timeout_seconds must be > 0"));
        }

        if self.logging.level.trim().is_empty() {
            return Err(ScrapeError::config("logging.level must not be empty"));
        }

        if self.ui.window_width <= 0.0 || self.ui.window_height <= 0.0 {
            return Err(ScrapeError::config("ui window size must be positive"));
        }

        Ok(())
    }
}

/// Get the default data directory
pub fn get_data_directory() -> PathBuf {
    directories::ProjectDirs::from("com", "productscraper", "product-scraper")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default().join("data"))
}

/// Get the configuration file path
pub fn get_config_path() -> PathBuf {
    directories::ProjectDirs::from("com", "productscraper", "product-scraper")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default().join("config.toml"))
}

/// Environment-based configuration overrides
pub struct ConfigOverrides;

impl ConfigOverrides {
    /// Apply environment variable overrides to configuration
    pub fn apply(config: &mut AppConfig) {
        Self::apply_from(config, |key| std::env::var(key).ok());
    }

    /// Apply overrides read through `lookup`
    pub fn apply_from<F>(config: &mut AppConfig, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("PS_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(dir) = lookup("PS_EXPORT_DIR") {
            config.export.output_directory = PathBuf::from(dir);
        }

        if let Some(timeout) = lookup("PS_REQUEST_TIMEOUT").and_then(|v| v.parse::<u64>().ok()) {
            config.scraping.request_timeout_seconds = Some(timeout);
        }

        if let Some(pretty) = lookup("PS_PRETTY_JSON") {
            config.export.pretty_json = pretty.to_lowercase() == "true";
        }
    }
}
