use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

pub mod csv_exporter;
pub mod json_exporter;

use crate::config::ExportConfig;
use crate::error::{ScrapeError, ScrapeResult};
use crate::log_info;
use crate::logging::LogContext;
use crate::record::Record;

/// Base name of every export file
pub const EXPORT_BASENAME: &str = "scraped_data";

/// Export format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = ScrapeError;

    fn from_str(s: &str) -> ScrapeResult<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(ScrapeError::export(format!("Invalid export format: {}", s))),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl ExportFormat {
    /// Get supported formats
    pub fn all() -> [ExportFormat; 2] {
        [ExportFormat::Csv, ExportFormat::Json]
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// `scraped_data.csv` / `scraped_data.json`
    pub fn file_name(&self) -> String {
        format!("{}.{}", EXPORT_BASENAME, self.extension())
    }
}

/// Serialized export ready to be handed to the user
#[derive(Debug, Clone)]
pub struct ExportPayload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Export statistics
#[derive(Debug, Clone, Serialize)]
pub struct ExportStats {
    pub file_path: PathBuf,
    pub record_count: usize,
    pub file_size_bytes: u64,
}

/// Turns records into CSV/JSON bytes and files
#[derive(Debug, Clone)]
pub struct ExportManager {
    config: ExportConfig,
}

impl ExportManager {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Serialize records in `format`
    pub fn to_bytes(&self, records: &[Record], format: ExportFormat) -> ScrapeResult<Vec<u8>> {
        match format {
            ExportFormat::Csv => csv_exporter::to_csv_bytes(records),
            ExportFormat::Json => json_exporter::to_json_bytes(records, self.config.pretty_json),
        }
    }

    pub fn payload(&self, records: &[Record], format: ExportFormat) -> ScrapeResult<ExportPayload> {
        Ok(ExportPayload {
            file_name: format.file_name(),
            bytes: self.to_bytes(records, format)?,
        })
    }

    /// Export to the configured output directory
    pub fn export(&self, records: &[Record], format: ExportFormat) -> ScrapeResult<ExportStats> {
        self.export_to(records, format, &self.config.output_directory)
    }

    /// Write `<dir>/scraped_data.<ext>`, creating `dir` if needed
    pub fn export_to(&self, records: &[Record], format: ExportFormat, dir: &Path) -> ScrapeResult<ExportStats> {
        info!("Exporting {} records to {} as {}", records.len(), dir.display(), format);
        let start_time = Instant::now();

        std::fs::create_dir_all(dir).map_err(|source| ScrapeError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let payload = self.payload(records, format)?;
        let file_path = dir.join(&payload.file_name);
        std::fs::write(&file_path, &payload.bytes).map_err(|source| ScrapeError::Io {
            path: file_path.clone(),
            source,
        })?;

        let stats = ExportStats {
            file_path,
            record_count: records.len(),
            file_size_bytes: payload.bytes.len() as u64,
        };

        let context = LogContext::new("export", format.extension())
            .with_record_count(stats.record_count)
            .with_duration(start_time.elapsed());
        log_info!(
            context,
            "Export completed: {} ({} bytes)",
            stats.file_path.display(),
            stats.file_size_bytes
        );

        Ok(stats)
    }

    /// Export to every supported format; stops at the first failure
    pub fn export_all(&self, records: &[Record], dir: &Path) -> ScrapeResult<Vec<ExportStats>> {
        ExportFormat::all()
            .into_iter()
            .map(|format| self.export_to(records, format, dir))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(pretty_json: bool) -> ExportManager {
        ExportManager::new(&ExportConfig {
            output_directory: std::env::temp_dir(),
            pretty_json,
        })
    }

    fn records() -> Vec<Record> {
        vec![
            Record::new("Widget A", "$10", "a.jpg"),
            Record::new("Widget, \"B\"", "$20", "N/A"),
        ]
    }

    #[test]
    fn test_format_names() {
        assert_eq!(ExportFormat::Csv.file_name(), "scraped_data.csv");
        assert_eq!(ExportFormat::Json.file_name(), "scraped_data.json");
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("xlsx".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_payloads_carry_same_data() {
        let manager = manager(false);
        let records = records();

        let csv = manager.payload(&records, ExportFormat::Csv).unwrap();
        let json = manager.payload(&records, ExportFormat::Json).unwrap();

        assert_eq!(csv_exporter::read_csv(csv.bytes.as_slice()).unwrap(), records);
        assert_eq!(json_exporter::read_json(&json.bytes).unwrap(), records);
    }

    #[test]
    fn test_export_all_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("exports");

        let stats = manager(true).export_all(&records(), &out).unwrap();

        assert_eq!(stats.len(), 2);
        for stat in &stats {
            assert!(stat.file_path.exists());
            assert_eq!(stat.record_count, 2);
            assert_eq!(std::fs::metadata(&stat.file_path).unwrap().len(), stat.file_size_bytes);
        }
        assert!(out.join("scraped_data.csv").exists());
        assert!(out.join("scraped_data.json").exists());
    }

    #[test]
    fn test_export_into_file_path_fails_with_io() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"x").unwrap();

        let err = manager(false).export_to(&records(), ExportFormat::Csv, &blocker).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Io);
    }
}
