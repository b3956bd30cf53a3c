//! One presenter session: the inputs, where the scrape stands, and what the
//! user has been told.
//!
//! `Idle -> InProgress -> Finished(..)`, and a new `begin` starts over from
//! `Finished`. Records from a previous run are dropped when the next one
//! begins.

use chrono::{DateTime, Local};
use std::path::Path;
use tracing::{debug, info};

use crate::core::messages::{MessageLog, MessageSink};
use crate::error::{ScrapeError, ScrapeResult};
use crate::export::{ExportFormat, ExportManager, ExportPayload, ExportStats};
use crate::record::Record;
use crate::scraper::{report_failure, ScrapeRequest, ScrapingEngine};

pub const BUSY_TEXT: &str = "Scraping in progress...";
pub const SUCCESS_TEXT: &str = "Scraping completed successfully!";
pub const NO_DATA_TEXT: &str = "No data scraped. Check the selectors or URL.";
pub const NOTHING_TO_EXPORT_TEXT: &str = "Nothing to export: the last scrape produced no records.";

/// How a finished scrape ended
#[derive(Debug)]
pub enum Outcome {
    /// At least one container matched
    Success(Vec<Record>),
    /// The page was fetched but nothing matched the container selector
    NoData,
    /// Fetching or parsing failed
    Failed(ScrapeError),
}

#[derive(Debug)]
pub enum Phase {
    Idle,
    InProgress,
    Finished(Outcome),
}

pub struct ScrapeSession {
    pub request: ScrapeRequest,
    phase: Phase,
    messages: MessageLog,
    last_run: Option<DateTime<Local>>,
}

impl Default for ScrapeSession {
    fn default() -> Self {
        Self::new(ScrapeRequest::default())
    }
}

impl ScrapeSession {
    pub fn new(request: ScrapeRequest) -> Self {
        Self {
            request,
            phase: Phase::Idle,
            messages: MessageLog::new(),
            last_run: None,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::InProgress)
    }

    /// When the last scrape finished
    pub fn last_run(&self) -> Option<DateTime<Local>> {
        self.last_run
    }

    /// Records of a successful scrape; empty in every other state
    pub fn records(&self) -> &[Record] {
        match &self.phase {
            Phase::Finished(Outcome::Success(records)) => records,
            _ => &[],
        }
    }

    /// Start a scrape and hand back the request to run.
    ///
    /// Returns `None` while another scrape is still in progress.
    pub fn begin(&mut self) -> Option<ScrapeRequest> {
        if self.is_busy() {
            debug!("Scrape already in progress, ignoring trigger");
            return None;
        }

        self.messages.clear();
        self.phase = Phase::InProgress;
        info!("Scrape started for {}", self.request.url.trim());
        Some(self.request.clone())
    }

    /// Record the result of the scrape started by [`begin`](Self::begin)
    pub fn finish(&mut self, result: ScrapeResult<Vec<Record>>) {
        let outcome = match result {
            Ok(records) if !records.is_empty() => {
                self.messages.success(SUCCESS_TEXT.to_string());
                Outcome::Success(records)
            }
            Ok(_) => {
                self.messages.warning(NO_DATA_TEXT.to_string());
                Outcome::NoData
            }
            Err(e) => {
                report_failure(&self.request, &e, &mut self.messages);
                self.messages.warning(NO_DATA_TEXT.to_string());
                Outcome::Failed(e)
            }
        };

        self.phase = Phase::Finished(outcome);
        self.last_run = Some(Local::now());
    }

    /// Run a full scrape with `engine`: begin, extract, finish.
    ///
    /// Does nothing if a scrape is already in progress.
    pub async fn run(&mut self, engine: &ScrapingEngine) {
        if let Some(request) = self.begin() {
            let result = engine.extract(&request).await;
            self.finish(result);
        }
    }

    /// Serialized export of the current records; `None` unless the last
    /// scrape succeeded
    pub fn export_payload(
        &self,
        manager: &ExportManager,
        format: ExportFormat,
    ) -> Option<ScrapeResult<ExportPayload>> {
        if self.records().is_empty() {
            return None;
        }
        Some(manager.payload(self.records(), format))
    }

    /// Both export payloads (CSV then JSON) of the current records
    pub fn exports(&self, manager: &ExportManager) -> Option<ScrapeResult<Vec<ExportPayload>>> {
        if self.records().is_empty() {
            return None;
        }
        Some(
            ExportFormat::all()
                .into_iter()
                .map(|format| manager.payload(self.records(), format))
                .collect(),
        )
    }

    /// Write the current records to `dir` (or the configured export
    /// directory) and report the outcome as a message
    pub fn save_export(
        &mut self,
        manager: &ExportManager,
        format: ExportFormat,
        dir: Option<&Path>,
    ) -> Option<ScrapeResult<ExportStats>> {
        if self.records().is_empty() {
            self.messages.warning(NOTHING_TO_EXPORT_TEXT.to_string());
            return None;
        }

        let result = match dir {
            Some(dir) => manager.export_to(self.records(), format, dir),
            None => manager.export(self.records(), format),
        };

        match &result {
            Ok(stats) => self.messages.info(format!(
                "Saved {} records to {}",
                stats.record_count,
                stats.file_path.display()
            )),
            Err(e) => self.messages.error(format!("Export failed: {}", e)),
        }

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExportConfig;
    use crate::core::messages::MessageLevel;

    fn widgets() -> Vec<Record> {
        vec![
            Record::new("Widget A", "$10", "a.jpg"),
            Record::new("Widget B", "$20", "b.jpg"),
        ]
    }

    fn manager(dir: &Path) -> ExportManager {
        ExportManager::new(&ExportConfig {
            output_directory: dir.to_path_buf(),
            pretty_json: false,
        })
    }

    #[test]
    fn test_begin_refuses_while_busy() {
        let mut session = ScrapeSession::default();
        assert!(matches!(session.phase(), Phase::Idle));

        assert!(session.begin().is_some());
        assert!(session.is_busy());
        assert!(session.begin().is_none());

        session.finish(Ok(widgets()));
        assert!(!session.is_busy());
        assert!(session.begin().is_some());
    }

    #[test]
    fn test_success_path() {
        let mut session = ScrapeSession::default();
        session.begin();
        session.finish(Ok(widgets()));

        assert!(matches!(session.phase(), Phase::Finished(Outcome::Success(_))));
        assert_eq!(session.records().len(), 2);
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages().last().unwrap().level, MessageLevel::Success);
        assert_eq!(session.messages().last().unwrap().text, SUCCESS_TEXT);
        assert!(session.last_run().is_some());
    }

    #[test]
    fn test_zero_matches_is_warning_not_error() {
        let mut session = ScrapeSession::default();
        session.begin();
        session.finish(Ok(Vec::new()));

        assert!(matches!(session.phase(), Phase::Finished(Outcome::NoData)));
        assert_eq!(session.messages().count(MessageLevel::Error), 0);
        assert_eq!(session.messages().count(MessageLevel::Warning), 1);
        assert_eq!(session.messages().last().unwrap().text, NO_DATA_TEXT);
    }

    #[test]
    fn test_failure_reports_error_then_warning() {
        let mut session = ScrapeSession::default();
        session.begin();
        session.finish(Err(ScrapeError::HttpStatus {
            url: "https://example.com/products".into(),
            status: 500,
        }));

        assert!(matches!(session.phase(), Phase::Finished(Outcome::Failed(_))));
        assert!(session.records().is_empty());

        let texts: Vec<&str> = session.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["Failed to fetch the URL. Status code: 500", NO_DATA_TEXT]);
        assert_eq!(session.messages().count(MessageLevel::Error), 1);
    }

    #[test]
    fn test_new_run_drops_previous_results() {
        let mut session = ScrapeSession::default();
        session.begin();
        session.finish(Ok(widgets()));

        session.begin();
        assert!(session.records().is_empty());
        assert!(session.messages().is_empty());
    }

    #[test]
    fn test_no_exports_without_records() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager(dir.path());
        let mut session = ScrapeSession::default();

        assert!(session.export_payload(&manager, ExportFormat::Csv).is_none());

        session.begin();
        session.finish(Ok(Vec::new()));
        assert!(session.export_payload(&manager, ExportFormat::Json).is_none());
        assert!(session.exports(&manager).is_none());
        assert!(session.save_export(&manager, ExportFormat::Csv, None).is_none());
        assert_eq!(session.messages().last().unwrap().text, NOTHING_TO_EXPORT_TEXT);
        assert_eq!(session.messages().last().unwrap().level, MessageLevel::Warning);
        assert!(!dir.path().join("scraped_data.csv").exists());
    }

    #[test]
    fn test_exports_after_success() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager(dir.path());
        let mut session = ScrapeSession::default();
        session.begin();
        session.finish(Ok(widgets()));

        let payload = session.export_payload(&manager, ExportFormat::Csv).unwrap().unwrap();
        assert_eq!(payload.file_name, "scraped_data.csv");

        let names: Vec<String> = session
            .exports(&manager)
            .unwrap()
            .unwrap()
            .into_iter()
            .map(|p| p.file_name)
            .collect();
        assert_eq!(names, vec!["scraped_data.csv", "scraped_data.json"]);

        let stats = session.save_export(&manager, ExportFormat::Json, None).unwrap().unwrap();
        assert_eq!(stats.file_path, dir.path().join("scraped_data.json"));
        assert_eq!(session.messages().last().unwrap().level, MessageLevel::Info);
    }
}
