use product_scraper::config::AppConfig;
use product_scraper::core::messages::MessageLevel;
use product_scraper::core::session::{Outcome, Phase, NO_DATA_TEXT, SUCCESS_TEXT};
use product_scraper::export::{csv_exporter, json_exporter, ExportFormat};
use product_scraper::{ProductScraper, Record, ScrapeRequest, ScrapeSession};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTING: &str = r#"
<html><body>
  <div class="product-card">
    <h2 class="product-title"> Widget A </h2>
    <span class="product-price">$10</span>
    <img class="product-image" src="a.jpg">
  </div>
  <div class="product-card">
    <h2 class="product-title">Widget, "B"</h2>
    <img class="product-image">
  </div>
</body></html>
"#;

fn scraper_in(dir: &std::path::Path) -> ProductScraper {
    let mut config = AppConfig::default();
    config.export.output_directory = dir.join("exports");
    config.scraping.request_timeout_seconds = Some(5);
    ProductScraper::new(config).unwrap()
}

fn request_for(server: &MockServer, route: &str) -> ScrapeRequest {
    ScrapeRequest {
        url: format!("{}{}", server.uri(), route),
        ..ScrapeRequest::default()
    }
}

#[tokio::test]
async fn scrape_display_and_export() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let scraper = scraper_in(dir.path());
    let mut session = ScrapeSession::new(request_for(&server, "/products"));

    session.run(&scraper.engine()).await;

    let expected = vec![
        Record::new("Widget A", "$10", "a.jpg"),
        Record::new("Widget, \"B\"", "N/A", "N/A"),
    ];
    assert_eq!(session.records(), expected.as_slice());
    assert_eq!(session.messages().len(), 1);
    assert_eq!(session.messages().last().unwrap().text, SUCCESS_TEXT);

    for format in ExportFormat::all() {
        let stats = session
            .save_export(scraper.export_manager(), format, None)
            .unwrap()
            .unwrap();
        assert_eq!(stats.file_path, dir.path().join("exports").join(format.file_name()));
    }

    let csv = std::fs::read(dir.path().join("exports/scraped_data.csv")).unwrap();
    let json = std::fs::read(dir.path().join("exports/scraped_data.json")).unwrap();
    assert_eq!(csv_exporter::read_csv(csv.as_slice()).unwrap(), expected);
    assert_eq!(json_exporter::read_json(&json).unwrap(), expected);
    assert_eq!(session.messages().count(MessageLevel::Info), 2);
}

#[tokio::test]
async fn server_error_reports_status_then_warning() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let scraper = scraper_in(dir.path());
    let mut session = ScrapeSession::new(request_for(&server, "/missing"));

    session.run(&scraper.engine()).await;

    assert!(matches!(session.phase(), Phase::Finished(Outcome::Failed(_))));
    let texts: Vec<&str> = session.messages().iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["Failed to fetch the URL. Status code: 404", NO_DATA_TEXT]);
    assert!(session
        .export_payload(scraper.export_manager(), ExportFormat::Csv)
        .is_none());
}

#[tokio::test]
async fn unmatched_container_is_a_warning() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let scraper = scraper_in(dir.path());
    let mut request = request_for(&server, "/products");
    request.container_selector = "article.item".to_string();
    let mut session = ScrapeSession::new(request);

    session.run(&scraper.engine()).await;

    assert!(matches!(session.phase(), Phase::Finished(Outcome::NoData)));
    assert_eq!(session.messages().count(MessageLevel::Error), 0);
    assert_eq!(session.messages().last().unwrap().text, NO_DATA_TEXT);
}

#[tokio::test]
async fn invalid_selector_never_reaches_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let scraper = scraper_in(dir.path());
    let mut request = request_for(&server, "/products");
    request.price_selector = "span[".to_string();
    let mut session = ScrapeSession::new(request);

    session.run(&scraper.engine()).await;

    let first = session.messages().iter().next().unwrap();
    assert_eq!(first.level, MessageLevel::Error);
    assert!(first.text.starts_with("An error occurred: "));
}
