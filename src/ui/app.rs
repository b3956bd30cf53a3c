use eframe::egui;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{info, warn};

use crate::core::session::{ScrapeSession, BUSY_TEXT};
use crate::core::ProductScraper;
use crate::error::{ScrapeError, ScrapeResult};
use crate::export::ExportFormat;
use crate::record::Record;
use crate::ui::components::Components;
use crate::ui::results_viewer::ResultsViewer;
use crate::ui::theme::Theme;

const HELP_TEXT: &str =
    "Enter the page URL and the CSS selectors for the product cards and their fields, then press Scrape.";

type PendingScrape = oneshot::Receiver<ScrapeResult<Vec<Record>>>;

/// Desktop presenter: inputs, status messages, results table and exports
pub struct ScraperApp {
    core: ProductScraper,
    runtime: Handle,
    session: ScrapeSession,
    pending: Option<PendingScrape>,
    theme: Theme,
}

impl ScraperApp {
    pub fn new(core: ProductScraper, runtime: Handle) -> Self {
        let theme = Theme::from_dark_mode(core.config().ui.enable_dark_mode);

        Self {
            core,
            runtime,
            session: ScrapeSession::default(),
            pending: None,
            theme,
        }
    }

    /// Spawn the scrape on the runtime; the result comes back through `pending`
    fn start_scrape(&mut self, ctx: &egui::Context) {
        let Some(request) = self.session.begin() else {
            return;
        };

        let engine = self.core.engine();
        let (tx, rx) = oneshot::channel();
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            let result = engine.extract(&request).await;
            if tx.send(result).is_err() {
                warn!("Scrape finished after the window closed");
            }
            ctx.request_repaint();
        });

        self.pending = Some(rx);
    }

    fn poll_pending(&mut self) {
        let Some(receiver) = self.pending.as_mut() else {
            return;
        };

        match receiver.try_recv() {
            Ok(result) => {
                self.pending = None;
                self.session.finish(result);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Closed) => {
                self.pending = None;
                let url = self.session.request.url.clone();
                self.session
                    .finish(Err(ScrapeError::network(url, "scrape task ended without a result")));
            }
        }
    }

    fn save_export(&mut self, format: ExportFormat) {
        info!("Saving {} export", format);
        self.session.save_export(self.core.export_manager(), format, None);
    }

    fn render_top_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Product Scraper");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(if self.theme.is_dark() { "🌙" } else { "☀" }).clicked() {
                    self.theme = self.theme.toggled();
                }
                if let Some(at) = self.session.last_run() {
                    ui.label(format!("Last run: {}", at.format("%H:%M:%S")));
                }
            });
        });
    }

    fn render_inputs(&mut self, ui: &mut egui::Ui) {
        let enabled = !self.session.is_busy();
        let request = &mut self.session.request;

        egui::Grid::new("scrape_inputs")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                Components::labelled_input(ui, "Website URL", &mut request.url, enabled);
                Components::labelled_input(ui, "Product container", &mut request.container_selector, enabled);
                Components::labelled_input(ui, "Product name", &mut request.name_selector, enabled);
                Components::labelled_input(ui, "Product price", &mut request.price_selector, enabled);
                Components::labelled_input(ui, "Product image", &mut request.image_selector, enabled);
            });
    }

    fn render_controls(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let busy = self.session.is_busy();

        ui.horizontal(|ui| {
            if ui.add_enabled(!busy, egui::Button::new("Scrape")).clicked() {
                self.start_scrape(ctx);
            }
            if busy {
                Components::loading_spinner(ui, BUSY_TEXT);
            }
        });
    }

    fn render_messages(&self, ui: &mut egui::Ui) {
        for message in self.session.messages().iter() {
            Components::message_line(ui, &self.theme, message);
        }
    }
}

impl eframe::App for ScraperApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_pending();
        self.theme.apply(ctx);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            self.render_top_bar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(HELP_TEXT);
            ui.add_space(8.0);

            self.render_inputs(ui);
            ui.add_space(8.0);
            self.render_controls(ui, ctx);
            self.render_messages(ui);

            ui.separator();
            if let Some(format) = ResultsViewer::show(ui, self.session.records()) {
                self.save_export(format);
            }
        });

        if self.session.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
