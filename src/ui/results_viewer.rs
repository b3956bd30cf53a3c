use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::export::ExportFormat;
use crate::record::Record;

const ROW_HEIGHT: f32 = 20.0;

/// Table of scraped records plus the two download buttons
pub struct ResultsViewer;

impl ResultsViewer {
    /// Render `records`; returns the export the user asked for, if any
    pub fn show(ui: &mut egui::Ui, records: &[Record]) -> Option<ExportFormat> {
        if records.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label("No data to display");
            });
            return None;
        }

        let mut requested = None;
        ui.horizontal(|ui| {
            ui.heading("Scraped Data");
            ui.label(format!("{} records", records.len()));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Download JSON").clicked() {
                    requested = Some(ExportFormat::Json);
                }
                if ui.button("Download CSV").clicked() {
                    requested = Some(ExportFormat::Csv);
                }
            });
        });

        ui.separator();
        Self::render_table(ui, records);

        requested
    }

    fn render_table(ui: &mut egui::Ui, records: &[Record]) {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::initial(260.0).at_least(80.0))
            .column(Column::initial(110.0).at_least(60.0))
            .column(Column::remainder().at_least(120.0))
            .header(ROW_HEIGHT + 4.0, |mut header| {
                for title in Record::COLUMNS {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for record in records {
                    body.row(ROW_HEIGHT, |mut row| {
                        for cell in record.cells() {
                            row.col(|ui| {
                                ui.add(egui::Label::new(cell).truncate(true));
                            });
                        }
                    });
                }
            });
    }
}
