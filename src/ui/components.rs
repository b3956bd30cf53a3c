use eframe::egui;

use crate::core::messages::StatusMessage;
use crate::ui::theme::Theme;

/// Reusable UI components
pub struct Components;

impl Components {
    /// Render a loading spinner
    pub fn loading_spinner(ui: &mut egui::Ui, text: &str) {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(text);
        });
    }

    /// One coloured status line
    pub fn message_line(ui: &mut egui::Ui, theme: &Theme, message: &StatusMessage) {
        ui.colored_label(theme.message_color(message.level), message.timestamped());
    }

    /// Labelled single-line text input, greyed out when `enabled` is false
    pub fn labelled_input(ui: &mut egui::Ui, label: &str, value: &mut String, enabled: bool) {
        ui.label(label);
        ui.add_enabled(
            enabled,
            egui::TextEdit::singleline(value).desired_width(f32::INFINITY),
        );
        ui.end_row();
    }
}
