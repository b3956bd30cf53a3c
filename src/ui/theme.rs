use eframe::egui;

use crate::core::messages::MessageLevel;

/// UI theme configuration
#[derive(Debug, Clone)]
pub struct Theme {
    pub is_dark: bool,
    pub primary_color: egui::Color32,
    pub success_color: egui::Color32,
    pub warning_color: egui::Color32,
    pub error_color: egui::Color32,
}

impl Theme {
    /// Create dark theme
    pub fn dark() -> Self {
        Self {
            is_dark: true,
            primary_color: egui::Color32::from_rgb(100, 149, 237),
            success_color: egui::Color32::from_rgb(102, 187, 106),
            warning_color: egui::Color32::from_rgb(255, 202, 40),
            error_color: egui::Color32::from_rgb(239, 83, 80),
        }
    }

    /// Create light theme
    pub fn light() -> Self {
        Self {
            is_dark: false,
            primary_color: egui::Color32::from_rgb(70, 130, 180),
            success_color: egui::Color32::from_rgb(46, 125, 50),
            warning_color: egui::Color32::from_rgb(191, 134, 0),
            error_color: egui::Color32::from_rgb(198, 40, 40),
        }
    }

    pub fn from_dark_mode(dark: bool) -> Self {
        if dark {
            Self::dark()
        } else {
            Self::light()
        }
    }

    pub fn toggled(&self) -> Self {
        Self::from_dark_mode(!self.is_dark)
    }

    /// Apply theme to context
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = if self.is_dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };

        visuals.hyperlink_color = self.primary_color;
        visuals.selection.bg_fill = self.primary_color;
        visuals.widgets.hovered.bg_stroke.color = self.primary_color;

        ctx.set_visuals(visuals);
    }

    /// Colour of a status line at `level`
    pub fn message_color(&self, level: MessageLevel) -> egui::Color32 {
        match level {
            MessageLevel::Success => self.success_color,
            MessageLevel::Info => self.primary_color,
            MessageLevel::Warning => self.warning_color,
            MessageLevel::Error => self.error_color,
        }
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }
}
