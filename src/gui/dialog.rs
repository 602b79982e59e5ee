//! Message Dialog
//! Centered modal message box for info, warnings and errors.

use crate::session::{AnalysisError, Severity};
use egui::{Align2, Color32, RichText};

/// A pending message. The main panel is disabled while one is shown.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageDialog {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl MessageDialog {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            title: severity.title().to_string(),
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            title: "Success".to_string(),
            message: message.into(),
        }
    }

    pub fn from_error(error: &AnalysisError) -> Self {
        Self::new(error.severity(), error.to_string())
    }

    fn accent(&self) -> Color32 {
        match self.severity {
            Severity::Info => Color32::from_rgb(52, 152, 219),
            Severity::Warning => Color32::from_rgb(243, 156, 18),
            Severity::Error => Color32::from_rgb(220, 53, 69),
        }
    }

    fn icon(&self) -> &'static str {
        match self.severity {
            Severity::Info => "ℹ",
            Severity::Warning => "⚠",
            Severity::Error => "❌",
        }
    }

    /// Draw the dialog. Returns `true` once it has been dismissed.
    pub fn show(&self, ctx: &egui::Context) -> bool {
        let mut dismissed = false;

        egui::Window::new(RichText::new(&self.title).strong())
            .id(egui::Id::new("message_dialog"))
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.set_min_width(280.0);
                ui.horizontal(|ui| {
                    ui.label(RichText::new(self.icon()).size(22.0).color(self.accent()));
                    ui.label(RichText::new(&self.message).size(13.0));
                });
                ui.add_space(10.0);
                ui.vertical_centered(|ui| {
                    if ui.button("  OK  ").clicked() {
                        dismissed = true;
                    }
                });
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Escape)) {
            dismissed = true;
        }
        dismissed
    }
}
