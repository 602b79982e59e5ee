//! Result Viewer
//! Floating windows for text reports and charts. Each action opens a new window.

use crate::charts::{ChartData, ChartPlotter};
use crate::session::AnalysisOutput;
use egui::{RichText, ScrollArea};

const TEXT_WINDOW_SIZE: [f32; 2] = [600.0, 450.0];
const CHART_WINDOW_SIZE: [f32; 2] = [800.0, 500.0];
const CHART_HEIGHT: f32 = 400.0;

enum ResultContent {
    Text(String),
    Chart(ChartData),
}

struct ResultWindow {
    id: u64,
    title: String,
    content: ResultContent,
    open: bool,
}

/// Open result windows, drawn on top of the main panel.
#[derive(Default)]
pub struct ResultViewer {
    windows: Vec<ResultWindow>,
    next_id: u64,
}

impl ResultViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a window for an analysis output.
    pub fn open(&mut self, output: AnalysisOutput) {
        let (title, content) = match output {
            AnalysisOutput::Text { title, content } => (title, ResultContent::Text(content)),
            AnalysisOutput::Chart(data) => (data.title.clone(), ResultContent::Chart(data)),
        };

        self.windows.push(ResultWindow {
            id: self.next_id,
            title,
            content,
            open: true,
        });
        self.next_id += 1;
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Draw all open windows and forget the closed ones.
    pub fn show(&mut self, ctx: &egui::Context) {
        for window in &mut self.windows {
            let default_size = match window.content {
                ResultContent::Text(_) => TEXT_WINDOW_SIZE,
                ResultContent::Chart(_) => CHART_WINDOW_SIZE,
            };

            egui::Window::new(&window.title)
                .id(egui::Id::new(("result_window", window.id)))
                .open(&mut window.open)
                .default_size(default_size)
                .resizable(true)
                .show(ctx, |ui| match &window.content {
                    ResultContent::Text(text) => Self::draw_text(ui, text),
                    ResultContent::Chart(data) => Self::draw_chart(ui, data),
                });
        }

        self.windows.retain(|w| w.open);
    }

    /// Read-only monospaced panel.
    fn draw_text(ui: &mut egui::Ui, text: &str) {
        ScrollArea::both()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut &*text)
                        .font(egui::TextStyle::Monospace)
                        .desired_width(f32::INFINITY)
                        .margin(egui::vec2(15.0, 15.0)),
                );
            });
    }

    fn draw_chart(ui: &mut egui::Ui, data: &ChartData) {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(&data.title).size(18.0).strong());
        });
        ui.add_space(8.0);
        ChartPlotter::draw_chart(ui, data, CHART_HEIGHT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_assigns_titles_and_ids() {
        let mut viewer = ResultViewer::new();
        viewer.open(AnalysisOutput::Text {
            title: "Overall Summary Statistics".to_string(),
            content: "count".to_string(),
        });
        viewer.open(AnalysisOutput::Chart(ChartData::subject_averages(&[(
            "Math".to_string(),
            60.0,
        )])));

        assert_eq!(viewer.window_count(), 2);
        assert_eq!(viewer.windows[0].title, "Overall Summary Statistics");
        assert_eq!(viewer.windows[1].title, "Subject-wise Average Scores");
        assert_ne!(viewer.windows[0].id, viewer.windows[1].id);
    }
}
