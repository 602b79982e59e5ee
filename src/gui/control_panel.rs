//! Control Panel Widget
//! Header, file upload, student selector and the analysis buttons.

use egui::{Color32, ComboBox, RichText};

/// Placeholder shown while no student is selected.
pub const SELECT_PLACEHOLDER: &str = "Select Student ID";

pub const HEADER_COLOR: Color32 = Color32::from_rgb(44, 62, 80);

const BUTTON_SIZE: [f32; 2] = [260.0, 34.0];

/// Main panel with the upload button, student selector and action grid.
pub struct ControlPanel {
    pub student_ids: Vec<String>,
    pub selected: Option<String>,
    pub file_name: Option<String>,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            student_ids: Vec::new(),
            selected: None,
            file_name: None,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selector entries after a successful load.
    pub fn update_students(&mut self, student_ids: Vec<String>, file_name: Option<String>) {
        self.student_ids = student_ids;
        self.selected = None;
        self.file_name = file_name;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(15.0);
            ui.label(
                RichText::new("Student Performance Analyzer")
                    .size(24.0)
                    .strong()
                    .color(HEADER_COLOR),
            );
            ui.add_space(15.0);

            let upload = egui::Button::new(RichText::new("Upload CSV File").size(14.0))
                .min_size(egui::vec2(180.0, 32.0));
            if ui.add(upload).clicked() {
                action = ControlPanelAction::UploadCsv;
            }
            if let Some(name) = &self.file_name {
                ui.label(RichText::new(name).size(11.0).color(Color32::GRAY));
            }

            ui.add_space(10.0);

            let selected_text = self
                .selected
                .clone()
                .unwrap_or_else(|| SELECT_PLACEHOLDER.to_string());
            ComboBox::from_id_salt("student_id")
                .width(220.0)
                .selected_text(RichText::new(selected_text).size(13.0))
                .show_ui(ui, |ui| {
                    for id in &self.student_ids {
                        let is_selected = self.selected.as_deref() == Some(id.as_str());
                        if ui.selectable_label(is_selected, id).clicked() {
                            self.selected = Some(id.clone());
                        }
                    }
                });

            ui.add_space(20.0);

            egui::Grid::new("action_buttons")
                .num_columns(2)
                .spacing([20.0, 10.0])
                .show(ui, |ui| {
                    for (i, (label, button_action)) in
                        ControlPanelAction::BUTTONS.iter().enumerate()
                    {
                        let button = egui::Button::new(RichText::new(*label).size(13.0))
                            .min_size(egui::vec2(BUTTON_SIZE[0], BUTTON_SIZE[1]));
                        if ui.add(button).clicked() {
                            action = *button_action;
                        }
                        if i % 2 == 1 {
                            ui.end_row();
                        }
                    }
                });
        });

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPanelAction {
    None,
    UploadCsv,
    Summary,
    SubjectAverage,
    StudentTrend,
    PerformanceSummary,
    ClassRanks,
    LaggingSubjects,
}

impl ControlPanelAction {
    /// Analysis buttons in grid order, two per row.
    pub const BUTTONS: [(&'static str, ControlPanelAction); 6] = [
        ("📈 Overall Summary", ControlPanelAction::Summary),
        ("📊 Subject-wise Average", ControlPanelAction::SubjectAverage),
        ("📉 Student Performance Trends", ControlPanelAction::StudentTrend),
        (
            "🎯 Student Performance Summary",
            ControlPanelAction::PerformanceSummary,
        ),
        ("🏆 Class Rank Dashboard", ControlPanelAction::ClassRanks),
        ("📋 Subjects wise Summary", ControlPanelAction::LaggingSubjects),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_students_clears_selection() {
        let mut panel = ControlPanel::new();
        panel.selected = Some("S1".to_string());
        panel.update_students(
            vec!["A".to_string(), "B".to_string()],
            Some("scores.csv".to_string()),
        );

        assert_eq!(panel.selected, None);
        assert_eq!(panel.student_ids, vec!["A", "B"]);
        assert_eq!(panel.file_name.as_deref(), Some("scores.csv"));
    }

    #[test]
    fn every_analysis_has_a_button() {
        let actions: Vec<ControlPanelAction> =
            ControlPanelAction::BUTTONS.iter().map(|(_, a)| *a).collect();
        assert_eq!(actions.len(), 6);
        assert!(!actions.contains(&ControlPanelAction::None));
        assert!(!actions.contains(&ControlPanelAction::UploadCsv));
    }
}
