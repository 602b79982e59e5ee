//! Student Analyzer Main Application
//! Main window wiring the control panel to the analysis session.

use crate::config::AppConfig;
use crate::gui::{ControlPanel, ControlPanelAction, MessageDialog, ResultViewer};
use crate::session::{AnalysisError, AnalysisOutput, Session, Severity};
use egui::Color32;
use tracing::{debug, error, info, warn};

/// Window background.
const BACKGROUND: Color32 = Color32::from_rgb(232, 240, 254);

/// Main application window.
pub struct StudentAnalyzerApp {
    session: Session,
    control_panel: ControlPanel,
    result_viewer: ResultViewer,
    dialog: Option<MessageDialog>,
}

impl StudentAnalyzerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &AppConfig) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        Self {
            session: Session::new(config),
            control_panel: ControlPanel::new(),
            result_viewer: ResultViewer::new(),
            dialog: None,
        }
    }

    /// Handle CSV file selection
    fn handle_upload_csv(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        else {
            return;
        };

        match self.session.load(&path) {
            Ok(rows) => {
                let file_name = self
                    .session
                    .table()
                    .and_then(|t| t.file_path())
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().to_string());
                self.control_panel
                    .update_students(self.session.student_ids(), file_name);
                info!(rows, "data loaded");
                self.dialog = Some(MessageDialog::success("Data loaded successfully!"));
            }
            Err(e) => self.report_error(&e),
        }
    }

    /// Run one analysis action and route its output.
    fn handle_action(&mut self, action: ControlPanelAction) {
        self.session
            .select_student(self.control_panel.selected.clone());

        let result = match action {
            ControlPanelAction::Summary => self.session.summary(),
            ControlPanelAction::SubjectAverage => self.session.subject_average(),
            ControlPanelAction::StudentTrend => self.session.student_trend(),
            ControlPanelAction::PerformanceSummary => self.session.student_performance_summary(),
            ControlPanelAction::ClassRanks => self.session.class_ranks(),
            ControlPanelAction::LaggingSubjects => self.session.lagging_subjects(),
            ControlPanelAction::UploadCsv => {
                self.handle_upload_csv();
                return;
            }
            ControlPanelAction::None => return,
        };

        self.show_result(result);
    }

    fn show_result(&mut self, result: Result<AnalysisOutput, AnalysisError>) {
        match result {
            Ok(output) => {
                self.result_viewer.open(output);
                debug!(
                    open_windows = self.result_viewer.window_count(),
                    "result window opened"
                );
            }
            Err(e) => self.report_error(&e),
        }
    }

    fn report_error(&mut self, e: &AnalysisError) {
        match e.severity() {
            Severity::Error => error!(error = %e, "action failed"),
            _ => warn!(error = %e, "action skipped"),
        }
        self.dialog = Some(MessageDialog::from_error(e));
    }
}

impl eframe::App for StudentAnalyzerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let modal_open = self.dialog.is_some();

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(BACKGROUND).inner_margin(10.0))
            .show(ctx, |ui| {
                ui.add_enabled_ui(!modal_open, |ui| {
                    let action = self.control_panel.show(ui);
                    if action != ControlPanelAction::None {
                        self.handle_action(action);
                    }
                });
            });

        self.result_viewer.show(ctx);

        if let Some(dialog) = &self.dialog {
            if dialog.show(ctx) {
                self.dialog = None;
            }
        }
    }
}
