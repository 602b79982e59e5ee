//! GUI module - User interface components

mod app;
mod control_panel;
mod dialog;
mod result_viewer;

pub use app::StudentAnalyzerApp;
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use dialog::MessageDialog;
pub use result_viewer::ResultViewer;
