//! Analysis Session
//! Holds the loaded score sheet and runs the analysis actions behind each button.

use crate::charts::ChartData;
use crate::config::AppConfig;
use crate::data::{DataProcessor, LoaderError, StudentTable};
use crate::stats::{report, StatsCalculator, LAG_THRESHOLD};
use polars::prelude::PolarsError;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Dialog kind used to surface a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn title(self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Please upload data first.")]
    NoData,
    #[error("Please select a Student ID.")]
    NoStudentSelected,
    #[error("Student ID not found.")]
    StudentNotFound(String),
    #[error("No numeric columns found for {0}.")]
    NoNumericColumns(&'static str),
    #[error("Failed to load CSV:\n{0}")]
    Load(#[from] LoaderError),
    #[error("Analysis failed: {0}")]
    Polars(#[from] PolarsError),
}

impl AnalysisError {
    pub fn severity(&self) -> Severity {
        match self {
            AnalysisError::NoData => Severity::Warning,
            AnalysisError::NoStudentSelected | AnalysisError::NoNumericColumns(_) => {
                Severity::Info
            }
            AnalysisError::StudentNotFound(_)
            | AnalysisError::Load(_)
            | AnalysisError::Polars(_) => Severity::Error,
        }
    }
}

/// What an action produces for display.
#[derive(Debug, Clone)]
pub enum AnalysisOutput {
    Text { title: String, content: String },
    Chart(ChartData),
}

/// In-memory state for one window: the table and the selected student.
pub struct Session {
    table: Option<StudentTable>,
    selected_student: Option<String>,
    top_n: usize,
    infer_schema_length: usize,
}

impl Session {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            table: None,
            selected_student: None,
            top_n: config.ranking.top_n,
            infer_schema_length: config.loading.infer_schema_length,
        }
    }

    /// Load and validate a CSV. A failed load keeps the previous table.
    pub fn load(&mut self, path: &Path) -> Result<usize, AnalysisError> {
        let table = StudentTable::load_csv(path, self.infer_schema_length).map_err(|e| {
            warn!(path = %path.display(), error = %e, "load rejected");
            e
        })?;

        let rows = table.row_count();
        debug!(columns = ?table.get_columns(), "columns available");
        self.table = Some(table);
        self.selected_student = None;
        Ok(rows)
    }

    pub fn table(&self) -> Option<&StudentTable> {
        self.table.as_ref()
    }

    /// IDs offered by the student selector, in file order.
    pub fn student_ids(&self) -> Vec<String> {
        self.table
            .as_ref()
            .map(StudentTable::student_ids)
            .unwrap_or_default()
    }

    pub fn selected_student(&self) -> Option<&str> {
        self.selected_student.as_deref()
    }

    pub fn select_student(&mut self, student_id: Option<String>) {
        self.selected_student = student_id;
    }

    /// Overall Summary: descriptive statistics of every subject.
    pub fn summary(&self) -> Result<AnalysisOutput, AnalysisError> {
        let table = self.loaded()?;
        let subjects = Self::subjects(table, "summary")?;
        let columns = DataProcessor::columns_values(table.dataframe(), &subjects)?;

        let summaries: Vec<_> = subjects
            .iter()
            .zip(&columns)
            .map(|(subject, values)| StatsCalculator::describe(subject, values))
            .collect();

        info!(subjects = subjects.len(), "overall summary");
        Ok(AnalysisOutput::Text {
            title: "Overall Summary Statistics".to_string(),
            content: report::summary_text(&summaries),
        })
    }

    /// Subject-wise Average: bar chart of subject means.
    pub fn subject_average(&self) -> Result<AnalysisOutput, AnalysisError> {
        let table = self.loaded()?;
        let subjects = Self::subjects(table, "averages")?;
        let columns = DataProcessor::columns_values(table.dataframe(), &subjects)?;

        let averages = StatsCalculator::subject_averages(&subjects, &columns);
        info!(subjects = subjects.len(), "subject averages");
        Ok(AnalysisOutput::Chart(ChartData::subject_averages(&averages)))
    }

    /// Student Performance Trends: line chart of the selected student's scores.
    pub fn student_trend(&self) -> Result<AnalysisOutput, AnalysisError> {
        let (student_id, scores) = self.selected_scores("trend analysis")?;
        info!(student = %student_id, "student trend");
        Ok(AnalysisOutput::Chart(ChartData::student_trend(
            &student_id,
            &scores,
        )))
    }

    /// Student Performance Summary: lagging subjects and suggestions.
    pub fn student_performance_summary(&self) -> Result<AnalysisOutput, AnalysisError> {
        let (student_id, scores) = self.selected_scores("analysis")?;
        let partition = StatsCalculator::partition_scores(&scores, LAG_THRESHOLD);
        let subjects: Vec<String> = scores.iter().map(|(s, _)| s.clone()).collect();
        let float_row = DataProcessor::has_float_scores(self.loaded()?.dataframe(), &subjects);

        info!(
            student = %student_id,
            lagging = partition.lagging.len(),
            strong = partition.strong.len(),
            "performance summary"
        );
        Ok(AnalysisOutput::Text {
            title: "Student Performance Summary".to_string(),
            content: report::performance_text(&student_id, &partition, LAG_THRESHOLD, float_row),
        })
    }

    /// Class Rank Dashboard: adds `Total_Score`/`Rank` in place and lists the top ranks.
    pub fn class_ranks(&mut self) -> Result<AnalysisOutput, AnalysisError> {
        let table = self.table.as_mut().ok_or(AnalysisError::NoData)?;
        let subjects = Self::subjects(table, "ranking")?;
        let columns = DataProcessor::columns_values(table.dataframe(), &subjects)?;

        let entries = StatsCalculator::compute_ranks(&table.student_ids(), &columns);
        DataProcessor::apply_rank_columns(
            table.dataframe_mut(),
            entries.iter().map(|e| e.total_score).collect(),
            entries.iter().map(|e| e.rank).collect(),
        )?;

        let top: Vec<_> = StatsCalculator::sort_by_rank(&entries)
            .into_iter()
            .take(self.top_n)
            .collect();

        info!(students = entries.len(), shown = top.len(), "class ranks");
        Ok(AnalysisOutput::Text {
            title: format!("Top {} Student Ranks", self.top_n),
            content: report::rank_text(&top),
        })
    }

    /// Subjects wise Summary: bar chart of lagging students per subject.
    pub fn lagging_subjects(&self) -> Result<AnalysisOutput, AnalysisError> {
        let table = self.loaded()?;
        let subjects = Self::subjects(table, "lagging subject analysis")?;
        let columns = DataProcessor::columns_values(table.dataframe(), &subjects)?;

        let counts = StatsCalculator::lagging_counts(&subjects, &columns, LAG_THRESHOLD);
        info!(subjects = subjects.len(), "lagging subjects");
        Ok(AnalysisOutput::Chart(ChartData::lagging_counts(
            &counts,
            LAG_THRESHOLD,
        )))
    }

    fn loaded(&self) -> Result<&StudentTable, AnalysisError> {
        self.table.as_ref().ok_or(AnalysisError::NoData)
    }

    fn subjects(table: &StudentTable, purpose: &'static str) -> Result<Vec<String>, AnalysisError> {
        let subjects = DataProcessor::numeric_columns(table.dataframe());
        if subjects.is_empty() {
            return Err(AnalysisError::NoNumericColumns(purpose));
        }
        Ok(subjects)
    }

    /// Selected student's `(subject, score)` pairs after the usual guards.
    fn selected_scores(
        &self,
        purpose: &'static str,
    ) -> Result<(String, Vec<(String, Option<f64>)>), AnalysisError> {
        let table = self.loaded()?;
        let student_id = self
            .selected_student
            .clone()
            .ok_or(AnalysisError::NoStudentSelected)?;
        let row = DataProcessor::student_row(table.dataframe(), &student_id)
            .ok_or_else(|| AnalysisError::StudentNotFound(student_id.clone()))?;
        let subjects = Self::subjects(table, purpose)?;

        let mut scores = Vec::with_capacity(subjects.len());
        for subject in subjects {
            let values = DataProcessor::column_values(table.dataframe(), &subject)?;
            let score = values.get(row).copied().flatten();
            scores.push((subject, score));
        }
        Ok((student_id, scores))
    }
}
