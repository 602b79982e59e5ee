//! CSV Data Loader Module
//! Loads the score sheet with Polars and validates the `Student_ID` key column.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Name of the required key column.
pub const ID_COLUMN: &str = "Student_ID";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("{0}")]
    CsvError(#[from] PolarsError),
    #[error("CSV must contain 'Student_ID' column.")]
    MissingIdColumn,
    #[error("Student_ID column contains empty values.")]
    NullIds,
    #[error("Student_ID column contains duplicate values.")]
    DuplicateIds,
}

/// Cell markers read as missing values, in addition to empty cells.
pub const NA_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A validated score sheet: unique, non-null string IDs plus free-form columns.
#[derive(Debug, Clone)]
pub struct StudentTable {
    df: DataFrame,
    file_path: Option<PathBuf>,
}

impl StudentTable {
    /// Load a CSV file using Polars and validate it.
    pub fn load_csv(path: &Path, infer_schema_length: usize) -> Result<Self, LoaderError> {
        debug!(path = %path.display(), "reading csv");

        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(infer_schema_length))
            .with_ignore_errors(true)
            .with_null_values(Some(NullValues::AllColumns(
                NA_MARKERS.iter().map(|m| PlSmallStr::from(*m)).collect(),
            )))
            .finish()?
            .collect()?;
        let df = Self::empty_columns_as_float(df)?;

        let mut table = Self::from_dataframe(df)?;
        table.file_path = Some(path.to_path_buf());

        info!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.df.width(),
            "score sheet loaded"
        );
        Ok(table)
    }

    /// Columns with no values at all are read as text; treat them as empty scores.
    fn empty_columns_as_float(mut df: DataFrame) -> PolarsResult<DataFrame> {
        if df.height() == 0 {
            return Ok(df);
        }

        let empty: Vec<String> = df
            .get_columns()
            .iter()
            .filter(|col| col.name().as_str() != ID_COLUMN)
            .filter(|col| col.null_count() == col.len() && col.dtype() != &DataType::Float64)
            .map(|col| col.name().to_string())
            .collect();

        for name in empty {
            debug!(column = %name, "empty column read as Float64");
            let casted = df.column(&name)?.cast(&DataType::Float64)?;
            df.with_column(casted)?;
        }
        Ok(df)
    }

    /// Validate an in-memory DataFrame and normalise its ID column to strings.
    pub fn from_dataframe(mut df: DataFrame) -> Result<Self, LoaderError> {
        let ids = df
            .column(ID_COLUMN)
            .map_err(|_| LoaderError::MissingIdColumn)?;

        if ids.null_count() > 0 {
            return Err(LoaderError::NullIds);
        }
        if ids.as_materialized_series().n_unique()? != ids.len() {
            return Err(LoaderError::DuplicateIds);
        }

        let ids = ids.cast(&DataType::String)?;
        df.with_column(ids)?;

        Ok(Self {
            df,
            file_path: None,
        })
    }

    /// Get list of column names.
    pub fn get_columns(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Student IDs in file order.
    pub fn student_ids(&self) -> Vec<String> {
        self.df
            .column(ID_COLUMN)
            .ok()
            .and_then(|col| col.str().ok())
            .map(|ca| ca.into_iter().flatten().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Mutable access for derived columns added in place.
    pub fn dataframe_mut(&mut self) -> &mut DataFrame {
        &mut self.df
    }

    pub fn file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }
}
