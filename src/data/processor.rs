//! Data Processor Module
//! Subject column detection, score extraction and derived rank columns.

use super::loader::ID_COLUMN;
use polars::prelude::*;

/// Derived column holding each student's summed score.
pub const TOTAL_SCORE_COLUMN: &str = "Total_Score";
/// Derived column holding each student's class rank.
pub const RANK_COLUMN: &str = "Rank";

/// Columns that are never treated as subjects. The derived rank columns stay
/// out so repeated rankings and later summaries only see the loaded scores.
const NON_SUBJECT_COLUMNS: [&str; 3] = [ID_COLUMN, TOTAL_SCORE_COLUMN, RANK_COLUMN];

/// Handles column selection and extraction on the loaded table.
pub struct DataProcessor;

impl DataProcessor {
    /// Get list of numeric subject column names, in table order.
    pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
        df.get_columns()
            .iter()
            .filter(|col| {
                matches!(
                    col.dtype(),
                    DataType::Float32
                        | DataType::Float64
                        | DataType::Int8
                        | DataType::Int16
                        | DataType::Int32
                        | DataType::Int64
                        | DataType::UInt8
                        | DataType::UInt16
                        | DataType::UInt32
                        | DataType::UInt64
                )
            })
            .map(|col| col.name().to_string())
            .filter(|name| !NON_SUBJECT_COLUMNS.contains(&name.as_str()))
            .collect()
    }

    /// Whether a row across `columns` reads as floats: any float column, or any
    /// column with missing cells.
    pub fn has_float_scores(df: &DataFrame, columns: &[String]) -> bool {
        columns.iter().any(|name| {
            df.column(name).is_ok_and(|col| {
                matches!(col.dtype(), DataType::Float32 | DataType::Float64)
                    || col.null_count() > 0
            })
        })
    }

    /// Values of a numeric column as f64, nulls kept as `None`.
    pub fn column_values(df: &DataFrame, column: &str) -> PolarsResult<Vec<Option<f64>>> {
        let values = df.column(column)?.cast(&DataType::Float64)?;
        let ca = values.f64()?;
        Ok(ca.into_iter().collect())
    }

    /// Values of several columns, one vector per column.
    pub fn columns_values(
        df: &DataFrame,
        columns: &[String],
    ) -> PolarsResult<Vec<Vec<Option<f64>>>> {
        columns
            .iter()
            .map(|name| Self::column_values(df, name))
            .collect()
    }

    /// Row index of a student, if present.
    pub fn student_row(df: &DataFrame, student_id: &str) -> Option<usize> {
        df.column(ID_COLUMN)
            .ok()?
            .str()
            .ok()?
            .into_iter()
            .position(|id| id == Some(student_id))
    }

    /// Write `Total_Score` and `Rank` into the table, replacing earlier values.
    pub fn apply_rank_columns(
        df: &mut DataFrame,
        totals: Vec<f64>,
        ranks: Vec<i64>,
    ) -> PolarsResult<()> {
        df.with_column(Column::new(TOTAL_SCORE_COLUMN.into(), totals))?;
        df.with_column(Column::new(RANK_COLUMN.into(), ranks))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        df!(
            "Student_ID" => ["S1", "S2", "S3"],
            "Name" => ["Ann", "Bob", "Cid"],
            "Math" => [Some(80i64), None, Some(40)],
            "Science" => [45.5f64, 90.0, 60.0],
            "Passed" => [true, false, true],
        )
        .unwrap()
    }

    #[test]
    fn numeric_columns_skip_text_and_bool() {
        let df = sample();
        assert_eq!(DataProcessor::numeric_columns(&df), vec!["Math", "Science"]);
    }

    #[test]
    fn numeric_columns_skip_derived_and_numeric_ids() {
        let mut df = df!(
            "Student_ID" => [1i64, 2],
            "Math" => [10i64, 20],
        )
        .unwrap();
        DataProcessor::apply_rank_columns(&mut df, vec![10.0, 20.0], vec![2, 1]).unwrap();

        assert_eq!(DataProcessor::numeric_columns(&df), vec!["Math"]);
    }

    #[test]
    fn column_values_cast_and_keep_nulls() {
        let df = sample();
        let values = DataProcessor::column_values(&df, "Math").unwrap();
        assert_eq!(values, vec![Some(80.0), None, Some(40.0)]);
    }

    #[test]
    fn float_scores_from_float_or_missing_cells() {
        let df = sample();
        let ints = df!("Math" => [1i64, 2], "Art" => [3i64, 4]).unwrap();

        let both = vec!["Math".to_string(), "Art".to_string()];
        assert!(!DataProcessor::has_float_scores(&ints, &both));
        assert!(DataProcessor::has_float_scores(&df, &["Math".to_string()]));
        assert!(DataProcessor::has_float_scores(&df, &["Science".to_string()]));
    }

    #[test]
    fn student_row_finds_exact_match() {
        let df = sample();
        assert_eq!(DataProcessor::student_row(&df, "S2"), Some(1));
        assert_eq!(DataProcessor::student_row(&df, "s2"), None);
        assert_eq!(DataProcessor::student_row(&df, "S9"), None);
    }

    #[test]
    fn rank_columns_are_replaced_not_duplicated() {
        let mut df = sample();
        DataProcessor::apply_rank_columns(&mut df, vec![1.0, 2.0, 3.0], vec![3, 2, 1]).unwrap();
        DataProcessor::apply_rank_columns(&mut df, vec![3.0, 2.0, 1.0], vec![1, 2, 3]).unwrap();

        assert_eq!(df.width(), 7);
        let ranks: Vec<Option<i64>> = df
            .column(RANK_COLUMN)
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(ranks, vec![Some(1), Some(2), Some(3)]);
    }
}
