//! Text reports shown in the read-only result windows.

use super::calculator::{ColumnSummary, RankEntry, ScorePartition};
use std::fmt::Write;

/// Format a score without trailing zeros: `80`, `45.5`, `65.17`.
pub fn format_score(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.fract() == 0.0 {
        return format!("{:.0}", value);
    }
    let formatted = format!("{:.2}", value);
    formatted.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Format a score as it was read: integers as `45`, or `45.0`/`33.333` when the
/// student's row holds floats. Never rounded.
pub fn format_raw_score(value: f64, float_row: bool) -> String {
    if float_row {
        format!("{:?}", value)
    } else {
        format!("{}", value)
    }
}

fn format_stat(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.2}", value)
    }
}

/// Right-aligned grid of statistic rows by subject columns, two decimals.
pub fn summary_text(summaries: &[ColumnSummary]) -> String {
    let label_width = ColumnSummary::LABELS
        .iter()
        .map(|l| l.len())
        .max()
        .unwrap_or(0);

    let cells: Vec<Vec<String>> = summaries
        .iter()
        .map(|s| s.values().iter().map(|v| format_stat(*v)).collect())
        .collect();
    let widths: Vec<usize> = summaries
        .iter()
        .zip(&cells)
        .map(|(s, col)| {
            col.iter()
                .map(String::len)
                .chain(std::iter::once(s.subject.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let _ = write!(out, "{:label_width$}", "");
    for (s, width) in summaries.iter().zip(&widths) {
        let _ = write!(out, "  {:>width$}", s.subject);
    }
    out.push('\n');

    for (row, label) in ColumnSummary::LABELS.iter().enumerate() {
        let _ = write!(out, "{:<label_width$}", label);
        for (col, width) in cells.iter().zip(&widths) {
            let _ = write!(out, "  {:>width$}", col[row]);
        }
        out.push('\n');
    }
    out
}

/// `Student_ID  Total_Score  Rank` table without an index column.
pub fn rank_text(entries: &[RankEntry]) -> String {
    let headers = ["Student_ID", "Total_Score", "Rank"];
    let rows: Vec<[String; 3]> = entries
        .iter()
        .map(|e| {
            [
                e.student_id.clone(),
                format_score(e.total_score),
                e.rank.to_string(),
            ]
        })
        .collect();

    let widths: Vec<usize> = (0..headers.len())
        .map(|i| {
            rows.iter()
                .map(|r| r[i].len())
                .chain(std::iter::once(headers[i].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{:>w$}", h, w = *w))
        .collect();
    out.push_str(&header_line.join("  "));
    out.push('\n');

    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:>w$}", cell, w = *w))
            .collect();
        out.push_str(&line.join("  "));
        out.push('\n');
    }
    out
}

/// Lagging subjects and improvement suggestions for one student.
pub fn performance_text(
    student_id: &str,
    partition: &ScorePartition,
    threshold: f64,
    float_row: bool,
) -> String {
    let mut out = format!("Performance Summary for Student ID: {}\n\n", student_id);

    if partition.lagging.is_empty() {
        out.push_str("Great job! No subjects lagging behind.\n");
        return out;
    }

    let _ = writeln!(
        out,
        "Subjects lagging behind (below {}):",
        format_score(threshold)
    );
    for (subject, score) in &partition.lagging {
        let _ = writeln!(out, " - {}: {}", subject, format_raw_score(*score, float_row));
    }

    out.push_str("\nImprovement Suggestions:\n");
    for (subject, _) in &partition.lagging {
        let _ = writeln!(
            out,
            " • Focus more on {}. Consider additional practice or tutoring.",
            subject
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::calculator::{StatsCalculator, LAG_THRESHOLD};

    #[test]
    fn score_formatting() {
        assert_eq!(format_score(80.0), "80");
        assert_eq!(format_score(45.5), "45.5");
        assert_eq!(format_score(65.16666), "65.17");
        assert_eq!(format_score(f64::NAN), "NaN");
    }

    #[test]
    fn raw_scores_are_not_rounded() {
        assert_eq!(format_raw_score(45.0, false), "45");
        assert_eq!(format_raw_score(45.0, true), "45.0");
        assert_eq!(format_raw_score(33.333, true), "33.333");
        assert_eq!(format_raw_score(12.3456, true), "12.3456");
    }

    #[test]
    fn performance_keeps_score_precision() {
        let scores = vec![
            ("Math".to_string(), Some(33.333)),
            ("Art".to_string(), Some(45.0)),
        ];
        let partition = StatsCalculator::partition_scores(&scores, LAG_THRESHOLD);
        let text = performance_text("S4", &partition, LAG_THRESHOLD, true);

        assert!(text.contains("Subjects lagging behind (below 50):\n"));
        assert!(text.contains(" - Math: 33.333\n - Art: 45.0\n"));
    }

    #[test]
    fn summary_grid_layout() {
        let math = StatsCalculator::describe("Math", &[Some(10.0), Some(20.0)]);
        let text = summary_text(&[math]);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "        Math");
        assert_eq!(lines[1], "count   2.00");
        assert_eq!(lines[2], "mean   15.00");
        assert_eq!(lines[3], "std     7.07");
        assert_eq!(lines[8], "max    20.00");
    }

    #[test]
    fn rank_table_right_aligned() {
        let entries = vec![
            RankEntry {
                student_id: "S2".to_string(),
                total_score: 130.0,
                rank: 1,
            },
            RankEntry {
                student_id: "S10".to_string(),
                total_score: 95.5,
                rank: 2,
            },
        ];
        let text = rank_text(&entries);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Student_ID  Total_Score  Rank");
        assert_eq!(lines[1], "        S2          130     1");
        assert_eq!(lines[2], "       S10         95.5     2");
    }

    #[test]
    fn performance_lists_lagging_and_suggestions() {
        let scores = vec![
            ("Math".to_string(), Some(35.0)),
            ("Science".to_string(), Some(90.0)),
        ];
        let partition = StatsCalculator::partition_scores(&scores, LAG_THRESHOLD);
        let text = performance_text("S1", &partition, LAG_THRESHOLD, false);

        assert!(text.starts_with("Performance Summary for Student ID: S1\n\n"));
        assert!(text.contains("Subjects lagging behind (below 50):\n - Math: 35\n"));
        assert!(text.contains("Improvement Suggestions:\n • Focus more on Math."));
        assert!(text.contains("Consider additional practice or tutoring.\n"));
        assert!(!text.contains("Science"));
    }

    #[test]
    fn performance_with_nothing_lagging() {
        let scores = vec![("Math".to_string(), Some(50.0))];
        let partition = StatsCalculator::partition_scores(&scores, LAG_THRESHOLD);
        let text = performance_text("S7", &partition, LAG_THRESHOLD, false);

        assert_eq!(
            text,
            "Performance Summary for Student ID: S7\n\nGreat job! No subjects lagging behind.\n"
        );
    }
}
