//! Statistics Calculator Module
//! Descriptive statistics, averages, class ranks and threshold counts over subject scores.

use statrs::statistics::Statistics;
use std::cmp::Ordering;

/// Scores strictly below this mark count as lagging.
pub const LAG_THRESHOLD: f64 = 50.0;

/// Descriptive statistics for a single subject column.
#[derive(Debug, Clone)]
pub struct ColumnSummary {
    pub subject: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

impl Default for ColumnSummary {
    fn default() -> Self {
        Self {
            subject: String::new(),
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            p25: f64::NAN,
            p50: f64::NAN,
            p75: f64::NAN,
            max: f64::NAN,
        }
    }
}

impl ColumnSummary {
    /// Statistic labels in display order.
    pub const LABELS: [&'static str; 8] =
        ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

    /// Statistic values in the same order as [`ColumnSummary::LABELS`].
    pub fn values(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.p25,
            self.p50,
            self.p75,
            self.max,
        ]
    }
}

/// One row of the class rank table.
#[derive(Debug, Clone, PartialEq)]
pub struct RankEntry {
    pub student_id: String,
    pub total_score: f64,
    pub rank: i64,
}

/// A student's subjects split around the lag threshold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScorePartition {
    pub lagging: Vec<(String, f64)>,
    pub strong: Vec<(String, f64)>,
}

/// Handles statistical calculations on extracted score columns.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for a column, ignoring nulls and NaN.
    pub fn describe(subject: &str, values: &[Option<f64>]) -> ColumnSummary {
        let present = Self::present(values);
        let n = present.len();
        if n == 0 {
            return ColumnSummary {
                subject: subject.to_string(),
                ..ColumnSummary::default()
            };
        }

        let mut sorted = present.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        ColumnSummary {
            subject: subject.to_string(),
            count: n,
            mean: present.iter().mean(),
            // Sample deviation; NaN for a single observation
            std: present.iter().std_dev(),
            min: sorted[0],
            p25: Self::percentile(&sorted, 25.0),
            p50: Self::percentile(&sorted, 50.0),
            p75: Self::percentile(&sorted, 75.0),
            max: sorted[n - 1],
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Mean of each subject, skipping nulls. All-null subjects average to NaN.
    pub fn subject_averages(
        subjects: &[String],
        columns: &[Vec<Option<f64>>],
    ) -> Vec<(String, f64)> {
        subjects
            .iter()
            .zip(columns)
            .map(|(subject, values)| {
                let present = Self::present(values);
                (subject.clone(), present.iter().mean())
            })
            .collect()
    }

    /// Split one student's scores at `threshold`. Missing scores land in neither set.
    pub fn partition_scores(scores: &[(String, Option<f64>)], threshold: f64) -> ScorePartition {
        let mut partition = ScorePartition::default();
        for (subject, score) in scores {
            match score {
                Some(v) if *v < threshold => partition.lagging.push((subject.clone(), *v)),
                Some(v) if *v >= threshold => partition.strong.push((subject.clone(), *v)),
                _ => {}
            }
        }
        partition
    }

    /// Row totals and "min"-method descending ranks, in row order.
    ///
    /// Totals skip missing scores, so a row with no scores totals 0.
    /// Tied totals share the best rank and the following rank is skipped.
    pub fn compute_ranks(
        student_ids: &[String],
        columns: &[Vec<Option<f64>>],
    ) -> Vec<RankEntry> {
        let totals: Vec<f64> = (0..student_ids.len())
            .map(|row| {
                columns
                    .iter()
                    .filter_map(|col| col.get(row).copied().flatten())
                    .filter(|v| !v.is_nan())
                    .sum()
            })
            .collect();

        let mut order: Vec<usize> = (0..totals.len()).collect();
        order.sort_by(|&a, &b| totals[b].partial_cmp(&totals[a]).unwrap_or(Ordering::Equal));

        let mut ranks = vec![0i64; totals.len()];
        let mut previous: Option<(f64, i64)> = None;
        for (position, &row) in order.iter().enumerate() {
            let rank = match previous {
                Some((total, rank)) if total == totals[row] => rank,
                _ => position as i64 + 1,
            };
            ranks[row] = rank;
            previous = Some((totals[row], rank));
        }

        student_ids
            .iter()
            .zip(totals)
            .zip(ranks)
            .map(|((id, total_score), rank)| RankEntry {
                student_id: id.clone(),
                total_score,
                rank,
            })
            .collect()
    }

    /// Entries ordered by rank; equal ranks keep row order.
    pub fn sort_by_rank(entries: &[RankEntry]) -> Vec<RankEntry> {
        let mut sorted = entries.to_vec();
        sorted.sort_by_key(|e| e.rank);
        sorted
    }

    /// Number of students below `threshold` per subject, most lagging first.
    pub fn lagging_counts(
        subjects: &[String],
        columns: &[Vec<Option<f64>>],
        threshold: f64,
    ) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = subjects
            .iter()
            .zip(columns)
            .map(|(subject, values)| {
                let count = values.iter().flatten().filter(|v| **v < threshold).count();
                (subject.clone(), count)
            })
            .collect();

        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }

    fn present(values: &[Option<f64>]) -> Vec<f64> {
        values
            .iter()
            .flatten()
            .copied()
            .filter(|v| !v.is_nan())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn describe_matches_pandas() {
        let values = vec![Some(10.0), Some(20.0), Some(30.0), Some(40.0), None];
        let summary = StatsCalculator::describe("Math", &values);

        assert_eq!(summary.subject, "Math");
        assert_eq!(summary.count, 4);
        assert_approx_eq!(summary.mean, 25.0);
        assert_approx_eq!(summary.std, 12.909944487358056);
        assert_approx_eq!(summary.min, 10.0);
        assert_approx_eq!(summary.p25, 17.5);
        assert_approx_eq!(summary.p50, 25.0);
        assert_approx_eq!(summary.p75, 32.5);
        assert_approx_eq!(summary.max, 40.0);
    }

    #[test]
    fn describe_single_value_has_nan_std() {
        let summary = StatsCalculator::describe("Art", &[Some(70.0)]);
        assert_eq!(summary.count, 1);
        assert!(summary.std.is_nan());
        assert_approx_eq!(summary.p75, 70.0);
    }

    #[test]
    fn describe_empty_column() {
        let summary = StatsCalculator::describe("Art", &[None, None]);
        assert_eq!(summary.count, 0);
        assert!(summary.mean.is_nan());
        assert!(summary.max.is_nan());
    }

    #[test]
    fn averages_skip_nulls() {
        let subjects = names(&["Math", "Science", "Art"]);
        let columns = vec![
            vec![Some(80.0), Some(40.0), None],
            vec![Some(45.5), Some(90.0), Some(60.0)],
            vec![None, None, None],
        ];
        let averages = StatsCalculator::subject_averages(&subjects, &columns);

        assert_eq!(averages[0].0, "Math");
        assert_approx_eq!(averages[0].1, 60.0);
        assert_approx_eq!(averages[1].1, 65.166666666666667);
        assert!(averages[2].1.is_nan());
    }

    #[test]
    fn partition_has_no_overlap() {
        let scores = vec![
            ("Math".to_string(), Some(49.9)),
            ("Science".to_string(), Some(50.0)),
            ("Art".to_string(), None),
            ("History".to_string(), Some(12.0)),
        ];
        let partition = StatsCalculator::partition_scores(&scores, LAG_THRESHOLD);

        assert_eq!(
            partition.lagging,
            vec![("Math".to_string(), 49.9), ("History".to_string(), 12.0)]
        );
        assert_eq!(partition.strong, vec![("Science".to_string(), 50.0)]);
        for (subject, _) in &partition.lagging {
            assert!(!partition.strong.iter().any(|(s, _)| s == subject));
        }
    }

    #[test]
    fn ranks_use_min_method_descending() {
        let ids = names(&["A", "B", "C", "D", "E"]);
        let columns = vec![
            vec![Some(50.0), Some(90.0), Some(50.0), Some(10.0), None],
            vec![Some(40.0), Some(0.0), Some(40.0), Some(5.0), None],
        ];
        let entries = StatsCalculator::compute_ranks(&ids, &columns);

        let totals: Vec<f64> = entries.iter().map(|e| e.total_score).collect();
        assert_eq!(totals, vec![90.0, 90.0, 90.0, 15.0, 0.0]);
        let ranks: Vec<i64> = entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 1, 1, 4, 5]);
    }

    #[test]
    fn ranks_skip_after_ties() {
        let ids = names(&["A", "B", "C", "D"]);
        let columns = vec![vec![Some(70.0), Some(95.0), Some(70.0), Some(60.0)]];
        let entries = StatsCalculator::compute_ranks(&ids, &columns);

        let ranks: Vec<i64> = entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![2, 1, 2, 4]);

        let sorted = StatsCalculator::sort_by_rank(&entries);
        let order: Vec<&str> = sorted.iter().map(|e| e.student_id.as_str()).collect();
        assert_eq!(order, vec!["B", "A", "C", "D"]);
    }

    #[test]
    fn lagging_counts_sorted_descending() {
        let subjects = names(&["Math", "Science", "Art"]);
        let columns = vec![
            vec![Some(49.0), Some(50.0), Some(80.0)],
            vec![Some(10.0), Some(20.0), None],
            vec![Some(99.0), Some(98.0), Some(97.0)],
        ];
        let counts = StatsCalculator::lagging_counts(&subjects, &columns, LAG_THRESHOLD);

        assert_eq!(
            counts,
            vec![
                ("Science".to_string(), 2),
                ("Math".to_string(), 1),
                ("Art".to_string(), 0),
            ]
        );
    }
}
