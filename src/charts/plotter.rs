//! Chart Plotter Module
//! Creates the bar and trend visualizations using egui_plot.

use crate::stats::report::format_score;
use egui::{Align2, Color32, RichText};
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoint, PlotPoints, Points, Text};

pub const AVERAGE_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
pub const LAGGING_COLOR: Color32 = Color32::from_rgb(231, 76, 60); // Red
pub const TREND_COLOR: Color32 = Color32::from_rgb(230, 126, 34); // Carrot
pub const TREND_FILL_COLOR: Color32 = Color32::from_rgb(243, 156, 18); // Orange

/// Headroom above the tallest bar or point for value labels.
const LABEL_HEADROOM: f64 = 1.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// One bar per category
    Bar,
    /// Line with markers and filled area down to zero
    Trend,
}

/// How value labels above bars and points are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    OneDecimal,
    Integer,
    Score,
}

impl ValueFormat {
    pub fn format(self, value: f64) -> String {
        match self {
            ValueFormat::OneDecimal => format!("{:.1}", value),
            ValueFormat::Integer => format!("{}", value.round() as i64),
            ValueFormat::Score => format_score(value),
        }
    }
}

/// Everything needed to draw one chart window.
#[derive(Debug, Clone)]
pub struct ChartData {
    pub title: String,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    /// `None` entries are not drawn.
    pub values: Vec<Option<f64>>,
    pub value_format: ValueFormat,
    pub color: Color32,
}

impl ChartData {
    /// Bar chart of per-subject means.
    pub fn subject_averages(averages: &[(String, f64)]) -> Self {
        Self {
            title: "Subject-wise Average Scores".to_string(),
            kind: ChartKind::Bar,
            labels: averages.iter().map(|(s, _)| s.clone()).collect(),
            values: averages
                .iter()
                .map(|(_, v)| (!v.is_nan()).then_some(*v))
                .collect(),
            value_format: ValueFormat::OneDecimal,
            color: AVERAGE_COLOR,
        }
    }

    /// Bar chart of how many students lag in each subject.
    pub fn lagging_counts(counts: &[(String, usize)], threshold: f64) -> Self {
        Self {
            title: format!(
                "Number of Students Lagging per Subject (Score < {})",
                format_score(threshold)
            ),
            kind: ChartKind::Bar,
            labels: counts.iter().map(|(s, _)| s.clone()).collect(),
            values: counts.iter().map(|(_, c)| Some(*c as f64)).collect(),
            value_format: ValueFormat::Integer,
            color: LAGGING_COLOR,
        }
    }

    /// Line chart of one student's scores across subjects.
    pub fn student_trend(student_id: &str, scores: &[(String, Option<f64>)]) -> Self {
        Self {
            title: format!("Performance Trend for Student ID: {}", student_id),
            kind: ChartKind::Trend,
            labels: scores.iter().map(|(s, _)| s.clone()).collect(),
            values: scores
                .iter()
                .map(|(_, v)| v.filter(|x| !x.is_nan()))
                .collect(),
            value_format: ValueFormat::Score,
            color: TREND_COLOR,
        }
    }

    /// Drawable `(x, y)` points, skipping missing values.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|y| [i as f64, y]))
            .collect()
    }

    /// Upper y bound leaving room for value labels.
    pub fn y_upper_bound(&self) -> f64 {
        let max = self
            .values
            .iter()
            .flatten()
            .copied()
            .fold(0.0_f64, f64::max);
        if max > 0.0 {
            max * LABEL_HEADROOM
        } else {
            1.0
        }
    }
}

/// Draws chart data into an egui `Ui`.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw a chart with category labels on the x axis and a hidden y axis.
    pub fn draw_chart(ui: &mut egui::Ui, chart_data: &ChartData, height: f32) {
        let labels = chart_data.labels.clone();
        let category_count = labels.len();

        Plot::new(format!("chart_{}", chart_data.title))
            .height(height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show_grid(false)
            .show_axes([true, false])
            .include_x(-0.6)
            .include_x(category_count as f64 - 0.4)
            .include_y(0.0)
            .include_y(chart_data.y_upper_bound())
            // One tick per category
            .x_grid_spacer(move |_input| {
                (0..category_count)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if idx >= 0.0 && (mark.value - idx).abs() < 1e-6 {
                    labels.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                match chart_data.kind {
                    ChartKind::Bar => {
                        let bars: Vec<Bar> = chart_data
                            .points()
                            .iter()
                            .map(|&[x, y]| {
                                let name = chart_data
                                    .labels
                                    .get(x as usize)
                                    .cloned()
                                    .unwrap_or_default();
                                Bar::new(x, y).width(0.6).fill(chart_data.color).name(name)
                            })
                            .collect();
                        plot_ui.bar_chart(BarChart::new(bars).color(chart_data.color));
                    }
                    ChartKind::Trend => {
                        let points = chart_data.points();

                        plot_ui.line(
                            Line::new(PlotPoints::from_iter(points.iter().copied()))
                                .color(TREND_FILL_COLOR)
                                .width(0.0)
                                .fill(0.0),
                        );
                        plot_ui.line(
                            Line::new(PlotPoints::from_iter(points.iter().copied()))
                                .color(chart_data.color)
                                .width(3.0),
                        );
                        plot_ui.points(
                            Points::new(PlotPoints::from_iter(points.iter().copied()))
                                .radius(5.0)
                                .color(chart_data.color),
                        );
                    }
                }

                // Value labels just above each bar / point
                let offset = chart_data.y_upper_bound() * 0.01;
                for [x, y] in chart_data.points() {
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(x, y + offset),
                            RichText::new(chart_data.value_format.format(y)).size(13.0),
                        )
                        .anchor(Align2::CENTER_BOTTOM),
                    );
                }
            });
    }
}
