//! Line-chart data keyed by `n`.
//!
//! Points are already projected onto the chart's x axis: with
//! [`AxisScale::Log10`] the x coordinate is `log10(n)`, so terminal chart
//! widgets with only linear axes can draw them directly.

use serde::Serialize;

use crate::config::ChartOptions;
use crate::presenter::table::format_count;
use crate::types::{AxisScale, TrialResult};

pub const FREQUENCY_TITLE: &str = "Empirical frequency vs. sample size";
pub const DEVIATION_TITLE: &str = "Absolute difference vs. sample size";

/// Smallest upper bound of the deviation chart's y axis.
const MIN_DEVIATION_CEILING: f64 = 0.01;

/// What a series represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SeriesKind {
    Frequency,
    Deviation,
    /// Horizontal line at `y = p`.
    Reference,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub name: String,
    pub kind: SeriesKind,
    /// `(x, y)` pairs with x already projected onto the axis scale.
    pub points: Vec<(f64, f64)>,
}

/// Everything needed to draw one chart.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub x_scale: AxisScale,
    pub series: Vec<ChartSeries>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl ChartSpec {
    /// Three x-axis labels (min, middle, max), in units of `n`.
    pub fn x_labels(&self) -> Vec<String> {
        let [lo, hi] = self.x_bounds;
        [lo, (lo + hi) / 2.0, hi]
            .iter()
            .map(|&x| match self.x_scale {
                AxisScale::Linear => format_count(x.round().max(0.0) as u64),
                AxisScale::Log10 => format_count(10f64.powf(x).round() as u64),
            })
            .collect()
    }

    /// Three y-axis labels (min, middle, max).
    pub fn y_labels(&self) -> Vec<String> {
        let [lo, hi] = self.y_bounds;
        [lo, (lo + hi) / 2.0, hi]
            .iter()
            .map(|y| format!("{:.2}", y))
            .collect()
    }

    pub fn series(&self, kind: SeriesKind) -> Option<&ChartSeries> {
        self.series.iter().find(|s| s.kind == kind)
    }
}

/// Frequency vs. `n`, with the `y = p` reference line when requested.
pub fn frequency_chart(results: &[TrialResult], p: f64, options: &ChartOptions) -> ChartSpec {
    let points = project(results, options.x_scale, |r| r.frequency);
    let x_bounds = x_bounds(&points);

    let mut series = vec![ChartSeries {
        name: "result".to_string(),
        kind: SeriesKind::Frequency,
        points,
    }];
    if options.reference_line {
        series.push(ChartSeries {
            name: format!("p = {:.2}", p),
            kind: SeriesKind::Reference,
            points: vec![(x_bounds[0], p), (x_bounds[1], p)],
        });
    }

    ChartSpec {
        title: FREQUENCY_TITLE.to_string(),
        x_title: options.x_scale.axis_title().to_string(),
        y_title: "result".to_string(),
        x_scale: options.x_scale,
        series,
        x_bounds,
        y_bounds: [0.0, 1.0],
    }
}

/// Absolute deviation vs. `n`.
pub fn deviation_chart(results: &[TrialResult], options: &ChartOptions) -> ChartSpec {
    let points = project(results, options.x_scale, |r| r.absolute_deviation);
    let x_bounds = x_bounds(&points);
    let max_dev = points.iter().map(|&(_, y)| y).fold(0.0_f64, f64::max);

    ChartSpec {
        title: DEVIATION_TITLE.to_string(),
        x_title: options.x_scale.axis_title().to_string(),
        y_title: "|result - p|".to_string(),
        x_scale: options.x_scale,
        series: vec![ChartSeries {
            name: "|result - p|".to_string(),
            kind: SeriesKind::Deviation,
            points,
        }],
        x_bounds,
        y_bounds: [0.0, (max_dev * 1.2).max(MIN_DEVIATION_CEILING)],
    }
}

/// The frequency chart, followed by the deviation chart if enabled.
pub fn build_charts(results: &[TrialResult], p: f64, options: &ChartOptions) -> Vec<ChartSpec> {
    let mut charts = vec![frequency_chart(results, p, options)];
    if options.show_deviation_chart {
        charts.push(deviation_chart(results, options));
    }
    charts
}

fn project(
    results: &[TrialResult],
    scale: AxisScale,
    value: impl Fn(&TrialResult) -> f64,
) -> Vec<(f64, f64)> {
    results
        .iter()
        .map(|r| (scale.project(r.n), value(r)))
        .collect()
}

fn x_bounds(points: &[(f64, f64)]) -> [f64; 2] {
    let min = points.iter().map(|&(x, _)| x).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|&(x, _)| x).fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    if max > min {
        [min, max]
    } else {
        // Single point: widen so the widget has a non-empty range
        [min - 0.5, max + 0.5]
    }
}
