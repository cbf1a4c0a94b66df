//! Chart.js-compatible JSON output for the browser dashboard.
//!
//! Unlike the terminal chart data, points keep raw `n` on the x axis and the
//! axis type is set to `"logarithmic"`; Chart.js does the projection itself.

use serde::Serialize;

use crate::config::ChartOptions;
use crate::presenter::chart::{DEVIATION_TITLE, FREQUENCY_TITLE};
use crate::types::{AxisScale, TrialResult};

const FREQUENCY_COLOUR: &str = "#1f77b4";
const DEVIATION_COLOUR: &str = "#ff7f0e";
const REFERENCE_COLOUR: &str = "#888888";

/// Dash pattern of the `y = p` rule.
const REFERENCE_DASH: [u32; 2] = [6, 4];

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ChartJsPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartJsDataset {
    pub label: String,
    pub data: Vec<ChartJsPoint>,
    pub border_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_dash: Option<Vec<u32>>,
    pub point_radius: u32,
    pub fill: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartJsData {
    pub datasets: Vec<ChartJsDataset>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartJsTitleOptions {
    pub display: bool,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartJsAxis {
    #[serde(rename = "type")]
    pub axis_type: String,
    pub title: ChartJsTitleOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartJsScales {
    pub x: ChartJsAxis,
    pub y: ChartJsAxis,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartJsPlugins {
    pub title: ChartJsTitleOptions,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartJsOptions {
    pub scales: ChartJsScales,
    pub plugins: ChartJsPlugins,
}

/// A Chart.js line chart definition.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartJsLineChart {
    #[serde(rename = "type")]
    pub chart_type: String,
    pub data: ChartJsData,
    pub options: ChartJsOptions,
}

/// Builds Chart.js definitions from run results.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChartJsVisualiser {
    options: ChartOptions,
}

impl ChartJsVisualiser {
    pub fn new(options: ChartOptions) -> Self {
        Self { options }
    }

    /// Frequency chart, with the dashed `y = p` rule when enabled.
    pub fn frequency_chart(&self, results: &[TrialResult], p: f64) -> ChartJsLineChart {
        let mut datasets = vec![dataset(
            "result",
            points(results, |r| r.frequency),
            FREQUENCY_COLOUR,
        )];

        if self.options.reference_line {
            if let (Some(lo), Some(hi)) = (min_n(results), max_n(results)) {
                let (lo, hi) = (lo as f64, hi as f64);
                datasets.push(ChartJsDataset {
                    label: format!("p = {:.2}", p),
                    data: vec![ChartJsPoint { x: lo, y: p }, ChartJsPoint { x: hi, y: p }],
                    border_color: REFERENCE_COLOUR.to_string(),
                    border_dash: Some(REFERENCE_DASH.to_vec()),
                    point_radius: 0,
                    fill: false,
                });
            }
        }

        self.line_chart(FREQUENCY_TITLE, "result", datasets, Some((0.0, 1.0)))
    }

    /// Absolute deviation chart.
    pub fn deviation_chart(&self, results: &[TrialResult]) -> ChartJsLineChart {
        let datasets = vec![dataset(
            "|result - p|",
            points(results, |r| r.absolute_deviation),
            DEVIATION_COLOUR,
        )];
        self.line_chart(DEVIATION_TITLE, "|result - p|", datasets, None)
    }

    /// One or two charts, matching the configured options.
    pub fn charts(&self, results: &[TrialResult], p: f64) -> Vec<ChartJsLineChart> {
        let mut charts = vec![self.frequency_chart(results, p)];
        if self.options.show_deviation_chart {
            charts.push(self.deviation_chart(results));
        }
        charts
    }

    fn line_chart(
        &self,
        title: &str,
        y_title: &str,
        datasets: Vec<ChartJsDataset>,
        y_range: Option<(f64, f64)>,
    ) -> ChartJsLineChart {
        let x_type = match self.options.x_scale {
            AxisScale::Linear => "linear",
            AxisScale::Log10 => "logarithmic",
        };

        ChartJsLineChart {
            chart_type: "line".to_string(),
            data: ChartJsData { datasets },
            options: ChartJsOptions {
                scales: ChartJsScales {
                    x: ChartJsAxis {
                        axis_type: x_type.to_string(),
                        title: shown(self.options.x_scale.axis_title()),
                        min: None,
                        max: None,
                    },
                    y: ChartJsAxis {
                        axis_type: "linear".to_string(),
                        title: shown(y_title),
                        min: y_range.map(|(lo, _)| lo),
                        max: y_range.map(|(_, hi)| hi),
                    },
                },
                plugins: ChartJsPlugins {
                    title: shown(title),
                },
            },
        }
    }
}

fn shown(text: &str) -> ChartJsTitleOptions {
    ChartJsTitleOptions {
        display: true,
        text: text.to_string(),
    }
}

fn dataset(label: &str, data: Vec<ChartJsPoint>, colour: &str) -> ChartJsDataset {
    ChartJsDataset {
        label: label.to_string(),
        data,
        border_color: colour.to_string(),
        border_dash: None,
        point_radius: 3,
        fill: false,
    }
}

fn points(results: &[TrialResult], value: impl Fn(&TrialResult) -> f64) -> Vec<ChartJsPoint> {
    results
        .iter()
        .map(|r| ChartJsPoint {
            x: r.n as f64,
            y: value(r),
        })
        .collect()
}

fn min_n(results: &[TrialResult]) -> Option<u64> {
    results.iter().map(|r| r.n).min()
}

fn max_n(results: &[TrialResult]) -> Option<u64> {
    results.iter().map(|r| r.n).max()
}
