//! Result Presenter.
//!
//! Turns a sequence of [`TrialResult`](crate::TrialResult)s into display-ready
//! structures. Rendering itself belongs to the front ends:
//!
//! - [`table`]: the `n` / `result` / `|result - p|` table, 4-decimal formatting
//! - [`chart`]: line series and axis bounds for terminal charts (ratatui)
//! - [`chartjs`]: Chart.js-compatible JSON for the browser dashboard

pub mod chart;
pub mod chartjs;
pub mod table;

pub use chart::{build_charts, deviation_chart, frequency_chart, ChartSeries, ChartSpec, SeriesKind};
pub use chartjs::{ChartJsLineChart, ChartJsVisualiser};
pub use table::{format_count, format_decimal, ResultTable, TableRow, TABLE_COLUMNS};
