//! Tabular view of a run.

use serde::Serialize;
use std::fmt::Write as _;

use crate::types::TrialResult;

/// Column headers, in display order.
pub const TABLE_COLUMNS: [&str; 3] = ["n", "result", "|result - p|"];

/// Decimal places for frequency and deviation.
pub const DECIMALS: usize = 4;

/// One formatted table row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub n: String,
    pub result: String,
    pub deviation: String,
}

impl TableRow {
    pub fn from_result(result: &TrialResult) -> Self {
        Self {
            n: format_count(result.n),
            result: format_decimal(result.frequency),
            deviation: format_decimal(result.absolute_deviation),
        }
    }

    /// Cells in column order.
    pub fn cells(&self) -> [&str; 3] {
        [
            self.n.as_str(),
            self.result.as_str(),
            self.deviation.as_str(),
        ]
    }
}

/// Results formatted for display.
///
/// # Examples
///
/// ```rust
/// use lln_core::presenter::ResultTable;
/// use lln_core::{Probability, TrialResult};
///
/// let p = Probability::new(0.5).unwrap();
/// let table = ResultTable::from_results(&[TrialResult::from_successes(1000, p, 512)]);
///
/// assert_eq!(table.rows[0].n, "1,000");
/// assert_eq!(table.rows[0].result, "0.5120");
/// assert_eq!(table.rows[0].deviation, "0.0120");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl ResultTable {
    pub fn from_results(results: &[TrialResult]) -> Self {
        Self {
            columns: TABLE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: results.iter().map(TableRow::from_result).collect(),
        }
    }

    /// Renders the table as right-aligned plain text.
    pub fn to_text(&self) -> String {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row.cells()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        let header: Vec<&str> = self.columns.iter().map(String::as_str).collect();
        write_line(&mut out, &header, &widths);

        let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
        let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
        write_line(&mut out, &rule, &widths);

        for row in &self.rows {
            write_line(&mut out, &row.cells(), &widths);
        }
        out
    }
}

fn write_line(out: &mut String, cells: &[&str], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:>width$}", cell, width = width))
        .collect();
    // Writing to a String cannot fail
    let _ = writeln!(out, "{}", line.join("  "));
}

/// Formats a value to 4 decimal places.
#[inline]
pub fn format_decimal(value: f64) -> String {
    format!("{:.1$}", value, DECIMALS)
}

/// Formats a count with thousands separators (`10000000` -> `10,000,000`).
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
