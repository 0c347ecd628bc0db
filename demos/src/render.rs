//! Plain-text rendering of dashboard results.
//!
//! Absent values are shown as `n/a`; numbers use four decimals.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use macrocorr::{CorrelationMatrix, MultiSeriesTable, RollingCorrelationTable};

const NA: &str = "n/a";
const MIN_WIDTH: usize = 10;
const DATE_WIDTH: usize = 10;

fn cell(v: Option<f64>) -> String {
    v.map_or_else(|| NA.to_string(), |x| format!("{x:.4}"))
}

fn date(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

fn widths<'a>(names: impl Iterator<Item = &'a str>) -> Vec<usize> {
    names.map(|n| n.len().max(MIN_WIDTH)).collect()
}

fn header(first: &str, first_width: usize, names: &[&str], widths: &[usize]) -> String {
    let mut out = format!("{first:<first_width$}");
    for (n, &w) in names.iter().zip(widths) {
        let _ = write!(out, " | {n:>w$}");
    }
    out.push('\n');
    out.push_str(&"-".repeat(out.len() - 1));
    out.push('\n');
    out
}

/// Render the last `last_n` rows of an aligned table.
#[must_use]
pub fn render_table(table: &MultiSeriesTable, last_n: usize) -> String {
    let names: Vec<&str> = table.field_names().collect();
    let widths = widths(names.iter().copied());
    let mut out = header("date", DATE_WIDTH, &names, &widths);
    for row in table.tail(last_n).rows() {
        let _ = write!(out, "{:<width$}", date(&row.ts), width = DATE_WIDTH);
        for (v, &w) in row.values.iter().zip(&widths) {
            let _ = write!(out, " | {:>w$}", cell(*v));
        }
        out.push('\n');
    }
    out
}

/// Render a correlation matrix with field names on both axes.
#[must_use]
pub fn render_matrix(matrix: &CorrelationMatrix) -> String {
    let names: Vec<&str> = matrix.fields().iter().map(String::as_str).collect();
    let widths = widths(names.iter().copied());
    let label_width = names.iter().map(|n| n.len()).max().unwrap_or(0).max(MIN_WIDTH);
    let mut out = header("", label_width, &names, &widths);
    for (name, row) in names.iter().zip(matrix.values()) {
        let _ = write!(out, "{name:<label_width$}");
        for (v, &w) in row.iter().zip(&widths) {
            let _ = write!(out, " | {:>w$}", cell(*v));
        }
        out.push('\n');
    }
    out
}

/// Render the last `last_n` timestamps of a rolling correlation table.
#[must_use]
pub fn render_rolling(rolling: &RollingCorrelationTable, last_n: usize) -> String {
    let fields = rolling.fields();
    let names: Vec<&str> = fields.iter().map(String::as_str).collect();
    let widths = widths(names.iter().copied());
    let mut out = format!(
        "rolling vs {} (window {})\n",
        rolling.primary_name(),
        rolling
            .window()
            .map_or_else(|| NA.to_string(), |w| w.to_string())
    );
    out.push_str(&header("date", DATE_WIDTH, &names, &widths));
    let skip = rolling.len().saturating_sub(last_n);
    for (ts, row) in rolling.iter().skip(skip) {
        let _ = write!(out, "{:<width$}", date(ts), width = DATE_WIDTH);
        for (n, &w) in names.iter().zip(&widths) {
            let _ = write!(out, " | {:>w$}", cell(row.get(*n).copied()));
        }
        out.push('\n');
    }
    out
}
