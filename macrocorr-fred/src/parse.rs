//! Parsing of the `fredgraph.csv` export.

use chrono::{NaiveDate, NaiveTime};
use macrocorr_core::{MacroCorrError, Observation};

/// Parse a two-column FRED CSV export (`DATE,<SYMBOL>` header, then
/// `YYYY-MM-DD,value` rows).
///
/// Missing observations (`.` or empty) are skipped. An HTML body (FRED's answer
/// for unknown series) maps to `NotFound`.
///
/// # Errors
/// `NotFound` for HTML or header-only bodies that name no series, `Data` for
/// malformed rows.
pub fn parse_csv(symbol: &str, body: &str) -> Result<Vec<Observation>, MacroCorrError> {
    let body = body.trim_start_matches('\u{feff}').trim();
    if body.starts_with('<') {
        return Err(MacroCorrError::not_found(format!("series for {symbol}")));
    }
    let mut lines = body.lines();
    match lines.next() {
        Some(header) if header.contains(',') => {}
        _ => {
            return Err(MacroCorrError::Data(format!(
                "FRED response for {symbol} has no CSV header"
            )));
        }
    }

    let mut out = Vec::new();
    for (n, line) in lines.enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((date, value)) = line.split_once(',') else {
            return Err(MacroCorrError::Data(format!(
                "FRED row {} for {symbol} is malformed: {line}",
                n + 2
            )));
        };
        let value = value.trim();
        if value.is_empty() || value == "." {
            continue;
        }
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|e| {
            MacroCorrError::Data(format!("FRED row {} for {symbol}: bad date: {e}", n + 2))
        })?;
        let value: f64 = value.parse().map_err(|e| {
            MacroCorrError::Data(format!("FRED row {} for {symbol}: bad value: {e}", n + 2))
        })?;
        out.push(Observation::new(date.and_time(NaiveTime::MIN).and_utc(), value));
    }
    Ok(out)
}
