//! Wire types and decoding for the `/v8/finance/chart` endpoint.

use chrono::DateTime;
use macrocorr_core::{MacroCorrError, Observation};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Envelope {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Deserialize)]
struct QuoteBlock {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Decode a chart response into close observations.
///
/// Null closes are skipped. A `chart.error` with code `Not Found` or an empty
/// result list maps to `NotFound`.
///
/// # Errors
/// `NotFound` as above, `Connector` for other reported errors, `Data` for
/// undecodable JSON.
pub fn decode_closes(
    connector: &'static str,
    symbol: &str,
    body: &str,
) -> Result<Vec<Observation>, MacroCorrError> {
    let env: Envelope = serde_json::from_str(body)
        .map_err(|e| MacroCorrError::Data(format!("chart response for {symbol}: {e}")))?;

    if let Some(err) = env.chart.error {
        if err.code.eq_ignore_ascii_case("Not Found") {
            return Err(MacroCorrError::not_found(format!("series for {symbol}")));
        }
        return Err(MacroCorrError::connector(
            connector,
            err.description.unwrap_or(err.code),
        ));
    }

    let Some(result) = env.chart.result.and_then(|r| r.into_iter().next()) else {
        return Err(MacroCorrError::not_found(format!("series for {symbol}")));
    };
    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();

    Ok(result
        .timestamp
        .into_iter()
        .zip(closes)
        .filter_map(|(ts, close)| {
            let ts = DateTime::from_timestamp(ts, 0)?;
            close.filter(|c| c.is_finite()).map(|c| Observation::new(ts, c))
        })
        .collect())
}
