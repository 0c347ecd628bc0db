//! macrocorr-fred
//!
//! Connector that implements `SeriesConnector` for macroeconomic series on top of
//! FRED's public CSV graph export (`/graph/fredgraph.csv`). No API key is
//! required.
#![warn(missing_docs)]

mod builder;
/// CSV parsing for FRED exports.
pub mod parse;

pub use builder::FredConnectorBuilder;

use async_trait::async_trait;
use macrocorr_core::connector::{ConnectorKey, SeriesConnector};
use macrocorr_core::{MacroCorrError, SeriesKind, SeriesRequest, TimeSeries};
use url::Url;

const NAME: &str = "macrocorr-fred";

/// Public connector type. Production users will construct with `FredConnector::new_default()`.
pub struct FredConnector {
    http: reqwest::Client,
    base_url: String,
}

impl FredConnector {
    /// Static connector key for orchestrator priority configuration.
    pub const KEY: ConnectorKey = ConnectorKey::new(NAME);

    /// Public FRED host.
    pub const DEFAULT_BASE_URL: &'static str = "https://fred.stlouisfed.org/";

    /// Build against the public FRED host with a fresh HTTP client.
    #[must_use]
    pub fn new_default() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Build against another host (mirrors, local test servers).
    ///
    /// # Errors
    /// Returns `InvalidArg` if `base` is not an absolute URL.
    pub fn with_base_url(base: &str) -> Result<Self, MacroCorrError> {
        Ok(Self::with_client(reqwest::Client::new(), parse_base(base)?))
    }

    /// Build from an existing `reqwest::Client` and base URL.
    #[must_use]
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    fn series_url(&self, req: &SeriesRequest) -> Result<Url, MacroCorrError> {
        let mut url = parse_base(&self.base_url)?
            .join("graph/fredgraph.csv")
            .map_err(|e| MacroCorrError::InvalidArg(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("id", &req.symbol)
            .append_pair("cosd", &req.range.start().format("%Y-%m-%d").to_string())
            .append_pair("coed", &req.range.end().format("%Y-%m-%d").to_string());
        Ok(url)
    }
}

fn parse_base(base: &str) -> Result<Url, MacroCorrError> {
    let mut url = Url::parse(base).map_err(|e| MacroCorrError::InvalidArg(e.to_string()))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[async_trait]
impl SeriesConnector for FredConnector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn vendor(&self) -> &'static str {
        "FRED"
    }

    fn supports_kind(&self, kind: SeriesKind) -> bool {
        matches!(kind, SeriesKind::Macro)
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "macrocorr::fred::fetch_series",
            skip(self, req),
            fields(symbol = %req.symbol),
        )
    )]
    async fn fetch_series(&self, req: &SeriesRequest) -> Result<TimeSeries, MacroCorrError> {
        let url = self.series_url(req)?;
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| MacroCorrError::connector(NAME, e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(MacroCorrError::not_found(format!("series for {}", req.symbol)));
        }
        if !status.is_success() {
            return Err(MacroCorrError::connector(NAME, format!("HTTP {status}")));
        }
        let body = resp
            .text()
            .await
            .map_err(|e| MacroCorrError::connector(NAME, e.to_string()))?;

        let points = parse::parse_csv(&req.symbol, &body)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(rows = points.len(), "parsed FRED export");
        Ok(TimeSeries::from_unsorted(req.symbol.as_str(), points).restricted_to(&req.range))
    }
}
