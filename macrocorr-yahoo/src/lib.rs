//! macrocorr-yahoo
//!
//! Connector that implements `SeriesConnector` for FX series using Yahoo
//! Finance's public chart endpoint (`/v8/finance/chart/{symbol}`), reading daily,
//! weekly, or monthly closes.
#![warn(missing_docs)]

mod builder;
/// Chart response decoding.
pub mod chart;

pub use builder::YahooConnectorBuilder;

use async_trait::async_trait;
use macrocorr_core::connector::{ConnectorKey, SeriesConnector};
use macrocorr_core::{Interval, MacroCorrError, SeriesKind, SeriesRequest, TimeSeries};
use url::Url;

const NAME: &str = "macrocorr-yahoo";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Public connector type. Production users will construct with `YahooConnector::new_default()`.
pub struct YahooConnector {
    http: reqwest::Client,
    base_url: String,
}

impl YahooConnector {
    /// Static connector key for orchestrator priority configuration.
    pub const KEY: ConnectorKey = ConnectorKey::new(NAME);

    /// Public chart API host.
    pub const DEFAULT_BASE_URL: &'static str = "https://query1.finance.yahoo.com/";

    /// Build against the public host with a fresh HTTP client.
    #[must_use]
    pub fn new_default() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Build against another host (local test servers, proxies).
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

    const fn interval_param(interval: Interval) -> &'static str {
        match interval {
            Interval::Weekly => "1wk",
            Interval::Monthly => "1mo",
            _ => "1d",
        }
    }

    fn chart_url(&self, req: &SeriesRequest) -> Result<Url, MacroCorrError> {
        let mut url = parse_base(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|()| {
                MacroCorrError::InvalidArg(format!("base URL {} cannot hold a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", req.symbol.as_str()]);
        url.query_pairs_mut()
            .append_pair("period1", &req.range.start_utc().timestamp().to_string())
            .append_pair(
                "period2",
                &req.range.end_exclusive_utc().timestamp().to_string(),
            )
            .append_pair("interval", Self::interval_param(req.interval))
            .append_pair("includePrePost", "false");
        Ok(url)
    }
}

fn parse_base(base: &str) -> Result<Url, MacroCorrError> {
    Url::parse(base).map_err(|e| MacroCorrError::InvalidArg(e.to_string()))
}

#[async_trait]
impl SeriesConnector for YahooConnector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn vendor(&self) -> &'static str {
        "Yahoo Finance"
    }

    fn supports_kind(&self, kind: SeriesKind) -> bool {
        matches!(kind, SeriesKind::Fx)
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "macrocorr::yahoo::fetch_series",
            skip(self, req),
            fields(symbol = %req.symbol, interval = ?req.interval),
        )
    )]
    async fn fetch_series(&self, req: &SeriesRequest) -> Result<TimeSeries, MacroCorrError> {
        let url = self.chart_url(req)?;
        let resp = self
            .http
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
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

        let points = chart::decode_closes(NAME, &req.symbol, &body)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(rows = points.len(), "decoded chart closes");
        Ok(TimeSeries::from_unsorted(req.symbol.as_str(), points).restricted_to(&req.range))
    }
}
