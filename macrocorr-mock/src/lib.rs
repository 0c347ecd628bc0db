use async_trait::async_trait;
use macrocorr_core::connector::SeriesConnector;
use macrocorr_core::{MacroCorrError, SeriesKind, SeriesRequest, TimeSeries};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior};

/// Mock connector for CI-safe examples. Provides deterministic data from generated fixtures.
///
/// Fixture symbols: `CHF=X` (monthly FX), `CPIAUCSL`, `UNRATE`, `FEDFUNDS`
/// (monthly), and `DGS10` (business days with gaps). Special symbols: `FAIL`
/// returns a connector error, `TIMEOUT` answers after a short delay, `EMPTY`
/// returns an empty series.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Connector key used by priority lists.
    pub const KEY: macrocorr_core::ConnectorKey =
        macrocorr_core::ConnectorKey::new("macrocorr-mock");

    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn maybe_fail_or_timeout(symbol: &str) -> Result<(), MacroCorrError> {
        match symbol {
            "FAIL" => Err(MacroCorrError::connector(
                "macrocorr-mock",
                "forced failure: series",
            )),
            "TIMEOUT" => {
                // Long enough to trip short orchestrator timeouts in tests.
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl SeriesConnector for MockConnector {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn supports_kind(&self, _kind: SeriesKind) -> bool {
        true
    }

    async fn fetch_series(&self, req: &SeriesRequest) -> Result<TimeSeries, MacroCorrError> {
        let s = req.symbol.as_str();
        Self::maybe_fail_or_timeout(s).await?;
        match s {
            "EMPTY" => Ok(TimeSeries::empty(s)),
            "TIMEOUT" => fixtures::by_symbol("CHF=X", &req.range)
                .map(|series| series.renamed(s))
                .ok_or_else(|| MacroCorrError::not_found(format!("series for {s}"))),
            _ => fixtures::by_symbol(s, &req.range)
                .ok_or_else(|| MacroCorrError::not_found(format!("series for {s}"))),
        }
    }
}
