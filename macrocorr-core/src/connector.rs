use async_trait::async_trait;

pub use macrocorr_types::ConnectorKey;
use macrocorr_types::{MacroCorrError, SeriesKind, SeriesRequest, TimeSeries};

/// Interface implemented by every series provider (Yahoo, FRED, mocks, middleware).
///
/// A connector returns the series named after the requested symbol, sorted by
/// timestamp and restricted to the requested date range. Unknown symbols map to
/// [`MacroCorrError::NotFound`]; transport or parse failures to
/// [`MacroCorrError::Connector`].
#[async_trait]
pub trait SeriesConnector: Send + Sync {
    /// A stable identifier for priority lists (e.g., "macrocorr-fred").
    fn name(&self) -> &'static str;

    /// Canonical connector key constructed from the static name.
    ///
    /// Use this helper when configuring per-kind priorities.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Whether this connector *claims* to serve a given series kind.
    ///
    /// Default: returns `false` for all kinds. Connectors must explicitly override
    /// this method to declare which kinds they support.
    fn supports_kind(&self, kind: SeriesKind) -> bool {
        let _ = kind;
        false
    }

    /// Fetch one series over the requested range.
    async fn fetch_series(&self, req: &SeriesRequest) -> Result<TimeSeries, MacroCorrError>;
}
