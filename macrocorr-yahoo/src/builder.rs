use std::sync::Arc;

use macrocorr_core::connector::SeriesConnector;
use macrocorr_middleware::ConnectorBuilder as GenericConnectorBuilder;
use macrocorr_types::CacheConfig;

use crate::YahooConnector;

/// Builder type alias specialized for Yahoo connectors.
pub type YahooConnectorBuilder = GenericConnectorBuilder;

impl YahooConnector {
    /// Returns an unconfigured builder around the default connector.
    ///
    /// Customize with the builder methods before calling `.build()`.
    #[must_use]
    pub fn builder() -> YahooConnectorBuilder {
        let raw: Arc<dyn SeriesConnector> = Arc::new(Self::new_default());
        GenericConnectorBuilder::new(raw)
    }

    /// Returns a builder preloaded with the default one-hour fetch cache.
    #[must_use]
    pub fn cached() -> YahooConnectorBuilder {
        Self::builder().with_cache(&CacheConfig::default())
    }
}
