use std::sync::Arc;

use macrocorr_core::connector::SeriesConnector;
use macrocorr_middleware::ConnectorBuilder as GenericConnectorBuilder;
use macrocorr_types::CacheConfig;

use crate::FredConnector;

/// Builder type alias specialized for FRED connectors.
pub type FredConnectorBuilder = GenericConnectorBuilder;

impl FredConnector {
    /// Returns an unconfigured builder around the default connector.
    #[must_use]
    pub fn builder() -> FredConnectorBuilder {
        let raw: Arc<dyn SeriesConnector> = Arc::new(Self::new_default());
        GenericConnectorBuilder::new(raw)
    }

    /// Returns a builder preloaded with the default one-hour fetch cache.
    #[must_use]
    pub fn cached() -> FredConnectorBuilder {
        Self::builder().with_cache(&CacheConfig::default())
    }
}
