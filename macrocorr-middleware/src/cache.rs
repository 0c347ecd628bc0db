use std::sync::Arc;

use async_trait::async_trait;
use macrocorr_core::{
    CacheConfig, MacroCorrError, Middleware, SeriesConnector, SeriesKind, SeriesRequest,
    TimeSeries,
};
use moka::future::Cache;

/// Connector wrapper that memoises successful series fetches.
///
/// Entries are keyed by the full [`SeriesRequest`] and expire after the
/// configured TTL; the cache also holds at most `max_entries` series. Errors are
/// never cached. A zero TTL turns the wrapper into a pass-through.
pub struct CachingConnector {
    inner: Arc<dyn SeriesConnector>,
    cache: Option<Cache<SeriesRequest, Arc<TimeSeries>>>,
}

impl CachingConnector {
    /// Wrap `inner` with a cache configured by `cfg`.
    #[must_use]
    pub fn new(inner: Arc<dyn SeriesConnector>, cfg: &CacheConfig) -> Self {
        let cache = cfg.ttl().map(|ttl| {
            Cache::builder()
                .max_capacity(cfg.max_entries)
                .time_to_live(ttl)
                .build()
        });
        Self { inner, cache }
    }

    /// Drop every cached series.
    pub fn invalidate_all(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate_all();
        }
    }
}

#[async_trait]
impl SeriesConnector for CachingConnector {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn vendor(&self) -> &'static str {
        self.inner.vendor()
    }

    fn supports_kind(&self, kind: SeriesKind) -> bool {
        self.inner.supports_kind(kind)
    }

    async fn fetch_series(&self, req: &SeriesRequest) -> Result<TimeSeries, MacroCorrError> {
        let Some(cache) = &self.cache else {
            return self.inner.fetch_series(req).await;
        };
        if let Some(hit) = cache.get(req).await {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                connector = self.inner.name(),
                symbol = %req.symbol,
                "series cache hit"
            );
            return Ok(hit.as_ref().clone());
        }
        let series = self.inner.fetch_series(req).await?;
        cache.insert(req.clone(), Arc::new(series.clone())).await;
        Ok(series)
    }
}

/// [`Middleware`] that wraps a connector in a [`CachingConnector`].
pub struct CacheMiddleware {
    /// Cache settings applied to the wrapped connector.
    pub config: CacheConfig,
}

impl CacheMiddleware {
    /// Middleware with the given settings.
    #[must_use]
    pub const fn new(config: CacheConfig) -> Self {
        Self { config }
    }
}

impl Middleware for CacheMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn SeriesConnector>) -> Arc<dyn SeriesConnector> {
        Arc::new(CachingConnector::new(inner, &self.config))
    }

    fn name(&self) -> &'static str {
        "CacheMiddleware"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "ttl_ms": self.config.ttl_ms,
            "max_entries": self.config.max_entries,
        })
    }
}
