//! Configuration types shared across the orchestrator, middleware, and connectors.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Strategy for selecting among eligible data providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FetchStrategy {
    /// Use priority order and fall back to the next provider on failure.
    #[default]
    PriorityWithFallback,
    /// Race all eligible providers concurrently and return the first success.
    Latency,
}

/// Configuration for the fetch cache middleware.
///
/// A TTL of zero disables caching entirely (pass-through).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Time-to-live for cached series, in milliseconds.
    pub ttl_ms: u64,
    /// Maximum number of cached series.
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_ms: 3_600_000,
            max_entries: 256,
        }
    }
}

impl CacheConfig {
    /// Effective TTL, or `None` when caching is disabled.
    #[must_use]
    pub const fn ttl(&self) -> Option<Duration> {
        if self.ttl_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.ttl_ms))
        }
    }
}

/// Global configuration for the `MacroCorr` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroCorrConfig {
    /// Strategy for fetching from multiple providers.
    pub fetch_strategy: FetchStrategy,
    /// Timeout for individual provider requests.
    pub provider_timeout: Duration,
    /// Optional deadline applied to each fetch of a fan-out (download/dashboard).
    pub request_timeout: Option<Duration>,
    /// Default trailing window (in joint change observations) for dashboard runs.
    pub rolling_window: Option<usize>,
    /// Default for dropping leading rows where a secondary has no data yet.
    pub trim_leading_rows: bool,
}

impl Default for MacroCorrConfig {
    fn default() -> Self {
        Self {
            fetch_strategy: FetchStrategy::default(),
            provider_timeout: Duration::from_secs(5),
            request_timeout: None,
            rolling_window: None,
            trim_leading_rows: false,
        }
    }
}
