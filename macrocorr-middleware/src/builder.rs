//! Builder for composing connectors with middleware layers.
//!
//! # Middleware Ordering Convention
//!
//! Middleware layers form an "onion" around the raw connector:
//!
//! ```text
//! Orchestrator request
//!     ↓
//! Outermost Middleware (first to see the request, last to see the result)
//!     ↓
//! Cache Middleware (answers repeat requests without touching the provider)
//!     ↓
//! Raw Connector (e.g., FRED - makes actual HTTP calls)
//! ```
//!
//! ## Storage vs Application Order
//!
//! The `layers` vector stores middleware in **outermost-first** order (last added =
//! outermost), but they are **applied in reverse** during `build()` to construct the
//! proper nesting.
//!
//! Example:
//! ```text
//! builder.with_cache(..).layer(custom)
//!
//! Storage: [Custom, Cache]  (outermost first)
//! Applied:  Raw -> Cache -> Custom  (innermost to outermost)
//! Result:   Custom(Cache(Raw))
//! ```
//!
//! This convention matches [`MiddlewareStack`](macrocorr_types::MiddlewareStack) where
//! `layers[0]` is the outermost layer.

use std::sync::Arc;

use macrocorr_core::Middleware;
use macrocorr_core::connector::SeriesConnector;
use macrocorr_types::{CacheConfig, MiddlewareLayer, MiddlewareStack};
use serde_json::json;

use crate::cache::CacheMiddleware;

const CACHE: &str = "CacheMiddleware";
const RAW: &str = "RawConnector";

/// Generic middleware builder for composing a connector with layered wrappers.
///
/// See [module-level documentation](self) for details on middleware ordering.
pub struct ConnectorBuilder {
    raw: Arc<dyn SeriesConnector>,
    /// Middleware layers in outermost-first order.
    layers: Vec<Box<dyn Middleware>>,
}

impl ConnectorBuilder {
    /// Create a new builder from a raw, unwrapped connector.
    #[must_use]
    pub fn new(raw: Arc<dyn SeriesConnector>) -> Self {
        Self {
            raw,
            layers: Vec::new(),
        }
    }

    /// Add or replace the fetch cache.
    ///
    /// The cache is inserted at the outermost position so hits never reach any
    /// other layer. An existing cache layer is replaced.
    #[must_use]
    pub fn with_cache(mut self, cfg: &CacheConfig) -> Self {
        self.layers.retain(|m| m.name() != CACHE);
        self.layers
            .insert(0, Box::new(CacheMiddleware::new(cfg.clone())));
        self
    }

    /// Remove the cache if present.
    #[must_use]
    pub fn without_cache(mut self) -> Self {
        self.layers.retain(|m| m.name() != CACHE);
        self
    }

    /// Add an arbitrary middleware layer at the outermost position.
    #[must_use]
    pub fn layer(mut self, layer: Box<dyn Middleware>) -> Self {
        self.layers.insert(0, layer);
        self
    }

    /// Export the current middleware stack configuration for inspection.
    ///
    /// Preserves the outermost-first ordering; the raw connector is appended as
    /// the innermost entry. The result can be fed back to
    /// [`from_stack`](Self::from_stack).
    #[must_use]
    pub fn to_stack(&self) -> MiddlewareStack {
        let mut layers: Vec<MiddlewareLayer> = self
            .layers
            .iter()
            .map(|l| MiddlewareLayer::new(l.name(), l.config_json()))
            .collect();
        layers.push(MiddlewareLayer::new(
            RAW,
            json!({ "name": self.raw.name() }),
        ));
        MiddlewareStack { layers }
    }

    /// Construct a builder from a raw connector and an explicit stack.
    ///
    /// Known layers are rebuilt in the recorded order; unknown layer names and the
    /// `RawConnector` marker are ignored. Missing config keys fall back to
    /// [`CacheConfig::default`].
    #[must_use]
    pub fn from_stack(raw: Arc<dyn SeriesConnector>, stack: &MiddlewareStack) -> Self {
        let mut layers: Vec<Box<dyn Middleware>> = Vec::new();
        for l in &stack.layers {
            if l.name == CACHE {
                let defaults = CacheConfig::default();
                let cfg = CacheConfig {
                    ttl_ms: l
                        .config
                        .get("ttl_ms")
                        .and_then(serde_json::Value::as_u64)
                        .unwrap_or(defaults.ttl_ms),
                    max_entries: l
                        .config
                        .get("max_entries")
                        .and_then(serde_json::Value::as_u64)
                        .unwrap_or(defaults.max_entries),
                };
                layers.push(Box::new(CacheMiddleware::new(cfg)));
            }
        }
        Self { raw, layers }
    }

    /// Build the wrapped connector.
    ///
    /// Layers are applied innermost first, so `layers = [A, B]` yields `A(B(raw))`.
    #[must_use]
    pub fn build(self) -> Arc<dyn SeriesConnector> {
        let mut acc: Arc<dyn SeriesConnector> = Arc::clone(&self.raw);
        for m in self.layers.into_iter().rev() {
            acc = m.apply(acc);
        }
        acc
    }
}
