//! Serialisable description of a connector's middleware onion.

use serde::{Deserialize, Serialize};

/// One middleware layer: its name and JSON configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiddlewareLayer {
    /// Layer name (e.g. "`CacheMiddleware`").
    pub name: String,
    /// Layer-specific configuration.
    pub config: serde_json::Value,
}

impl MiddlewareLayer {
    /// Convenience constructor.
    #[must_use]
    pub fn new<N: Into<String>>(name: N, config: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }
}

/// Ordered middleware layers wrapping a raw connector.
///
/// `layers[0]` is the outermost wrapper; the last element sits directly on
/// top of the connector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MiddlewareStack {
    /// Layers, outermost first.
    pub layers: Vec<MiddlewareLayer>,
}

impl MiddlewareStack {
    /// Create an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Look up a layer by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&MiddlewareLayer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// True when no middleware is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
