use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use macrocorr_core::connector::ConnectorKey;
use macrocorr_core::{FetchStrategy, MacroCorrConfig, MacroCorrError, SeriesConnector, SeriesKind};

/// Orchestrator that routes series requests across registered providers and
/// runs correlation dashboards on top of them.
pub struct MacroCorr {
    pub(crate) connectors: Vec<Arc<dyn SeriesConnector>>,
    pub(crate) cfg: MacroCorrConfig,
    pub(crate) per_kind_priority: HashMap<SeriesKind, Vec<ConnectorKey>>,
}

/// Builder for constructing a `MacroCorr` orchestrator with custom configuration.
pub struct MacroCorrBuilder {
    connectors: Vec<Arc<dyn SeriesConnector>>,
    cfg: MacroCorrConfig,
    per_kind_priority: HashMap<SeriesKind, Vec<ConnectorKey>>,
}

impl Default for MacroCorrBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MacroCorrBuilder {
    /// Create a new builder with sensible defaults.
    ///
    /// Behavior:
    /// - Starts with no connectors; you must register at least one via
    ///   [`with_connector`](Self::with_connector).
    /// - Priority-with-fallback fetches, 5s provider timeout, no request deadline,
    ///   no rolling window, no leading-row trimming.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: MacroCorrConfig::default(),
            per_kind_priority: HashMap::new(),
        }
    }

    /// Register a provider connector.
    ///
    /// Registration order is used only when no explicit priority is set for a
    /// kind. Duplicates are not deduplicated.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn SeriesConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Set preferred providers for a `SeriesKind` using connector instances.
    ///
    /// Influences ordering among capable providers for the given kind; it does
    /// not filter out non-listed connectors (they remain after the listed ones).
    #[must_use]
    pub fn prefer_for_kind(
        mut self,
        kind: SeriesKind,
        connectors_desc: &[Arc<dyn SeriesConnector>],
    ) -> Self {
        let keys: Vec<ConnectorKey> = connectors_desc
            .iter()
            .map(|c| ConnectorKey::new(c.name()))
            .collect();
        self.per_kind_priority.insert(kind, keys);
        self
    }

    /// Select how providers are tried for a single series.
    #[must_use]
    pub const fn fetch_strategy(mut self, strategy: FetchStrategy) -> Self {
        self.cfg.fetch_strategy = strategy;
        self
    }

    /// Per-provider call timeout.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Deadline applied to each fetch of a download or dashboard fan-out.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Default rolling window for dashboard runs.
    ///
    /// A window of zero disables rolling correlation.
    #[must_use]
    pub const fn rolling_window(mut self, window: usize) -> Self {
        self.cfg.rolling_window = Some(window);
        self
    }

    /// Default for dropping leading rows before every secondary has started.
    #[must_use]
    pub const fn trim_leading_rows(mut self, yes: bool) -> Self {
        self.cfg.trim_leading_rows = yes;
        self
    }

    /// Replace the whole configuration at once.
    #[must_use]
    pub fn config(mut self, cfg: MacroCorrConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the orchestrator.
    ///
    /// Priority lists are sanitized: keys naming unregistered connectors and
    /// repeated keys are dropped.
    ///
    /// # Errors
    /// Returns `InvalidArg` when no connector has been registered.
    pub fn build(self) -> Result<MacroCorr, MacroCorrError> {
        if self.connectors.is_empty() {
            return Err(MacroCorrError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".into(),
            ));
        }

        let known: HashSet<&'static str> = self.connectors.iter().map(|c| c.name()).collect();
        let per_kind_priority = self
            .per_kind_priority
            .into_iter()
            .map(|(kind, keys)| {
                let mut seen: HashSet<&'static str> = HashSet::new();
                let keys: Vec<ConnectorKey> = keys
                    .into_iter()
                    .filter(|k| known.contains(k.as_str()) && seen.insert(k.as_str()))
                    .collect();
                (kind, keys)
            })
            .collect();

        Ok(MacroCorr {
            connectors: self.connectors,
            cfg: self.cfg,
            per_kind_priority,
        })
    }
}

/// Attribute an error to the connector that produced it.
///
/// Errors already carrying routing meaning pass through unchanged.
pub(crate) fn tag_err(connector: &str, e: MacroCorrError) -> MacroCorrError {
    match e {
        e @ (MacroCorrError::NotFound { .. }
        | MacroCorrError::ProviderTimeout { .. }
        | MacroCorrError::Connector { .. }
        | MacroCorrError::RequestTimeout { .. }
        | MacroCorrError::AllProvidersTimedOut { .. }
        | MacroCorrError::AllProvidersFailed(_)) => e,
        other => MacroCorrError::Connector {
            connector: connector.to_string(),
            msg: other.to_string(),
        },
    }
}

/// Run `fut` under an optional deadline, mapping expiry to `RequestTimeout`.
pub(crate) async fn with_request_deadline<T, Fut>(
    deadline: Option<std::time::Duration>,
    capability: &str,
    fut: Fut,
) -> Result<T, MacroCorrError>
where
    Fut: core::future::Future<Output = T>,
{
    match deadline {
        Some(d) => tokio::time::timeout(d, fut)
            .await
            .map_err(|_| MacroCorrError::request_timeout(capability)),
        None => Ok(fut.await),
    }
}

impl MacroCorr {
    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "macrocorr::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: &str,
        timeout: std::time::Duration,
        fut: Fut,
    ) -> Result<T, MacroCorrError>
    where
        Fut: core::future::Future<Output = Result<T, MacroCorrError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(MacroCorrError::provider_timeout(connector_name, capability)))
    }

    /// Start building a new `MacroCorr` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use macrocorr::{FetchStrategy, MacroCorr, SeriesKind};
    /// use macrocorr_fred::FredConnector;
    /// use macrocorr_yahoo::YahooConnector;
    ///
    /// let fred = Arc::new(FredConnector::new_default());
    /// let yahoo = Arc::new(YahooConnector::new_default());
    ///
    /// let mc = MacroCorr::builder()
    ///     .with_connector(fred.clone())
    ///     .with_connector(yahoo.clone())
    ///     .prefer_for_kind(SeriesKind::Fx, &[yahoo])
    ///     .fetch_strategy(FetchStrategy::PriorityWithFallback)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> MacroCorrBuilder {
        MacroCorrBuilder::new()
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &MacroCorrConfig {
        &self.cfg
    }

    /// Connectors capable of `kind`, in routing order.
    ///
    /// Connectors listed in the kind's priority come first in that order; the
    /// rest keep registration order.
    pub(crate) fn ordered_for_kind(&self, kind: SeriesKind) -> Vec<Arc<dyn SeriesConnector>> {
        let mut out: Vec<(usize, Arc<dyn SeriesConnector>)> = self
            .connectors
            .iter()
            .filter(|c| c.supports_kind(kind))
            .cloned()
            .enumerate()
            .collect();
        if let Some(pref) = self.per_kind_priority.get(&kind) {
            let pos: HashMap<_, _> = pref
                .iter()
                .enumerate()
                .map(|(i, n)| (n.as_str(), i))
                .collect();
            out.sort_by_key(|(orig_i, c)| {
                (pos.get(c.name()).copied().unwrap_or(usize::MAX), *orig_i)
            });
        }
        out.into_iter().map(|(_, c)| c).collect()
    }
}
