use std::sync::Arc;

use macrocorr_core::{FetchStrategy, MacroCorrError, SeriesConnector, SeriesRequest, TimeSeries};

use crate::MacroCorr;
use crate::core::tag_err;
use crate::router::util::collapse_errors;

impl MacroCorr {
    /// Fetch one series, routing across connectors that support its kind.
    ///
    /// Behavior:
    /// - `PriorityWithFallback` tries capable connectors in priority order and
    ///   returns the first success; each call is bounded by the provider timeout.
    /// - `Latency` races every capable connector and returns the first success.
    ///
    /// # Errors
    /// - `Unsupported` when no registered connector supports the kind.
    /// - `NotFound` when every attempted connector reported the symbol missing.
    /// - `AllProvidersTimedOut` when every attempt timed out.
    /// - `AllProvidersFailed` otherwise, carrying each connector-tagged failure.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "macrocorr::router::fetch_series",
            skip(self, req),
            fields(symbol = %req.symbol, kind = %req.kind),
        )
    )]
    pub async fn fetch_series(&self, req: &SeriesRequest) -> Result<TimeSeries, MacroCorrError> {
        let capability = format!("series/{}", req.kind);
        let eligible = self.ordered_for_kind(req.kind);
        let not_found = format!("series for {}", req.symbol);

        let outcome = match self.cfg.fetch_strategy {
            FetchStrategy::Latency => self.fetch_latency(&eligible, &capability, req).await,
            _ => self.fetch_priority(&eligible, &capability, req).await,
        };

        outcome.map_err(|errors| {
            collapse_errors(&capability, !eligible.is_empty(), errors, Some(not_found))
        })
    }

    async fn fetch_priority(
        &self,
        eligible: &[Arc<dyn SeriesConnector>],
        capability: &str,
        req: &SeriesRequest,
    ) -> Result<TimeSeries, Vec<MacroCorrError>> {
        let mut errors: Vec<MacroCorrError> = Vec::new();
        for c in eligible {
            match Self::provider_call_with_timeout(
                c.name(),
                capability,
                self.cfg.provider_timeout,
                c.fetch_series(req),
            )
            .await
            {
                Ok(s) => return Ok(s),
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(connector = c.name(), error = %e, "falling back to next provider");
                    errors.push(tag_err(c.name(), e));
                }
            }
        }
        Err(errors)
    }

    async fn fetch_latency(
        &self,
        eligible: &[Arc<dyn SeriesConnector>],
        capability: &str,
        req: &SeriesRequest,
    ) -> Result<TimeSeries, Vec<MacroCorrError>> {
        use futures::stream::{FuturesUnordered, StreamExt};

        let timeout = self.cfg.provider_timeout;
        let mut futs: FuturesUnordered<_> = eligible
            .iter()
            .map(|c| {
                let c = Arc::clone(c);
                async move {
                    let name = c.name();
                    let res = Self::provider_call_with_timeout(
                        name,
                        capability,
                        timeout,
                        c.fetch_series(req),
                    )
                    .await;
                    (name, res)
                }
            })
            .collect();

        let mut errors: Vec<MacroCorrError> = Vec::new();
        while let Some((name, res)) = futs.next().await {
            match res {
                Ok(s) => return Ok(s),
                Err(e) => errors.push(tag_err(name, e)),
            }
        }
        Err(errors)
    }
}
