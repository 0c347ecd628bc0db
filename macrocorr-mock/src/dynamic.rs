use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use macrocorr_core::connector::SeriesConnector;
use macrocorr_core::{MacroCorrError, SeriesKind, SeriesRequest, TimeSeries};

/// Instruction for how a fetch should behave for a given symbol.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return the provided series immediately.
    Return(TimeSeries),
    /// Fail immediately with the provided error.
    Fail(MacroCorrError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

#[derive(Default)]
struct InternalState {
    series_rules: HashMap<String, MockBehavior>,
    requests: Vec<SeriesRequest>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `fetch_series` calls for a specific symbol.
    pub async fn set_series_behavior(&self, symbol: &str, behavior: MockBehavior) {
        let mut guard = self.state.lock().await;
        guard.series_rules.insert(symbol.to_string(), behavior);
    }

    /// Return a copy of every request received so far, in arrival order.
    pub async fn requests(&self) -> Vec<SeriesRequest> {
        self.state.lock().await.requests.clone()
    }

    /// Number of requests received for `symbol`.
    pub async fn request_count(&self, symbol: &str) -> usize {
        let guard = self.state.lock().await;
        guard.requests.iter().filter(|r| r.symbol == symbol).count()
    }

    /// Clear all configured behaviors and the request log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.series_rules.clear();
        guard.requests.clear();
    }
}

/// A connector that defers all behavior to an external controller.
///
/// Symbols without a configured behavior answer `NotFound`.
pub struct DynamicMockConnector {
    name: &'static str,
    kinds: &'static [SeriesKind],
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a dynamic mock serving every kind, plus its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn SeriesConnector>, DynamicMockController) {
        Self::new_with_controller_for(name, &[SeriesKind::Fx, SeriesKind::Macro])
    }

    /// Create a dynamic mock that only claims the given kinds, plus its controller.
    #[must_use]
    pub fn new_with_controller_for(
        name: &'static str,
        kinds: &'static [SeriesKind],
    ) -> (Arc<dyn SeriesConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, kinds, state });
        (me as Arc<dyn SeriesConnector>, controller)
    }
}

#[async_trait]
impl SeriesConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn supports_kind(&self, kind: SeriesKind) -> bool {
        self.kinds.contains(&kind)
    }

    async fn fetch_series(&self, req: &SeriesRequest) -> Result<TimeSeries, MacroCorrError> {
        // Log and snapshot the behavior without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.requests.push(req.clone());
            guard.series_rules.get(&req.symbol).cloned()
        };
        match behavior {
            Some(MockBehavior::Return(series)) => Ok(series),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => std::future::pending().await,
            None => Err(MacroCorrError::not_found(format!(
                "series for {}",
                req.symbol
            ))),
        }
    }
}
