use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use macrocorr::{MacroCorrError, SeriesConnector, SeriesKind, SeriesRequest, TimeSeries};

type SeriesFn = dyn Fn(&SeriesRequest) -> Result<TimeSeries, MacroCorrError> + Send + Sync;

/// In-memory connector with a fixed delay and a per-request answer.
pub struct ScriptedConnector {
    name: &'static str,
    kinds: &'static [SeriesKind],
    delay: Duration,
    answer: Arc<SeriesFn>,
    calls: AtomicUsize,
}

impl ScriptedConnector {
    pub fn builder(name: &'static str) -> ScriptedConnectorBuilder {
        ScriptedConnectorBuilder {
            name,
            kinds: &[SeriesKind::Fx, SeriesKind::Macro],
            delay: Duration::ZERO,
            answer: Arc::new(|r: &SeriesRequest| {
                Err(MacroCorrError::not_found(format!("series for {}", r.symbol)))
            }),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub struct ScriptedConnectorBuilder {
    name: &'static str,
    kinds: &'static [SeriesKind],
    delay: Duration,
    answer: Arc<SeriesFn>,
}

impl ScriptedConnectorBuilder {
    pub fn kinds(mut self, kinds: &'static [SeriesKind]) -> Self {
        self.kinds = kinds;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Answer every request with `series`, renamed to the requested symbol.
    pub fn returns(mut self, series: TimeSeries) -> Self {
        self.answer = Arc::new(move |r: &SeriesRequest| Ok(series.clone().renamed(&r.symbol)));
        self
    }

    pub fn fails_with(mut self, err: MacroCorrError) -> Self {
        self.answer = Arc::new(move |_r: &SeriesRequest| Err(err.clone()));
        self
    }

    pub fn with_fn(
        mut self,
        f: impl Fn(&SeriesRequest) -> Result<TimeSeries, MacroCorrError> + Send + Sync + 'static,
    ) -> Self {
        self.answer = Arc::new(f);
        self
    }

    pub fn build(self) -> Arc<ScriptedConnector> {
        Arc::new(ScriptedConnector {
            name: self.name,
            kinds: self.kinds,
            delay: self.delay,
            answer: self.answer,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl SeriesConnector for ScriptedConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn supports_kind(&self, kind: SeriesKind) -> bool {
        self.kinds.contains(&kind)
    }

    async fn fetch_series(&self, req: &SeriesRequest) -> Result<TimeSeries, MacroCorrError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        (self.answer)(req)
    }
}
