use std::collections::HashSet;

use macrocorr_core::{
    DateRange, FetchReport, Interval, MacroCorrError, SeriesRequest, SeriesSpec, TimeSeries,
};

use crate::MacroCorr;
use crate::router::util::default_range;

/// Builder to fetch many series concurrently.
pub struct DownloadBuilder<'a> {
    pub(crate) mc: &'a MacroCorr,
    pub(crate) specs: Vec<SeriesSpec>,
    // Defer range resolution to run() so "today" is evaluated at fetch time.
    pub(crate) range: Option<DateRange>,
    pub(crate) interval: Interval,
}

impl<'a> DownloadBuilder<'a> {
    /// Create a new builder bound to a `MacroCorr` instance.
    ///
    /// Starts with an empty series list, a range of 5 x 365 days ending today and a
    /// daily interval.
    #[must_use]
    pub const fn new(mc: &'a MacroCorr) -> Self {
        Self {
            mc,
            specs: Vec::new(),
            range: None,
            interval: Interval::Daily,
        }
    }

    /// Replace the series list.
    ///
    /// # Errors
    /// Returns an error if duplicate symbols are detected in `specs`.
    pub fn series(mut self, specs: &[SeriesSpec]) -> Result<Self, MacroCorrError> {
        let mut seen = HashSet::new();
        for spec in specs {
            if !seen.insert(spec.symbol.as_str()) {
                return Err(MacroCorrError::InvalidArg(format!(
                    "duplicate symbol '{}' in series list",
                    spec.symbol
                )));
            }
        }

        self.specs = specs.to_vec();
        Ok(self)
    }

    /// Add a single series to the list.
    ///
    /// # Errors
    /// Returns an error if the symbol already exists in the list.
    pub fn add_series(mut self, spec: SeriesSpec) -> Result<Self, MacroCorrError> {
        if self.specs.iter().any(|s| s.symbol == spec.symbol) {
            return Err(MacroCorrError::InvalidArg(format!(
                "duplicate symbol '{}' already exists in series list",
                spec.symbol
            )));
        }
        self.specs.push(spec);
        Ok(self)
    }

    /// Set an explicit date range.
    #[must_use]
    pub const fn range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Select the requested sampling interval.
    #[must_use]
    pub const fn interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }

    /// Execute the fetches concurrently and aggregate results.
    ///
    /// Behavior:
    /// - Each fetch is routed through [`MacroCorr::fetch_series`] and bounded by
    ///   the configured request timeout.
    /// - Successful series are returned in list order, named by their field name.
    /// - Failures populate `warnings` with `Fetch { symbol, cause }` entries
    ///   without aborting the batch.
    ///
    /// # Errors
    /// Returns an error only if no series were specified or a request is invalid
    /// (blank symbol, duplicate symbol).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "macrocorr::router::download",
            skip(self),
            fields(count = self.specs.len(), interval = ?self.interval),
        )
    )]
    pub async fn run(self) -> Result<FetchReport, MacroCorrError> {
        if self.specs.is_empty() {
            return Err(MacroCorrError::InvalidArg(
                "no series specified for download".into(),
            ));
        }

        let mut seen = HashSet::new();
        for spec in &self.specs {
            if !seen.insert(spec.symbol.as_str()) {
                return Err(MacroCorrError::InvalidArg(format!(
                    "duplicate symbol '{}' detected in series list",
                    spec.symbol
                )));
            }
        }

        let range = match self.range {
            Some(r) => r,
            None => default_range()?,
        };
        let requests: Vec<(SeriesSpec, SeriesRequest)> = self
            .specs
            .into_iter()
            .map(|spec| {
                let req = SeriesRequest::try_new(&spec.symbol, spec.kind, range, self.interval)?;
                Ok((spec, req))
            })
            .collect::<Result<_, MacroCorrError>>()?;

        let results = self.mc.fetch_many(&requests).await;

        let mut report = FetchReport::default();
        for ((spec, _), result) in requests.iter().zip(results) {
            match result {
                Ok(series) => report.series.push(series.renamed(spec.field_name())),
                Err(e) => report.warnings.push(MacroCorrError::fetch(&spec.symbol, &e)),
            }
        }
        Ok(report)
    }
}

impl MacroCorr {
    /// Begin building a multi-series download.
    ///
    /// Typical usage: chain `series`/`range`/`interval` then call `run()`.
    #[must_use]
    pub const fn download(&'_ self) -> DownloadBuilder<'_> {
        DownloadBuilder::new(self)
    }

    /// Fetch every request concurrently, each bounded by the request timeout.
    ///
    /// Results are returned in request order; one slow or failing fetch never
    /// affects the others.
    pub(crate) async fn fetch_many<T>(
        &self,
        requests: &[(T, SeriesRequest)],
    ) -> Vec<Result<TimeSeries, MacroCorrError>> {
        let deadline = self.cfg.request_timeout;
        let tasks = requests.iter().map(|(_, req)| async move {
            crate::core::with_request_deadline(deadline, "series", self.fetch_series(req))
                .await
                .and_then(|r| r)
        });
        futures::future::join_all(tasks).await
    }
}
