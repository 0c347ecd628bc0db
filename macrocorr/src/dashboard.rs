//! Dashboard pipeline: fetch, align onto the primary, correlate.

use macrocorr_core::{
    AlignOptions, Cadence, DashboardReport, DateRange, Interval, MacroCorrError, SeriesRequest,
    SeriesSpec, align_with_options, correlate, normalize_to_cadence,
};

use crate::MacroCorr;
use crate::router::util::default_range;

/// Builder for one correlation dashboard run.
///
/// Rolling window and leading-row trimming default to the orchestrator's
/// configuration and can be overridden per run.
pub struct DashboardBuilder<'a> {
    mc: &'a MacroCorr,
    primary: Option<SeriesSpec>,
    secondaries: Vec<SeriesSpec>,
    range: Option<DateRange>,
    interval: Interval,
    cadence: Option<Cadence>,
    rolling_window: Option<usize>,
    trim_leading: bool,
}

impl<'a> DashboardBuilder<'a> {
    /// Create a builder bound to a `MacroCorr` instance.
    #[must_use]
    pub fn new(mc: &'a MacroCorr) -> Self {
        Self {
            mc,
            primary: None,
            secondaries: Vec::new(),
            range: None,
            interval: Interval::Daily,
            cadence: None,
            rolling_window: mc.cfg.rolling_window,
            trim_leading: mc.cfg.trim_leading_rows,
        }
    }

    /// Series every other series is aligned to and correlated against.
    #[must_use]
    pub fn primary(mut self, spec: SeriesSpec) -> Self {
        self.primary = Some(spec);
        self
    }

    /// Replace the secondary series list.
    #[must_use]
    pub fn secondaries(mut self, specs: &[SeriesSpec]) -> Self {
        self.secondaries = specs.to_vec();
        self
    }

    /// Append one secondary series.
    #[must_use]
    pub fn add_secondary(mut self, spec: SeriesSpec) -> Self {
        self.secondaries.push(spec);
        self
    }

    /// Date range to fetch; defaults to 5 x 365 days ending today.
    #[must_use]
    pub const fn range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Sampling interval requested from providers.
    #[must_use]
    pub const fn interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }

    /// Re-stamp the primary to period starts before alignment.
    ///
    /// Useful when the primary is sampled at end of period while the
    /// secondaries are stamped at the first of the month.
    #[must_use]
    pub const fn normalize_primary(mut self, cadence: Cadence) -> Self {
        self.cadence = Some(cadence);
        self
    }

    /// Trailing window, in joint change observations, for rolling correlation.
    ///
    /// `None` or zero skips the rolling computation.
    #[must_use]
    pub const fn rolling_window(mut self, window: Option<usize>) -> Self {
        self.rolling_window = window;
        self
    }

    /// Drop leading rows until every secondary has an observation.
    #[must_use]
    pub const fn trim_leading(mut self, yes: bool) -> Self {
        self.trim_leading = yes;
        self
    }

    /// Run the pipeline.
    ///
    /// Steps: fetch the primary, optionally normalise it to a cadence, fetch
    /// the secondaries concurrently, align them onto the primary and
    /// correlate. Secondary failures, empty secondaries and repeated field
    /// names are reported in [`DashboardReport::warnings`] and do not abort
    /// the run.
    ///
    /// # Errors
    /// - `InvalidArg` when no primary was set or a symbol is blank.
    /// - `Fetch` when the primary cannot be fetched.
    /// - `EmptyPrimarySeries` when the primary has no observations.
    /// - `EmptyTable` when trimming leaves no rows.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "macrocorr::dashboard::run",
            skip(self),
            fields(
                primary = self.primary.as_ref().map_or("", |p| p.symbol.as_str()),
                secondaries = self.secondaries.len(),
                window = ?self.rolling_window,
            ),
        )
    )]
    pub async fn run(self) -> Result<DashboardReport, MacroCorrError> {
        let primary_spec = self
            .primary
            .ok_or_else(|| MacroCorrError::InvalidArg("no primary series specified".into()))?;

        let range = match self.range {
            Some(r) => r,
            None => default_range()?,
        };
        let primary_req =
            SeriesRequest::try_new(&primary_spec.symbol, primary_spec.kind, range, self.interval)?;
        let secondary_reqs: Vec<(&SeriesSpec, SeriesRequest)> = self
            .secondaries
            .iter()
            .map(|spec| {
                SeriesRequest::try_new(&spec.symbol, spec.kind, range, self.interval)
                    .map(|req| (spec, req))
            })
            .collect::<Result<_, _>>()?;

        let primary = self
            .mc
            .fetch_series(&primary_req)
            .await
            .map_err(|e| MacroCorrError::fetch(&primary_spec.symbol, &e))?
            .renamed(primary_spec.field_name());
        let primary = match self.cadence {
            Some(c) => normalize_to_cadence(&primary, c),
            None => primary,
        };

        let mut warnings: Vec<MacroCorrError> = Vec::new();
        let mut secondaries = Vec::with_capacity(secondary_reqs.len());
        let results = self.mc.fetch_many(&secondary_reqs).await;
        for ((spec, _), result) in secondary_reqs.iter().zip(results) {
            match result {
                Ok(series) => secondaries.push(series.renamed(spec.field_name())),
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(symbol = %spec.symbol, error = %e, "secondary series skipped");
                    warnings.push(MacroCorrError::fetch(&spec.symbol, &e));
                }
            }
        }

        let alignment = align_with_options(
            &primary,
            &secondaries,
            AlignOptions {
                trim_leading: self.trim_leading,
            },
        )?;
        warnings.extend(alignment.warnings);

        let (matrix, rolling) = correlate(&alignment.table, self.rolling_window)?;

        Ok(DashboardReport {
            table: alignment.table,
            matrix,
            rolling,
            warnings,
        })
    }
}

impl MacroCorr {
    /// Begin building a dashboard run.
    ///
    /// ```rust,ignore
    /// use macrocorr::{Cadence, SeriesSpec};
    ///
    /// let report = mc
    ///     .dashboard()
    ///     .primary(SeriesSpec::fx("CHF=X").labeled("USD/CHF"))
    ///     .add_secondary(SeriesSpec::macro_series("CPIAUCSL").labeled("CPI"))
    ///     .add_secondary(SeriesSpec::macro_series("UNRATE"))
    ///     .interval(macrocorr::Interval::Monthly)
    ///     .normalize_primary(Cadence::Monthly)
    ///     .rolling_window(Some(12))
    ///     .run()
    ///     .await?;
    /// ```
    #[must_use]
    pub fn dashboard(&'_ self) -> DashboardBuilder<'_> {
        DashboardBuilder::new(self)
    }
}
