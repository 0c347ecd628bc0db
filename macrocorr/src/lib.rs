//! macrocorr compares an exchange-rate series with macroeconomic indicators.
//!
//! Overview
//! - Routes series requests to connectors implementing
//!   [`SeriesConnector`](macrocorr_core::SeriesConnector) (Yahoo for FX, FRED
//!   for macro indicators, mocks for tests).
//! - Applies per-kind priorities to influence provider order.
//! - Aligns every secondary series onto the primary's timestamps by
//!   forward-fill, then computes a static correlation matrix of relative
//!   changes and an optional rolling correlation against the primary.
//!
//! Key behaviors and trade-offs
//! - Fetch strategy:
//!   - `PriorityWithFallback`: deterministic order, per-provider timeout,
//!     aggregated errors; fewer concurrent requests but potentially higher latency.
//!   - `Latency`: races capable providers; lowest tail latency but higher fan-out.
//! - Secondary fetches run concurrently. A failed secondary becomes a warning;
//!   a failed primary aborts the run.
//! - Caching is opt-in per connector via [`CacheMiddleware`] (see
//!   `macrocorr_middleware::ConnectorBuilder`).
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use macrocorr::{Cadence, MacroCorr, SeriesKind, SeriesSpec};
//!
//! let mc = MacroCorr::builder()
//!     .with_connector(Arc::new(macrocorr_yahoo::YahooConnector::new_default()))
//!     .with_connector(Arc::new(macrocorr_fred::FredConnector::new_default()))
//!     .rolling_window(12)
//!     .build()?;
//!
//! let report = mc
//!     .dashboard()
//!     .primary(SeriesSpec::fx("CHF=X").labeled("USD/CHF"))
//!     .add_secondary(SeriesSpec::macro_series("CPIAUCSL"))
//!     .add_secondary(SeriesSpec::macro_series("UNRATE"))
//!     .interval(macrocorr::Interval::Monthly)
//!     .normalize_primary(Cadence::Monthly)
//!     .run()
//!     .await?;
//! println!("{:?}", report.matrix.get("USD/CHF", "CPIAUCSL"));
//! ```
//!
//! Bulk fetch of several series:
//! ```rust,ignore
//! let report = mc
//!     .download()
//!     .series(&[SeriesSpec::macro_series("DGS10"), SeriesSpec::macro_series("FEDFUNDS")])?
//!     .run()
//!     .await?;
//! for w in &report.warnings {
//!     eprintln!("{w}");
//! }
//! ```
//!
//! See the `demos` crate for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod dashboard;
mod router;

pub use core::{MacroCorr, MacroCorrBuilder};
pub use dashboard::DashboardBuilder;
pub use router::download::DownloadBuilder;
pub use router::util::{collapse_errors, join_with_deadline};

pub use macrocorr_middleware::{CacheMiddleware, ConnectorBuilder};

// Re-export core types for convenience
pub use macrocorr_core::{
    CacheConfig, Cadence, Column, ConnectorKey, CorrelationMatrix, DashboardReport, DateRange,
    FetchReport, FetchStrategy, Interval, MacroCorrConfig, MacroCorrError, MultiSeriesTable,
    Observation, RollingCorrelationTable, SeriesConnector, SeriesKind, SeriesRequest, SeriesSpec,
    TableRow, TimeSeries,
};
