//! Data model, configuration primitives, and error type shared across the macrocorr workspace.
#![warn(missing_docs)]

mod config;
mod connector;
mod correlation;
mod error;
mod middleware;
mod reports;
mod series;
mod table;

pub use config::{CacheConfig, FetchStrategy, MacroCorrConfig};
pub use connector::ConnectorKey;
pub use correlation::{CorrelationMatrix, RollingCorrelationTable};
pub use error::MacroCorrError;
pub use middleware::{MiddlewareLayer, MiddlewareStack};
pub use reports::{DashboardReport, FetchReport};
pub use series::{
    DateRange, Interval, Observation, SeriesKind, SeriesRequest, SeriesSpec, TimeSeries,
};
pub use table::{Column, MultiSeriesTable, TableRow};
