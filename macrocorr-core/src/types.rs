//! Re-export of foundational types from `macrocorr-types`.
// Consolidated re-exports so downstream crates can depend on `macrocorr-core` only

pub use macrocorr_types::{
    CacheConfig, Column, ConnectorKey, CorrelationMatrix, DashboardReport, DateRange,
    FetchReport, FetchStrategy, Interval, MacroCorrConfig, MacroCorrError, MiddlewareLayer,
    MiddlewareStack, MultiSeriesTable, Observation, RollingCorrelationTable, SeriesKind,
    SeriesRequest, SeriesSpec, TableRow, TimeSeries,
};
