//! macrocorr-core
//!
//! Core traits and the numerical engine shared across the macrocorr workspace.
//!
//! - `types`: re-exported data model (series, tables, matrices, requests, errors).
//! - `connector`: the `SeriesConnector` trait every provider implements.
//! - `middleware`: the `Middleware` trait for connector wrappers.
//! - `timeseries`: alignment onto the primary index, cadence inference and normalisation.
//! - `correlation`: relative changes, static and rolling Pearson correlation.
//!
//! The engine is synchronous and allocation-only; async lives at the connector
//! boundary (`async-trait`) and in the orchestrator.
#![warn(missing_docs)]

/// Connector interface implemented by series providers.
pub mod connector;
/// Relative changes, static correlation matrix, and rolling correlation.
pub mod correlation;
/// Middleware trait implemented by connector wrappers.
pub mod middleware;
/// Time-series alignment, cadence inference, and normalisation.
pub mod timeseries;
pub mod types;

pub use connector::SeriesConnector;
pub use correlation::{correlate, pearson, relative_changes};
pub use middleware::Middleware;
pub use timeseries::align::{AlignOptions, Alignment, align, align_with_options};
pub use timeseries::infer::{estimate_step_seconds, is_coarser_than};
pub use timeseries::resample::{Cadence, normalize_to_cadence};
pub use types::*;
