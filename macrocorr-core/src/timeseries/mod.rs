//! Time-series utilities used by the dashboard pipeline.
//!
//! Modules include:
//! - `align`: forward-fill secondaries onto the primary's index
//! - `infer`: estimate the native step of a series
//! - `resample`: normalise a series to period starts
/// Alignment of secondary series onto the primary index.
pub mod align;
/// Cadence inference helpers.
pub mod infer;
/// Period-start normalisation.
pub mod resample;
