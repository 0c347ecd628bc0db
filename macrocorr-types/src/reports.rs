//! Report envelopes produced by the orchestrator.

use serde::{Deserialize, Serialize};

use crate::correlation::{CorrelationMatrix, RollingCorrelationTable};
use crate::error::MacroCorrError;
use crate::series::TimeSeries;
use crate::table::MultiSeriesTable;

/// Summary of a multi-symbol fetch.
///
/// `series` holds the successfully fetched series in request order; failures
/// are recorded in `warnings` as `Fetch` errors without aborting the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FetchReport {
    /// Successfully fetched series, in request order.
    pub series: Vec<TimeSeries>,
    /// Non-fatal issues encountered while fetching.
    pub warnings: Vec<MacroCorrError>,
}

/// Complete result of one dashboard run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    /// Primary series aligned with the forward-filled secondaries.
    pub table: MultiSeriesTable,
    /// Static correlation of relative changes.
    pub matrix: CorrelationMatrix,
    /// Rolling correlation of each secondary against the primary (empty when
    /// no window was requested).
    pub rolling: RollingCorrelationTable,
    /// Non-fatal issues: failed or empty secondary series, skipped fields.
    pub warnings: Vec<MacroCorrError>,
}
