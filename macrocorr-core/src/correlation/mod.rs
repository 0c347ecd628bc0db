//! Correlation engine: relative changes, static matrix, rolling window.
//!
//! Every coefficient is computed over pairwise-complete observations. Undefined
//! coefficients (too little overlap, zero variance) are reported as absent, never
//! as NaN.

mod changes;
mod coefficient;
mod matrix;
mod rolling;

use macrocorr_types::{CorrelationMatrix, MacroCorrError, MultiSeriesTable, RollingCorrelationTable};

pub use changes::relative_changes;
pub use coefficient::{pearson, pearson_pairwise};

/// Compute the static correlation matrix of relative changes and, when `window`
/// is `Some(w)` with `w > 0`, the rolling correlation of each secondary against
/// the primary.
///
/// # Errors
/// Returns `EmptyTable` when `table` has zero rows.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "macrocorr::core::correlate",
        skip(table),
        fields(rows = table.len(), columns = table.columns().len()),
    )
)]
pub fn correlate(
    table: &MultiSeriesTable,
    window: Option<usize>,
) -> Result<(CorrelationMatrix, RollingCorrelationTable), MacroCorrError> {
    if table.is_empty() {
        return Err(MacroCorrError::EmptyTable);
    }

    let changes: Vec<Vec<Option<f64>>> = table
        .columns()
        .iter()
        .map(|c| relative_changes(&c.values))
        .collect();

    let names: Vec<String> = table.field_names().map(str::to_string).collect();
    let matrix = matrix::correlation_matrix(names, &changes)?;

    let rolling = match window {
        Some(w) if w > 0 => rolling::rolling_against_primary(table, &changes, w),
        _ => RollingCorrelationTable::new(table.primary_name(), None),
    };

    Ok((matrix, rolling))
}
