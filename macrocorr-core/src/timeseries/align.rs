use macrocorr_types::{Column, MacroCorrError, MultiSeriesTable, TimeSeries};

#[cfg(feature = "tracing")]
use crate::timeseries::infer::is_coarser_than;

/// Options controlling [`align_with_options`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignOptions {
    /// Drop leading rows in which any kept secondary has no observation yet.
    pub trim_leading: bool,
}

/// Aligned table plus the non-fatal issues encountered while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    /// Primary first, then each kept secondary in input order.
    pub table: MultiSeriesTable,
    /// One entry per skipped secondary.
    pub warnings: Vec<MacroCorrError>,
}

/// Align `secondaries` onto the timestamps of `primary`, forward-filling each
/// secondary from its most recent observation at or before every row.
///
/// Shorthand for [`align_with_options`] with default options, discarding warnings.
///
/// # Errors
/// Returns `EmptyPrimarySeries` when `primary` has no observations.
pub fn align(
    primary: &TimeSeries,
    secondaries: &[TimeSeries],
) -> Result<MultiSeriesTable, MacroCorrError> {
    align_with_options(primary, secondaries, AlignOptions::default()).map(|a| a.table)
}

/// Align `secondaries` onto the timestamps of `primary`.
///
/// Behavior:
/// - The output index is the primary's timestamps; the primary is present in
///   every row, so no row is ever entirely absent.
/// - Each secondary cell holds the latest secondary value at or before the row
///   timestamp, or is absent before the secondary's first observation. Values
///   are never interpolated and never extend past the primary's last row.
/// - Empty secondaries and secondaries whose name repeats the primary or an
///   earlier secondary are skipped and reported in [`Alignment::warnings`].
/// - With `trim_leading`, rows before every kept secondary has started are
///   dropped; the result may then have zero rows.
///
/// # Errors
/// Returns `EmptyPrimarySeries` when `primary` has no observations.
pub fn align_with_options(
    primary: &TimeSeries,
    secondaries: &[TimeSeries],
    opts: AlignOptions,
) -> Result<Alignment, MacroCorrError> {
    if primary.is_empty() {
        return Err(MacroCorrError::EmptyPrimarySeries);
    }

    let index: Vec<_> = primary.timestamps().collect();
    let mut columns = vec![Column::new(
        primary.name(),
        primary.points().iter().map(|p| Some(p.value)).collect(),
    )];
    let mut warnings: Vec<MacroCorrError> = Vec::new();

    for s in secondaries {
        if s.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::warn!(series = s.name(), "skipping empty secondary series");
            warnings.push(MacroCorrError::Data(format!(
                "secondary series '{}' is empty; skipped",
                s.name()
            )));
            continue;
        }
        if columns.iter().any(|c| c.name == s.name()) {
            #[cfg(feature = "tracing")]
            tracing::warn!(series = s.name(), "skipping duplicate field name");
            warnings.push(MacroCorrError::Data(format!(
                "duplicate field '{}'; later series skipped",
                s.name()
            )));
            continue;
        }
        #[cfg(feature = "tracing")]
        if is_coarser_than(s, primary) {
            tracing::debug!(
                series = s.name(),
                primary = primary.name(),
                "secondary is sampled more coarsely than the primary; values are carried forward"
            );
        }
        columns.push(Column::new(s.name(), forward_fill(s, &index)));
    }

    let (index, columns) = if opts.trim_leading {
        trim_leading_rows(index, columns)
    } else {
        (index, columns)
    };

    Ok(Alignment {
        table: MultiSeriesTable::try_new(index, columns)?,
        warnings,
    })
}

/// Single merge walk over the sorted secondary and the sorted index.
fn forward_fill(
    series: &TimeSeries,
    index: &[chrono::DateTime<chrono::Utc>],
) -> Vec<Option<f64>> {
    let points = series.points();
    let mut out = Vec::with_capacity(index.len());
    let mut next = 0usize;
    let mut current: Option<f64> = None;
    for ts in index {
        while next < points.len() && points[next].ts <= *ts {
            current = Some(points[next].value);
            next += 1;
        }
        out.push(current);
    }
    out
}

fn trim_leading_rows(
    index: Vec<chrono::DateTime<chrono::Utc>>,
    columns: Vec<Column>,
) -> (Vec<chrono::DateTime<chrono::Utc>>, Vec<Column>) {
    // Forward-filled columns stay present once they start, so the first complete
    // row bounds the cut.
    let first_complete = (0..index.len())
        .find(|&i| columns.iter().all(|c| c.values[i].is_some()))
        .unwrap_or(index.len());
    let index = index[first_complete..].to_vec();
    let columns = columns
        .into_iter()
        .map(|c| Column::new(c.name, c.values[first_complete..].to_vec()))
        .collect();
    (index, columns)
}
