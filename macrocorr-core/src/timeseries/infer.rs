use std::collections::BTreeMap;

use macrocorr_types::TimeSeries;

/// Typical spacing of the series in seconds.
///
/// The most frequent positive gap between adjacent observations; when several
/// gaps tie for most frequent, the lower median gap.
///
/// ```
/// use macrocorr_core::{estimate_step_seconds, Observation, TimeSeries};
/// use chrono::{DateTime, Utc};
///
/// fn t(day: i64) -> DateTime<Utc> { DateTime::from_timestamp(day * 86_400, 0).unwrap() }
///
/// // Adjacent deltas: 1d,1d,2d,2d => lower median is one day
/// let pts = [0, 1, 2, 4, 6].iter().map(|d| Observation::new(t(*d), 1.0)).collect();
/// let s = TimeSeries::try_new("X", pts).unwrap();
/// assert_eq!(estimate_step_seconds(&s), Some(86_400));
/// ```
///
/// Returns `None` if the series has fewer than two observations.
#[must_use]
pub fn estimate_step_seconds(series: &TimeSeries) -> Option<i64> {
    let mut deltas: Vec<i64> = series
        .points()
        .windows(2)
        .map(|w| (w[1].ts - w[0].ts).num_seconds())
        .filter(|d| *d > 0)
        .collect();
    if deltas.is_empty() {
        return None;
    }
    deltas.sort_unstable();

    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for d in &deltas {
        *counts.entry(*d).or_default() += 1;
    }
    let top = counts.values().copied().max().unwrap_or_default();
    let mut modes = counts.iter().filter(|(_, c)| **c == top).map(|(d, _)| *d);
    match (modes.next(), modes.next()) {
        (Some(mode), None) => Some(mode),
        _ => Some(deltas[(deltas.len() - 1) / 2]),
    }
}

/// True when `secondary` is sampled more coarsely than `primary`.
///
/// Returns `false` when either step cannot be estimated.
#[must_use]
pub fn is_coarser_than(secondary: &TimeSeries, primary: &TimeSeries) -> bool {
    match (estimate_step_seconds(secondary), estimate_step_seconds(primary)) {
        (Some(s), Some(p)) => s > p,
        _ => false,
    }
}
