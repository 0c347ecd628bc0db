use macrocorr_types::{MultiSeriesTable, RollingCorrelationTable};

use super::coefficient::pearson;

/// Rolling correlation of every secondary against the primary.
///
/// Windows run over joint observations (rows where both change series are
/// present) and each coefficient is stamped with the last joint row of its
/// window.
pub(super) fn rolling_against_primary(
    table: &MultiSeriesTable,
    changes: &[Vec<Option<f64>>],
    window: usize,
) -> RollingCorrelationTable {
    let mut out = RollingCorrelationTable::new(table.primary_name(), Some(window));
    let Some((primary, secondaries)) = changes.split_first() else {
        return out;
    };
    let index = table.index();

    for (name, sec) in table.secondary_names().zip(secondaries) {
        let joint: Vec<(usize, f64, f64)> = primary
            .iter()
            .zip(sec)
            .enumerate()
            .filter_map(|(i, (p, s))| Some((i, (*p)?, (*s)?)))
            .collect();
        if joint.len() < window {
            continue;
        }
        for end in window..=joint.len() {
            let slice = &joint[end - window..end];
            let xs: Vec<f64> = slice.iter().map(|j| j.1).collect();
            let ys: Vec<f64> = slice.iter().map(|j| j.2).collect();
            if let Some(r) = pearson(&xs, &ys) {
                out.insert(index[slice[window - 1].0], name, r);
            }
        }
    }
    out
}
