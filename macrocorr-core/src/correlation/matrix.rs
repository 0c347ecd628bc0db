use macrocorr_types::{CorrelationMatrix, MacroCorrError};

use super::coefficient::pearson_pairwise;

/// Fill the upper triangle and mirror it; the diagonal is 1 exactly when the
/// field's self-correlation is defined.
pub(super) fn correlation_matrix(
    names: Vec<String>,
    changes: &[Vec<Option<f64>>],
) -> Result<CorrelationMatrix, MacroCorrError> {
    let n = changes.len();
    let mut values = vec![vec![None; n]; n];
    for i in 0..n {
        values[i][i] = pearson_pairwise(&changes[i], &changes[i]).map(|_| 1.0);
        for j in (i + 1)..n {
            let r = pearson_pairwise(&changes[i], &changes[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }
    CorrelationMatrix::try_new(names, values)
}
