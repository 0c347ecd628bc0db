/// Convert a level series into period-over-period relative changes.
///
/// `out[i] = (v[i] - v[i-1]) / v[i-1]` when both values are present, the
/// previous value is non-zero, and the result is finite; otherwise absent.
/// `out[0]` is always absent. A column with fewer than two present values yields
/// all-absent changes.
#[must_use]
pub fn relative_changes(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if values.iter().filter(|v| v.is_some()).count() < 2 {
        return out;
    }
    for i in 1..values.len() {
        if let (Some(prev), Some(cur)) = (values[i - 1], values[i])
            && prev != 0.0
        {
            let change = (cur - prev) / prev;
            if change.is_finite() {
                out[i] = Some(change);
            }
        }
    }
    out
}
