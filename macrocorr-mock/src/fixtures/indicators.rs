/// CPI level, drifting upwards.
pub fn cpi(m: f64) -> f64 {
    240.0 * 1.002_f64.powf(m) + 0.3 * (m * 0.9).sin()
}

/// Unemployment rate in percent.
pub fn unemployment(m: f64) -> f64 {
    (5.5 - 0.02 * m + 0.4 * (m * 0.25).sin()).max(3.0)
}

/// Policy rate in quarter-point steps.
pub fn fed_funds(m: f64) -> f64 {
    0.25 * (1.0 + (4.0 * (1.0 + (m * 0.11).sin())).round())
}

/// Ten-year Treasury yield in percent.
pub fn treasury_10y(d: f64) -> f64 {
    2.0 + 1.2 * (d * 0.01).sin() + 0.05 * (d * 0.7).cos()
}
