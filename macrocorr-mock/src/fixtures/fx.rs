/// USD/CHF monthly close.
pub fn usdchf(m: f64) -> f64 {
    0.95 + 0.04 * (m * 0.37).sin() + 0.015 * (m * 1.3).cos()
}
