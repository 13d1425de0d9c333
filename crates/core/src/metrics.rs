// crates/core/src/metrics.rs
//! Numeric helpers shared by the metric functions.

/// Clamp a score into `[0.0, 1.0]`. NaN collapses to `0.0`.
pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Round to 2 decimal places (half away from zero).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Divide by a count that is treated as at least 1.
pub fn per_at_least_one(numerator: f64, count: usize) -> f64 {
    numerator / count.max(1) as f64
}
