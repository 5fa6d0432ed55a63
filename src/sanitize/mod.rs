//! Numerical Guards
//!
//! Helpers that keep NaN/Inf out of the estimation loop.

use crate::types::ThetaBounds;

/// 检查数组是否包含无效值 (NaN 或 Inf)
pub fn has_invalid_values(arr: &[f64]) -> bool {
    arr.iter().any(|&x| x.is_nan() || x.is_infinite())
}

/// Replace a non-finite theta with the interval midpoint, then clamp.
pub fn sanitize_theta(theta: f64, bounds: &ThetaBounds) -> f64 {
    if theta.is_nan() {
        return bounds.clamp((bounds.min + bounds.max) / 2.0);
    }
    // +/-Inf clamps to the matching bound
    bounds.clamp(theta)
}

/// Stable logistic: never evaluates exp() of a large positive argument.
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let exp_x = x.exp();
        exp_x / (1.0 + exp_x)
    }
}

/// Information value with anything non-finite or negative mapped to 0.
#[inline]
pub fn sanitize_information(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
