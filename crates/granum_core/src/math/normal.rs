//! Inverse standard-normal cumulative distribution function.
//!
//! Parametric VaR scales volatility by the standard-normal quantile of the
//! confidence level. This module implements the Beasley-Springer-Moro
//! rational approximation, accurate to well under a basis point across the
//! confidence range the engine accepts.

use crate::types::error::StatsError;

// Central-region numerator and denominator coefficients.
const A: [f64; 6] = [
    -3.969683028665376e+01,
    2.209460984245205e+02,
    -2.759285104469687e+02,
    1.383577518672690e+02,
    -3.066479806614716e+01,
    2.506628277459239e+00,
];

const B: [f64; 5] = [
    -5.447609879822406e+01,
    1.615_858_368_580_409e2,
    -1.556_989_798_598_866e2,
    6.680_131_188_771_972e1,
    -1.328_068_155_288_572e1,
];

// Tail-region numerator and denominator coefficients.
const C: [f64; 6] = [
    -7.784_894_002_430_293e-3,
    -3.223_964_580_411_365e-1,
    -2.400_758_277_161_838,
    -2.549_732_539_343_734,
    4.374_664_141_464_968,
    2.938_163_982_698_783,
];

const D: [f64; 4] = [
    7.784_695_709_041_462e-3,
    3.224_671_290_700_398e-1,
    2.445_134_137_142_996,
    3.754_408_661_907_416,
];

/// Break-point between the tail and central approximation regions.
const P_LOW: f64 = 0.02425;

fn tail_value(q: f64) -> f64 {
    (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
        / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
}

fn central_value(q: f64) -> f64 {
    let r = q * q;
    (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
        / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
}

/// Standard-normal quantile `z` such that `Phi(z) = p`.
///
/// # Arguments
/// * `p` - Probability in the open interval (0, 1)
///
/// # Returns
/// `Ok(z)` for valid probabilities, `Err(StatsError::InvalidProbability)`
/// otherwise.
///
/// # Examples
///
/// ```
/// use granum_core::math::normal::inverse_normal_cdf;
///
/// let z = inverse_normal_cdf(0.95).unwrap();
/// assert!((z - 1.645).abs() < 0.01);
///
/// let median = inverse_normal_cdf(0.5).unwrap();
/// assert!(median.abs() < 1e-6);
///
/// assert!(inverse_normal_cdf(1.0).is_err());
/// ```
pub fn inverse_normal_cdf(p: f64) -> Result<f64, StatsError> {
    if !(p > 0.0 && p < 1.0) {
        return Err(StatsError::InvalidProbability(p));
    }

    let z = if p < P_LOW {
        tail_value((-2.0 * p.ln()).sqrt())
    } else if p <= 1.0 - P_LOW {
        central_value(p - 0.5)
    } else {
        -tail_value((-2.0 * (1.0 - p).ln()).sqrt())
    };

    Ok(z)
}
