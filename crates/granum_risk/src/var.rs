//! Parametric VaR rollup.
//!
//! Bucket level:
//!
//! ```text
//! VaR = z(confidence) * sigma * forward_price * |net_exposure| * sqrt(T)
//! ```
//!
//! Commodity level assumes zero correlation across a commodity's time
//! buckets and takes the root of the sum of squares. Portfolio level treats
//! the commodity VaR vector `w` as the weights in `sqrt(w' * Corr * w)`,
//! applying the correlation matrix directly to VaR magnitudes. That is a
//! deliberate modelling simplification inherited from the system this
//! engine reproduces, not full covariance propagation from raw returns;
//! callers depending on numeric parity must preserve it.

use crate::correlation::CorrelationMatrix;

/// VaR of a single exposure bucket.
///
/// Monotonically non-decreasing in `|net_exposure|`, `volatility`, and
/// `horizon_years`, holding the other inputs fixed.
///
/// # Examples
///
/// ```
/// use granum_risk::var::bucket_var;
///
/// // The reference scenario: z ~= 1.645, sigma 0.15, price 0.50,
/// // exposure 1000, one year.
/// let var = bucket_var(1.645, 0.15, 0.50, 1000.0, 1.0);
/// assert!((var - 123.375).abs() < 1e-9);
///
/// // Sign of the exposure does not matter.
/// assert_eq!(var, bucket_var(1.645, 0.15, 0.50, -1000.0, 1.0));
/// ```
pub fn bucket_var(
    z_score: f64,
    volatility: f64,
    forward_price: f64,
    net_exposure: f64,
    horizon_years: f64,
) -> f64 {
    z_score * volatility * forward_price * net_exposure.abs() * horizon_years.sqrt()
}

/// Commodity VaR across its time buckets: `sqrt(sum of squares)`.
///
/// Zero correlation across time buckets of one commodity is an explicit
/// simplifying assumption.
pub fn commodity_var(bucket_vars: &[f64]) -> f64 {
    bucket_vars
        .iter()
        .map(|var| var * var)
        .sum::<f64>()
        .sqrt()
}

/// Portfolio VaR: `sqrt(w' * Corr * w)` over the commodity VaR vector.
///
/// # Panics
/// Panics when the vector length does not match the matrix dimension.
pub fn portfolio_var(commodity_vars: &[f64], correlation: &CorrelationMatrix) -> f64 {
    assert_eq!(
        commodity_vars.len(),
        correlation.len(),
        "commodity VaR vector must match correlation dimension"
    );

    let n = commodity_vars.len();
    let mut quadratic_form = 0.0;
    for i in 0..n {
        for j in 0..n {
            quadratic_form += commodity_vars[i] * correlation.get(i, j) * commodity_vars[j];
        }
    }
    // Rounding can push a tiny quadratic form below zero.
    quadratic_form.max(0.0).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use granum_portfolio::ids::CommodityId;

    fn ids(n: usize) -> Vec<CommodityId> {
        (0..n).map(|i| CommodityId::new(format!("c{i}"))).collect()
    }

    fn all_ones_matrix(n: usize) -> CorrelationMatrix {
        // Perfect correlation between every pair.
        CorrelationMatrix::from_parts(ids(n), vec![1.0; n * n])
    }

    #[test]
    fn test_reference_bucket_var() {
        let var = bucket_var(1.645, 0.15, 0.50, 1000.0, 1.0);
        assert_abs_diff_eq!(var, 123.375, epsilon = 1e-9);
    }

    #[test]
    fn test_bucket_var_uses_absolute_exposure() {
        let long = bucket_var(1.645, 0.15, 0.50, 1000.0, 1.0);
        let short = bucket_var(1.645, 0.15, 0.50, -1000.0, 1.0);
        assert_eq!(long, short);
    }

    #[test]
    fn test_bucket_var_zero_inputs() {
        assert_eq!(bucket_var(1.645, 0.15, 0.50, 0.0, 1.0), 0.0);
        assert_eq!(bucket_var(1.645, 0.0, 0.50, 1000.0, 1.0), 0.0);
    }

    #[test]
    fn test_bucket_var_scales_with_sqrt_horizon() {
        let one_year = bucket_var(1.645, 0.15, 0.50, 1000.0, 1.0);
        let four_years = bucket_var(1.645, 0.15, 0.50, 1000.0, 4.0);
        assert_relative_eq!(four_years, 2.0 * one_year, epsilon = 1e-12);
    }

    #[test]
    fn test_commodity_var_root_sum_of_squares() {
        assert_relative_eq!(commodity_var(&[3.0, 4.0]), 5.0, epsilon = 1e-12);
        assert_eq!(commodity_var(&[]), 0.0);
        assert_relative_eq!(commodity_var(&[7.5]), 7.5, epsilon = 1e-12);
    }

    #[test]
    fn test_portfolio_var_zero_correlation_is_rss() {
        let matrix = CorrelationMatrix::identity(ids(2));
        let var = portfolio_var(&[3.0, 4.0], &matrix);
        assert_relative_eq!(var, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_portfolio_var_perfect_correlation_is_simple_sum() {
        let matrix = all_ones_matrix(3);
        let var = portfolio_var(&[1.0, 2.0, 3.0], &matrix);
        assert_relative_eq!(var, 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_portfolio_var_single_commodity() {
        let matrix = CorrelationMatrix::identity(ids(1));
        assert_relative_eq!(portfolio_var(&[123.375], &matrix), 123.375, epsilon = 1e-12);
    }

    #[test]
    #[should_panic(expected = "must match correlation dimension")]
    fn test_portfolio_var_dimension_mismatch_panics() {
        let matrix = CorrelationMatrix::identity(ids(2));
        portfolio_var(&[1.0], &matrix);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Property 4: monotone in each driver, holding others fixed.
            #[test]
            fn bucket_var_is_monotone(
                exposure_a in 0.0f64..1.0e6,
                exposure_b in 0.0f64..1.0e6,
                vol_a in 0.0f64..2.0,
                vol_b in 0.0f64..2.0,
                horizon_a in 0.01f64..5.0,
                horizon_b in 0.01f64..5.0,
            ) {
                let z = 1.645;
                let price = 0.5;

                let (lo, hi) = if exposure_a <= exposure_b {
                    (exposure_a, exposure_b)
                } else {
                    (exposure_b, exposure_a)
                };
                prop_assert!(
                    bucket_var(z, 0.15, price, lo, 1.0) <= bucket_var(z, 0.15, price, hi, 1.0)
                );

                let (lo, hi) = if vol_a <= vol_b { (vol_a, vol_b) } else { (vol_b, vol_a) };
                prop_assert!(
                    bucket_var(z, lo, price, 1000.0, 1.0) <= bucket_var(z, hi, price, 1000.0, 1.0)
                );

                let (lo, hi) = if horizon_a <= horizon_b {
                    (horizon_a, horizon_b)
                } else {
                    (horizon_b, horizon_a)
                };
                prop_assert!(
                    bucket_var(z, 0.15, price, 1000.0, lo) <= bucket_var(z, 0.15, price, 1000.0, hi)
                );
            }

            // Diagonal-dominant identity keeps the rollup consistent with RSS.
            #[test]
            fn portfolio_var_identity_matches_commodity_rollup(
                vars in proptest::collection::vec(0.0f64..1.0e6, 1..6),
            ) {
                let matrix = CorrelationMatrix::identity(ids(vars.len()));
                let portfolio = portfolio_var(&vars, &matrix);
                let rss = commodity_var(&vars);
                prop_assert!((portfolio - rss).abs() <= rss.max(1.0) * 1e-12);
            }
        }
    }
}
