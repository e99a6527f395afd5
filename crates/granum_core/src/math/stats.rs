//! Return and dispersion statistics over price and return series.
//!
//! All functions are generic over `T: Float` so they work with `f64` in the
//! engine and with `f32` where callers prefer narrower storage. Volatility
//! estimation uses the population standard deviation of log-returns, and
//! correlation estimation uses the Pearson coefficient over aligned return
//! series.
//!
//! # Examples
//!
//! ```
//! use granum_core::math::stats::{log_returns, population_std_dev};
//!
//! let prices = [100.0_f64, 102.0, 101.0, 103.0];
//! let returns = log_returns(&prices);
//! assert_eq!(returns.len(), 3);
//!
//! let sigma = population_std_dev(&returns);
//! assert!(sigma > 0.0);
//! ```

use num_traits::Float;

/// Log-returns `ln(p[i] / p[i-1])` of a chronologically ordered price series.
///
/// Returns an empty vector for fewer than two prices. Prices are assumed
/// positive; ingestion validation upstream enforces this.
///
/// # Examples
///
/// ```
/// use granum_core::math::stats::log_returns;
///
/// assert!(log_returns::<f64>(&[]).is_empty());
/// assert!(log_returns(&[100.0_f64]).is_empty());
///
/// let returns = log_returns(&[100.0_f64, 100.0]);
/// assert_eq!(returns, vec![0.0]);
/// ```
pub fn log_returns<T: Float>(prices: &[T]) -> Vec<T> {
    prices
        .windows(2)
        .map(|pair| (pair[1] / pair[0]).ln())
        .collect()
}

/// Arithmetic mean of a slice.
///
/// # Panics
/// Panics if `data` is empty.
pub fn mean<T: Float>(data: &[T]) -> T {
    assert!(!data.is_empty(), "mean of empty slice");
    let sum = data.iter().fold(T::zero(), |acc, &x| acc + x);
    sum / T::from(data.len()).unwrap_or_else(T::one)
}

/// Population standard deviation of a slice.
///
/// Returns zero for a single observation, matching the population convention
/// where one sample has no dispersion.
///
/// # Panics
/// Panics if `data` is empty.
///
/// # Examples
///
/// ```
/// use granum_core::math::stats::population_std_dev;
///
/// let data = [2.0_f64, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((population_std_dev(&data) - 2.0).abs() < 1e-12);
/// assert_eq!(population_std_dev(&[1.5_f64]), 0.0);
/// ```
pub fn population_std_dev<T: Float>(data: &[T]) -> T {
    assert!(!data.is_empty(), "standard deviation of empty slice");
    let m = mean(data);
    let sum_sq = data
        .iter()
        .fold(T::zero(), |acc, &x| acc + (x - m) * (x - m));
    (sum_sq / T::from(data.len()).unwrap_or_else(T::one)).sqrt()
}

/// Pearson correlation coefficient between two equal-length series.
///
/// Returns `None` when either series has zero variance, where the
/// coefficient is undefined; callers decide how to degrade.
///
/// # Panics
/// Panics if the series are empty or differ in length.
///
/// # Examples
///
/// ```
/// use granum_core::math::stats::pearson_correlation;
///
/// let x = [1.0_f64, 2.0, 3.0, 4.0];
/// let y = [2.0_f64, 4.0, 6.0, 8.0];
/// let rho = pearson_correlation(&x, &y).unwrap();
/// assert!((rho - 1.0).abs() < 1e-12);
///
/// let flat = [5.0_f64, 5.0, 5.0, 5.0];
/// assert!(pearson_correlation(&x, &flat).is_none());
/// ```
pub fn pearson_correlation<T: Float>(x: &[T], y: &[T]) -> Option<T> {
    assert!(!x.is_empty(), "correlation of empty series");
    assert_eq!(x.len(), y.len(), "correlation of mismatched series");

    let mean_x = mean(x);
    let mean_y = mean(y);

    let mut cov = T::zero();
    let mut var_x = T::zero();
    let mut var_y = T::zero();
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov = cov + dx * dy;
        var_x = var_x + dx * dx;
        var_y = var_y + dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom <= T::zero() {
        return None;
    }
    Some(cov / denom)
}
