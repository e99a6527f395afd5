//! Engine configuration.
//!
//! The original service read tuning constants from a process-wide cached
//! settings object; here they travel as an explicitly passed value so every
//! calculation is reproducible from its inputs alone. Construction validates
//! the confidence level and pre-computes the matching standard-normal
//! quantile, so downstream VaR arithmetic never fails.

use thiserror::Error;

use crate::math::normal::inverse_normal_cdf;

/// Lowest accepted confidence level.
pub const MIN_CONFIDENCE_LEVEL: f64 = 0.50;
/// Highest accepted confidence level.
pub const MAX_CONFIDENCE_LEVEL: f64 = 0.99;

/// Confidence level used by [`RiskConfig::default`].
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;
/// Annualised volatility assumed when price history is too short.
pub const DEFAULT_VOLATILITY: f64 = 0.15;
/// Price assumed when neither a forward quote nor a spot price exists.
pub const DEFAULT_FORWARD_PRICE: f64 = 0.5;
/// Trading days per year used to annualise daily volatility.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;
/// Floor on risk horizons, in years.
pub const MIN_HORIZON_YEARS: f64 = 0.01;

/// Errors from configuration construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Confidence level outside the accepted range.
    #[error("Confidence level must be in [{MIN_CONFIDENCE_LEVEL}, {MAX_CONFIDENCE_LEVEL}], got {got}")]
    ConfidenceOutOfRange {
        /// The rejected confidence level.
        got: f64,
    },
}

/// Validated parameters of one VaR calculation.
///
/// The confidence level and its z-score are fixed at construction; the
/// remaining fields are degradation constants callers may tune per run.
///
/// # Examples
///
/// ```
/// use granum_core::config::RiskConfig;
///
/// let config = RiskConfig::new(0.95).unwrap();
/// assert_eq!(config.confidence_level(), 0.95);
/// assert!((config.z_score() - 1.645).abs() < 0.01);
///
/// assert!(RiskConfig::new(0.999).is_err());
/// assert!(RiskConfig::new(0.3).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskConfig {
    confidence_level: f64,
    z_score: f64,
    /// Fallback annualised volatility for commodities with short history.
    pub default_volatility: f64,
    /// Fallback price when no forward quote or spot observation exists.
    pub default_forward_price: f64,
    /// Trading-day count used to annualise daily return volatility.
    pub trading_days_per_year: f64,
    /// Floor applied to risk horizons, in years.
    pub min_horizon_years: f64,
}

impl RiskConfig {
    /// Creates a configuration for the given confidence level.
    ///
    /// # Returns
    /// `Err(ConfigError::ConfidenceOutOfRange)` when the level falls outside
    /// `[0.50, 0.99]`.
    pub fn new(confidence_level: f64) -> Result<Self, ConfigError> {
        if !(MIN_CONFIDENCE_LEVEL..=MAX_CONFIDENCE_LEVEL).contains(&confidence_level) {
            return Err(ConfigError::ConfidenceOutOfRange {
                got: confidence_level,
            });
        }
        let z_score = inverse_normal_cdf(confidence_level)
            .map_err(|_| ConfigError::ConfidenceOutOfRange {
                got: confidence_level,
            })?;
        Ok(Self {
            confidence_level,
            z_score,
            default_volatility: DEFAULT_VOLATILITY,
            default_forward_price: DEFAULT_FORWARD_PRICE,
            trading_days_per_year: TRADING_DAYS_PER_YEAR,
            min_horizon_years: MIN_HORIZON_YEARS,
        })
    }

    /// Returns the confidence level.
    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Returns the standard-normal quantile of the confidence level.
    pub fn z_score(&self) -> f64 {
        self.z_score
    }
}

impl Default for RiskConfig {
    /// 95% confidence with the standard degradation constants.
    fn default() -> Self {
        match Self::new(DEFAULT_CONFIDENCE_LEVEL) {
            Ok(config) => config,
            // DEFAULT_CONFIDENCE_LEVEL is inside the validated range.
            Err(_) => unreachable!("default confidence level is valid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_new_valid_levels() {
        for level in [0.5, 0.9, 0.95, 0.99] {
            let config = RiskConfig::new(level).unwrap();
            assert_eq!(config.confidence_level(), level);
        }
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert_eq!(
            RiskConfig::new(0.3),
            Err(ConfigError::ConfidenceOutOfRange { got: 0.3 })
        );
        assert!(RiskConfig::new(0.999).is_err());
        assert!(RiskConfig::new(1.0).is_err());
        assert!(RiskConfig::new(-1.0).is_err());
        assert!(RiskConfig::new(f64::NAN).is_err());
    }

    #[test]
    fn test_z_score_matches_quantile() {
        let config = RiskConfig::new(0.95).unwrap();
        assert_abs_diff_eq!(config.z_score(), 1.6448536269514722, epsilon = 1e-6);

        let config = RiskConfig::new(0.99).unwrap();
        assert_abs_diff_eq!(config.z_score(), 2.3263478740408408, epsilon = 1e-6);
    }

    #[test]
    fn test_default_is_95_percent() {
        let config = RiskConfig::default();
        assert_eq!(config.confidence_level(), DEFAULT_CONFIDENCE_LEVEL);
        assert_eq!(config.default_volatility, DEFAULT_VOLATILITY);
        assert_eq!(config.default_forward_price, DEFAULT_FORWARD_PRICE);
        assert_eq!(config.trading_days_per_year, TRADING_DAYS_PER_YEAR);
        assert_eq!(config.min_horizon_years, MIN_HORIZON_YEARS);
    }

    #[test]
    fn test_degradation_constants_are_tunable() {
        let mut config = RiskConfig::default();
        config.default_volatility = 0.25;
        config.min_horizon_years = 0.05;
        assert_eq!(config.default_volatility, 0.25);
        assert_eq!(config.min_horizon_years, 0.05);
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::ConfidenceOutOfRange { got: 0.3 };
        assert_eq!(
            format!("{}", err),
            "Confidence level must be in [0.5, 0.99], got 0.3"
        );
    }
}
