//! Annualised volatility estimation from historical spot prices.
//!
//! Volatility is the population standard deviation of daily log-returns,
//! annualised by the square root of the configured trading-day count.
//! Commodities with fewer than two observations fall back to the configured
//! default; the degradation is flagged and logged, never fatal.

use granum_core::config::RiskConfig;
use granum_core::math::stats::{log_returns, population_std_dev};
use granum_portfolio::ids::CommodityId;
use granum_portfolio::market::MarketPrice;
use granum_portfolio::store::PortfolioStore;
use std::collections::BTreeMap;
use tracing::warn;

/// Minimum spot observations for an estimate that is not a fallback.
const MIN_OBSERVATIONS: usize = 2;

/// An annualised volatility with its provenance.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VolatilityEstimate {
    /// Annualised volatility.
    pub value: f64,
    /// Spot observations the estimate was computed from.
    pub observations: usize,
    /// True when the default volatility was substituted for missing history.
    pub fallback: bool,
}

/// Estimates annualised volatility from a chronological price series.
///
/// # Examples
///
/// ```
/// use granum_core::config::RiskConfig;
/// use granum_risk::volatility::annualised_volatility;
///
/// let config = RiskConfig::default();
///
/// // Too little history degrades to the configured default.
/// let estimate = annualised_volatility(&[0.51], &config);
/// assert!(estimate.fallback);
/// assert_eq!(estimate.value, config.default_volatility);
///
/// // Enough history produces a real estimate.
/// let estimate = annualised_volatility(&[0.50, 0.51, 0.49, 0.52], &config);
/// assert!(!estimate.fallback);
/// assert!(estimate.value > 0.0);
/// ```
pub fn annualised_volatility(prices: &[f64], config: &RiskConfig) -> VolatilityEstimate {
    if prices.len() < MIN_OBSERVATIONS {
        return VolatilityEstimate {
            value: config.default_volatility,
            observations: prices.len(),
            fallback: true,
        };
    }

    let returns = log_returns(prices);
    let daily = population_std_dev(&returns);
    VolatilityEstimate {
        value: daily * config.trading_days_per_year.sqrt(),
        observations: prices.len(),
        fallback: false,
    }
}

/// Estimates volatility for each commodity from its spot history.
///
/// Fallbacks are logged per commodity and flagged on the estimate.
pub fn estimate_volatilities(
    store: &PortfolioStore,
    commodities: &[CommodityId],
    config: &RiskConfig,
) -> BTreeMap<CommodityId, VolatilityEstimate> {
    let mut estimates = BTreeMap::new();
    for commodity in commodities {
        let prices: Vec<f64> = store
            .spot_history(commodity)
            .iter()
            .map(MarketPrice::price)
            .collect();
        let estimate = annualised_volatility(&prices, config);
        if estimate.fallback {
            warn!(
                commodity = %commodity,
                observations = estimate.observations,
                "insufficient price history, using default volatility"
            );
        }
        estimates.insert(commodity.clone(), estimate);
    }
    estimates
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use granum_core::config::DEFAULT_VOLATILITY;
    use granum_portfolio::commodity::Commodity;

    #[test]
    fn test_fallback_below_two_observations() {
        let config = RiskConfig::default();

        let empty = annualised_volatility(&[], &config);
        assert_eq!(empty.value, DEFAULT_VOLATILITY);
        assert!(empty.fallback);
        assert_eq!(empty.observations, 0);

        let single = annualised_volatility(&[0.51], &config);
        assert_eq!(single.value, DEFAULT_VOLATILITY);
        assert!(single.fallback);
    }

    #[test]
    fn test_two_identical_prices_give_zero_volatility() {
        let config = RiskConfig::default();
        let estimate = annualised_volatility(&[0.5, 0.5], &config);
        assert!(!estimate.fallback);
        assert_eq!(estimate.value, 0.0);
    }

    #[test]
    fn test_annualisation_factor() {
        let config = RiskConfig::default();
        // Alternating +r/-r log-returns have a known population stdev.
        let prices = [1.0, 1.02, 1.0, 1.02, 1.0];
        let estimate = annualised_volatility(&prices, &config);

        let r = 1.02f64.ln();
        // Returns are [r, -r, r, -r]; mean 0, stdev r.
        assert_relative_eq!(estimate.value, r * 252.0f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_volatility_scales_with_dispersion() {
        let config = RiskConfig::default();
        let calm = annualised_volatility(&[1.0, 1.01, 1.0, 1.01, 1.0], &config);
        let wild = annualised_volatility(&[1.0, 1.10, 1.0, 1.10, 1.0], &config);
        assert!(wild.value > calm.value);
    }

    #[test]
    fn test_estimate_volatilities_per_commodity() {
        let mut store = PortfolioStore::new();
        let sugar = CommodityId::new("sugar");
        let flour = CommodityId::new("flour");
        store
            .add_commodity(Commodity::new(sugar.clone(), "sugar", "mt"))
            .unwrap();
        store
            .add_commodity(Commodity::new(flour.clone(), "flour", "mt"))
            .unwrap();

        for (i, price) in [0.50, 0.51, 0.49, 0.52].iter().enumerate() {
            store
                .add_market_price(
                    MarketPrice::spot(
                        sugar.clone(),
                        NaiveDate::from_ymd_opt(2025, 6, i as u32 + 1).unwrap(),
                        *price,
                        "yahoo",
                    )
                    .unwrap(),
                )
                .unwrap();
        }

        let config = RiskConfig::default();
        let estimates =
            estimate_volatilities(&store, &[sugar.clone(), flour.clone()], &config);

        assert!(!estimates[&sugar].fallback);
        assert_eq!(estimates[&sugar].observations, 4);
        assert!(estimates[&flour].fallback);
        assert_eq!(estimates[&flour].value, DEFAULT_VOLATILITY);
    }
}
