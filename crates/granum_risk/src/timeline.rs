//! Month-by-month scenario timelines.
//!
//! The driver walks evaluation months from the start date to the end date
//! inclusive. At each evaluation date only buckets from that month onwards
//! are still outstanding; earlier months fall out of the rollup, so the
//! timeline is a receding-horizon view rather than a running total. Each
//! point carries an always-on expected cost (no risk gating) and a VaR
//! rollup gated by the risk info of the outstanding buckets.
//!
//! Scenarios only differ in whether staged hedge quantities offset the
//! exposure; the unhedged scenario always uses zero hedges.

use chrono::NaiveDate;
use granum_core::config::RiskConfig;
use granum_core::types::time::Month;
use granum_portfolio::ids::{CommodityId, CustomerId, UserId};
use granum_portfolio::store::PortfolioStore;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::correlation::estimate_correlation;
use crate::hedges::hedge_quantities;
use crate::risk_info::resolve_risk_info;
use crate::var::{bucket_var, commodity_var, portfolio_var};
use crate::volatility::estimate_volatilities;

/// Reporting currency of the engine's outputs.
const CURRENCY: &str = "USD";

/// Which hedge treatment a timeline point reflects.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Scenario {
    /// Exposure taken as-is; hedge quantities forced to zero.
    WithoutHedge,
    /// Staged hedge quantities subtracted from exposure.
    WithHedge,
}

impl Scenario {
    /// Returns the snake_case wire label.
    pub fn name(&self) -> &'static str {
        match self {
            Scenario::WithoutHedge => "without_hedge",
            Scenario::WithHedge => "with_hedge",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Per-commodity figures plus the portfolio rollup.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskFigures {
    /// Figures keyed by commodity display name.
    pub by_commodity: BTreeMap<String, f64>,
    /// Portfolio-level rollup.
    pub portfolio: f64,
}

/// One evaluation date of one scenario.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimelinePoint {
    /// Evaluation date (normalised to month start).
    pub date: NaiveDate,
    /// Hedge treatment of this point.
    pub scenario: Scenario,
    /// VaR per commodity and for the portfolio.
    pub var: RiskFigures,
    /// Expected cost per commodity and for the portfolio.
    pub expected_cost: RiskFigures,
}

/// A full two-scenario timeline, ready for collaborators to render.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarReport {
    /// Confidence level the VaR figures were computed at.
    pub confidence_level: f64,
    /// Reporting currency.
    pub currency: String,
    /// Unhedged points followed by hedged points, each month-ordered.
    pub timeline: Vec<TimelinePoint>,
}

/// The VaR calculation engine.
///
/// Holds the validated [`RiskConfig`] and runs synchronously against one
/// immutable borrow of the store, so every read within a calculation sees
/// the same snapshot.
///
/// # Examples
///
/// ```
/// use granum_core::config::RiskConfig;
/// use granum_risk::timeline::VarEngine;
///
/// let engine = VarEngine::new(RiskConfig::new(0.99).unwrap());
/// assert_eq!(engine.config().confidence_level(), 0.99);
/// ```
#[derive(Clone, Debug)]
pub struct VarEngine {
    config: RiskConfig,
}

impl VarEngine {
    /// Creates an engine with the given configuration.
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Computes one scenario's timeline.
    ///
    /// One point per calendar month from `start_date` to `end_date`
    /// inclusive, both normalised to month start; an inverted range yields
    /// an empty timeline. Volatilities and the correlation matrix are
    /// estimated once and reused across evaluation dates.
    pub fn calculate_timeline(
        &self,
        store: &PortfolioStore,
        customer: &CustomerId,
        user: &UserId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        scenario: Scenario,
    ) -> Vec<TimelinePoint> {
        let commodity_ids = store.commodity_ids();
        let names: BTreeMap<&CommodityId, String> = commodity_ids
            .iter()
            .map(|id| {
                let name = store
                    .commodity(id)
                    .map_or_else(|| id.to_string(), |c| c.name().to_string());
                (id, name)
            })
            .collect();

        let volatilities = estimate_volatilities(store, &commodity_ids, &self.config);
        let correlation = estimate_correlation(store, &commodity_ids);
        let hedges = match scenario {
            Scenario::WithHedge => hedge_quantities(store, user),
            Scenario::WithoutHedge => HashMap::new(),
        };

        let start_month = Month::containing(start_date);
        let end_month = Month::containing(end_date);

        let mut timeline = Vec::new();
        for eval_month in start_month.range_inclusive(end_month) {
            let eval_date = eval_month.first_day();

            // Only future exposure counts: buckets before the evaluation
            // month have left the horizon.
            let mut exposures: BTreeMap<(CommodityId, Month), f64> = BTreeMap::new();
            for bucket in store.buckets_in_range(customer, eval_month, end_month) {
                *exposures
                    .entry((bucket.commodity_id.clone(), bucket.bucket_month))
                    .or_insert(0.0) += bucket.quantity;
            }

            let risk_info = resolve_risk_info(
                store,
                customer,
                (eval_month, end_month),
                eval_date,
                &self.config,
            );

            let mut bucket_vars: BTreeMap<&CommodityId, Vec<f64>> =
                commodity_ids.iter().map(|id| (id, Vec::new())).collect();
            let mut costs: BTreeMap<&CommodityId, f64> =
                commodity_ids.iter().map(|id| (id, 0.0)).collect();

            for ((commodity, bucket_month), exposure) in &exposures {
                let hedge = hedges
                    .get(&(commodity.clone(), *bucket_month))
                    .copied()
                    .unwrap_or(0.0);
                let net_exposure = exposure - hedge;

                let forward_price = store
                    .forward_price(commodity, *bucket_month)
                    .or_else(|| store.latest_spot(commodity))
                    .unwrap_or(self.config.default_forward_price);

                // Expected cost is never risk-gated.
                if let Some(cost) = costs.get_mut(commodity) {
                    *cost += forward_price * net_exposure.abs();
                }

                let at_risk = risk_info
                    .get(&(commodity.clone(), *bucket_month))
                    .filter(|info| info.has_risk);
                if let (Some(info), Some(vars)) = (at_risk, bucket_vars.get_mut(commodity)) {
                    let volatility = volatilities
                        .get(commodity)
                        .map_or(self.config.default_volatility, |estimate| estimate.value);
                    vars.push(bucket_var(
                        self.config.z_score(),
                        volatility,
                        forward_price,
                        net_exposure,
                        info.horizon_years,
                    ));
                }
            }

            let commodity_vars: Vec<f64> = commodity_ids
                .iter()
                .map(|id| commodity_var(bucket_vars.get(id).map_or(&[][..], Vec::as_slice)))
                .collect();
            let portfolio = portfolio_var(&commodity_vars, &correlation);

            let var_figures = RiskFigures {
                by_commodity: commodity_ids
                    .iter()
                    .zip(&commodity_vars)
                    .map(|(id, var)| (names[id].clone(), *var))
                    .collect(),
                portfolio,
            };
            let cost_figures = RiskFigures {
                by_commodity: commodity_ids
                    .iter()
                    .map(|id| (names[id].clone(), costs[id]))
                    .collect(),
                portfolio: costs.values().sum(),
            };

            timeline.push(TimelinePoint {
                date: eval_date,
                scenario,
                var: var_figures,
                expected_cost: cost_figures,
            });
        }
        timeline
    }

    /// Computes both scenarios and concatenates them into one report:
    /// the unhedged timeline first, then the hedged one.
    pub fn calculate_report(
        &self,
        store: &PortfolioStore,
        customer: &CustomerId,
        user: &UserId,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> VarReport {
        let mut timeline = self.calculate_timeline(
            store,
            customer,
            user,
            start_date,
            end_date,
            Scenario::WithoutHedge,
        );
        timeline.extend(self.calculate_timeline(
            store,
            customer,
            user,
            start_date,
            end_date,
            Scenario::WithHedge,
        ));
        VarReport {
            confidence_level: self.config.confidence_level(),
            currency: CURRENCY.to_string(),
            timeline,
        }
    }
}
