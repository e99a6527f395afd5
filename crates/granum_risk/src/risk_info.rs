//! Price-risk gating per exposure bucket.
//!
//! Each bucket traces back to its originating purchase:
//! - fixed price: the cost is locked, no remaining price risk
//! - floating with a payment date: at risk until the payment date
//! - floating without one: at risk until the bucket's delivery month
//!
//! When several purchases feed the same (commodity, bucket month) key the
//! bucket is at risk if any contributor is, and the horizon is the maximum
//! across contributors, so the longest uncertainty window wins.

use chrono::NaiveDate;
use granum_core::config::RiskConfig;
use granum_core::types::time::{year_fraction, Month};
use granum_portfolio::ids::{CommodityId, CustomerId};
use granum_portfolio::purchase::PriceType;
use granum_portfolio::store::PortfolioStore;
use std::collections::HashMap;
use tracing::warn;

/// Whether a bucket still carries price risk, and over what horizon.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BucketRiskInfo {
    /// True while the bucket's price can still move.
    pub has_risk: bool,
    /// Risk horizon in years, floored at the configured minimum.
    pub horizon_years: f64,
}

/// Resolves risk info for one customer's buckets in a month range.
///
/// Horizons are measured from `reference_date` under ACT/365 and floored at
/// `config.min_horizon_years` so a lock-in date in the immediate past or
/// present never produces a degenerate near-zero-time VaR.
pub fn resolve_risk_info(
    store: &PortfolioStore,
    customer: &CustomerId,
    range: (Month, Month),
    reference_date: NaiveDate,
    config: &RiskConfig,
) -> HashMap<(CommodityId, Month), BucketRiskInfo> {
    let mut info: HashMap<(CommodityId, Month), BucketRiskInfo> = HashMap::new();

    for bucket in store.buckets_in_range(customer, range.0, range.1) {
        let (has_risk, risk_until) = match store.purchase(&bucket.source_purchase) {
            Some(purchase) => match purchase.price_type() {
                PriceType::Fixed => (false, None),
                PriceType::Floating => {
                    let until = purchase
                        .payment_date()
                        .unwrap_or_else(|| bucket.bucket_month.first_day());
                    (true, Some(until))
                }
            },
            None => {
                // An orphaned bucket should not exist after a rebuild; if one
                // does, keep it at risk until delivery rather than hiding it.
                warn!(
                    purchase = %bucket.source_purchase,
                    "bucket references missing purchase, treating as floating"
                );
                (true, Some(bucket.bucket_month.first_day()))
            }
        };

        let horizon_years = match risk_until {
            Some(until) => year_fraction(reference_date, until).max(config.min_horizon_years),
            None => config.min_horizon_years,
        };

        let key = (bucket.commodity_id.clone(), bucket.bucket_month);
        info.entry(key)
            .and_modify(|existing| {
                existing.has_risk = existing.has_risk || has_risk;
                existing.horizon_years = existing.horizon_years.max(horizon_years);
            })
            .or_insert(BucketRiskInfo {
                has_risk,
                horizon_years,
            });
    }

    info
}
