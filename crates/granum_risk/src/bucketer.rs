//! Exposure bucketing.
//!
//! Expands each purchase into one bucket per calendar month of its delivery
//! window, quantity split evenly across the months. Rebuilding is
//! destructive-then-additive: the complete replacement set is generated
//! first and swapped into the store in one step, so buckets are always a
//! pure function of the current purchases.

use granum_core::types::time::{months_span, Month};
use granum_portfolio::exposure::ExposureBucket;
use granum_portfolio::ids::CustomerId;
use granum_portfolio::purchase::Purchase;
use granum_portfolio::store::PortfolioStore;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Outcome of one bucket rebuild, reported back to the upload workflow.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RebuildReport {
    /// Buckets generated across all processed purchases.
    pub buckets_created: usize,
    /// Purchases that produced at least one bucket.
    pub purchases_processed: usize,
    /// Purchases that produced no buckets (flagged, not silently dropped).
    pub purchases_skipped: usize,
}

/// Expands one purchase into its monthly exposure buckets.
///
/// The delivery window is normalised to whole calendar months (inclusive on
/// both ends) and the purchase quantity is divided evenly across them, so
/// the bucket quantities always sum back to the purchase quantity.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use granum_portfolio::ids::{CommodityId, CustomerId, PurchaseId};
/// use granum_portfolio::purchase::{PriceType, Purchase};
/// use granum_risk::bucketer::buckets_for_purchase;
///
/// let purchase = Purchase::new(
///     PurchaseId::new("P001"),
///     CustomerId::new("ACME"),
///     CommodityId::new("sugar"),
///     NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 7, 15).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 9, 15).unwrap(),
///     3000.0,
///     "mt",
///     0.52,
///     PriceType::Fixed,
///     None,
/// )
/// .unwrap();
///
/// let buckets = buckets_for_purchase(&purchase);
/// assert_eq!(buckets.len(), 3);
/// assert!(buckets.iter().all(|b| b.quantity == 1000.0));
/// ```
pub fn buckets_for_purchase(purchase: &Purchase) -> Vec<ExposureBucket> {
    let months = months_span(purchase.delivery_start(), purchase.delivery_end());
    if months.is_empty() {
        return Vec::new();
    }

    let quantity_per_month = purchase.quantity() / months.len() as f64;
    months
        .into_iter()
        .map(|bucket_month| ExposureBucket {
            customer_id: purchase.customer_id().clone(),
            commodity_id: purchase.commodity_id().clone(),
            bucket_month,
            quantity: quantity_per_month,
            source_purchase: purchase.id().clone(),
        })
        .collect()
}

/// Rebuilds exposure buckets from the store's current purchases.
///
/// With a customer scope only that customer's purchases and buckets take
/// part; without one the whole set is rebuilt. Prior buckets in scope are
/// replaced wholesale. A purchase whose delivery window covers no months is
/// counted in the report and logged, never silently dropped.
pub fn rebuild_exposure_buckets(
    store: &mut PortfolioStore,
    scope: Option<&CustomerId>,
) -> RebuildReport {
    let mut report = RebuildReport::default();
    let mut buckets = Vec::new();

    for purchase in store.purchases() {
        if let Some(customer) = scope {
            if purchase.customer_id() != customer {
                continue;
            }
        }
        let purchase_buckets = buckets_for_purchase(purchase);
        if purchase_buckets.is_empty() {
            warn!(purchase = %purchase.id(), "no delivery months for purchase, skipping");
            report.purchases_skipped += 1;
            continue;
        }
        report.purchases_processed += 1;
        report.buckets_created += purchase_buckets.len();
        buckets.extend(purchase_buckets);
    }

    store.replace_buckets(scope, buckets);
    info!(
        buckets = report.buckets_created,
        purchases = report.purchases_processed,
        skipped = report.purchases_skipped,
        "rebuilt exposure buckets"
    );
    report
}

/// Total exposure per commodity name per bucket month.
///
/// Reporting helper for collaborators that display the exposure profile.
pub fn exposure_summary(store: &PortfolioStore) -> BTreeMap<String, BTreeMap<Month, f64>> {
    let mut summary: BTreeMap<String, BTreeMap<Month, f64>> = BTreeMap::new();
    for bucket in store.buckets() {
        let name = store
            .commodity(&bucket.commodity_id)
            .map_or_else(|| bucket.commodity_id.to_string(), |c| c.name().to_string());
        *summary
            .entry(name)
            .or_default()
            .entry(bucket.bucket_month)
            .or_insert(0.0) += bucket.quantity;
    }
    summary
}
