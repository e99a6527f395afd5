//! Derived monthly exposure buckets.
//!
//! Buckets are a pure function of the current purchases: the bucketer in
//! `granum_risk` deletes and regenerates them wholesale, so nothing here is
//! ever patched in place.

use granum_core::types::time::Month;

use crate::ids::{CommodityId, CustomerId, PurchaseId};

/// One month of physical exposure traced back to its source purchase.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExposureBucket {
    /// Owning customer.
    pub customer_id: CustomerId,
    /// Exposed commodity.
    pub commodity_id: CommodityId,
    /// Delivery month this slice of exposure falls in.
    pub bucket_month: Month,
    /// Quantity allocated to this month.
    pub quantity: f64,
    /// Purchase this bucket was derived from.
    pub source_purchase: PurchaseId,
}
