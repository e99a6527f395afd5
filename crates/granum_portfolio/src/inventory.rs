//! Informational inventory snapshots.
//!
//! On-hand quantities per commodity at a point in time. The VaR engine does
//! not consume these; they are accepted and stored for reporting so the
//! upload workflow has somewhere to put them.

use chrono::NaiveDate;

use crate::error::PortfolioError;
use crate::ids::{CommodityId, CustomerId};

/// Point-in-time on-hand quantity of one commodity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventorySnapshot {
    customer_id: CustomerId,
    commodity_id: CommodityId,
    date: NaiveDate,
    quantity: f64,
}

impl InventorySnapshot {
    /// Creates a validated snapshot.
    ///
    /// # Errors
    /// `InvalidInventoryQuantity` if `quantity < 0`.
    pub fn new(
        customer_id: CustomerId,
        commodity_id: CommodityId,
        date: NaiveDate,
        quantity: f64,
    ) -> Result<Self, PortfolioError> {
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(PortfolioError::InvalidInventoryQuantity { got: quantity });
        }
        Ok(Self {
            customer_id,
            commodity_id,
            date,
            quantity,
        })
    }

    /// Returns the owning customer.
    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    /// Returns the commodity.
    pub fn commodity_id(&self) -> &CommodityId {
        &self.commodity_id
    }

    /// Returns the snapshot date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the on-hand quantity.
    pub fn quantity(&self) -> f64 {
        self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_snapshot() {
        let snap = InventorySnapshot::new(
            CustomerId::new("ACME"),
            CommodityId::new("sugar"),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            0.0,
        )
        .unwrap();
        assert_eq!(snap.quantity(), 0.0);
    }

    #[test]
    fn test_rejects_negative_quantity() {
        let result = InventorySnapshot::new(
            CustomerId::new("ACME"),
            CommodityId::new("sugar"),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            -1.0,
        );
        assert_eq!(
            result,
            Err(PortfolioError::InvalidInventoryQuantity { got: -1.0 })
        );
    }
}
