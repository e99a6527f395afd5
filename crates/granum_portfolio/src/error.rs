//! Portfolio error types.
//!
//! Structured errors for ingestion validation and hedge-session management,
//! derived with `thiserror`. Everything here is a caller-visible validation
//! failure; degraded-data recoveries inside the risk engine never surface as
//! these errors.

use chrono::NaiveDate;
use granum_core::types::time::Month;
use thiserror::Error;

use crate::ids::{CommodityId, CustomerId, HedgeSessionId, PurchaseId, UserId};

/// Errors that can occur during portfolio operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PortfolioError {
    /// Commodity not present in the store.
    #[error("Unknown commodity: {0}")]
    UnknownCommodity(CommodityId),

    /// Duplicate commodity id encountered.
    #[error("Duplicate commodity id: {0}")]
    DuplicateCommodity(CommodityId),

    /// Duplicate purchase id encountered.
    #[error("Duplicate purchase id: {0}")]
    DuplicatePurchase(PurchaseId),

    /// Quantity must be strictly positive.
    #[error("Quantity must be positive, got {got}")]
    InvalidQuantity {
        /// The rejected quantity.
        got: f64,
    },

    /// Price must be strictly positive.
    #[error("Price must be positive, got {got}")]
    InvalidPrice {
        /// The rejected price.
        got: f64,
    },

    /// Inventory quantity must be non-negative.
    #[error("Inventory quantity must be non-negative, got {got}")]
    InvalidInventoryQuantity {
        /// The rejected quantity.
        got: f64,
    },

    /// Delivery window ends before it starts.
    #[error("Delivery window ends before it starts: {start} > {end}")]
    InvalidDeliveryWindow {
        /// Window start.
        start: NaiveDate,
        /// Window end.
        end: NaiveDate,
    },

    /// No active hedge session exists for the user.
    #[error("No active hedge session for user {0}")]
    NoActiveSession(UserId),

    /// The session is no longer active and cannot be modified.
    #[error("Hedge session {0} is not active")]
    SessionNotActive(HedgeSessionId),

    /// Executing a session with no staged items.
    #[error("Cannot execute empty hedge session {0}")]
    EmptyHedgeSession(HedgeSessionId),

    /// No staged item exists for the commodity and contract month.
    #[error("No staged hedge for {commodity} {contract_month}")]
    HedgeItemNotFound {
        /// Commodity of the missing item.
        commodity: CommodityId,
        /// Contract month of the missing item.
        contract_month: Month,
    },

    /// No market quote exists to snapshot for a staged hedge.
    #[error("No market price for {commodity} contract {contract_month}")]
    MissingMarketPrice {
        /// Commodity without a quote.
        commodity: CommodityId,
        /// Contract month without a quote.
        contract_month: Month,
    },

    /// Customer not present in the store.
    #[error("Unknown customer: {0}")]
    UnknownCustomer(CustomerId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_commodity_display() {
        let err = PortfolioError::UnknownCommodity(CommodityId::new("cocoa"));
        assert_eq!(format!("{}", err), "Unknown commodity: cocoa");
    }

    #[test]
    fn test_invalid_quantity_display() {
        let err = PortfolioError::InvalidQuantity { got: -3.0 };
        assert_eq!(format!("{}", err), "Quantity must be positive, got -3");
    }

    #[test]
    fn test_delivery_window_display() {
        let err = PortfolioError::InvalidDeliveryWindow {
            start: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        };
        assert_eq!(
            format!("{}", err),
            "Delivery window ends before it starts: 2025-09-01 > 2025-07-01"
        );
    }

    #[test]
    fn test_hedge_item_not_found_display() {
        let err = PortfolioError::HedgeItemNotFound {
            commodity: CommodityId::new("sugar"),
            contract_month: Month::new(2026, 3).unwrap(),
        };
        assert_eq!(format!("{}", err), "No staged hedge for sugar 2026-03");
    }

    #[test]
    fn test_error_trait_object() {
        let err: Box<dyn std::error::Error> =
            Box::new(PortfolioError::NoActiveSession(UserId::new("u1")));
        assert!(err.to_string().contains("u1"));
    }
}
