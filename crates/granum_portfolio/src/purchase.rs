//! Physical purchases with fixed or floating pricing.
//!
//! A purchase commits the customer to take delivery of a quantity across a
//! delivery window. Fixed-price purchases carry no further market risk;
//! floating-price purchases stay at risk until their price locks (the
//! payment date, when known, or delivery otherwise).

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use crate::error::PortfolioError;
use crate::ids::{CommodityId, CustomerId, PurchaseId};

/// How the purchase price is determined.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PriceType {
    /// Price agreed at purchase time; no remaining price risk.
    Fixed,
    /// Price floats until locked; exposure remains at risk.
    Floating,
}

impl PriceType {
    /// Returns the lowercase wire name.
    pub fn name(&self) -> &'static str {
        match self {
            PriceType::Fixed => "fixed",
            PriceType::Floating => "floating",
        }
    }
}

impl fmt::Display for PriceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PriceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed" => Ok(PriceType::Fixed),
            "floating" => Ok(PriceType::Floating),
            _ => Err(format!("Unknown price type: {}", s)),
        }
    }
}

/// An immutable purchase record.
///
/// Validated at construction: quantity and price must be positive and the
/// delivery window must not be inverted. The optional payment date marks
/// when a floating price locks.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use granum_portfolio::ids::{CommodityId, CustomerId, PurchaseId};
/// use granum_portfolio::purchase::{PriceType, Purchase};
///
/// let purchase = Purchase::new(
///     PurchaseId::new("P001"),
///     CustomerId::new("ACME"),
///     CommodityId::new("sugar"),
///     NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
///     3000.0,
///     "mt",
///     0.52,
///     PriceType::Floating,
///     None,
/// )
/// .unwrap();
///
/// assert_eq!(purchase.quantity(), 3000.0);
/// assert_eq!(purchase.price_type(), PriceType::Floating);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Purchase {
    id: PurchaseId,
    customer_id: CustomerId,
    commodity_id: CommodityId,
    purchase_date: NaiveDate,
    delivery_start: NaiveDate,
    delivery_end: NaiveDate,
    quantity: f64,
    unit: String,
    price: f64,
    price_type: PriceType,
    payment_date: Option<NaiveDate>,
}

impl Purchase {
    /// Creates a validated purchase record.
    ///
    /// # Errors
    /// - `InvalidQuantity` if `quantity <= 0`
    /// - `InvalidPrice` if `price <= 0`
    /// - `InvalidDeliveryWindow` if `delivery_end < delivery_start`
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: PurchaseId,
        customer_id: CustomerId,
        commodity_id: CommodityId,
        purchase_date: NaiveDate,
        delivery_start: NaiveDate,
        delivery_end: NaiveDate,
        quantity: f64,
        unit: impl Into<String>,
        price: f64,
        price_type: PriceType,
        payment_date: Option<NaiveDate>,
    ) -> Result<Self, PortfolioError> {
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(PortfolioError::InvalidQuantity { got: quantity });
        }
        if !price.is_finite() || price <= 0.0 {
            return Err(PortfolioError::InvalidPrice { got: price });
        }
        if delivery_end < delivery_start {
            return Err(PortfolioError::InvalidDeliveryWindow {
                start: delivery_start,
                end: delivery_end,
            });
        }
        Ok(Self {
            id,
            customer_id,
            commodity_id,
            purchase_date,
            delivery_start,
            delivery_end,
            quantity,
            unit: unit.into(),
            price,
            price_type,
            payment_date,
        })
    }

    /// Returns the purchase id.
    pub fn id(&self) -> &PurchaseId {
        &self.id
    }

    /// Returns the owning customer.
    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    /// Returns the purchased commodity.
    pub fn commodity_id(&self) -> &CommodityId {
        &self.commodity_id
    }

    /// Returns the trade date.
    pub fn purchase_date(&self) -> NaiveDate {
        self.purchase_date
    }

    /// Returns the start of the delivery window.
    pub fn delivery_start(&self) -> NaiveDate {
        self.delivery_start
    }

    /// Returns the end of the delivery window (inclusive).
    pub fn delivery_end(&self) -> NaiveDate {
        self.delivery_end
    }

    /// Returns the purchased quantity.
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Returns the quantity unit.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Returns the agreed (fixed) or reference (floating) price.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Returns how the price is determined.
    pub fn price_type(&self) -> PriceType {
        self.price_type
    }

    /// Returns the date a floating price locks, when known.
    pub fn payment_date(&self) -> Option<NaiveDate> {
        self.payment_date
    }
}
