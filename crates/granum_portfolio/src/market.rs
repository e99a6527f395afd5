//! Market price observations.
//!
//! A `MarketPrice` is either a historical spot observation (no contract
//! month) or a forward quote for delivery in a specific month. Spot series
//! feed the volatility and correlation estimators; forward quotes price the
//! exposure the engine values.

use chrono::NaiveDate;
use granum_core::types::time::Month;

use crate::error::PortfolioError;
use crate::ids::CommodityId;

/// A spot observation or forward quote for one commodity.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use granum_core::types::time::Month;
/// use granum_portfolio::ids::CommodityId;
/// use granum_portfolio::market::MarketPrice;
///
/// let observed = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
///
/// let spot = MarketPrice::spot(CommodityId::new("sugar"), observed, 0.51, "yahoo").unwrap();
/// assert!(spot.is_spot());
///
/// let forward = MarketPrice::forward(
///     CommodityId::new("sugar"),
///     observed,
///     Month::new(2025, 12).unwrap(),
///     0.54,
///     "yahoo",
/// )
/// .unwrap();
/// assert_eq!(forward.contract_month(), Some(Month::new(2025, 12).unwrap()));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketPrice {
    commodity_id: CommodityId,
    price_date: NaiveDate,
    contract_month: Option<Month>,
    price: f64,
    source: String,
}

impl MarketPrice {
    /// Creates a historical spot observation.
    ///
    /// # Errors
    /// `InvalidPrice` if `price <= 0`.
    pub fn spot(
        commodity_id: CommodityId,
        price_date: NaiveDate,
        price: f64,
        source: impl Into<String>,
    ) -> Result<Self, PortfolioError> {
        Self::build(commodity_id, price_date, None, price, source)
    }

    /// Creates a forward quote for a specific contract month.
    ///
    /// # Errors
    /// `InvalidPrice` if `price <= 0`.
    pub fn forward(
        commodity_id: CommodityId,
        price_date: NaiveDate,
        contract_month: Month,
        price: f64,
        source: impl Into<String>,
    ) -> Result<Self, PortfolioError> {
        Self::build(commodity_id, price_date, Some(contract_month), price, source)
    }

    fn build(
        commodity_id: CommodityId,
        price_date: NaiveDate,
        contract_month: Option<Month>,
        price: f64,
        source: impl Into<String>,
    ) -> Result<Self, PortfolioError> {
        if !price.is_finite() || price <= 0.0 {
            return Err(PortfolioError::InvalidPrice { got: price });
        }
        Ok(Self {
            commodity_id,
            price_date,
            contract_month,
            price,
            source: source.into(),
        })
    }

    /// Returns the quoted commodity.
    pub fn commodity_id(&self) -> &CommodityId {
        &self.commodity_id
    }

    /// Returns the observation date.
    pub fn price_date(&self) -> NaiveDate {
        self.price_date
    }

    /// Returns the contract month for forward quotes, `None` for spots.
    pub fn contract_month(&self) -> Option<Month> {
        self.contract_month
    }

    /// Returns the price.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Returns the data source tag.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// True for historical spot observations.
    pub fn is_spot(&self) -> bool {
        self.contract_month.is_none()
    }
}
