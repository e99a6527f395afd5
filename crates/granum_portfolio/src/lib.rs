//! # granum_portfolio: Purchasing-Portfolio Domain Model
//!
//! ## Layer 2 (Domain) Role
//!
//! Plain value types for everything the risk engine reads and writes, plus
//! an in-memory [`store::PortfolioStore`] that stands where a relational
//! store would in production. The engine itself lives in `granum_risk`;
//! this crate only models data and enforces ingestion rules:
//!
//! - `commodity` - Commodity reference data
//! - `purchase`  - Physical purchases with fixed or floating pricing
//! - `market`    - Spot observations and forward quotes
//! - `exposure`  - Derived monthly exposure buckets
//! - `hedge`     - Staged hedge sessions and executed hedges
//! - `inventory` - Informational on-hand snapshots
//! - `store`     - Snapshot-consistent in-memory store
//!
//! Malformed input (non-positive quantity or price, inverted delivery
//! window, unknown commodity) is rejected here with [`error::PortfolioError`]
//! and never reaches the VaR math.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use granum_portfolio::commodity::Commodity;
//! use granum_portfolio::ids::{CommodityId, CustomerId, PurchaseId};
//! use granum_portfolio::purchase::{PriceType, Purchase};
//! use granum_portfolio::store::PortfolioStore;
//!
//! let mut store = PortfolioStore::new();
//! store
//!     .add_commodity(Commodity::new(CommodityId::new("sugar"), "sugar", "mt"))
//!     .unwrap();
//!
//! let purchase = Purchase::new(
//!     PurchaseId::new("P001"),
//!     CustomerId::new("ACME"),
//!     CommodityId::new("sugar"),
//!     NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
//!     3000.0,
//!     "mt",
//!     0.52,
//!     PriceType::Floating,
//!     None,
//! )
//! .unwrap();
//! store.add_purchase(purchase).unwrap();
//! assert_eq!(store.purchases().count(), 1);
//! ```

pub mod commodity;
pub mod error;
pub mod exposure;
pub mod hedge;
pub mod ids;
pub mod inventory;
pub mod market;
pub mod purchase;
pub mod store;

pub use commodity::Commodity;
pub use error::PortfolioError;
pub use exposure::ExposureBucket;
pub use hedge::{ExecutedHedge, HedgeItem, HedgeSession, HedgeSessionStatus};
pub use ids::{CommodityId, CustomerId, HedgeSessionId, PurchaseId, UserId};
pub use inventory::InventorySnapshot;
pub use market::MarketPrice;
pub use purchase::{PriceType, Purchase};
pub use store::PortfolioStore;
