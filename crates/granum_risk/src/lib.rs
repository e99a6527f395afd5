//! # granum_risk: Parametric VaR Engine
//!
//! ## Layer 4 (Application) Role
//!
//! Turns purchase records into monthly exposure buckets, estimates
//! volatility and cross-commodity correlation from historical spot prices,
//! and rolls bucket-level VaR up to commodity and portfolio level under
//! hedged and unhedged scenarios, month by month.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               granum_risk (L4)              │
//! ├─────────────────────────────────────────────┤
//! │  bucketer/    - purchase -> monthly buckets │
//! │  volatility/  - annualised sigma per        │
//! │                 commodity                   │
//! │  correlation/ - cross-commodity matrix      │
//! │  hedges/      - staged hedge quantities     │
//! │  risk_info/   - fixed/floating risk gating  │
//! │  var/         - bucket/commodity/portfolio  │
//! │                 VaR rollup                  │
//! │  timeline/    - month-by-month scenarios    │
//! └─────────────────────────────────────────────┘
//!          ↓                         ↓
//! ┌──────────────────┐   ┌──────────────────────┐
//! │ granum_portfolio │   │     granum_core      │
//! │ domain + store   │   │ calendar, stats,     │
//! │                  │   │ config               │
//! └──────────────────┘   └──────────────────────┘
//! ```
//!
//! ## Degradation policy
//!
//! Short price history falls back to the configured default volatility or
//! the identity correlation matrix; a missing forward quote falls back to
//! the latest spot, then to the configured default price. Every fallback is
//! logged through `tracing` and flagged on the returned estimate, and none
//! of them aborts a calculation.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use granum_core::config::RiskConfig;
//! use granum_portfolio::commodity::Commodity;
//! use granum_portfolio::ids::{CommodityId, CustomerId, PurchaseId, UserId};
//! use granum_portfolio::purchase::{PriceType, Purchase};
//! use granum_portfolio::store::PortfolioStore;
//! use granum_risk::bucketer::rebuild_exposure_buckets;
//! use granum_risk::timeline::VarEngine;
//!
//! let mut store = PortfolioStore::new();
//! store
//!     .add_commodity(Commodity::new(CommodityId::new("sugar"), "sugar", "mt"))
//!     .unwrap();
//! store
//!     .add_purchase(
//!         Purchase::new(
//!             PurchaseId::new("P001"),
//!             CustomerId::new("ACME"),
//!             CommodityId::new("sugar"),
//!             NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
//!             NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
//!             NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
//!             3000.0,
//!             "mt",
//!             0.52,
//!             PriceType::Floating,
//!             None,
//!         )
//!         .unwrap(),
//!     )
//!     .unwrap();
//!
//! let report = rebuild_exposure_buckets(&mut store, None);
//! assert_eq!(report.buckets_created, 3);
//!
//! let engine = VarEngine::new(RiskConfig::default());
//! let report = engine.calculate_report(
//!     &store,
//!     &CustomerId::new("ACME"),
//!     &UserId::new("u1"),
//!     NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
//! );
//! // Three months, two scenarios.
//! assert_eq!(report.timeline.len(), 6);
//! ```

pub mod bucketer;
pub mod correlation;
pub mod hedges;
pub mod risk_info;
pub mod timeline;
pub mod var;
pub mod volatility;

pub use bucketer::{buckets_for_purchase, exposure_summary, rebuild_exposure_buckets, RebuildReport};
pub use correlation::{estimate_correlation, CorrelationMatrix};
pub use hedges::hedge_quantities;
pub use risk_info::{resolve_risk_info, BucketRiskInfo};
pub use timeline::{Scenario, TimelinePoint, VarEngine, VarReport};
pub use var::{bucket_var, commodity_var, portfolio_var};
pub use volatility::{annualised_volatility, estimate_volatilities, VolatilityEstimate};
