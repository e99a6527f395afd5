//! # granum_core: Calendar and Statistics Foundation
//!
//! ## Layer 1 (Foundation) Role
//!
//! granum_core serves as the bottom layer of the 3-layer architecture, providing:
//! - Calendar-month types and day-count year fractions (`types::time`)
//! - Return, dispersion, and correlation statistics (`math::stats`)
//! - Inverse standard-normal quantile (`math::normal`)
//! - Engine configuration (`config`)
//! - Error types: `DateError`, `StatsError`, `ConfigError`
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other granum_* crates, with minimal external
//! dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use granum_core::config::RiskConfig;
//! use granum_core::math::stats::{log_returns, population_std_dev};
//! use granum_core::types::time::Month;
//!
//! // Calendar months
//! let start = Month::new(2025, 11).unwrap();
//! assert_eq!(start.next(), Month::new(2025, 12).unwrap());
//!
//! // Return statistics
//! let returns = log_returns(&[100.0_f64, 101.0, 99.5]);
//! assert_eq!(returns.len(), 2);
//! let daily = population_std_dev(&returns);
//! assert!(daily > 0.0);
//!
//! // Validated engine configuration
//! let config = RiskConfig::new(0.95).unwrap();
//! assert!((config.z_score() - 1.645).abs() < 0.01);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `Month` and configuration types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod math;
pub mod types;
