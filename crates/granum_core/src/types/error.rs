//! Error types for structured error handling.
//!
//! This module provides:
//! - `DateError`: Errors from calendar-month construction and parsing
//! - `StatsError`: Errors from statistical functions

use thiserror::Error;

/// Calendar-month errors.
///
/// # Examples
/// ```
/// use granum_core::types::DateError;
///
/// let err = DateError::InvalidMonth { year: 2025, month: 13 };
/// assert_eq!(format!("{}", err), "Invalid month: 2025-13");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Month component outside 1-12.
    #[error("Invalid month: {year}-{month}")]
    InvalidMonth {
        /// Year component
        year: i32,
        /// Month component (expected 1-12)
        month: u32,
    },

    /// Failed to parse a `YYYY-MM` month string.
    #[error("Month parse error: {0}")]
    ParseError(String),
}

/// Errors from statistical functions.
///
/// # Examples
/// ```
/// use granum_core::types::StatsError;
///
/// let err = StatsError::InvalidProbability(1.5);
/// assert!(format!("{}", err).contains("(0, 1)"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    /// Probability argument outside the open interval (0, 1).
    #[error("Probability must be in (0, 1), got {0}")]
    InvalidProbability(f64),
}
