//! Calendar months and day-count year fractions.
//!
//! The engine buckets physical exposure by delivery month and measures risk
//! horizons in years, so this module provides:
//! - `Month`: a type-safe (year, month) pair ordered chronologically
//! - `months_span`: the inclusive month range covered by a delivery window
//! - `year_fraction`: ACT/365 year fraction between two dates
//!
//! # Examples
//!
//! ```
//! use granum_core::types::time::{months_span, Month};
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
//! let end = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
//!
//! let months = months_span(start, end);
//! assert_eq!(months.len(), 3);
//! assert_eq!(months[0], Month::new(2025, 1).unwrap());
//! ```

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

use super::error::DateError;

/// Days per year under the ACT/365 Fixed convention.
const DAYS_PER_YEAR: f64 = 365.0;

/// A calendar month, ordered chronologically.
///
/// Exposure buckets, forward quotes, and hedge items are all keyed by
/// calendar month. `Month` normalises away the day component so that
/// "March 2026" compares equal no matter which day of March produced it.
///
/// # Examples
///
/// ```
/// use granum_core::types::time::Month;
/// use chrono::NaiveDate;
///
/// let m = Month::new(2026, 3).unwrap();
/// assert_eq!(m.to_string(), "2026-03");
/// assert_eq!(m.first_day(), NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
///
/// // Chronological ordering
/// assert!(Month::new(2025, 12).unwrap() < m);
///
/// // Parse from YYYY-MM
/// let parsed: Month = "2026-03".parse().unwrap();
/// assert_eq!(parsed, m);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Creates a month from year and month components.
    ///
    /// # Returns
    /// `Ok(Month)` if `month` is 1-12, `Err(DateError::InvalidMonth)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use granum_core::types::time::Month;
    ///
    /// assert!(Month::new(2025, 6).is_ok());
    /// assert!(Month::new(2025, 0).is_err());
    /// assert!(Month::new(2025, 13).is_err());
    /// ```
    pub fn new(year: i32, month: u32) -> Result<Self, DateError> {
        if (1..=12).contains(&month) {
            Ok(Self { year, month })
        } else {
            Err(DateError::InvalidMonth { year, month })
        }
    }

    /// Returns the month containing the given date.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns the first day of this month.
    pub fn first_day(&self) -> NaiveDate {
        // Day 1 of a validated (year, month) pair always exists.
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// Returns the following calendar month.
    ///
    /// # Examples
    ///
    /// ```
    /// use granum_core::types::time::Month;
    ///
    /// let dec = Month::new(2025, 12).unwrap();
    /// assert_eq!(dec.next(), Month::new(2026, 1).unwrap());
    /// ```
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Returns the inclusive range of months from `self` to `end`.
    ///
    /// Empty if `end` precedes `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use granum_core::types::time::Month;
    ///
    /// let from = Month::new(2025, 11).unwrap();
    /// let to = Month::new(2026, 1).unwrap();
    /// assert_eq!(from.range_inclusive(to).len(), 3);
    /// assert!(to.range_inclusive(from).is_empty());
    /// ```
    pub fn range_inclusive(&self, end: Month) -> Vec<Month> {
        let mut months = Vec::new();
        let mut current = *self;
        while current <= end {
            months.push(current);
            current = current.next();
        }
        months
    }
}

impl fmt::Display for Month {
    /// Formats the month as `YYYY-MM`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = DateError;

    /// Parses a month from `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, DateError> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| DateError::ParseError(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| DateError::ParseError(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| DateError::ParseError(s.to_string()))?;
        Month::new(year, month)
    }
}

/// Returns the inclusive set of calendar months covered by a date window.
///
/// Both endpoints are normalised to their containing month; a window ending
/// before it starts yields no months.
///
/// # Examples
///
/// ```
/// use granum_core::types::time::months_span;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 8, 5).unwrap();
/// assert_eq!(months_span(start, end).len(), 3);
///
/// // Same month in and out
/// assert_eq!(months_span(end, end).len(), 1);
/// ```
pub fn months_span(start: NaiveDate, end: NaiveDate) -> Vec<Month> {
    Month::containing(start).range_inclusive(Month::containing(end))
}

/// ACT/365 year fraction between two dates.
///
/// Negative when `to` precedes `from`; the sign indicates direction, which
/// horizon floors in the engine rely on.
///
/// # Examples
///
/// ```
/// use granum_core::types::time::year_fraction;
/// use chrono::NaiveDate;
///
/// let from = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let to = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
/// assert!((year_fraction(from, to) - 1.0).abs() < 1e-12);
/// assert!(year_fraction(to, from) < 0.0);
/// ```
pub fn year_fraction(from: NaiveDate, to: NaiveDate) -> f64 {
    (to - from).num_days() as f64 / DAYS_PER_YEAR
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_month_new_valid() {
        let m = Month::new(2025, 6).unwrap();
        assert_eq!(m.year(), 2025);
        assert_eq!(m.month(), 6);
    }

    #[test]
    fn test_month_new_invalid() {
        assert_eq!(
            Month::new(2025, 0),
            Err(DateError::InvalidMonth {
                year: 2025,
                month: 0
            })
        );
        assert!(Month::new(2025, 13).is_err());
    }

    #[test]
    fn test_month_containing() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 31).unwrap();
        assert_eq!(Month::containing(date), Month::new(2025, 7).unwrap());
    }

    #[test]
    fn test_month_next_wraps_year() {
        let dec = Month::new(2025, 12).unwrap();
        assert_eq!(dec.next(), Month::new(2026, 1).unwrap());
        let jun = Month::new(2025, 6).unwrap();
        assert_eq!(jun.next(), Month::new(2025, 7).unwrap());
    }

    #[test]
    fn test_month_ordering() {
        let earlier = Month::new(2025, 12).unwrap();
        let later = Month::new(2026, 1).unwrap();
        assert!(earlier < later);
        assert!(Month::new(2025, 3).unwrap() < Month::new(2025, 4).unwrap());
    }

    #[test]
    fn test_month_display_and_parse() {
        let m = Month::new(2026, 3).unwrap();
        assert_eq!(m.to_string(), "2026-03");
        assert_eq!("2026-03".parse::<Month>().unwrap(), m);
    }

    #[test]
    fn test_month_parse_invalid() {
        assert!("2026".parse::<Month>().is_err());
        assert!("2026-3x".parse::<Month>().is_err());
        assert!("2026-00".parse::<Month>().is_err());
    }

    #[test]
    fn test_range_inclusive_across_year() {
        let from = Month::new(2025, 11).unwrap();
        let to = Month::new(2026, 2).unwrap();
        let months = from.range_inclusive(to);
        assert_eq!(
            months,
            vec![
                Month::new(2025, 11).unwrap(),
                Month::new(2025, 12).unwrap(),
                Month::new(2026, 1).unwrap(),
                Month::new(2026, 2).unwrap(),
            ]
        );
    }

    #[test]
    fn test_range_inclusive_single_and_empty() {
        let m = Month::new(2025, 5).unwrap();
        assert_eq!(m.range_inclusive(m), vec![m]);
        assert!(m.next().range_inclusive(m).is_empty());
    }

    #[test]
    fn test_months_span_normalises_days() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let months = months_span(start, end);
        assert_eq!(months.len(), 3);
        assert_eq!(months[0], Month::new(2025, 1).unwrap());
        assert_eq!(months[2], Month::new(2025, 3).unwrap());
    }

    #[test]
    fn test_months_span_reversed_is_empty() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert!(months_span(start, end).is_empty());
    }

    #[test]
    fn test_year_fraction_known_values() {
        let from = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 7, 2).unwrap();
        // 182 days
        assert_relative_eq!(year_fraction(from, to), 182.0 / 365.0, epsilon = 1e-12);
    }

    #[test]
    fn test_year_fraction_negative() {
        let from = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert!(year_fraction(from, to) < 0.0);
    }

    #[test]
    fn test_year_fraction_same_date_is_zero() {
        let d = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert_eq!(year_fraction(d, d), 0.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_month_serde_roundtrip() {
        let m = Month::new(2026, 3).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        let parsed: Month = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, m);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn month_strategy() -> impl Strategy<Value = Month> {
            (2000i32..2100i32, 1u32..13u32)
                .prop_map(|(y, m)| Month::new(y, m).expect("valid month"))
        }

        proptest! {
            #[test]
            fn range_inclusive_is_contiguous(a in month_strategy(), b in month_strategy()) {
                let (from, to) = if a <= b { (a, b) } else { (b, a) };
                let months = from.range_inclusive(to);
                prop_assert!(!months.is_empty());
                prop_assert_eq!(months[0], from);
                prop_assert_eq!(*months.last().unwrap(), to);
                for pair in months.windows(2) {
                    prop_assert_eq!(pair[0].next(), pair[1]);
                }
            }

            #[test]
            fn month_roundtrips_through_display(m in month_strategy()) {
                let parsed: Month = m.to_string().parse().unwrap();
                prop_assert_eq!(parsed, m);
            }
        }
    }
}
