//! Cross-commodity correlation estimation.
//!
//! Pearson correlation over log-return series aligned to the most recent
//! overlapping window (each series truncated, right-aligned, to the
//! shortest usable length). A single commodity yields the 1x1 identity; any
//! commodity with no usable returns degrades the whole matrix to the
//! identity, assuming zero correlation rather than failing.

use granum_core::math::stats::{log_returns, pearson_correlation};
use granum_portfolio::ids::CommodityId;
use granum_portfolio::market::MarketPrice;
use granum_portfolio::store::PortfolioStore;
use tracing::warn;

/// A symmetric correlation matrix indexed like its commodity list.
///
/// # Examples
///
/// ```
/// use granum_portfolio::ids::CommodityId;
/// use granum_risk::correlation::CorrelationMatrix;
///
/// let matrix = CorrelationMatrix::identity(vec![
///     CommodityId::new("sugar"),
///     CommodityId::new("flour"),
/// ]);
/// assert_eq!(matrix.len(), 2);
/// assert_eq!(matrix.get(0, 1), 0.0);
/// assert_eq!(matrix.get(1, 1), 1.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CorrelationMatrix {
    commodities: Vec<CommodityId>,
    /// Row-major `n * n` coefficients.
    data: Vec<f64>,
    fallback: bool,
}

impl CorrelationMatrix {
    /// Identity matrix: unit diagonal, zero correlation elsewhere.
    pub fn identity(commodities: Vec<CommodityId>) -> Self {
        let n = commodities.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Self {
            commodities,
            data,
            fallback: false,
        }
    }

    /// Builds a matrix from a row-major coefficient vector.
    ///
    /// For callers that bring their own correlation structure instead of
    /// estimating one from price history.
    ///
    /// # Panics
    /// Panics when `data.len()` is not `commodities.len()` squared.
    pub fn from_parts(commodities: Vec<CommodityId>, data: Vec<f64>) -> Self {
        assert_eq!(
            data.len(),
            commodities.len() * commodities.len(),
            "correlation data must be n x n"
        );
        Self {
            commodities,
            data,
            fallback: false,
        }
    }

    fn identity_fallback(commodities: Vec<CommodityId>) -> Self {
        let mut matrix = Self::identity(commodities);
        matrix.fallback = true;
        matrix
    }

    /// Number of commodities (the matrix is `len x len`).
    pub fn len(&self) -> usize {
        self.commodities.len()
    }

    /// True for the degenerate zero-commodity matrix.
    pub fn is_empty(&self) -> bool {
        self.commodities.is_empty()
    }

    /// The commodity order the matrix is indexed by.
    pub fn commodities(&self) -> &[CommodityId] {
        &self.commodities
    }

    /// Coefficient at (row, column).
    ///
    /// # Panics
    /// Panics when an index is out of bounds.
    pub fn get(&self, row: usize, column: usize) -> f64 {
        let n = self.len();
        assert!(row < n && column < n, "correlation index out of bounds");
        self.data[row * n + column]
    }

    /// True when the matrix degraded to the identity for lack of data.
    pub fn is_identity_fallback(&self) -> bool {
        self.fallback
    }
}

/// Estimates the correlation matrix across the given commodities.
///
/// Log-return series come from each commodity's spot history; all series
/// are truncated to the shortest usable length, keeping the most recent
/// returns so the overlap window is right-aligned.
pub fn estimate_correlation(
    store: &PortfolioStore,
    commodities: &[CommodityId],
) -> CorrelationMatrix {
    if commodities.len() <= 1 {
        return CorrelationMatrix::identity(commodities.to_vec());
    }

    let returns_by_commodity: Vec<Vec<f64>> = commodities
        .iter()
        .map(|commodity| {
            let prices: Vec<f64> = store
                .spot_history(commodity)
                .iter()
                .map(MarketPrice::price)
                .collect();
            log_returns(&prices)
        })
        .collect();

    let min_length = returns_by_commodity
        .iter()
        .map(Vec::len)
        .min()
        .unwrap_or(0);
    if min_length == 0 {
        warn!("a commodity has no usable returns, assuming zero correlation");
        return CorrelationMatrix::identity_fallback(commodities.to_vec());
    }

    // Right-aligned truncation: keep the most recent overlapping window.
    let aligned: Vec<&[f64]> = returns_by_commodity
        .iter()
        .map(|returns| &returns[returns.len() - min_length..])
        .collect();

    let n = commodities.len();
    let mut data = vec![0.0; n * n];
    for i in 0..n {
        data[i * n + i] = 1.0;
        for j in (i + 1)..n {
            // Zero-variance series have no defined coefficient; treat as
            // uncorrelated.
            let rho = pearson_correlation(aligned[i], aligned[j]).unwrap_or(0.0);
            data[i * n + j] = rho;
            data[j * n + i] = rho;
        }
    }

    CorrelationMatrix {
        commodities: commodities.to_vec(),
        data,
        fallback: false,
    }
}
