//! Commodity reference data.

use crate::ids::CommodityId;

/// A commodity the portfolio can be exposed to.
///
/// # Examples
///
/// ```
/// use granum_portfolio::commodity::Commodity;
/// use granum_portfolio::ids::CommodityId;
///
/// let sugar = Commodity::new(CommodityId::new("sugar"), "sugar", "mt");
/// assert_eq!(sugar.name(), "sugar");
/// assert_eq!(sugar.unit(), "mt");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Commodity {
    id: CommodityId,
    name: String,
    unit: String,
}

impl Commodity {
    /// Creates commodity reference data.
    pub fn new(id: CommodityId, name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            unit: unit.into(),
        }
    }

    /// Returns the commodity id.
    pub fn id(&self) -> &CommodityId {
        &self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the quantity unit (e.g. metric tonnes).
    pub fn unit(&self) -> &str {
        &self.unit
    }
}
