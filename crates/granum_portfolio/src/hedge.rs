//! Staged hedge sessions and executed hedges.
//!
//! A hedge session is a shopping cart for hedge decisions: items staged
//! against (commodity, contract month) keys, mutable only while the session
//! is active. Executing the session freezes every item into an immutable
//! [`ExecutedHedge`] record and closes the session for good.

use chrono::{DateTime, Utc};
use granum_core::types::time::Month;
use std::fmt;

use crate::error::PortfolioError;
use crate::ids::{CommodityId, CustomerId, HedgeSessionId, UserId};

/// Lifecycle state of a hedge session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HedgeSessionStatus {
    /// Items may be staged, updated, and removed.
    Active,
    /// Items were committed; the session is immutable.
    Executed,
    /// The session was abandoned without executing.
    Cancelled,
}

impl HedgeSessionStatus {
    /// Returns the lowercase wire name.
    pub fn name(&self) -> &'static str {
        match self {
            HedgeSessionStatus::Active => "active",
            HedgeSessionStatus::Executed => "executed",
            HedgeSessionStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for HedgeSessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A staged, uncommitted hedge quantity.
///
/// The price snapshot records the market quote at staging time and becomes
/// the execution price if the session is executed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HedgeItem {
    /// Hedged commodity.
    pub commodity_id: CommodityId,
    /// Contract month the hedge offsets.
    pub contract_month: Month,
    /// Staged hedge quantity.
    pub quantity: f64,
    /// Market quote captured when the item was staged.
    pub price_snapshot: f64,
}

/// An immutable record of a committed hedge.
///
/// Created only by [`HedgeSession::execute`]; never edited afterwards.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutedHedge {
    /// Owning customer.
    pub customer_id: CustomerId,
    /// Hedged commodity.
    pub commodity_id: CommodityId,
    /// Contract month the hedge offsets.
    pub contract_month: Month,
    /// Committed quantity.
    pub quantity: f64,
    /// Price at execution, carried from the staging snapshot.
    pub execution_price: f64,
    /// When the session was executed.
    pub executed_at: DateTime<Utc>,
    /// Session the hedge came from.
    pub session_id: HedgeSessionId,
}

/// A user's staging area for hedge decisions.
///
/// At most one active session exists per user; the store enforces that
/// invariant. Items are keyed by (commodity, contract month) and staging an
/// existing key overwrites its quantity and refreshes the price snapshot.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use granum_core::types::time::Month;
/// use granum_portfolio::hedge::{HedgeSession, HedgeSessionStatus};
/// use granum_portfolio::ids::{CommodityId, CustomerId, HedgeSessionId, UserId};
///
/// let mut session = HedgeSession::open(
///     HedgeSessionId::new("HS-1"),
///     CustomerId::new("ACME"),
///     UserId::new("u1"),
/// );
/// let month = Month::new(2026, 3).unwrap();
/// session
///     .stage_item(CommodityId::new("sugar"), month, 500.0, 0.54)
///     .unwrap();
///
/// let executed = session.execute(Utc::now()).unwrap();
/// assert_eq!(executed.len(), 1);
/// assert_eq!(session.status(), HedgeSessionStatus::Executed);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HedgeSession {
    id: HedgeSessionId,
    customer_id: CustomerId,
    user_id: UserId,
    status: HedgeSessionStatus,
    items: Vec<HedgeItem>,
}

impl HedgeSession {
    /// Opens a new active session.
    pub fn open(id: HedgeSessionId, customer_id: CustomerId, user_id: UserId) -> Self {
        Self {
            id,
            customer_id,
            user_id,
            status: HedgeSessionStatus::Active,
            items: Vec::new(),
        }
    }

    /// Returns the session id.
    pub fn id(&self) -> &HedgeSessionId {
        &self.id
    }

    /// Returns the owning customer.
    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    /// Returns the staging user.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the lifecycle state.
    pub fn status(&self) -> HedgeSessionStatus {
        self.status
    }

    /// True while items may still be modified.
    pub fn is_active(&self) -> bool {
        self.status == HedgeSessionStatus::Active
    }

    /// Returns the staged items.
    pub fn items(&self) -> &[HedgeItem] {
        &self.items
    }

    /// Stages a hedge quantity, overwriting any item already staged for the
    /// same (commodity, contract month) key and refreshing its snapshot.
    ///
    /// # Errors
    /// - `SessionNotActive` once executed or cancelled
    /// - `InvalidQuantity` if `quantity <= 0`
    /// - `InvalidPrice` if `price_snapshot <= 0`
    pub fn stage_item(
        &mut self,
        commodity_id: CommodityId,
        contract_month: Month,
        quantity: f64,
        price_snapshot: f64,
    ) -> Result<(), PortfolioError> {
        self.ensure_active()?;
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(PortfolioError::InvalidQuantity { got: quantity });
        }
        if !price_snapshot.is_finite() || price_snapshot <= 0.0 {
            return Err(PortfolioError::InvalidPrice { got: price_snapshot });
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|item| item.commodity_id == commodity_id && item.contract_month == contract_month)
        {
            existing.quantity = quantity;
            existing.price_snapshot = price_snapshot;
        } else {
            self.items.push(HedgeItem {
                commodity_id,
                contract_month,
                quantity,
                price_snapshot,
            });
        }
        Ok(())
    }

    /// Updates the quantity of an already-staged item.
    ///
    /// # Errors
    /// - `SessionNotActive` once executed or cancelled
    /// - `InvalidQuantity` if `quantity <= 0`
    /// - `HedgeItemNotFound` if nothing is staged for the key
    pub fn update_quantity(
        &mut self,
        commodity_id: &CommodityId,
        contract_month: Month,
        quantity: f64,
    ) -> Result<(), PortfolioError> {
        self.ensure_active()?;
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(PortfolioError::InvalidQuantity { got: quantity });
        }
        let item = self
            .items
            .iter_mut()
            .find(|item| &item.commodity_id == commodity_id && item.contract_month == contract_month)
            .ok_or_else(|| PortfolioError::HedgeItemNotFound {
                commodity: commodity_id.clone(),
                contract_month,
            })?;
        item.quantity = quantity;
        Ok(())
    }

    /// Removes a staged item.
    ///
    /// # Errors
    /// - `SessionNotActive` once executed or cancelled
    /// - `HedgeItemNotFound` if nothing is staged for the key
    pub fn remove_item(
        &mut self,
        commodity_id: &CommodityId,
        contract_month: Month,
    ) -> Result<(), PortfolioError> {
        self.ensure_active()?;
        let position = self
            .items
            .iter()
            .position(|item| {
                &item.commodity_id == commodity_id && item.contract_month == contract_month
            })
            .ok_or_else(|| PortfolioError::HedgeItemNotFound {
                commodity: commodity_id.clone(),
                contract_month,
            })?;
        self.items.remove(position);
        Ok(())
    }

    /// Executes the session, freezing every staged item into an
    /// [`ExecutedHedge`] and closing the session.
    ///
    /// # Errors
    /// - `SessionNotActive` once executed or cancelled
    /// - `EmptyHedgeSession` if nothing is staged
    pub fn execute(
        &mut self,
        executed_at: DateTime<Utc>,
    ) -> Result<Vec<ExecutedHedge>, PortfolioError> {
        self.ensure_active()?;
        if self.items.is_empty() {
            return Err(PortfolioError::EmptyHedgeSession(self.id.clone()));
        }

        let executed = self
            .items
            .iter()
            .map(|item| ExecutedHedge {
                customer_id: self.customer_id.clone(),
                commodity_id: item.commodity_id.clone(),
                contract_month: item.contract_month,
                quantity: item.quantity,
                execution_price: item.price_snapshot,
                executed_at,
                session_id: self.id.clone(),
            })
            .collect();

        self.status = HedgeSessionStatus::Executed;
        Ok(executed)
    }

    /// Cancels the session, discarding its staged items from consideration.
    ///
    /// # Errors
    /// `SessionNotActive` once executed or cancelled.
    pub fn cancel(&mut self) -> Result<(), PortfolioError> {
        self.ensure_active()?;
        self.status = HedgeSessionStatus::Cancelled;
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), PortfolioError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(PortfolioError::SessionNotActive(self.id.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> HedgeSession {
        HedgeSession::open(
            HedgeSessionId::new("HS-1"),
            CustomerId::new("ACME"),
            UserId::new("u1"),
        )
    }

    fn march() -> Month {
        Month::new(2026, 3).unwrap()
    }

    #[test]
    fn test_open_session_is_active_and_empty() {
        let s = session();
        assert!(s.is_active());
        assert!(s.items().is_empty());
    }

    #[test]
    fn test_stage_item_upserts_by_key() {
        let mut s = session();
        s.stage_item(CommodityId::new("sugar"), march(), 500.0, 0.54)
            .unwrap();
        s.stage_item(CommodityId::new("sugar"), march(), 750.0, 0.55)
            .unwrap();
        assert_eq!(s.items().len(), 1);
        assert_eq!(s.items()[0].quantity, 750.0);
        assert_eq!(s.items()[0].price_snapshot, 0.55);
    }

    #[test]
    fn test_stage_item_distinct_keys() {
        let mut s = session();
        s.stage_item(CommodityId::new("sugar"), march(), 500.0, 0.54)
            .unwrap();
        s.stage_item(CommodityId::new("flour"), march(), 200.0, 0.31)
            .unwrap();
        s.stage_item(CommodityId::new("sugar"), march().next(), 100.0, 0.56)
            .unwrap();
        assert_eq!(s.items().len(), 3);
    }

    #[test]
    fn test_stage_item_validation() {
        let mut s = session();
        assert!(matches!(
            s.stage_item(CommodityId::new("sugar"), march(), 0.0, 0.54),
            Err(PortfolioError::InvalidQuantity { .. })
        ));
        assert!(matches!(
            s.stage_item(CommodityId::new("sugar"), march(), 10.0, -0.1),
            Err(PortfolioError::InvalidPrice { .. })
        ));
    }

    #[test]
    fn test_update_quantity() {
        let mut s = session();
        s.stage_item(CommodityId::new("sugar"), march(), 500.0, 0.54)
            .unwrap();
        s.update_quantity(&CommodityId::new("sugar"), march(), 300.0)
            .unwrap();
        assert_eq!(s.items()[0].quantity, 300.0);
        // Snapshot is untouched by a quantity update.
        assert_eq!(s.items()[0].price_snapshot, 0.54);
    }

    #[test]
    fn test_update_missing_item() {
        let mut s = session();
        assert!(matches!(
            s.update_quantity(&CommodityId::new("sugar"), march(), 300.0),
            Err(PortfolioError::HedgeItemNotFound { .. })
        ));
    }

    #[test]
    fn test_remove_item() {
        let mut s = session();
        s.stage_item(CommodityId::new("sugar"), march(), 500.0, 0.54)
            .unwrap();
        s.remove_item(&CommodityId::new("sugar"), march()).unwrap();
        assert!(s.items().is_empty());
        assert!(s.remove_item(&CommodityId::new("sugar"), march()).is_err());
    }

    #[test]
    fn test_execute_freezes_items() {
        let mut s = session();
        s.stage_item(CommodityId::new("sugar"), march(), 500.0, 0.54)
            .unwrap();
        let when = Utc::now();
        let executed = s.execute(when).unwrap();

        assert_eq!(executed.len(), 1);
        assert_eq!(executed[0].quantity, 500.0);
        assert_eq!(executed[0].execution_price, 0.54);
        assert_eq!(executed[0].executed_at, when);
        assert_eq!(executed[0].session_id, HedgeSessionId::new("HS-1"));
        assert_eq!(s.status(), HedgeSessionStatus::Executed);
    }

    #[test]
    fn test_execute_empty_session_fails() {
        let mut s = session();
        assert_eq!(
            s.execute(Utc::now()),
            Err(PortfolioError::EmptyHedgeSession(HedgeSessionId::new(
                "HS-1"
            )))
        );
    }

    #[test]
    fn test_executed_session_is_immutable() {
        let mut s = session();
        s.stage_item(CommodityId::new("sugar"), march(), 500.0, 0.54)
            .unwrap();
        s.execute(Utc::now()).unwrap();

        let not_active = PortfolioError::SessionNotActive(HedgeSessionId::new("HS-1"));
        assert_eq!(
            s.stage_item(CommodityId::new("sugar"), march(), 100.0, 0.5),
            Err(not_active.clone())
        );
        assert_eq!(
            s.update_quantity(&CommodityId::new("sugar"), march(), 100.0),
            Err(not_active.clone())
        );
        assert_eq!(
            s.remove_item(&CommodityId::new("sugar"), march()),
            Err(not_active.clone())
        );
        assert_eq!(s.execute(Utc::now()), Err(not_active.clone()));
        assert_eq!(s.cancel(), Err(not_active));
    }

    #[test]
    fn test_cancel() {
        let mut s = session();
        s.cancel().unwrap();
        assert_eq!(s.status(), HedgeSessionStatus::Cancelled);
        assert!(!s.is_active());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(HedgeSessionStatus::Active.to_string(), "active");
        assert_eq!(HedgeSessionStatus::Executed.to_string(), "executed");
        assert_eq!(HedgeSessionStatus::Cancelled.to_string(), "cancelled");
    }
}
