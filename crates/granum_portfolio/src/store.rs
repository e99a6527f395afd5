//! Snapshot-consistent in-memory portfolio store.
//!
//! `PortfolioStore` plays the role a relational store plays in production:
//! it owns the reference data, purchases, derived buckets, market prices,
//! and hedge sessions one risk calculation reads. A calculation borrows the
//! store immutably for its whole duration, so every read within it sees one
//! consistent snapshot; writers must wait for the borrow to end.
//!
//! Bucket replacement is a staged swap: the complete replacement set is
//! built before anything is deleted, so the store never holds a partial
//! rebuild.

use chrono::{DateTime, Utc};
use granum_core::types::time::Month;
use std::collections::BTreeMap;

use crate::commodity::Commodity;
use crate::error::PortfolioError;
use crate::exposure::ExposureBucket;
use crate::hedge::{ExecutedHedge, HedgeSession};
use crate::ids::{CommodityId, CustomerId, HedgeSessionId, PurchaseId, UserId};
use crate::inventory::InventorySnapshot;
use crate::market::MarketPrice;
use crate::purchase::Purchase;

/// In-memory store for one customer universe.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use granum_portfolio::commodity::Commodity;
/// use granum_portfolio::ids::CommodityId;
/// use granum_portfolio::market::MarketPrice;
/// use granum_portfolio::store::PortfolioStore;
///
/// let mut store = PortfolioStore::new();
/// store
///     .add_commodity(Commodity::new(CommodityId::new("sugar"), "sugar", "mt"))
///     .unwrap();
///
/// let day = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
/// store
///     .add_market_price(MarketPrice::spot(CommodityId::new("sugar"), day, 0.51, "yahoo").unwrap())
///     .unwrap();
///
/// assert_eq!(store.latest_spot(&CommodityId::new("sugar")), Some(0.51));
/// ```
#[derive(Clone, Debug, Default)]
pub struct PortfolioStore {
    commodities: BTreeMap<CommodityId, Commodity>,
    purchases: BTreeMap<PurchaseId, Purchase>,
    buckets: Vec<ExposureBucket>,
    spots: BTreeMap<CommodityId, Vec<MarketPrice>>,
    forwards: BTreeMap<CommodityId, BTreeMap<Month, MarketPrice>>,
    inventory: Vec<InventorySnapshot>,
    sessions: Vec<HedgeSession>,
    executed: Vec<ExecutedHedge>,
    next_session: u64,
}

impl PortfolioStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Commodities ---

    /// Registers a commodity.
    ///
    /// # Errors
    /// `DuplicateCommodity` if the id is already registered.
    pub fn add_commodity(&mut self, commodity: Commodity) -> Result<(), PortfolioError> {
        let id = commodity.id().clone();
        if self.commodities.contains_key(&id) {
            return Err(PortfolioError::DuplicateCommodity(id));
        }
        self.commodities.insert(id, commodity);
        Ok(())
    }

    /// Looks up a commodity.
    pub fn commodity(&self, id: &CommodityId) -> Option<&Commodity> {
        self.commodities.get(id)
    }

    /// Returns all commodity ids in deterministic (sorted) order.
    ///
    /// The correlation matrix indexes commodities by this order.
    pub fn commodity_ids(&self) -> Vec<CommodityId> {
        self.commodities.keys().cloned().collect()
    }

    /// Iterates over registered commodities.
    pub fn commodities(&self) -> impl Iterator<Item = &Commodity> {
        self.commodities.values()
    }

    // --- Purchases ---

    /// Adds a purchase record.
    ///
    /// # Errors
    /// - `UnknownCommodity` if the commodity is not registered
    /// - `DuplicatePurchase` if the id is already present
    pub fn add_purchase(&mut self, purchase: Purchase) -> Result<(), PortfolioError> {
        if !self.commodities.contains_key(purchase.commodity_id()) {
            return Err(PortfolioError::UnknownCommodity(
                purchase.commodity_id().clone(),
            ));
        }
        let id = purchase.id().clone();
        if self.purchases.contains_key(&id) {
            return Err(PortfolioError::DuplicatePurchase(id));
        }
        self.purchases.insert(id, purchase);
        Ok(())
    }

    /// Looks up a purchase.
    pub fn purchase(&self, id: &PurchaseId) -> Option<&Purchase> {
        self.purchases.get(id)
    }

    /// Iterates over all purchases.
    pub fn purchases(&self) -> impl Iterator<Item = &Purchase> {
        self.purchases.values()
    }

    /// Iterates over one customer's purchases.
    pub fn purchases_for<'a>(
        &'a self,
        customer: &'a CustomerId,
    ) -> impl Iterator<Item = &'a Purchase> {
        self.purchases
            .values()
            .filter(move |p| p.customer_id() == customer)
    }

    // --- Market prices ---

    /// Adds a market price.
    ///
    /// Spot observations are kept in chronological order per commodity; for
    /// forward quotes only the most recently observed quote per contract
    /// month is retained.
    ///
    /// # Errors
    /// `UnknownCommodity` if the commodity is not registered.
    pub fn add_market_price(&mut self, price: MarketPrice) -> Result<(), PortfolioError> {
        if !self.commodities.contains_key(price.commodity_id()) {
            return Err(PortfolioError::UnknownCommodity(
                price.commodity_id().clone(),
            ));
        }
        match price.contract_month() {
            None => {
                let series = self.spots.entry(price.commodity_id().clone()).or_default();
                let position = series
                    .partition_point(|existing| existing.price_date() <= price.price_date());
                series.insert(position, price);
            }
            Some(month) => {
                let quotes = self
                    .forwards
                    .entry(price.commodity_id().clone())
                    .or_default();
                let keep_existing = quotes
                    .get(&month)
                    .is_some_and(|existing| existing.price_date() > price.price_date());
                if !keep_existing {
                    quotes.insert(month, price);
                }
            }
        }
        Ok(())
    }

    /// Returns the chronological spot history of a commodity.
    pub fn spot_history(&self, commodity: &CommodityId) -> &[MarketPrice] {
        self.spots.get(commodity).map_or(&[], Vec::as_slice)
    }

    /// Returns the most recent spot price, if any.
    pub fn latest_spot(&self, commodity: &CommodityId) -> Option<f64> {
        self.spots
            .get(commodity)
            .and_then(|series| series.last())
            .map(MarketPrice::price)
    }

    /// Returns the forward price quoted for a contract month, if any.
    pub fn forward_price(&self, commodity: &CommodityId, contract_month: Month) -> Option<f64> {
        self.forwards
            .get(commodity)
            .and_then(|quotes| quotes.get(&contract_month))
            .map(MarketPrice::price)
    }

    // --- Inventory ---

    /// Records an inventory snapshot.
    ///
    /// # Errors
    /// `UnknownCommodity` if the commodity is not registered.
    pub fn add_inventory_snapshot(
        &mut self,
        snapshot: InventorySnapshot,
    ) -> Result<(), PortfolioError> {
        if !self.commodities.contains_key(snapshot.commodity_id()) {
            return Err(PortfolioError::UnknownCommodity(
                snapshot.commodity_id().clone(),
            ));
        }
        self.inventory.push(snapshot);
        Ok(())
    }

    /// Returns all inventory snapshots.
    pub fn inventory_snapshots(&self) -> &[InventorySnapshot] {
        &self.inventory
    }

    // --- Exposure buckets ---

    /// Replaces exposure buckets for the given scope in one swap.
    ///
    /// With a customer scope only that customer's buckets are replaced;
    /// without one, the whole set is. The retained-plus-new vector is fully
    /// built before the assignment, so the store transitions directly from
    /// the old set to the new set.
    pub fn replace_buckets(
        &mut self,
        scope: Option<&CustomerId>,
        new_buckets: Vec<ExposureBucket>,
    ) {
        let mut combined: Vec<ExposureBucket> = match scope {
            Some(customer) => self
                .buckets
                .iter()
                .filter(|bucket| &bucket.customer_id != customer)
                .cloned()
                .collect(),
            None => Vec::new(),
        };
        combined.extend(new_buckets);
        self.buckets = combined;
    }

    /// Returns all exposure buckets.
    pub fn buckets(&self) -> &[ExposureBucket] {
        &self.buckets
    }

    /// Iterates over one customer's buckets.
    pub fn buckets_for<'a>(
        &'a self,
        customer: &'a CustomerId,
    ) -> impl Iterator<Item = &'a ExposureBucket> {
        self.buckets
            .iter()
            .filter(move |bucket| &bucket.customer_id == customer)
    }

    /// Iterates over one customer's buckets within an inclusive month range.
    pub fn buckets_in_range<'a>(
        &'a self,
        customer: &'a CustomerId,
        from: Month,
        to: Month,
    ) -> impl Iterator<Item = &'a ExposureBucket> {
        self.buckets_for(customer)
            .filter(move |bucket| bucket.bucket_month >= from && bucket.bucket_month <= to)
    }

    // --- Hedge sessions ---

    /// Returns the user's active session, if one exists.
    pub fn active_session(&self, user: &UserId) -> Option<&HedgeSession> {
        self.sessions
            .iter()
            .find(|session| session.user_id() == user && session.is_active())
    }

    /// Returns the user's active session id, opening a new session if none
    /// exists. At most one active session per user can ever result.
    pub fn open_session(&mut self, customer: &CustomerId, user: &UserId) -> HedgeSessionId {
        if let Some(session) = self.active_session(user) {
            return session.id().clone();
        }
        self.next_session += 1;
        let id = HedgeSessionId::new(format!("HS-{}", self.next_session));
        self.sessions.push(HedgeSession::open(
            id.clone(),
            customer.clone(),
            user.clone(),
        ));
        id
    }

    /// Stages a hedge in the user's active session, opening one if needed.
    ///
    /// The price snapshot is taken from the forward quote for the contract
    /// month; staging fails if no quote exists.
    ///
    /// # Errors
    /// - `UnknownCommodity` if the commodity is not registered
    /// - `MissingMarketPrice` if no forward quote covers the contract month
    /// - `InvalidQuantity` if `quantity <= 0`
    pub fn stage_hedge(
        &mut self,
        customer: &CustomerId,
        user: &UserId,
        commodity: &CommodityId,
        contract_month: Month,
        quantity: f64,
    ) -> Result<(), PortfolioError> {
        if !self.commodities.contains_key(commodity) {
            return Err(PortfolioError::UnknownCommodity(commodity.clone()));
        }
        let snapshot = self.forward_price(commodity, contract_month).ok_or_else(|| {
            PortfolioError::MissingMarketPrice {
                commodity: commodity.clone(),
                contract_month,
            }
        })?;

        let session_id = self.open_session(customer, user);
        let session = self
            .session_mut(&session_id)
            .ok_or(PortfolioError::NoActiveSession(user.clone()))?;
        session.stage_item(commodity.clone(), contract_month, quantity, snapshot)
    }

    /// Updates a staged hedge quantity in the user's active session.
    ///
    /// # Errors
    /// `NoActiveSession` if the user has none; otherwise the session's own
    /// validation errors.
    pub fn update_hedge_quantity(
        &mut self,
        user: &UserId,
        commodity: &CommodityId,
        contract_month: Month,
        quantity: f64,
    ) -> Result<(), PortfolioError> {
        let session = self
            .active_session_mut(user)
            .ok_or(PortfolioError::NoActiveSession(user.clone()))?;
        session.update_quantity(commodity, contract_month, quantity)
    }

    /// Removes a staged hedge from the user's active session.
    ///
    /// # Errors
    /// `NoActiveSession` if the user has none; `HedgeItemNotFound` if the
    /// key is not staged.
    pub fn remove_hedge_item(
        &mut self,
        user: &UserId,
        commodity: &CommodityId,
        contract_month: Month,
    ) -> Result<(), PortfolioError> {
        let session = self
            .active_session_mut(user)
            .ok_or(PortfolioError::NoActiveSession(user.clone()))?;
        session.remove_item(commodity, contract_month)
    }

    /// Executes the user's active session, recording the resulting
    /// [`ExecutedHedge`] rows and closing the session.
    ///
    /// # Errors
    /// `NoActiveSession` if the user has none; `EmptyHedgeSession` if
    /// nothing is staged.
    pub fn execute_active_session(
        &mut self,
        user: &UserId,
        executed_at: DateTime<Utc>,
    ) -> Result<Vec<ExecutedHedge>, PortfolioError> {
        let session = self
            .active_session_mut(user)
            .ok_or(PortfolioError::NoActiveSession(user.clone()))?;
        let executed = session.execute(executed_at)?;
        self.executed.extend(executed.iter().cloned());
        Ok(executed)
    }

    /// Cancels the user's active session.
    ///
    /// # Errors
    /// `NoActiveSession` if the user has none.
    pub fn cancel_active_session(&mut self, user: &UserId) -> Result<(), PortfolioError> {
        let session = self
            .active_session_mut(user)
            .ok_or(PortfolioError::NoActiveSession(user.clone()))?;
        session.cancel()
    }

    /// Returns all executed hedges.
    pub fn executed_hedges(&self) -> &[ExecutedHedge] {
        &self.executed
    }

    /// Iterates over one customer's executed hedges.
    pub fn executed_hedges_for<'a>(
        &'a self,
        customer: &'a CustomerId,
    ) -> impl Iterator<Item = &'a ExecutedHedge> {
        self.executed
            .iter()
            .filter(move |hedge| &hedge.customer_id == customer)
    }

    fn session_mut(&mut self, id: &HedgeSessionId) -> Option<&mut HedgeSession> {
        self.sessions.iter_mut().find(|session| session.id() == id)
    }

    fn active_session_mut(&mut self, user: &UserId) -> Option<&mut HedgeSession> {
        self.sessions
            .iter_mut()
            .find(|session| session.user_id() == user && session.is_active())
    }
}
