//! Staged hedge resolution.
//!
//! Reads the user's single active hedge session and exposes its staged
//! quantities keyed by (commodity, contract month), which is exactly the
//! key exposure buckets aggregate under. Session uniqueness is enforced by
//! the store's session management, not re-checked here.

use granum_core::types::time::Month;
use granum_portfolio::ids::{CommodityId, UserId};
use granum_portfolio::store::PortfolioStore;
use std::collections::HashMap;

/// Staged hedge quantities from the user's active session.
///
/// Empty when the user has no active session.
///
/// # Examples
///
/// ```
/// use granum_portfolio::ids::UserId;
/// use granum_portfolio::store::PortfolioStore;
/// use granum_risk::hedges::hedge_quantities;
///
/// let store = PortfolioStore::new();
/// assert!(hedge_quantities(&store, &UserId::new("u1")).is_empty());
/// ```
pub fn hedge_quantities(
    store: &PortfolioStore,
    user: &UserId,
) -> HashMap<(CommodityId, Month), f64> {
    let Some(session) = store.active_session(user) else {
        return HashMap::new();
    };

    session
        .items()
        .iter()
        .map(|item| {
            (
                (item.commodity_id.clone(), item.contract_month),
                item.quantity,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use granum_portfolio::commodity::Commodity;
    use granum_portfolio::ids::CustomerId;
    use granum_portfolio::market::MarketPrice;

    fn seeded_store() -> PortfolioStore {
        let mut store = PortfolioStore::new();
        store
            .add_commodity(Commodity::new(CommodityId::new("sugar"), "sugar", "mt"))
            .unwrap();
        let quote_date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        for month in [Month::new(2025, 12).unwrap(), Month::new(2026, 3).unwrap()] {
            store
                .add_market_price(
                    MarketPrice::forward(CommodityId::new("sugar"), quote_date, month, 0.54, "mock")
                        .unwrap(),
                )
                .unwrap();
        }
        store
    }

    #[test]
    fn test_no_session_yields_empty_map() {
        let store = seeded_store();
        assert!(hedge_quantities(&store, &UserId::new("u1")).is_empty());
    }

    #[test]
    fn test_active_session_items_are_keyed_by_commodity_and_month() {
        let mut store = seeded_store();
        let user = UserId::new("u1");
        let customer = CustomerId::new("ACME");
        let dec = Month::new(2025, 12).unwrap();
        let mar = Month::new(2026, 3).unwrap();

        store
            .stage_hedge(&customer, &user, &CommodityId::new("sugar"), dec, 500.0)
            .unwrap();
        store
            .stage_hedge(&customer, &user, &CommodityId::new("sugar"), mar, 250.0)
            .unwrap();

        let hedges = hedge_quantities(&store, &user);
        assert_eq!(hedges.len(), 2);
        assert_eq!(hedges[&(CommodityId::new("sugar"), dec)], 500.0);
        assert_eq!(hedges[&(CommodityId::new("sugar"), mar)], 250.0);
    }

    #[test]
    fn test_executed_session_no_longer_resolves() {
        let mut store = seeded_store();
        let user = UserId::new("u1");
        let customer = CustomerId::new("ACME");
        let dec = Month::new(2025, 12).unwrap();

        store
            .stage_hedge(&customer, &user, &CommodityId::new("sugar"), dec, 500.0)
            .unwrap();
        store.execute_active_session(&user, Utc::now()).unwrap();

        // Executed hedges are no longer *staged*; the resolver only reads
        // the active session.
        assert!(hedge_quantities(&store, &user).is_empty());
    }

    #[test]
    fn test_other_users_sessions_are_invisible() {
        let mut store = seeded_store();
        let customer = CustomerId::new("ACME");
        let dec = Month::new(2025, 12).unwrap();
        store
            .stage_hedge(&customer, &UserId::new("u1"), &CommodityId::new("sugar"), dec, 500.0)
            .unwrap();

        assert!(hedge_quantities(&store, &UserId::new("u2")).is_empty());
    }
}
