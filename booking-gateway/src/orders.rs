//! Ephemeral in-process store of created orders.
//!
//! Nothing here survives a restart; the gateway remains the source of truth
//! for order state. The store only exists so the receipt notification can use
//! the amount that was actually submitted to the gateway instead of a
//! client-supplied figure.

use chrono::{Duration, Utc};
use dashmap::DashMap;

use booking_types::OrderRecord;

/// Records older than this are dropped during pruning.
const RETENTION_HOURS: i64 = 24;
/// Pruning runs only once the store grows past this many entries.
const PRUNE_THRESHOLD: usize = 10_000;

#[derive(Default)]
pub struct OrderStore {
    orders: DashMap<String, OrderRecord>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a created order, keyed by the gateway order id.
    pub fn insert(&self, record: OrderRecord) {
        if self.orders.len() >= PRUNE_THRESHOLD {
            let cutoff = Utc::now() - Duration::hours(RETENTION_HOURS);
            self.orders.retain(|_, r| r.created_at > cutoff);
        }
        self.orders.insert(record.order_id.clone(), record);
    }

    pub fn get(&self, order_id: &str) -> Option<OrderRecord> {
        self.orders.get(order_id).map(|r| r.value().clone())
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, amount: i64) -> OrderRecord {
        OrderRecord {
            order_id: id.to_string(),
            amount,
            currency: "INR".to_string(),
            receipt: format!("rcpt_{id}"),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn insert_and_get() {
        let store = OrderStore::new();
        store.insert(record("order_ABC", 500000));

        let found = store.get("order_ABC").unwrap();
        assert_eq!(found.amount, 500000);
        assert_eq!(found.currency, "INR");
        assert!(store.get("order_unknown").is_none());
    }

    #[test]
    fn reinsert_overwrites() {
        let store = OrderStore::new();
        store.insert(record("order_ABC", 100));
        store.insert(record("order_ABC", 200));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("order_ABC").unwrap().amount, 200);
    }

    #[test]
    fn prune_drops_stale_records() {
        let store = OrderStore::new();
        for i in 0..PRUNE_THRESHOLD {
            let mut r = record(&format!("order_{i}"), 1);
            r.created_at = Utc::now() - Duration::hours(RETENTION_HOURS + 1);
            store.insert(r);
        }
        // The next insert crosses the threshold and evicts everything stale.
        store.insert(record("order_fresh", 1));
        assert_eq!(store.len(), 1);
        assert!(store.get("order_fresh").is_some());
    }
}
