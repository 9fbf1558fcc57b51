use dashmap::DashMap;
use shop_types::domain::cart::Cart;
use shop_types::domain::order::Order;
use shop_types::domain::product::Product;
use shop_types::domain::user::UserRecord;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

mod carts;
mod orders;
mod products;
mod users;

/// Value tagged with its insertion sequence so listings keep insertion order.
#[derive(Clone)]
pub(crate) struct Slot<T> {
    seq: u64,
    value: T,
}

/// Process-memory store backing every port. Clones share the same maps.
#[derive(Clone, Default)]
pub struct InMemoryRepo {
    products: Arc<DashMap<String, Slot<Product>>>,
    carts: Arc<DashMap<String, Cart>>,
    orders: Arc<DashMap<Uuid, Slot<Order>>>,
    // keyed by normalized email
    users: Arc<DashMap<String, UserRecord>>,
    // token -> user id
    sessions: Arc<DashMap<String, String>>,
    seq: Arc<AtomicU64>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot<T>(&self, value: T) -> Slot<T> {
        Slot {
            seq: self.seq.fetch_add(1, Ordering::Relaxed),
            value,
        }
    }
}

fn in_order<T>(mut slots: Vec<Slot<T>>) -> Vec<T> {
    slots.sort_by_key(|s| s.seq);
    slots.into_iter().map(|s| s.value).collect()
}
