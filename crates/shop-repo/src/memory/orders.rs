use async_trait::async_trait;
use shop_types::domain::order::{Order, OrderStatus};
use shop_types::ports::order_repository::OrderRepository;
use shop_types::ports::RepoError;
use uuid::Uuid;

use super::{in_order, InMemoryRepo};

#[async_trait]
impl OrderRepository for InMemoryRepo {
    async fn create_order(&self, order: Order) -> Result<Order, RepoError> {
        let slot = self.slot(order.clone());
        self.orders.insert(order.id, slot);
        Ok(order)
    }

    async fn get_order(&self, id: Uuid) -> Result<Option<Order>, RepoError> {
        Ok(self.orders.get(&id).map(|r| r.value.clone()))
    }

    async fn list_orders(&self) -> Result<Vec<Order>, RepoError> {
        Ok(in_order(
            self.orders.iter().map(|kv| kv.value().clone()).collect(),
        ))
    }

    async fn list_orders_for_user(&self, user_id: &str) -> Result<Vec<Order>, RepoError> {
        Ok(in_order(
            self.orders
                .iter()
                .filter(|kv| kv.value().value.user_id == user_id)
                .map(|kv| kv.value().clone())
                .collect(),
        ))
    }

    async fn update_order_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, RepoError> {
        if let Some(mut slot) = self.orders.get_mut(&id) {
            slot.value.update_status(status)?;
            return Ok(Some(slot.value.clone()));
        }
        Ok(None)
    }
}
