use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::order::{Order, OrderStatus};
use crate::ports::RepoError;

#[async_trait]
pub trait OrderRepository: Send + Sync + 'static {
    async fn create_order(&self, order: Order) -> Result<Order, RepoError>;
    async fn get_order(&self, id: Uuid) -> Result<Option<Order>, RepoError>;
    /// Oldest first.
    async fn list_orders(&self) -> Result<Vec<Order>, RepoError>;
    async fn list_orders_for_user(&self, user_id: &str) -> Result<Vec<Order>, RepoError>;
    /// Fails with `RepoError::InvalidTransition` when the order's current
    /// status does not allow `status`.
    async fn update_order_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, RepoError>;
}
