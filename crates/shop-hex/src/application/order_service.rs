use crate::errors::AppError;
use shop_types::domain::cart::CartItem;
use shop_types::domain::order::{Order, OrderLine, OrderStatus, PaymentMethod, ShippingAddress};
use shop_types::ports::cart_repository::CartRepository;
use shop_types::ports::order_repository::OrderRepository;
use shop_types::ports::product_repository::ProductRepository;
use uuid::Uuid;

pub struct OrderService<R: OrderRepository + CartRepository + ProductRepository> {
    repo: R,
}

impl<R: OrderRepository + CartRepository + ProductRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Checks out the user's cart. The cart is emptied on success and left
    /// as it was on failure.
    pub async fn create_order(
        &self,
        user_id: String,
        shipping_address: ShippingAddress,
        payment_method: PaymentMethod,
    ) -> Result<Order, AppError> {
        let items = self.repo.take_items(&user_id).await?;
        if items.is_empty() {
            return Err(AppError::BadRequest(
                "Cannot create order with empty cart".into(),
            ));
        }

        let placed = self
            .place(user_id.clone(), &items, shipping_address, payment_method)
            .await;
        match placed {
            Ok(order) => {
                tracing::info!(
                    order_id = %order.id,
                    user_id = %order.user_id,
                    total_cents = order.total_cents,
                    "order placed"
                );
                Ok(order)
            }
            Err(err) => {
                self.restore_cart(&user_id, items).await;
                Err(err)
            }
        }
    }

    async fn place(
        &self,
        user_id: String,
        items: &[CartItem],
        shipping_address: ShippingAddress,
        payment_method: PaymentMethod,
    ) -> Result<Order, AppError> {
        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            let product = self.repo.get_product(&item.product_id).await?.ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Product with ID {} is no longer available",
                    item.product_id
                ))
            })?;
            lines.push(
                OrderLine::price(item, &product)
                    .map_err(|e| AppError::BadRequest(e.to_string()))?,
            );
        }
        let order = Order::new(user_id, lines, shipping_address, payment_method)
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        Ok(self.repo.create_order(order).await?)
    }

    async fn restore_cart(&self, user_id: &str, items: Vec<CartItem>) {
        let lines = items.len();
        if let Err(e) = self.repo.restore_items(user_id, items).await {
            tracing::warn!(user_id, lines, error = %e, "failed to restore cart");
        }
    }

    pub async fn get_order(&self, id: Uuid) -> Result<Order, AppError> {
        match self.repo.get_order(id).await? {
            Some(o) => Ok(o),
            None => Err(not_found(id)),
        }
    }

    pub async fn list_user_orders(&self, user_id: &str) -> Result<Vec<Order>, AppError> {
        Ok(self.repo.list_orders_for_user(user_id).await?)
    }

    pub async fn list_all_orders(&self) -> Result<Vec<Order>, AppError> {
        Ok(self.repo.list_orders().await?)
    }

    pub async fn update_status(&self, id: Uuid, status: OrderStatus) -> Result<Order, AppError> {
        match self.repo.update_order_status(id, status).await? {
            Some(o) => {
                tracing::info!(order_id = %id, %status, "order status updated");
                Ok(o)
            }
            None => Err(not_found(id)),
        }
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Order with ID {id} not found"))
}
