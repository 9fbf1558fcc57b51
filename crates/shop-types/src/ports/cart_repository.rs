use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::{Cart, CartItem, CartItemChange, CartItemPatch, NewCartItem};
use crate::ports::RepoError;

/// Carts keyed by user id. Each method is atomic with respect to one cart.
#[async_trait]
pub trait CartRepository: Send + Sync + 'static {
    /// Empty cart when the user has none yet.
    async fn get_cart(&self, user_id: &str) -> Result<Cart, RepoError>;
    async fn add_item(&self, user_id: &str, item: NewCartItem) -> Result<CartItem, RepoError>;
    /// The line with this id, whichever cart holds it.
    async fn find_item(&self, item_id: Uuid) -> Result<Option<CartItem>, RepoError>;
    async fn update_item(
        &self,
        item_id: Uuid,
        patch: CartItemPatch,
    ) -> Result<Option<CartItemChange>, RepoError>;
    async fn remove_item(&self, item_id: Uuid) -> Result<Option<CartItem>, RepoError>;
    /// Empties the cart, returning the lines it held.
    async fn take_items(&self, user_id: &str) -> Result<Vec<CartItem>, RepoError>;
    /// Returns lines from `take_items` to the cart with their ids unchanged.
    async fn restore_items(&self, user_id: &str, items: Vec<CartItem>) -> Result<(), RepoError>;
}
