use async_trait::async_trait;
use shop_types::domain::cart::{Cart, CartItem, CartItemChange, CartItemPatch, NewCartItem};
use shop_types::ports::cart_repository::CartRepository;
use shop_types::ports::RepoError;
use uuid::Uuid;

use super::InMemoryRepo;

#[async_trait]
impl CartRepository for InMemoryRepo {
    async fn get_cart(&self, user_id: &str) -> Result<Cart, RepoError> {
        Ok(self
            .carts
            .get(user_id)
            .map(|c| c.clone())
            .unwrap_or_else(|| Cart::new(user_id)))
    }

    async fn add_item(&self, user_id: &str, item: NewCartItem) -> Result<CartItem, RepoError> {
        let mut cart = self
            .carts
            .entry(user_id.to_string())
            .or_insert_with(|| Cart::new(user_id));
        Ok(cart.add(item))
    }

    async fn find_item(&self, item_id: Uuid) -> Result<Option<CartItem>, RepoError> {
        Ok(self
            .carts
            .iter()
            .find_map(|cart| cart.items.iter().find(|it| it.id == item_id).cloned()))
    }

    async fn update_item(
        &self,
        item_id: Uuid,
        patch: CartItemPatch,
    ) -> Result<Option<CartItemChange>, RepoError> {
        for mut cart in self.carts.iter_mut() {
            if cart.contains(item_id) {
                return Ok(cart.update(item_id, patch));
            }
        }
        Ok(None)
    }

    async fn remove_item(&self, item_id: Uuid) -> Result<Option<CartItem>, RepoError> {
        for mut cart in self.carts.iter_mut() {
            if let Some(removed) = cart.remove(item_id) {
                return Ok(Some(removed));
            }
        }
        Ok(None)
    }

    async fn take_items(&self, user_id: &str) -> Result<Vec<CartItem>, RepoError> {
        Ok(self
            .carts
            .get_mut(user_id)
            .map(|mut c| c.take_items())
            .unwrap_or_default())
    }

    async fn restore_items(&self, user_id: &str, items: Vec<CartItem>) -> Result<(), RepoError> {
        self.carts
            .entry(user_id.to_string())
            .or_insert_with(|| Cart::new(user_id))
            .restore(items);
        Ok(())
    }
}
