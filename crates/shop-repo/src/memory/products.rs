use async_trait::async_trait;
use shop_types::domain::product::Product;
use shop_types::ports::product_repository::ProductRepository;
use shop_types::ports::RepoError;

use super::{in_order, InMemoryRepo};

#[async_trait]
impl ProductRepository for InMemoryRepo {
    async fn create_product(&self, product: Product) -> Result<Product, RepoError> {
        let slot = self.slot(product.clone());
        self.products.insert(product.id.clone(), slot);
        Ok(product)
    }

    async fn get_product(&self, id: &str) -> Result<Option<Product>, RepoError> {
        Ok(self.products.get(id).map(|r| r.value.clone()))
    }

    async fn list_products(&self) -> Result<Vec<Product>, RepoError> {
        Ok(in_order(
            self.products.iter().map(|kv| kv.value().clone()).collect(),
        ))
    }

    async fn replace_product(&self, product: Product) -> Result<Option<Product>, RepoError> {
        if let Some(mut slot) = self.products.get_mut(&product.id) {
            slot.value = product.clone();
            return Ok(Some(product));
        }
        Ok(None)
    }

    async fn delete_product(&self, id: &str) -> Result<Option<Product>, RepoError> {
        Ok(self.products.remove(id).map(|(_, slot)| slot.value))
    }
}
