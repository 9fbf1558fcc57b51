use async_trait::async_trait;

use crate::domain::product::Product;
use crate::ports::RepoError;

#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    async fn create_product(&self, product: Product) -> Result<Product, RepoError>;
    async fn get_product(&self, id: &str) -> Result<Option<Product>, RepoError>;
    /// Insertion order.
    async fn list_products(&self) -> Result<Vec<Product>, RepoError>;
    /// Replaces the stored product with the same id; `None` when absent.
    async fn replace_product(&self, product: Product) -> Result<Option<Product>, RepoError>;
    async fn delete_product(&self, id: &str) -> Result<Option<Product>, RepoError>;
}
