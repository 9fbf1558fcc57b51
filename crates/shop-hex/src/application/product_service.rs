use crate::errors::AppError;
use shop_types::domain::product::{NewProduct, Product, ProductFilter, ProductPatch};
use shop_types::ports::product_repository::ProductRepository;

pub struct ProductService<R: ProductRepository> {
    repo: R,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, AppError> {
        let all = self.repo.list_products().await?;
        Ok(all.into_iter().filter(|p| filter.matches(p)).collect())
    }

    pub async fn featured_products(&self) -> Result<Vec<Product>, AppError> {
        let all = self.repo.list_products().await?;
        Ok(all.into_iter().filter(|p| p.featured).collect())
    }

    pub async fn get_product(&self, id: &str) -> Result<Product, AppError> {
        match self.repo.get_product(id).await? {
            Some(p) => Ok(p),
            None => Err(not_found(id)),
        }
    }

    pub async fn create_product(&self, new: NewProduct) -> Result<Product, AppError> {
        let product = Product::new(new).map_err(|e| AppError::BadRequest(e.to_string()))?;
        let created = self.repo.create_product(product).await?;
        tracing::info!(product_id = %created.id, name = %created.name, "product created");
        Ok(created)
    }

    pub async fn update_product(&self, id: &str, patch: ProductPatch) -> Result<Product, AppError> {
        let current = self.get_product(id).await?;
        let next = current
            .patched(patch)
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        match self.repo.replace_product(next).await? {
            Some(p) => Ok(p),
            None => Err(not_found(id)),
        }
    }

    pub async fn delete_product(&self, id: &str) -> Result<Product, AppError> {
        match self.repo.delete_product(id).await? {
            Some(p) => {
                tracing::info!(product_id = %p.id, "product deleted");
                Ok(p)
            }
            None => Err(not_found(id)),
        }
    }
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Product with ID {id} not found"))
}
