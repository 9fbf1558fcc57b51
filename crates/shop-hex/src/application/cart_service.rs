use crate::errors::AppError;
use shop_types::domain::cart::{CartItem, CartItemChange, CartItemPatch, NewCartItem};
use shop_types::domain::product::Product;
use shop_types::ports::cart_repository::CartRepository;
use shop_types::ports::product_repository::ProductRepository;
use uuid::Uuid;

pub struct CartService<R: CartRepository + ProductRepository> {
    repo: R,
}

impl<R: CartRepository + ProductRepository> CartService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn get_cart(&self, user_id: &str) -> Result<Vec<CartItem>, AppError> {
        Ok(self.repo.get_cart(user_id).await?.items)
    }

    pub async fn add_to_cart(
        &self,
        user_id: &str,
        mut item: NewCartItem,
    ) -> Result<CartItem, AppError> {
        if item.quantity == 0 {
            return Err(AppError::BadRequest("quantity must be > 0".into()));
        }
        let product = self.product(&item.product_id).await?;
        item.color = check_variant(&product, item.size, &item.color)?;

        let line = self.repo.add_item(user_id, item).await?;
        tracing::debug!(user_id, item_id = %line.id, quantity = line.quantity, "cart line added");
        Ok(line)
    }

    /// Size and color changes are held to what the product offers, like on add.
    pub async fn update_cart_item(
        &self,
        id: Uuid,
        mut patch: CartItemPatch,
    ) -> Result<CartItemChange, AppError> {
        if patch.size.is_some() || patch.color.is_some() {
            let current = self.repo.find_item(id).await?.ok_or_else(|| not_found(id))?;
            let product = self.product(&current.product_id).await?;
            let size = patch.size.unwrap_or(current.size);
            let color = patch.color.as_deref().unwrap_or(&current.color);
            let color = check_variant(&product, size, color)?;
            if patch.color.is_some() {
                patch.color = Some(color);
            }
        }
        match self.repo.update_item(id, patch).await? {
            Some(change) => Ok(change),
            None => Err(not_found(id)),
        }
    }

    pub async fn remove_from_cart(&self, id: Uuid) -> Result<CartItem, AppError> {
        match self.repo.remove_item(id).await? {
            Some(item) => Ok(item),
            None => Err(not_found(id)),
        }
    }

    async fn product(&self, id: &str) -> Result<Product, AppError> {
        self.repo
            .get_product(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product with ID {id} not found")))
    }

    /// Always leaves the cart empty and returns the (empty) cart.
    pub async fn clear_cart(&self, user_id: &str) -> Result<Vec<CartItem>, AppError> {
        let dropped = self.repo.take_items(user_id).await?;
        tracing::debug!(user_id, dropped = dropped.len(), "cart cleared");
        Ok(Vec::new())
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Cart item with ID {id} not found"))
}

/// Returns the product's spelling of the color when the variant is offered.
fn check_variant(product: &Product, size: f32, color: &str) -> Result<String, AppError> {
    if !product.offers_size(size) {
        return Err(AppError::BadRequest(format!(
            "size {size} not available for {}",
            product.name
        )));
    }
    product
        .offered_color(color)
        .map(str::to_string)
        .ok_or_else(|| {
            AppError::BadRequest(format!("color {color} not available for {}", product.name))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_repo::memory::InMemoryRepo;
    use shop_types::domain::product::NewProduct;

    async fn with_product() -> (CartService<InMemoryRepo>, Product) {
        let repo = InMemoryRepo::new();
        let product = Product::new(NewProduct {
            name: "Air Max 90".into(),
            price_cents: 12000,
            sizes: vec![9.0, 9.5],
            colors: vec!["White".into(), "Black".into()],
            ..Default::default()
        })
        .unwrap();
        repo.create_product(product.clone()).await.unwrap();
        (CartService::new(repo), product)
    }

    fn line(product: &Product, qty: u32, color: &str) -> NewCartItem {
        NewCartItem {
            product_id: product.id.clone(),
            quantity: qty,
            size: 9.0,
            color: color.into(),
        }
    }

    #[tokio::test]
    async fn adding_same_line_twice_increments_quantity() {
        let (svc, product) = with_product().await;
        svc.add_to_cart("user1", line(&product, 1, "White"))
            .await
            .unwrap();
        let merged = svc
            .add_to_cart("user1", line(&product, 2, "White"))
            .await
            .unwrap();
        assert_eq!(merged.quantity, 3);
        assert_eq!(svc.get_cart("user1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rejects_unknown_product_zero_quantity_and_unoffered_options() {
        let (svc, product) = with_product().await;
        let missing = svc
            .add_to_cart(
                "user1",
                NewCartItem {
                    product_id: "nope".into(),
                    ..line(&product, 1, "White")
                },
            )
            .await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));

        let zero = svc.add_to_cart("user1", line(&product, 0, "White")).await;
        assert!(matches!(zero, Err(AppError::BadRequest(_))));

        let red = svc.add_to_cart("user1", line(&product, 1, "Red")).await;
        assert!(matches!(red, Err(AppError::BadRequest(_))));

        let big = svc
            .add_to_cart(
                "user1",
                NewCartItem {
                    size: 14.0,
                    ..line(&product, 1, "White")
                },
            )
            .await;
        assert!(matches!(big, Err(AppError::BadRequest(_))));
        assert!(svc.get_cart("user1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_remove_and_clear() {
        let (svc, product) = with_product().await;
        let white = svc
            .add_to_cart("user1", line(&product, 1, "White"))
            .await
            .unwrap();
        let black = svc
            .add_to_cart("user1", line(&product, 1, "Black"))
            .await
            .unwrap();

        let change = svc
            .update_cart_item(
                white.id,
                CartItemPatch {
                    quantity: Some(4),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(matches!(change, CartItemChange::Updated(ref it) if it.quantity == 4));

        let removed = svc
            .update_cart_item(
                white.id,
                CartItemPatch {
                    quantity: Some(-1),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(matches!(removed, CartItemChange::Removed(_)));

        svc.remove_from_cart(black.id).await.unwrap();
        assert!(matches!(
            svc.remove_from_cart(black.id).await,
            Err(AppError::NotFound(_))
        ));

        svc.add_to_cart("user1", line(&product, 1, "White"))
            .await
            .unwrap();
        assert!(svc.clear_cart("user1").await.unwrap().is_empty());
        assert!(svc.get_cart("user1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn color_is_stored_in_catalog_spelling() {
        let (svc, product) = with_product().await;
        svc.add_to_cart("user1", line(&product, 1, "Black"))
            .await
            .unwrap();
        let merged = svc
            .add_to_cart("user1", line(&product, 1, "black"))
            .await
            .unwrap();
        assert_eq!(merged.color, "Black");
        assert_eq!(merged.quantity, 2);
        let cart = svc.get_cart("user1").await.unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].color, "Black");
    }

    #[tokio::test]
    async fn update_is_held_to_offered_variants() {
        let (svc, product) = with_product().await;
        let item = svc
            .add_to_cart("user1", line(&product, 1, "White"))
            .await
            .unwrap();

        let purple = svc
            .update_cart_item(
                item.id,
                CartItemPatch {
                    color: Some("Purple".into()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(purple, Err(AppError::BadRequest(_))));

        let huge = svc
            .update_cart_item(
                item.id,
                CartItemPatch {
                    size: Some(42.0),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(huge, Err(AppError::BadRequest(_))));
        let cart = svc.get_cart("user1").await.unwrap();
        assert_eq!((cart[0].size, cart[0].color.as_str()), (9.0, "White"));

        let change = svc
            .update_cart_item(
                item.id,
                CartItemPatch {
                    size: Some(9.5),
                    color: Some("black".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        match change {
            CartItemChange::Updated(it) => {
                assert_eq!(it.size, 9.5);
                assert_eq!(it.color, "Black");
            }
            other => panic!("unexpected change {other:?}"),
        }

        let missing = svc
            .update_cart_item(
                Uuid::new_v4(),
                CartItemPatch {
                    color: Some("White".into()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }
}
