pub mod cart_repository;
pub mod order_repository;
pub mod product_repository;
pub mod user_repository;

/// Everything the storefront needs from a storage adapter.
pub trait ShopRepository:
    product_repository::ProductRepository
    + cart_repository::CartRepository
    + order_repository::OrderRepository
    + user_repository::UserRepository
{
}

impl<T> ShopRepository for T where
    T: product_repository::ProductRepository
        + cart_repository::CartRepository
        + order_repository::OrderRepository
        + user_repository::UserRepository
{
}

#[derive(thiserror::Error, Debug)]
pub enum RepoError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    InvalidTransition(#[from] crate::domain::order::StatusTransitionError),
}
