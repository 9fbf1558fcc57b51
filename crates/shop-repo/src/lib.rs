//! shop-repo: storage adapters for the storefront ports.

pub mod memory;

pub type Repo = memory::InMemoryRepo;

/// Builds an empty store. Demo data is seeded by the application layer.
pub fn build_repo() -> Repo {
    memory::InMemoryRepo::new()
}
