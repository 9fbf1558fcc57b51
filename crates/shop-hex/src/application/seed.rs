//! Demo catalog and accounts loaded at startup.

use anyhow::Context;
use shop_types::domain::product::Product;
use shop_types::domain::user::{User, UserRecord};
use shop_types::ports::product_repository::ProductRepository;
use shop_types::ports::user_repository::UserRepository;

use super::auth_service::hash_password;

const CATALOG_JSON: &str = include_str!("../../data/catalog.json");

struct DemoAccount {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    password: &'static str,
    is_admin: bool,
}

const DEMO_ACCOUNTS: [DemoAccount; 2] = [
    DemoAccount {
        id: "user1",
        name: "John Doe",
        email: "user@example.com",
        password: "password",
        is_admin: false,
    },
    DemoAccount {
        id: "admin1",
        name: "Admin User",
        email: "admin@example.com",
        password: "admin",
        is_admin: true,
    },
];

pub fn demo_catalog() -> anyhow::Result<Vec<Product>> {
    serde_json::from_str(CATALOG_JSON).context("embedded catalog is not valid JSON")
}

/// Seeds the shoe catalog and the demo accounts. Entries that already
/// exist are left alone, so calling this twice is harmless.
pub async fn seed_demo_data<R>(repo: &R) -> anyhow::Result<()>
where
    R: ProductRepository + UserRepository,
{
    let mut products = 0;
    for product in demo_catalog()? {
        if repo.get_product(&product.id).await?.is_none() {
            repo.create_product(product).await?;
            products += 1;
        }
    }

    let mut accounts = 0;
    for account in &DEMO_ACCOUNTS {
        let user = User::new(
            account.id.into(),
            account.name.into(),
            account.email.into(),
            account.is_admin,
        )?;
        let password_hash = hash_password(account.password)?;
        if repo
            .create_user(UserRecord {
                user,
                password_hash,
            })
            .await?
        {
            accounts += 1;
        }
    }

    tracing::info!(products, accounts, "demo data seeded");
    Ok(())
}
