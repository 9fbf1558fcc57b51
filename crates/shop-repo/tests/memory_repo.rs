use shop_repo::memory::InMemoryRepo;
use shop_types::domain::cart::{CartItemChange, CartItemPatch, NewCartItem};
use shop_types::domain::order::{Order, OrderLine, OrderStatus, PaymentMethod, ShippingAddress};
use shop_types::domain::product::{NewProduct, Product};
use shop_types::domain::user::{User, UserRecord};
use shop_types::ports::cart_repository::CartRepository;
use shop_types::ports::order_repository::OrderRepository;
use shop_types::ports::product_repository::ProductRepository;
use shop_types::ports::user_repository::UserRepository;
use shop_types::ports::RepoError;

fn product(name: &str) -> Product {
    Product::new(NewProduct {
        name: name.into(),
        price_cents: 5000,
        ..Default::default()
    })
    .unwrap()
}

fn order_for(user_id: &str) -> Order {
    Order::new(
        user_id.into(),
        vec![OrderLine {
            product_id: "1".into(),
            product_name: "Widget".into(),
            unit_price_cents: 500,
            quantity: 2,
            size: 9.0,
            color: "White".into(),
            line_total_cents: 1000,
        }],
        ShippingAddress {
            street: "1 Road".into(),
            city: "Town".into(),
            state: String::new(),
            zip_code: String::new(),
            country: "US".into(),
        },
        PaymentMethod::CreditCard,
    )
    .unwrap()
}

fn new_line(product_id: &str, qty: u32) -> NewCartItem {
    NewCartItem {
        product_id: product_id.into(),
        quantity: qty,
        size: 9.0,
        color: "White".into(),
    }
}

#[tokio::test]
async fn product_crud_flow_keeps_insertion_order() {
    let repo = InMemoryRepo::new();
    let names = ["A", "B", "C", "D"];
    let mut ids = Vec::new();
    for name in names {
        ids.push(repo.create_product(product(name)).await.unwrap().id);
    }

    let listed = repo.list_products().await.unwrap();
    let listed_names: Vec<_> = listed.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(listed_names, names);

    let mut renamed = repo.get_product(&ids[1]).await.unwrap().unwrap();
    renamed.name = "B2".into();
    repo.replace_product(renamed).await.unwrap().unwrap();
    let listed = repo.list_products().await.unwrap();
    assert_eq!(listed[1].name, "B2");

    let removed = repo.delete_product(&ids[0]).await.unwrap().unwrap();
    assert_eq!(removed.name, "A");
    assert!(repo.get_product(&ids[0]).await.unwrap().is_none());
    assert!(repo.delete_product(&ids[0]).await.unwrap().is_none());
    assert!(repo.replace_product(product("ghost")).await.unwrap().is_none());
}

#[tokio::test]
async fn cart_merges_and_is_scoped_per_user() {
    let repo = InMemoryRepo::new();
    let first = repo.add_item("user1", new_line("1", 1)).await.unwrap();
    let again = repo.add_item("user1", new_line("1", 2)).await.unwrap();
    assert_eq!(first.id, again.id);
    assert_eq!(again.quantity, 3);

    repo.add_item("user2", new_line("1", 1)).await.unwrap();
    assert_eq!(repo.get_cart("user1").await.unwrap().items.len(), 1);
    assert_eq!(repo.get_cart("user2").await.unwrap().items.len(), 1);
    assert!(repo.get_cart("nobody").await.unwrap().items.is_empty());
}

#[tokio::test]
async fn cart_item_update_and_remove_by_id() {
    let repo = InMemoryRepo::new();
    let item = repo.add_item("user1", new_line("1", 1)).await.unwrap();

    let change = repo
        .update_item(
            item.id,
            CartItemPatch {
                quantity: Some(5),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(change, CartItemChange::Updated(ref it) if it.quantity == 5));

    let removed = repo.remove_item(item.id).await.unwrap().unwrap();
    assert_eq!(removed.id, item.id);
    assert!(repo.remove_item(item.id).await.unwrap().is_none());
    assert!(repo
        .update_item(item.id, CartItemPatch::default())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn take_items_empties_the_cart() {
    let repo = InMemoryRepo::new();
    repo.add_item("user1", new_line("1", 1)).await.unwrap();
    repo.add_item("user1", new_line("2", 1)).await.unwrap();
    let taken = repo.take_items("user1").await.unwrap();
    assert_eq!(taken.len(), 2);
    assert!(repo.get_cart("user1").await.unwrap().items.is_empty());
    assert!(repo.take_items("nobody").await.unwrap().is_empty());
}

#[tokio::test]
async fn restored_lines_keep_their_ids() {
    let repo = InMemoryRepo::new();
    let first = repo.add_item("user1", new_line("1", 1)).await.unwrap();
    let taken = repo.take_items("user1").await.unwrap();
    assert!(repo.find_item(first.id).await.unwrap().is_none());

    repo.add_item("user1", new_line("1", 2)).await.unwrap();
    repo.restore_items("user1", taken).await.unwrap();

    let cart = repo.get_cart("user1").await.unwrap();
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].id, first.id);
    assert_eq!(cart.items[0].quantity, 3);
    assert_eq!(
        repo.find_item(first.id).await.unwrap().map(|it| it.user_id),
        Some("user1".to_string())
    );
}

#[tokio::test]
async fn order_flow_and_transition_errors() {
    let repo = InMemoryRepo::new();
    let a = repo.create_order(order_for("user1")).await.unwrap();
    let b = repo.create_order(order_for("user2")).await.unwrap();
    let c = repo.create_order(order_for("user1")).await.unwrap();

    let all: Vec<_> = repo
        .list_orders()
        .await
        .unwrap()
        .into_iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(all, vec![a.id, b.id, c.id]);

    let mine: Vec<_> = repo
        .list_orders_for_user("user1")
        .await
        .unwrap()
        .into_iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(mine, vec![a.id, c.id]);

    let updated = repo
        .update_order_status(a.id, OrderStatus::Processing)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Processing);

    let err = repo
        .update_order_status(a.id, OrderStatus::Pending)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidTransition(_)));

    let missing = repo
        .update_order_status(uuid::Uuid::new_v4(), OrderStatus::Shipped)
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn users_and_sessions() {
    let repo = InMemoryRepo::new();
    let user = User::new("u1".into(), "Ann".into(), "ann@example.com".into(), false).unwrap();
    let record = UserRecord {
        user: user.clone(),
        password_hash: "hash".into(),
    };
    assert!(repo.create_user(record.clone()).await.unwrap());
    assert!(!repo.create_user(record).await.unwrap());

    let found = repo
        .find_user_by_email("ANN@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.user, user);
    assert_eq!(repo.get_user("u1").await.unwrap(), Some(user.clone()));

    repo.create_session("tok".into(), "u1".into()).await.unwrap();
    assert_eq!(repo.session_user("tok").await.unwrap(), Some(user));
    assert!(repo.revoke_session("tok").await.unwrap());
    assert!(repo.session_user("tok").await.unwrap().is_none());
    assert!(!repo.revoke_session("tok").await.unwrap());
}
