///  To run :
///  cargo r --example client_example
use shop_client::{CreateOrderRequest, ShopClient};
use shop_hex::application::seed::seed_demo_data;
use shop_hex::inbound::http::{AppState, HttpServer, HttpServerConfig};
use shop_repo::build_repo;
use shop_types::domain::cart::NewCartItem;
use shop_types::domain::order::{OrderStatus, PaymentMethod, ShippingAddress};
use shop_types::domain::product::ProductFilter;

fn find_free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Start server on ephemeral port with the seeded in-memory store.
    let port = find_free_port();
    let addr = format!("http://127.0.0.1:{port}/");

    let repo = build_repo();
    seed_demo_data(&repo).await?;
    let server = HttpServer::new(
        AppState::new(repo),
        HttpServerConfig {
            port: port.to_string(),
            cors_allow_origin: None,
        },
    )
    .await?;

    let handle = tokio::spawn(async move {
        server.run().await.expect("server run");
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let client = ShopClient::new(&addr)?;
    let catalog = client.list_products(&ProductFilter::default()).await?;
    println!("Catalog has {} products", catalog.len());

    let shoe = &catalog[0];
    let line = client
        .add_to_cart(
            "user1",
            &NewCartItem {
                product_id: shoe.id.clone(),
                quantity: 2,
                size: 9.0,
                color: shoe.colors[0].clone(),
            },
        )
        .await?;
    println!("Added {} x {} to cart", line.quantity, shoe.name);

    let order = client
        .create_order(&CreateOrderRequest {
            user_id: "user1".into(),
            shipping_address: ShippingAddress {
                street: "123 Main St".into(),
                city: "Exampleville".into(),
                state: "CA".into(),
                zip_code: "12345".into(),
                country: "US".into(),
            },
            payment_method: PaymentMethod::CreditCard,
        })
        .await?;
    println!("Placed order id={} total_cents={}", order.id, order.total_cents);

    let session = client.login("admin@example.com", "admin").await?;
    let admin = client.with_token(session.token);
    let updated = admin
        .update_order_status(order.id, OrderStatus::Processing)
        .await?;
    println!("Order {} is now {}", updated.id, updated.status);

    let all = admin.list_all_orders().await?;
    println!("Admin sees {} order(s)", all.len());

    handle.abort();
    Ok(())
}
