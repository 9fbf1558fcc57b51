use shop_hex::application::seed::seed_demo_data;
use shop_hex::config::Config;
use shop_hex::inbound::http::{AppState, HttpServer, HttpServerConfig};
use shop_repo::{build_repo, Repo};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for SERVER_PORT / CORS_ALLOW_ORIGIN / SEED_DEMO_DATA when present.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string()))
        .init();

    let config = Config::from_env()?;
    let repo: Repo = build_repo();
    if config.seed_demo_data {
        seed_demo_data(&repo).await?;
    } else {
        tracing::info!("starting with an empty store");
    }

    let server_cfg = HttpServerConfig {
        port: config.server_port.clone(),
        cors_allow_origin: config.cors_allow_origin.clone(),
    };

    let http = HttpServer::new(AppState::new(repo), server_cfg).await?;
    http.run().await
}
