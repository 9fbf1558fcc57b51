use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    serve, Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use super::{auth, carts, orders, products};
use crate::application::auth_service::AuthService;
use crate::application::cart_service::CartService;
use crate::application::order_service::OrderService;
use crate::application::product_service::ProductService;
use shop_types::ports::ShopRepository;

#[derive(Clone)]
pub struct HttpServerConfig {
    pub port: String,
    /// `None` allows any origin.
    pub cors_allow_origin: Option<String>,
}

/// Services shared by every handler. All of them sit on the same store.
pub struct AppState<R: ShopRepository> {
    pub products: Arc<ProductService<R>>,
    pub carts: Arc<CartService<R>>,
    pub orders: Arc<OrderService<R>>,
    pub auth: Arc<AuthService<R>>,
}

impl<R: ShopRepository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            products: self.products.clone(),
            carts: self.carts.clone(),
            orders: self.orders.clone(),
            auth: self.auth.clone(),
        }
    }
}

impl<R: ShopRepository + Clone> AppState<R> {
    pub fn new(repo: R) -> Self {
        Self {
            products: Arc::new(ProductService::new(repo.clone())),
            carts: Arc::new(CartService::new(repo.clone())),
            orders: Arc::new(OrderService::new(repo.clone())),
            auth: Arc::new(AuthService::new(repo)),
        }
    }
}

#[derive(Clone)]
pub struct HttpServer<R>
where
    R: ShopRepository,
{
    pub state: AppState<R>,
    pub config: HttpServerConfig,
}

impl<R> HttpServer<R>
where
    R: ShopRepository,
{
    pub async fn new(state: AppState<R>, config: HttpServerConfig) -> anyhow::Result<Self> {
        Ok(Self { state, config })
    }

    pub fn router(&self) -> anyhow::Result<Router> {
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &axum::extract::Request<_>| {
                let uri = request.uri().to_string();
                let request_id = Uuid::new_v4();
                tracing::info_span!(
                    "http_request",
                    %request_id,
                    method = %request.method(),
                    uri
                )
            })
            .on_request(
                |request: &axum::extract::Request<_>, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        method = %request.method(),
                        uri = %request.uri(),
                        "request"
                    );
                },
            )
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        status = %response.status(),
                        latency_ms = %latency.as_millis(),
                        "response"
                    );
                },
            );

        let cors = match &self.config.cors_allow_origin {
            Some(origin) => CorsLayer::new()
                .allow_origin(HeaderValue::from_str(origin)?)
                .allow_methods(Any)
                .allow_headers(Any),
            None => CorsLayer::permissive(),
        };

        let app = Router::new()
            .route("/health", get(health))
            .route("/auth/login", post(auth::login::<R>))
            .route("/auth/register", post(auth::register::<R>))
            .route("/auth/logout", post(auth::logout::<R>))
            .route("/auth/me", get(auth::me::<R>))
            .route(
                "/products",
                get(products::list_products::<R>).post(products::create_product::<R>),
            )
            .route("/products/featured", get(products::featured_products::<R>))
            .route(
                "/products/{id}",
                get(products::get_product::<R>)
                    .put(products::update_product::<R>)
                    .delete(products::delete_product::<R>),
            )
            .route(
                "/carts",
                get(carts::get_cart::<R>)
                    .post(carts::add_to_cart::<R>)
                    .delete(carts::clear_cart::<R>),
            )
            .route(
                "/carts/{id}",
                put(carts::update_cart_item::<R>).delete(carts::remove_from_cart::<R>),
            )
            .route("/orders", post(orders::create_order::<R>))
            .route("/orders/user", get(orders::list_user_orders::<R>))
            .route("/orders/admin/all", get(orders::list_all_orders::<R>))
            .route("/orders/{id}", get(orders::get_order::<R>))
            .route("/orders/{id}/status", put(orders::update_status::<R>))
            .layer(trace_layer)
            .layer(cors)
            .with_state(self.state.clone());
        Ok(app)
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let app = self.router()?;
        let addr: SocketAddr = format!("0.0.0.0:{}", self.config.port).parse()?;
        tracing::info!("starting server on {}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        serve(listener, app.into_make_service()).await?;
        Ok(())
    }
}

async fn health() -> (axum::http::StatusCode, Json<serde_json::Value>) {
    (
        axum::http::StatusCode::OK,
        Json(serde_json::json!({ "status": "ok" })),
    )
}

pub(super) fn parse_uuid(id: &str) -> Result<Uuid, crate::errors::AppError> {
    Uuid::parse_str(id).map_err(|e| crate::errors::AppError::BadRequest(e.to_string()))
}
