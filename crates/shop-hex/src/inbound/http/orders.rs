use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use shop_types::domain::cart::GUEST_USER_ID;
use shop_types::domain::order::{Order, OrderStatus, PaymentMethod, ShippingAddress};
use shop_types::ports::ShopRepository;

use super::extractors::{ApiJson, ApiQuery, RequireAdmin};
use super::server::parse_uuid;
use super::AppState;
use crate::errors::AppError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub user_id: Option<String>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOrdersQuery {
    pub user_id: String,
}

/// Status stays a string so unknown values get our 400 message.
#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

pub async fn create_order<R: ShopRepository>(
    State(state): State<AppState<R>>,
    ApiJson(payload): ApiJson<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let user_id = payload
        .user_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| GUEST_USER_ID.to_string());
    let order = state
        .orders
        .create_order(user_id, payload.shipping_address, payload.payment_method)
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn get_order<R: ShopRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<Order>, AppError> {
    let id = parse_uuid(&id)?;
    Ok(Json(state.orders.get_order(id).await?))
}

pub async fn list_user_orders<R: ShopRepository>(
    State(state): State<AppState<R>>,
    ApiQuery(query): ApiQuery<UserOrdersQuery>,
) -> Result<Json<Vec<Order>>, AppError> {
    Ok(Json(state.orders.list_user_orders(&query.user_id).await?))
}

pub async fn list_all_orders<R: ShopRepository>(
    State(state): State<AppState<R>>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Order>>, AppError> {
    Ok(Json(state.orders.list_all_orders().await?))
}

pub async fn update_status<R: ShopRepository>(
    State(state): State<AppState<R>>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateStatusRequest>,
) -> Result<Json<Order>, AppError> {
    let id = parse_uuid(&id)?;
    let status = payload
        .status
        .parse::<OrderStatus>()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    tracing::debug!(admin_id = %admin.id, order_id = %id, %status, "status change requested");
    Ok(Json(state.orders.update_status(id, status).await?))
}
