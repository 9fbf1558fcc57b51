use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use shop_types::domain::cart::{CartItem, CartItemChange, CartItemPatch, NewCartItem, GUEST_USER_ID};
use shop_types::ports::ShopRepository;

use super::extractors::{ApiJson, ApiQuery};
use super::server::parse_uuid;
use super::AppState;
use crate::errors::AppError;

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CartOwner {
    pub user_id: Option<String>,
}

impl CartOwner {
    fn resolve(&self) -> &str {
        self.user_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or(GUEST_USER_ID)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    #[serde(flatten)]
    pub owner: CartOwner,
    #[serde(flatten)]
    pub item: NewCartItem,
}

pub async fn get_cart<R: ShopRepository>(
    State(state): State<AppState<R>>,
    ApiQuery(owner): ApiQuery<CartOwner>,
) -> Result<Json<Vec<CartItem>>, AppError> {
    Ok(Json(state.carts.get_cart(owner.resolve()).await?))
}

pub async fn add_to_cart<R: ShopRepository>(
    State(state): State<AppState<R>>,
    ApiJson(payload): ApiJson<AddToCartRequest>,
) -> Result<(StatusCode, Json<CartItem>), AppError> {
    let item = state
        .carts
        .add_to_cart(payload.owner.resolve(), payload.item)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// 200 with the line, or 204 when the new quantity removed it.
pub async fn update_cart_item<R: ShopRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<CartItemPatch>,
) -> Result<Response, AppError> {
    let id = parse_uuid(&id)?;
    match state.carts.update_cart_item(id, payload).await? {
        CartItemChange::Updated(item) => Ok(Json(item).into_response()),
        CartItemChange::Removed(_) => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

pub async fn remove_from_cart<R: ShopRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<CartItem>, AppError> {
    let id = parse_uuid(&id)?;
    Ok(Json(state.carts.remove_from_cart(id).await?))
}

pub async fn clear_cart<R: ShopRepository>(
    State(state): State<AppState<R>>,
    ApiQuery(owner): ApiQuery<CartOwner>,
) -> Result<Json<Vec<CartItem>>, AppError> {
    Ok(Json(state.carts.clear_cart(owner.resolve()).await?))
}
