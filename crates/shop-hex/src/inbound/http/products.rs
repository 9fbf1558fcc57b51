use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shop_types::domain::product::{NewProduct, Product, ProductFilter, ProductPatch};
use shop_types::ports::ShopRepository;

use super::extractors::{ApiJson, ApiQuery, RequireAdmin};
use super::AppState;
use crate::errors::AppError;

pub async fn list_products<R: ShopRepository>(
    State(state): State<AppState<R>>,
    ApiQuery(filter): ApiQuery<ProductFilter>,
) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(state.products.list_products(&filter).await?))
}

pub async fn featured_products<R: ShopRepository>(
    State(state): State<AppState<R>>,
) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(state.products.featured_products().await?))
}

pub async fn get_product<R: ShopRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<Product>, AppError> {
    Ok(Json(state.products.get_product(&id).await?))
}

pub async fn create_product<R: ShopRepository>(
    State(state): State<AppState<R>>,
    RequireAdmin(_admin): RequireAdmin,
    ApiJson(payload): ApiJson<NewProduct>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = state.products.create_product(payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product<R: ShopRepository>(
    State(state): State<AppState<R>>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<ProductPatch>,
) -> Result<Json<Product>, AppError> {
    Ok(Json(state.products.update_product(&id, payload).await?))
}

pub async fn delete_product<R: ShopRepository>(
    State(state): State<AppState<R>>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<Product>, AppError> {
    Ok(Json(state.products.delete_product(&id).await?))
}
