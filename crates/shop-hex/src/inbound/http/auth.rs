use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use shop_types::domain::user::{AuthSession, User};
use shop_types::ports::ShopRepository;

use super::extractors::{ApiJson, CurrentUser};
use super::AppState;
use crate::errors::AppError;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub async fn login<R: ShopRepository>(
    State(state): State<AppState<R>>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<AuthSession>, AppError> {
    let session = state.auth.login(&payload.email, &payload.password).await?;
    Ok(Json(session))
}

pub async fn register<R: ShopRepository>(
    State(state): State<AppState<R>>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthSession>), AppError> {
    let session = state
        .auth
        .register(payload.name, payload.email, &payload.password)
        .await?;
    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn logout<R: ShopRepository>(
    State(state): State<AppState<R>>,
    current: CurrentUser,
) -> Result<StatusCode, AppError> {
    state.auth.logout(&current.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn me<R: ShopRepository>(current: CurrentUser) -> Json<User> {
    Json(current.user)
}
