//! Bearer-token extractors for authenticated and admin-only routes, and
//! body/query extractors whose failures use the JSON error shape.

use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::{header::AUTHORIZATION, request::Parts};
use axum::Json;
use serde::de::DeserializeOwned;
use shop_types::domain::user::User;
use shop_types::ports::ShopRepository;

use super::AppState;
use crate::errors::AppError;

/// Rejects with 401 unless the request carries a live session token.
pub struct CurrentUser {
    pub user: User,
    pub token: String,
}

/// Like `CurrentUser`, plus 403 for non-admin users.
pub struct RequireAdmin(pub User);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

impl<R: ShopRepository> FromRequestParts<AppState<R>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<R>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized("missing bearer token".into()))?
            .to_string();
        let user = state.auth.current_user(&token).await?;
        Ok(Self { user, token })
    }
}

impl<R: ShopRepository> FromRequestParts<AppState<R>> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<R>,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser { user, .. } = CurrentUser::from_request_parts(parts, state).await?;
        if !user.is_admin {
            tracing::warn!(user_id = %user.id, "admin route refused");
            return Err(AppError::Forbidden("admin access required".into()));
        }
        Ok(Self(user))
    }
}

/// `Json` whose rejection is an `AppError::BadRequest`.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// `Query` whose rejection is an `AppError::BadRequest`.
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}
