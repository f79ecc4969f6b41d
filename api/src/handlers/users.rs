//! User handlers
//!
//! Registration, profiles and the follow graph.

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{User, UserId, UserProfile, UserSummary};
use crate::error::AppError;
use crate::AppState;

use super::{JsonBody, PathParam, ResultResponse};

/// Request body for user registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
}

/// Response body for user registration
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub result: bool,
    pub user: UserSummary,
    /// Send as the `api-key` header. Only shown once.
    pub api_key: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub result: bool,
    pub user: UserProfile,
}

/// POST /api/users
pub async fn register(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    let (user, api_key) = state.user_service.register(&request.name).await?;

    Ok(Json(RegisterResponse {
        result: true,
        user: user.summary(),
        api_key,
    }))
}

/// GET /api/users/me
pub async fn get_me(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = state.user_service.profile(&user.id).await?;
    Ok(Json(ProfileResponse {
        result: true,
        user: profile,
    }))
}

/// GET /api/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = state.user_service.profile(&UserId(id)).await?;
    Ok(Json(ProfileResponse {
        result: true,
        user: profile,
    }))
}

/// POST /api/users/:id/follow
pub async fn follow(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    PathParam(id): PathParam<i32>,
) -> Result<Json<ResultResponse>, AppError> {
    state.user_service.follow(&user, &UserId(id)).await?;
    Ok(Json(ResultResponse::ok()))
}

/// DELETE /api/users/:id/follow
pub async fn unfollow(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    PathParam(id): PathParam<i32>,
) -> Result<Json<ResultResponse>, AppError> {
    state.user_service.unfollow(&user, &UserId(id)).await?;
    Ok(Json(ResultResponse::ok()))
}
