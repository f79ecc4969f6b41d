//! API key authentication middleware

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};

use crate::error::AppError;
use crate::AppState;

/// Header carrying the caller's raw API key
pub const API_KEY_HEADER: &str = "api-key";

/// Extract the API key from the `api-key` header
fn extract_api_key(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|key| !key.is_empty())
}

/// Authentication middleware
///
/// Resolves the API key to a User and injects it into request extensions.
/// Missing or unknown keys are rejected with 401.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let api_key = extract_api_key(&request).ok_or(AppError::Unauthorized)?;

    let user = state
        .user_service
        .authenticate(api_key)
        .await?
        .ok_or_else(|| {
            tracing::debug!("Rejected unknown API key");
            AppError::Unauthorized
        })?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
