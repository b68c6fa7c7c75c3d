use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::app::AppState;
use crate::auth::validate_jwt;
use crate::error::ApiError;
use crate::services::user_service;

/// Authenticated caller, inserted into request extensions by the guards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
}

/// Capability a route requires beyond a valid token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    User,
    Admin,
}

/// Bearer token required.
pub async fn require_user(State(state): State<AppState>, request: Request, next: Next) -> Response {
    guard(Access::User, &state, request, next).await
}

/// Bearer token of a user whose admin flag is set.
pub async fn require_admin(State(state): State<AppState>, request: Request, next: Next) -> Response {
    guard(Access::Admin, &state, request, next).await
}

async fn guard(access: Access, state: &AppState, mut request: Request, next: Next) -> Response {
    // Preflight requests carry no credentials.
    if request.method() == Method::OPTIONS {
        return next.run(request).await;
    }

    match authorize(access, state, request.headers()).await {
        Ok(auth_user) => {
            request.extensions_mut().insert(auth_user);
            next.run(request).await
        }
        Err(err) => err.into_response(),
    }
}

async fn authorize(access: Access, state: &AppState, headers: &HeaderMap) -> Result<AuthUser, ApiError> {
    let token = extract_jwt_from_headers(headers).map_err(ApiError::unauthorized)?;

    let claims = validate_jwt(&token, &state.config.security)
        .map_err(|e| ApiError::unauthorized(e.to_string()))?;
    let user_id = claims
        .user_id()
        .map_err(|e| ApiError::unauthorized(e.to_string()))?;

    if access == Access::Admin {
        let mut conn = state.pool.acquire().await?;
        let is_admin = user_service::find_by_id(&mut conn, user_id)
            .await?
            .map(|user| user.is_admin)
            .unwrap_or(false);
        if !is_admin {
            tracing::warn!("Admin access refused for user {}", user_id);
            return Err(ApiError::forbidden("Admin access required"));
        }
    }

    Ok(AuthUser { user_id })
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.trim().to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
