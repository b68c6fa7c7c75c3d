use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::database::WriteTransaction;
use crate::middleware::{ApiResponse, ApiResult, Message};
use crate::services::user_service::{self, LoginOutcome};

#[derive(Debug, Default, Deserialize)]
pub struct Credentials {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub outcome: LoginOutcome,
}

/// POST /api/register - create a non-admin account (no token issued)
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<Message> {
    let Json(body) = payload?;

    let mut tx = WriteTransaction::begin(&state.pool).await?;
    user_service::register(&mut tx, body.email.as_deref(), body.password.as_deref()).await?;
    tx.commit().await?;

    Ok(ApiResponse::created(Message {
        message: "User registered successfully".to_string(),
    }))
}

/// POST /api/login/user
pub async fn login_user(
    state: State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    login(state, payload, false).await
}

/// POST /api/login/admin
pub async fn login_admin(
    state: State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    login(state, payload, true).await
}

async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
    expect_admin: bool,
) -> ApiResult<LoginResponse> {
    // An absent or unreadable body is reported as missing credentials.
    let body = payload.map(|Json(body)| body).unwrap_or_default();

    let mut conn = state.pool.acquire().await?;
    let outcome = user_service::login(
        &mut conn,
        body.email.as_deref(),
        body.password.as_deref(),
        expect_admin,
        &state.config.security,
    )
    .await?;

    Ok(ApiResponse::success(LoginResponse {
        message: "Login successful",
        outcome,
    }))
}

/// POST /api/logout - tokens are stateless; the client discards its copy
pub async fn logout() -> ApiResponse<Message> {
    ApiResponse::message("Logout successful. Please delete your token.")
}
