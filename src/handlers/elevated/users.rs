use axum::extract::State;

use crate::app::AppState;
use crate::database::models::UserSummary;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::user_service;

/// GET /api/admin/users - id, email and admin flag of every account
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<UserSummary>> {
    let mut conn = state.pool.acquire().await?;
    let users = user_service::list_users(&mut conn).await?;
    Ok(ApiResponse::success(users))
}
