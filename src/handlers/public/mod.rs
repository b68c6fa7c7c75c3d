// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Welcome, health, catalog browsing, registration and login.

pub mod auth;
pub mod products;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::json;

use crate::app::AppState;
use crate::database::DatabaseManager;
use crate::handlers::preflight;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/products", get(products::list_products))
        .route("/api/products/:id", get(products::get_product))
        .route("/api/register", post(auth::register).options(preflight))
        .route("/api/login/user", post(auth::login_user).options(preflight))
        .route("/api/login/admin", post(auth::login_admin).options(preflight))
        .route("/api/logout", post(auth::logout))
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Welcome to the E-commerce API" }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
