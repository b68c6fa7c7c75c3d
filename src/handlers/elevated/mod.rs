// handlers/elevated/mod.rs - bearer token of an admin user
//
// Product management and the user listing. `require_admin` rejects
// non-admin callers with 403 before any body is read.

pub mod products;
pub mod users;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::app::AppState;
use crate::handlers::preflight;
use crate::middleware::require_admin;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/admin/products",
            post(products::create_product).options(preflight),
        )
        .route(
            "/api/admin/products/:id",
            delete(products::delete_product).options(preflight),
        )
        .route("/api/admin/users", get(users::list_users).options(preflight))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}
