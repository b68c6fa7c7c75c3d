// handlers/protected/mod.rs - bearer token required
//
// Cart and wishlist operations act on the caller identified by the token
// subject; `require_user` inserts `AuthUser` before any handler runs.

pub mod cart;
pub mod wishlist;

use axum::{
    middleware,
    routing::{delete, get},
    Router,
};

use crate::app::AppState;
use crate::handlers::preflight;
use crate::middleware::require_user;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/cart",
            get(cart::get_cart).post(cart::add_item).options(preflight),
        )
        .route(
            "/api/cart/:id",
            delete(cart::remove_item).put(cart::update_item).options(preflight),
        )
        .route(
            "/api/wishlist",
            get(wishlist::get_wishlist).post(wishlist::add_item).options(preflight),
        )
        .route(
            "/api/wishlist/:product_id",
            delete(wishlist::remove_item).options(preflight),
        )
        .route_layer(middleware::from_fn_with_state(state, require_user))
}
