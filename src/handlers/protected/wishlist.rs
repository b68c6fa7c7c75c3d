use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Extension, Json,
};
use serde::Deserialize;

use crate::app::{AppState, BaseUrl};
use crate::database::models::WishlistEntryView;
use crate::database::WriteTransaction;
use crate::handlers::path_id;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, Message};
use crate::services::wishlist_service;

#[derive(Debug, Deserialize)]
pub struct AddWishlistItem {
    pub product_id: Option<i64>,
}

/// GET /api/wishlist
pub async fn get_wishlist(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    BaseUrl(base): BaseUrl,
) -> ApiResult<Vec<WishlistEntryView>> {
    let mut conn = state.pool.acquire().await?;
    let entries = wishlist_service::get_wishlist(&mut conn, user.user_id).await?;

    Ok(ApiResponse::success(
        entries.iter().map(|entry| entry.to_view(&base)).collect(),
    ))
}

/// POST /api/wishlist
pub async fn add_item(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    BaseUrl(base): BaseUrl,
    payload: Result<Json<AddWishlistItem>, JsonRejection>,
) -> ApiResult<WishlistEntryView> {
    let Json(body) = payload?;

    let mut tx = WriteTransaction::begin(&state.pool).await?;
    let entry = wishlist_service::add_to_wishlist(&mut tx, user.user_id, body.product_id).await?;
    tx.commit().await?;

    Ok(ApiResponse::created(entry.to_view(&base)))
}

/// DELETE /api/wishlist/:product_id - keyed by product, not by entry id
pub async fn remove_item(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    product_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Message> {
    let product_id = path_id(product_id, "Item")?;

    let mut tx = WriteTransaction::begin(&state.pool).await?;
    wishlist_service::remove_from_wishlist(&mut tx, user.user_id, product_id).await?;
    tx.commit().await?;

    Ok(ApiResponse::message("Item removed from wishlist"))
}
