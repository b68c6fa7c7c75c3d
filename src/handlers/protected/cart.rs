use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Extension, Json,
};
use serde::{Deserialize, Deserializer};

use crate::app::{AppState, BaseUrl};
use crate::database::models::CartLineView;
use crate::database::WriteTransaction;
use crate::handlers::path_id;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, Message};
use crate::services::cart_service;

#[derive(Debug, Deserialize)]
pub struct AddCartItem {
    pub product_id: Option<i64>,
    /// Outer `None`: field omitted. `Some(None)`: explicit `null`.
    #[serde(default, deserialize_with = "present")]
    pub quantity: Option<Option<i64>>,
}

impl AddCartItem {
    /// Omitted quantity means one; `null` stays invalid.
    pub fn quantity(&self) -> Option<i64> {
        self.quantity.unwrap_or(Some(1))
    }
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCartItem {
    pub quantity: Option<i64>,
}

/// GET /api/cart
pub async fn get_cart(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    BaseUrl(base): BaseUrl,
) -> ApiResult<Vec<CartLineView>> {
    let mut conn = state.pool.acquire().await?;
    let lines = cart_service::get_cart(&mut conn, user.user_id).await?;

    Ok(ApiResponse::success(
        lines.iter().map(|line| line.to_view(&base)).collect(),
    ))
}

/// POST /api/cart - add or merge a line
pub async fn add_item(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    BaseUrl(base): BaseUrl,
    payload: Result<Json<AddCartItem>, JsonRejection>,
) -> ApiResult<CartLineView> {
    let Json(body) = payload?;

    let mut tx = WriteTransaction::begin(&state.pool).await?;
    let line = cart_service::add_to_cart(&mut tx, user.user_id, body.product_id, body.quantity()).await?;
    tx.commit().await?;

    Ok(ApiResponse::success(line.to_view(&base)))
}

/// PUT /api/cart/:id - set a line's quantity
pub async fn update_item(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    BaseUrl(base): BaseUrl,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateCartItem>, JsonRejection>,
) -> ApiResult<CartLineView> {
    let id = path_id(id, "Cart item")?;
    // Quantity is validated after the ownership check, so a bad body is not rejected up front.
    let quantity = payload.ok().and_then(|Json(body)| body.quantity);

    let mut tx = WriteTransaction::begin(&state.pool).await?;
    let line = cart_service::update_cart_item(&mut tx, user.user_id, id, quantity).await?;
    tx.commit().await?;

    Ok(ApiResponse::success(line.to_view(&base)))
}

/// DELETE /api/cart/:id
pub async fn remove_item(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Message> {
    let id = path_id(id, "Cart item")?;

    let mut tx = WriteTransaction::begin(&state.pool).await?;
    cart_service::remove_from_cart(&mut tx, user.user_id, id).await?;
    tx.commit().await?;

    Ok(ApiResponse::message("Item removed from cart"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> AddCartItem {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn omitted_quantity_defaults_to_one() {
        assert_eq!(parse(r#"{"product_id": 1}"#).quantity(), Some(1));
    }

    #[test]
    fn null_quantity_is_not_defaulted() {
        assert_eq!(parse(r#"{"product_id": 1, "quantity": null}"#).quantity(), None);
        assert_eq!(parse(r#"{"product_id": 1, "quantity": 4}"#).quantity(), Some(4));
    }
}
