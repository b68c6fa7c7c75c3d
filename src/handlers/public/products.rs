use axum::extract::{rejection::PathRejection, Path, Query, State};
use serde::Deserialize;

use crate::app::{AppState, BaseUrl};
use crate::database::models::ProductView;
use crate::handlers::path_id;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::catalog_service;

#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
}

/// GET /api/products?category= - list products, optionally by category
pub async fn list_products(
    State(state): State<AppState>,
    BaseUrl(base): BaseUrl,
    Query(query): Query<ProductQuery>,
) -> ApiResult<Vec<ProductView>> {
    let mut conn = state.pool.acquire().await?;
    let products = catalog_service::list_products(&mut conn, query.category.as_deref()).await?;

    Ok(ApiResponse::success(
        products.iter().map(|p| p.to_view(&base)).collect(),
    ))
}

/// GET /api/products/:id
pub async fn get_product(
    State(state): State<AppState>,
    BaseUrl(base): BaseUrl,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<ProductView> {
    let id = path_id(id, "Product")?;

    let mut conn = state.pool.acquire().await?;
    let product = catalog_service::get_product(&mut conn, id).await?;

    Ok(ApiResponse::success(product.to_view(&base)))
}
