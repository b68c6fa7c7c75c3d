use axum::extract::{
    multipart::{MultipartError, MultipartRejection},
    rejection::PathRejection,
    Multipart, Path, State,
};

use crate::app::{AppState, BaseUrl};
use crate::database::models::ProductView;
use crate::database::WriteTransaction;
use crate::error::ApiError;
use crate::handlers::path_id;
use crate::middleware::{ApiResponse, ApiResult, Message};
use crate::services::admin_service::{self, ImageUpload, ProductForm};

fn form_error(err: MultipartError) -> ApiError {
    tracing::debug!("Rejected product form: {}", err);
    ApiError::bad_request("Failed to parse form data on server.")
}

/// Collect the known multipart fields; unknown parts are skipped.
async fn read_product_form(mut multipart: Multipart) -> Result<ProductForm, ApiError> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart.next_field().await.map_err(form_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(form_error)?;
                form.image = Some(ImageUpload {
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
            "name" => form.name = Some(field.text().await.map_err(form_error)?),
            "description" => form.description = Some(field.text().await.map_err(form_error)?),
            "price" => form.price = Some(field.text().await.map_err(form_error)?),
            "stock" => form.stock = Some(field.text().await.map_err(form_error)?),
            "category" => form.category = Some(field.text().await.map_err(form_error)?),
            _ => {}
        }
    }

    Ok(form)
}

/// POST /api/admin/products - multipart: name, description, price, stock, category, image
pub async fn create_product(
    State(state): State<AppState>,
    BaseUrl(base): BaseUrl,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<ProductView> {
    let multipart =
        multipart.map_err(|_| ApiError::bad_request("Failed to parse form data on server."))?;
    let form = read_product_form(multipart).await?;

    let mut tx = WriteTransaction::begin(&state.pool).await?;
    let product =
        admin_service::create_product(&mut tx, &state.config.api.upload_dir, form).await?;
    tx.commit().await?;

    Ok(ApiResponse::created(product.to_view(&base)))
}

/// DELETE /api/admin/products/:id
pub async fn delete_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Message> {
    let id = path_id(id, "Product")?;

    let mut tx = WriteTransaction::begin(&state.pool).await?;
    let product = admin_service::delete_product(&mut tx, &state.config.api.upload_dir, id).await?;
    tx.commit().await?;

    Ok(ApiResponse::message(format!(
        "Product '{}' deleted successfully",
        product.name
    )))
}
