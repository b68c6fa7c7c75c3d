use chrono::Utc;
use sqlx::SqliteConnection;
use std::path::Path;

use crate::database::models::Product;
use crate::services::uploads::{allowed_image, remove_image, sanitize_filename, store_image};
use crate::services::{catalog_service, ServiceError, ServiceResult};

/// Uploaded image part of a product form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Raw product form as received; every field is optional until validated.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub stock: Option<String>,
    pub category: Option<String>,
    pub image: Option<ImageUpload>,
}

/// A form that passed validation, with the stored filename already sanitized.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub category: String,
    pub image_filename: String,
}

fn bad_request(msg: &str) -> ServiceError {
    ServiceError::BadRequest(msg.to_string())
}

fn required(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !v.is_empty())
}

impl ProductForm {
    /// Checks run in order: text fields, price, stock, then the image.
    pub fn validate(&self) -> ServiceResult<NewProduct> {
        let (Some(name), Some(description), Some(price), Some(stock), Some(category)) = (
            required(&self.name),
            required(&self.description),
            required(&self.price),
            required(&self.stock),
            required(&self.category),
        ) else {
            return Err(bad_request("Missing required text or selection fields"));
        };

        let price = match price.trim().parse::<f64>() {
            Ok(p) if p.is_finite() && p > 0.0 => p,
            _ => return Err(bad_request("Invalid price format. Must be a positive number.")),
        };

        let stock = match stock.trim().parse::<i64>() {
            Ok(s) if s >= 0 => s,
            _ => {
                return Err(bad_request(
                    "Invalid stock format. Must be a non-negative integer.",
                ))
            }
        };

        let image = match &self.image {
            Some(image) if !image.filename.is_empty() => image,
            _ => return Err(bad_request("Image file is required.")),
        };

        let image_filename = sanitize_filename(&image.filename);
        if !allowed_image(&image.filename) || !allowed_image(&image_filename) {
            return Err(bad_request(
                "Invalid image file type. Allowed: png, jpg, jpeg, webp",
            ));
        }

        Ok(NewProduct {
            name: name.to_string(),
            description: description.to_string(),
            price,
            stock,
            category: category.to_string(),
            image_filename,
        })
    }
}

/// Validate, write the image into `upload_dir`, then insert the row.
///
/// The file write is not part of the transaction: a failed insert leaves the
/// image on disk.
pub async fn create_product(
    conn: &mut SqliteConnection,
    upload_dir: &Path,
    form: ProductForm,
) -> ServiceResult<Product> {
    let new_product = form.validate()?;
    let bytes = form.image.map(|image| image.bytes).unwrap_or_default();

    store_image(upload_dir, &new_product.image_filename, &bytes).await?;
    tracing::debug!("Image saved as: {}", new_product.image_filename);

    let date_added = Utc::now();
    let id = sqlx::query(
        "INSERT INTO products (name, description, price, stock, image_filename, category, date_added) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&new_product.name)
    .bind(&new_product.description)
    .bind(new_product.price)
    .bind(new_product.stock)
    .bind(&new_product.image_filename)
    .bind(&new_product.category)
    .bind(date_added)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    tracing::info!("Product created: {} ({})", id, new_product.name);

    Ok(Product {
        id,
        name: new_product.name,
        description: Some(new_product.description),
        price: new_product.price,
        stock: new_product.stock,
        image_filename: Some(new_product.image_filename),
        category: new_product.category,
        date_added,
    })
}

/// Remove a product, its image (best effort) and every cart/wishlist line
/// pointing at it. Returns the deleted row.
pub async fn delete_product(
    conn: &mut SqliteConnection,
    upload_dir: &Path,
    product_id: i64,
) -> ServiceResult<Product> {
    let product = catalog_service::get_product(conn, product_id).await?;

    if let Some(filename) = product.image_filename.as_deref() {
        remove_image(upload_dir, filename).await;
    }

    sqlx::query("DELETE FROM cart_items WHERE product_id = ?")
        .bind(product.id)
        .execute(&mut *conn)
        .await?;
    sqlx::query("DELETE FROM wishlist_items WHERE product_id = ?")
        .bind(product.id)
        .execute(&mut *conn)
        .await?;
    sqlx::query("DELETE FROM products WHERE id = ?")
        .bind(product.id)
        .execute(&mut *conn)
        .await?;

    tracing::info!("Product deleted: {} ({})", product.id, product.name);
    Ok(product)
}
