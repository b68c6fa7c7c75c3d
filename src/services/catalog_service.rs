use sqlx::SqliteConnection;

use crate::database::models::Product;
use crate::services::{ServiceError, ServiceResult};

/// Category value clients send to mean "no filter".
pub const ALL_CATEGORIES: &str = "All";

const SELECT_PRODUCT: &str = "SELECT id, name, description, price, stock, image_filename, category, date_added FROM products";

/// All products, or only those whose category matches exactly. A missing,
/// empty or `"All"` category lists everything.
pub async fn list_products(
    conn: &mut SqliteConnection,
    category: Option<&str>,
) -> ServiceResult<Vec<Product>> {
    let products = match category.filter(|c| !c.is_empty() && *c != ALL_CATEGORIES) {
        Some(category) => {
            sqlx::query_as::<_, Product>(&format!("{SELECT_PRODUCT} WHERE category = ? ORDER BY id"))
                .bind(category)
                .fetch_all(&mut *conn)
                .await?
        }
        None => {
            sqlx::query_as::<_, Product>(&format!("{SELECT_PRODUCT} ORDER BY id"))
                .fetch_all(&mut *conn)
                .await?
        }
    };
    Ok(products)
}

pub async fn find_product(conn: &mut SqliteConnection, id: i64) -> ServiceResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(&format!("{SELECT_PRODUCT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(product)
}

pub async fn get_product(conn: &mut SqliteConnection, id: i64) -> ServiceResult<Product> {
    find_product(conn, id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Product not found".to_string()))
}
