use sqlx::SqliteConnection;

use crate::database::models::{WishlistEntry, WishlistItem};
use crate::services::catalog_service;
use crate::services::{ServiceError, ServiceResult, PRODUCT_COLUMNS};

const ALREADY_WISHED: &str = "Item already in wishlist";

fn select_entries() -> String {
    format!(
        "SELECT w.id AS entry_id, w.user_id, {PRODUCT_COLUMNS} \
         FROM wishlist_items w JOIN products p ON p.id = w.product_id"
    )
}

pub async fn get_wishlist(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> ServiceResult<Vec<WishlistEntry>> {
    let entries = sqlx::query_as::<_, WishlistEntry>(&format!(
        "{} WHERE w.user_id = ? ORDER BY w.id",
        select_entries()
    ))
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(entries)
}

async fn find_item(
    conn: &mut SqliteConnection,
    user_id: i64,
    product_id: i64,
) -> ServiceResult<Option<WishlistItem>> {
    let item = sqlx::query_as::<_, WishlistItem>(
        "SELECT id, user_id, product_id FROM wishlist_items WHERE user_id = ? AND product_id = ?",
    )
    .bind(user_id)
    .bind(product_id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(item)
}

/// Conflict when the pair already exists, whether seen up front or raised
/// by the unique constraint.
pub async fn add_to_wishlist(
    conn: &mut SqliteConnection,
    user_id: i64,
    product_id: Option<i64>,
) -> ServiceResult<WishlistEntry> {
    let product_id = match product_id {
        Some(id) if id != 0 => id,
        _ => return Err(ServiceError::BadRequest("Product ID is required".to_string())),
    };

    catalog_service::get_product(conn, product_id).await?;

    if find_item(conn, user_id, product_id).await?.is_some() {
        return Err(ServiceError::Conflict(ALREADY_WISHED.to_string()));
    }

    let entry_id = sqlx::query("INSERT INTO wishlist_items (user_id, product_id) VALUES (?, ?)")
        .bind(user_id)
        .bind(product_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| match ServiceError::from(e) {
            ServiceError::Conflict(_) => ServiceError::Conflict(ALREADY_WISHED.to_string()),
            other => other,
        })?
        .last_insert_rowid();

    sqlx::query_as::<_, WishlistEntry>(&format!("{} WHERE w.id = ?", select_entries()))
        .bind(entry_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(ServiceError::from)
}

pub async fn remove_from_wishlist(
    conn: &mut SqliteConnection,
    user_id: i64,
    product_id: i64,
) -> ServiceResult<()> {
    let item = find_item(conn, user_id, product_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Item not found in wishlist".to_string()))?;

    sqlx::query("DELETE FROM wishlist_items WHERE id = ?")
        .bind(item.id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}
