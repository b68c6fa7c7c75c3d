use sqlx::SqliteConnection;

use crate::database::models::{CartItem, CartLine};
use crate::services::catalog_service;
use crate::services::{ServiceError, ServiceResult, PRODUCT_COLUMNS};

fn select_lines() -> String {
    format!(
        "SELECT c.id AS line_id, c.quantity, c.user_id, {PRODUCT_COLUMNS} \
         FROM cart_items c JOIN products p ON p.id = c.product_id"
    )
}

fn not_enough_stock() -> ServiceError {
    ServiceError::BadRequest("Not enough stock available".to_string())
}

pub async fn get_cart(conn: &mut SqliteConnection, user_id: i64) -> ServiceResult<Vec<CartLine>> {
    let lines = sqlx::query_as::<_, CartLine>(&format!(
        "{} WHERE c.user_id = ? ORDER BY c.id",
        select_lines()
    ))
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(lines)
}

async fn get_line(conn: &mut SqliteConnection, item_id: i64) -> ServiceResult<CartLine> {
    sqlx::query_as::<_, CartLine>(&format!("{} WHERE c.id = ?", select_lines()))
        .bind(item_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Cart item not found".to_string()))
}

/// Add `quantity` of a product. An existing line for the same product is
/// merged; the resulting total may never exceed current stock. `None` is
/// an invalid quantity: callers apply the default of 1 for an omitted field.
pub async fn add_to_cart(
    conn: &mut SqliteConnection,
    user_id: i64,
    product_id: Option<i64>,
    quantity: Option<i64>,
) -> ServiceResult<CartLine> {
    let (product_id, quantity) = match (product_id, quantity) {
        (Some(id), Some(q)) if id != 0 && q > 0 => (id, q),
        _ => return Err(ServiceError::BadRequest("Invalid product ID or quantity".to_string())),
    };

    let product = catalog_service::get_product(conn, product_id).await?;
    if quantity > product.stock {
        return Err(not_enough_stock());
    }

    // Insert or merge in one statement; the merge only applies while the
    // total stays within stock, otherwise nothing changes.
    let result = sqlx::query(
        "INSERT INTO cart_items (quantity, user_id, product_id) VALUES (?, ?, ?) \
         ON CONFLICT (user_id, product_id) DO UPDATE \
         SET quantity = cart_items.quantity + excluded.quantity \
         WHERE cart_items.quantity + excluded.quantity <= ?",
    )
    .bind(quantity)
    .bind(user_id)
    .bind(product_id)
    .bind(product.stock)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(not_enough_stock());
    }

    sqlx::query_as::<_, CartLine>(&format!(
        "{} WHERE c.user_id = ? AND c.product_id = ?",
        select_lines()
    ))
    .bind(user_id)
    .bind(product_id)
    .fetch_one(&mut *conn)
    .await
    .map_err(ServiceError::from)
}

/// Load a cart item and make sure it belongs to `user_id`.
async fn owned_item(
    conn: &mut SqliteConnection,
    user_id: i64,
    item_id: i64,
) -> ServiceResult<CartItem> {
    let item = sqlx::query_as::<_, CartItem>(
        "SELECT id, quantity, user_id, product_id FROM cart_items WHERE id = ?",
    )
    .bind(item_id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or_else(|| ServiceError::NotFound("Cart item not found".to_string()))?;

    if item.user_id != user_id {
        return Err(ServiceError::Forbidden("Cart item belongs to another user".to_string()));
    }
    Ok(item)
}

/// Replace a line's quantity. Ownership is checked before the new value.
pub async fn update_cart_item(
    conn: &mut SqliteConnection,
    user_id: i64,
    item_id: i64,
    quantity: Option<i64>,
) -> ServiceResult<CartLine> {
    let item = owned_item(conn, user_id, item_id).await?;

    let quantity = match quantity {
        Some(q) if q >= 1 => q,
        _ => return Err(ServiceError::BadRequest("Invalid quantity provided".to_string())),
    };

    let product = catalog_service::find_product(conn, item.product_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Associated product not found".to_string()))?;
    if quantity > product.stock {
        return Err(ServiceError::BadRequest(format!(
            "Not enough stock available ({} left)",
            product.stock
        )));
    }

    sqlx::query("UPDATE cart_items SET quantity = ? WHERE id = ?")
        .bind(quantity)
        .bind(item.id)
        .execute(&mut *conn)
        .await?;

    get_line(conn, item.id).await
}

pub async fn remove_from_cart(
    conn: &mut SqliteConnection,
    user_id: i64,
    item_id: i64,
) -> ServiceResult<()> {
    let item = owned_item(conn, user_id, item_id).await?;

    sqlx::query("DELETE FROM cart_items WHERE id = ?")
        .bind(item.id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}
