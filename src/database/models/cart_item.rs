use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use url::Url;

use super::product::{Product, ProductView};

#[derive(Debug, Clone, FromRow)]
pub struct CartItem {
    pub id: i64,
    pub quantity: i64,
    pub user_id: i64,
    pub product_id: i64,
}

/// Cart item joined with its product (`line_id` aliases the cart row id).
#[derive(Debug, Clone, FromRow)]
pub struct CartLine {
    pub line_id: i64,
    pub quantity: i64,
    pub user_id: i64,
    #[sqlx(flatten)]
    pub product: Product,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineView {
    pub id: i64,
    pub quantity: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub product: ProductView,
}

impl CartLine {
    pub fn to_view(&self, base_url: &Url) -> CartLineView {
        CartLineView {
            id: self.line_id,
            quantity: self.quantity,
            user_id: self.user_id,
            product_id: self.product.id,
            product: self.product.to_view(base_url),
        }
    }
}
