use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use url::Url;

use super::product::{Product, ProductView};

#[derive(Debug, Clone, FromRow)]
pub struct WishlistItem {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
}

/// Wishlist item joined with its product (`entry_id` aliases the wishlist row id).
#[derive(Debug, Clone, FromRow)]
pub struct WishlistEntry {
    pub entry_id: i64,
    pub user_id: i64,
    #[sqlx(flatten)]
    pub product: Product,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistEntryView {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub product: ProductView,
}

impl WishlistEntry {
    pub fn to_view(&self, base_url: &Url) -> WishlistEntryView {
        WishlistEntryView {
            id: self.entry_id,
            user_id: self.user_id,
            product_id: self.product.id,
            product: self.product.to_view(base_url),
        }
    }
}
