pub mod cart_item;
pub mod product;
pub mod user;
pub mod wishlist_item;

pub use cart_item::{CartItem, CartLine, CartLineView};
pub use product::{Product, ProductView};
pub use user::{User, UserSummary};
pub use wishlist_item::{WishlistEntry, WishlistEntryView, WishlistItem};
