pub mod manager;
pub mod models;
pub mod schema;

pub use manager::{DatabaseError, DatabaseManager, WriteTransaction};
pub use models::{CartLine, Product, User, WishlistEntry};
