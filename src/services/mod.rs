//! Store-facing operations. Every function takes the request's connection
//! (normally `&mut *tx` of an open transaction) so the caller decides when
//! to commit.

pub mod admin_service;
pub mod cart_service;
pub mod catalog_service;
pub mod uploads;
pub mod user_service;
pub mod wishlist_service;

use thiserror::Error;

use crate::auth::AuthError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Database error: {0}")]
    Database(sqlx::Error),
    #[error("File storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Token(#[from] AuthError),
    #[error("Password hashing error: {0}")]
    PasswordHash(String),
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                ServiceError::Conflict("Resource already exists".to_string())
            }
            _ => ServiceError::Database(err),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Product columns in `FromRow` order for joins against `products p`.
pub(crate) const PRODUCT_COLUMNS: &str =
    "p.id, p.name, p.description, p.price, p.stock, p.image_filename, p.category, p.date_added";
