pub mod auth;
pub mod response;

pub use auth::{require_admin, require_user, Access, AuthUser};
pub use response::{ApiResponse, ApiResult, Message};
