// handlers/mod.rs - three security tiers
//
// Public (no auth) -> Protected (bearer token) -> Elevated (bearer token + admin flag)
//
// Each tier exposes `routes()` returning its router fragment; the guards for
// protected and elevated routes are attached there as route layers.

pub mod elevated;
pub mod protected;
pub mod public;

use axum::{extract::rejection::PathRejection, extract::Path, http::StatusCode};

use crate::error::ApiError;

/// OPTIONS on guarded routes: empty success, no credentials required.
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Numeric path ids; anything else is treated as an unknown resource.
pub(crate) fn path_id(path: Result<Path<i64>, PathRejection>, what: &str) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::not_found(format!("{} not found", what)))
}
