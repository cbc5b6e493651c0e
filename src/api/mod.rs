//! HTML handlers for the catalog pages
//!
//! Each handler extracts its inputs, calls one service operation and either
//! renders a page or redirects.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;
pub mod health;

use axum::response::{IntoResponse, Redirect, Response};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// 303 to `url`
pub(crate) fn see_other(url: &str) -> Response {
    Redirect::to(url).into_response()
}

/// Record id named by a delete form's hidden input
pub(crate) fn delete_target(raw: Option<&str>, field: &str) -> AppResult<Uuid> {
    let raw = raw
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("Missing {field}")))?;
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("Invalid {field}")))
}
