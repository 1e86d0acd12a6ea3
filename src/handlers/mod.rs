//! HTTP handlers: authors, publishers, books, favorites, and account/session endpoints.

pub mod account;
pub mod authors;
pub mod books;
pub mod favorites;
pub mod publishers;

use crate::error::AppError;

/// Integer key from a path segment.
fn parse_id(raw: &str, what: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid {what} '{raw}'")))
}
