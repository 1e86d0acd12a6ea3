//! `/books` handlers. Reads are public; writes need a session.

use crate::error::AppError;
use crate::extractors::{JsonBody, SessionUser};
use crate::model::{BookInsert, BookUpdate};
use crate::response::{absent, found, success_created, success_ok, succeeded};
use crate::service::LibraryService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

fn non_empty(isbn: String) -> Result<String, AppError> {
    let isbn = isbn.trim().to_string();
    if isbn.is_empty() {
        return Err(AppError::BadRequest("isbn is empty".into()));
    }
    Ok(isbn)
}

pub async fn read(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(isbn = %isbn, "GET book");
    let isbn = non_empty(isbn)?;
    let book = found(LibraryService::get_book(state.store.as_ref(), &isbn).await, format!("book {isbn}"))?;
    Ok(success_ok(book))
}

pub async fn update(
    State(state): State<AppState>,
    _session: SessionUser,
    Path(isbn): Path<String>,
    JsonBody(body): JsonBody<BookUpdate>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(isbn = %isbn, "PUT book");
    let isbn = non_empty(isbn)?;
    let book = found(
        LibraryService::update_book(state.store.as_ref(), &isbn, &body).await,
        format!("book {isbn}"),
    )?;
    Ok(success_ok(book))
}

pub async fn delete(
    State(state): State<AppState>,
    _session: SessionUser,
    Path(isbn): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(isbn = %isbn, "DELETE book");
    let isbn = non_empty(isbn)?;
    found(LibraryService::delete_book(state.store.as_ref(), &isbn).await, format!("book {isbn}"))?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create(
    State(state): State<AppState>,
    _session: SessionUser,
    JsonBody(body): JsonBody<BookInsert>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(isbn = %body.isbn, "POST book");
    let body = BookInsert {
        isbn: non_empty(body.isbn)?,
        ..body
    };
    let what = format!("book {}", body.isbn);
    absent(LibraryService::get_book(state.store.as_ref(), &body.isbn).await, &what)?;
    let book = succeeded(LibraryService::insert_book(state.store.as_ref(), &body).await, what)?;
    Ok(success_created(book))
}
