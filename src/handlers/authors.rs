//! `/authors` handlers.

use super::parse_id;
use crate::error::AppError;
use crate::extractors::{JsonBody, SessionUser};
use crate::model::{AuthorInsert, AuthorUpdate};
use crate::response::{absent, found, success_created, success_ok, succeeded};
use crate::service::LibraryService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

pub async fn read(
    State(state): State<AppState>,
    _session: SessionUser,
    Path(author_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(author_id = %author_id, "GET author");
    let author_id = parse_id(&author_id, "authorId")?;
    let author = found(
        LibraryService::get_author(state.store.as_ref(), author_id).await,
        format!("author {author_id}"),
    )?;
    Ok(success_ok(author))
}

pub async fn update(
    State(state): State<AppState>,
    _session: SessionUser,
    Path(author_id): Path<String>,
    JsonBody(body): JsonBody<AuthorUpdate>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(author_id = %author_id, "PUT author");
    let author_id = parse_id(&author_id, "authorId")?;
    let author = found(
        LibraryService::update_author(state.store.as_ref(), author_id, &body).await,
        format!("author {author_id}"),
    )?;
    Ok(success_ok(author))
}

pub async fn delete(
    State(state): State<AppState>,
    _session: SessionUser,
    Path(author_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(author_id = %author_id, "DELETE author");
    let author_id = parse_id(&author_id, "authorId")?;
    found(
        LibraryService::delete_author(state.store.as_ref(), author_id).await,
        format!("author {author_id}"),
    )?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create(
    State(state): State<AppState>,
    _session: SessionUser,
    JsonBody(body): JsonBody<AuthorInsert>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(author_id = body.author_id, "POST author");
    let what = format!("author {}", body.author_id);
    absent(LibraryService::get_author(state.store.as_ref(), body.author_id).await, &what)?;
    let author = succeeded(LibraryService::insert_author(state.store.as_ref(), &body).await, what)?;
    Ok(success_created(author))
}
