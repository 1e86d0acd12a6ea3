//! `/favorites` handlers, always scoped to the session's user.

use crate::error::AppError;
use crate::extractors::{JsonBody, SessionUser};
use crate::model::{FavoriteMove, FavoriteRequest};
use crate::response::{absent, found, success_created, success_ok, succeeded};
use crate::service::LibraryService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};

pub async fn list(State(state): State<AppState>, session: SessionUser) -> Result<impl IntoResponse, AppError> {
    let user_id = session.user.id;
    tracing::info!(user_id = %user_id, "GET favorites");
    let books = found(
        LibraryService::list_favorites(state.store.as_ref(), &user_id).await,
        format!("favorites of {user_id}"),
    )?;
    Ok(success_ok(books))
}

pub async fn create(
    State(state): State<AppState>,
    session: SessionUser,
    JsonBody(body): JsonBody<FavoriteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = session.user.id;
    tracing::info!(user_id = %user_id, isbn = %body.isbn, "POST favorite");
    let what = format!("favorite {} of {}", body.isbn, user_id);
    absent(
        LibraryService::get_favorite(state.store.as_ref(), &user_id, &body.isbn).await,
        &what,
    )?;
    let book = succeeded(
        LibraryService::insert_favorite(state.store.as_ref(), &user_id, &body.isbn).await,
        what,
    )?;
    Ok(success_created(book))
}

pub async fn update(
    State(state): State<AppState>,
    session: SessionUser,
    JsonBody(body): JsonBody<FavoriteMove>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = session.user.id;
    tracing::info!(user_id = %user_id, from = %body.isbn_from, to = %body.isbn_to, "PUT favorite");
    let book = found(
        LibraryService::move_favorite(state.store.as_ref(), &user_id, &body.isbn_from, &body.isbn_to).await,
        format!("favorite {} of {}", body.isbn_from, user_id),
    )?;
    Ok(success_ok(book))
}

pub async fn delete(
    State(state): State<AppState>,
    session: SessionUser,
    JsonBody(body): JsonBody<FavoriteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = session.user.id;
    tracing::info!(user_id = %user_id, isbn = %body.isbn, "DELETE favorite");
    found(
        LibraryService::delete_favorite(state.store.as_ref(), &user_id, &body.isbn).await,
        format!("favorite {} of {}", body.isbn, user_id),
    )?;
    Ok(StatusCode::NO_CONTENT)
}
