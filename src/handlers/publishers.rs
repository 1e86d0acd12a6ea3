//! `/publishers` handlers.

use super::parse_id;
use crate::error::AppError;
use crate::extractors::{JsonBody, SessionUser};
use crate::model::{PublisherInsert, PublisherUpdate};
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
    Path(publisher_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(publisher_id = %publisher_id, "GET publisher");
    let publisher_id = parse_id(&publisher_id, "publisherId")?;
    let publisher = found(
        LibraryService::get_publisher(state.store.as_ref(), publisher_id).await,
        format!("publisher {publisher_id}"),
    )?;
    Ok(success_ok(publisher))
}

pub async fn update(
    State(state): State<AppState>,
    _session: SessionUser,
    Path(publisher_id): Path<String>,
    JsonBody(body): JsonBody<PublisherUpdate>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(publisher_id = %publisher_id, "PUT publisher");
    let publisher_id = parse_id(&publisher_id, "publisherId")?;
    let publisher = found(
        LibraryService::update_publisher(state.store.as_ref(), publisher_id, &body).await,
        format!("publisher {publisher_id}"),
    )?;
    Ok(success_ok(publisher))
}

pub async fn delete(
    State(state): State<AppState>,
    _session: SessionUser,
    Path(publisher_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(publisher_id = %publisher_id, "DELETE publisher");
    let publisher_id = parse_id(&publisher_id, "publisherId")?;
    found(
        LibraryService::delete_publisher(state.store.as_ref(), publisher_id).await,
        format!("publisher {publisher_id}"),
    )?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create(
    State(state): State<AppState>,
    _session: SessionUser,
    JsonBody(body): JsonBody<PublisherInsert>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(publisher_id = body.publisher_id, "POST publisher");
    let what = format!("publisher {}", body.publisher_id);
    absent(LibraryService::get_publisher(state.store.as_ref(), body.publisher_id).await, &what)?;
    let publisher = succeeded(LibraryService::insert_publisher(state.store.as_ref(), &body).await, what)?;
    Ok(success_created(publisher))
}
