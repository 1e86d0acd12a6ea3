//! Router assembly: common probes, library resources, account endpoints.

mod account;
mod common;
mod library;

pub use account::account_routes;
pub use common::common_routes;
pub use library::library_routes;

use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    Router,
};
use std::any::Any;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

/// Request bodies above this size are rejected with 413 when a handler reads them,
/// which is after the session check.
pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(detail, "handler panicked");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

/// The full application: every route plus body limit, panic-to-500 and tracing layers.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(library_routes(state.clone()))
        .merge(account_routes(state))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}
