//! Response helpers: outcome-to-status mapping and the session cookie.

use crate::classify::Outcome;
use crate::error::AppError;
use axum::{
    http::{header::SET_COOKIE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Cookie carrying the auth service access token.
pub const SESSION_COOKIE: &str = "sb-access-token";

const DEFAULT_SESSION_MAX_AGE: i64 = 3600;

pub fn success_ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn success_created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

/// Success is the value; nothing is 404; error is 500.
pub fn found<T>(outcome: Outcome<T>, what: impl Into<String>) -> Result<T, AppError> {
    match outcome {
        Outcome::Success(v) => Ok(v),
        Outcome::Nothing => Err(AppError::NotFound(what.into())),
        Outcome::Error => Err(AppError::Backend(what.into())),
    }
}

/// Existence pre-check before create: success is 409, error is 500, nothing lets the insert proceed.
pub fn absent<T>(outcome: Outcome<T>, what: impl Into<String>) -> Result<(), AppError> {
    match outcome {
        Outcome::Nothing => Ok(()),
        Outcome::Success(_) => Err(AppError::Conflict(what.into())),
        Outcome::Error => Err(AppError::Backend(what.into())),
    }
}

/// Anything but success is 500.
pub fn succeeded<T>(outcome: Outcome<T>, what: impl Into<String>) -> Result<T, AppError> {
    match outcome {
        Outcome::Success(v) => Ok(v),
        Outcome::Nothing | Outcome::Error => Err(AppError::Backend(what.into())),
    }
}

pub fn session_cookie(access_token: &str, max_age: Option<i64>) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        access_token,
        max_age.unwrap_or(DEFAULT_SESSION_MAX_AGE)
    )
}

pub fn cleared_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

/// Attach a `Set-Cookie` header to a response.
pub fn with_cookie(response: impl IntoResponse, cookie: &str) -> Result<Response, AppError> {
    let value = HeaderValue::from_str(cookie).map_err(|e| AppError::Backend(format!("session cookie: {e}")))?;
    let mut res = response.into_response();
    res.headers_mut().append(SET_COOKIE, value);
    Ok(res)
}
