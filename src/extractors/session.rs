//! Session cookie and the user behind it.
//!
//! `SessionUser` only reads request parts, so in a handler it always runs before the
//! body is touched: an unauthenticated request is 401 even when its body is malformed.

use crate::classify::Outcome;
use crate::error::AppError;
use crate::model::UserRow;
use crate::response::SESSION_COOKIE;
use crate::service::AccountService;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::COOKIE, request::Parts, HeaderMap},
};

/// Access token from the session cookie, if any.
#[derive(Clone, Debug)]
pub struct SessionToken(pub Option<String>);

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| s.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(SessionToken(cookie_value(&parts.headers, SESSION_COOKIE)))
    }
}

/// Authenticated caller. Rejects with 401 when the session lookup yields no user.
#[derive(Clone, Debug)]
pub struct SessionUser {
    pub user: UserRow,
    pub access_token: String,
}

#[async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(token) = cookie_value(&parts.headers, SESSION_COOKIE) else {
            return Err(AppError::Unauthorized("no session cookie".into()));
        };
        match AccountService::current_user(state.auth.as_ref(), Some(&token)).await {
            Outcome::Success(user) => Ok(SessionUser {
                user,
                access_token: token,
            }),
            _ => Err(AppError::Unauthorized("session lookup yielded no user".into())),
        }
    }
}
