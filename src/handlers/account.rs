//! `/auth` handlers. Almost everything is delegated to the auth service; these map its
//! answers to status codes, shape the user as `{ email, id }`, and manage the cookie.

use crate::error::AppError;
use crate::extractors::{JsonBody, SessionToken, SessionUser};
use crate::model::{Credentials, PasswordUpdate};
use crate::response::{cleared_session_cookie, session_cookie, succeeded, success_created, success_ok, with_cookie};
use crate::service::AccountService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

pub async fn sign_up(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Credentials>,
) -> Result<Response, AppError> {
    tracing::info!(email = %body.email, "POST sign up");
    let (outcome, session) = AccountService::sign_up(state.auth.as_ref(), &body.email, &body.password).await;
    let user = succeeded(outcome, format!("sign up {}", body.email))?;
    match session {
        Some(s) => with_cookie(success_created(user), &session_cookie(&s.access_token, s.expires_in)),
        None => Ok(success_created(user).into_response()),
    }
}

pub async fn sign_in(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Credentials>,
) -> Result<Response, AppError> {
    tracing::info!(email = %body.email, "POST sign in");
    let (outcome, session) = AccountService::sign_in(state.auth.as_ref(), &body.email, &body.password).await;
    let user = succeeded(outcome, format!("sign in {}", body.email))?;
    match session {
        Some(s) => with_cookie(success_ok(user), &session_cookie(&s.access_token, s.expires_in)),
        None => Ok(success_ok(user).into_response()),
    }
}

pub async fn sign_out(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
) -> Result<Response, AppError> {
    tracing::info!("POST sign out");
    succeeded(AccountService::sign_out(state.auth.as_ref(), token.as_deref()).await, "sign out")?;
    with_cookie(StatusCode::OK, &cleared_session_cookie())
}

pub async fn update_password(
    State(state): State<AppState>,
    session: SessionUser,
    JsonBody(body): JsonBody<PasswordUpdate>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(user_id = %session.user.id, "POST password update");
    let user = succeeded(
        AccountService::update_password(state.auth.as_ref(), &session.access_token, &body.password).await,
        format!("password update {}", session.user.id),
    )?;
    Ok(success_ok(user))
}

pub async fn delete_account(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
) -> Result<Response, AppError> {
    tracing::info!("DELETE account");
    succeeded(
        AccountService::delete_current_user(state.auth.as_ref(), token.as_deref()).await,
        "delete account",
    )?;
    with_cookie(StatusCode::NO_CONTENT, &cleared_session_cookie())
}

pub async fn current_session(session: SessionUser) -> impl IntoResponse {
    tracing::info!(user_id = %session.user.id, "GET session");
    success_ok(session.user)
}
