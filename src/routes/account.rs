//! Account and session routes under `/auth`.

use crate::handlers::account::{current_session, delete_account, sign_in, sign_out, sign_up, update_password};
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn account_routes(state: AppState) -> Router {
    Router::new()
        .route("/auth/signup", post(sign_up))
        .route("/auth/signin", post(sign_in))
        .route("/auth/signout", post(sign_out))
        .route("/auth/update", post(update_password))
        .route("/auth/delete", delete(delete_account))
        .route("/auth/session", get(current_session))
        .with_state(state)
}
