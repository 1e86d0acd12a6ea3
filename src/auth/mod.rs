//! Managed auth service seam: sign-up, sign-in, sign-out, password change, session
//! lookup and admin account deletion.

mod gotrue;

pub use gotrue::GoTrueClient;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("auth request: {0}")]
    Http(#[from] reqwest::Error),
    #[error("auth service responded {status}: {message}")]
    Service { status: u16, message: String },
    #[error("auth response malformed: {0}")]
    Malformed(String),
}

/// User as reported by the auth service. Only `id` is guaranteed.
#[derive(Clone, Debug, Deserialize)]
pub struct ProviderUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Linked identities. The service answers a sign-up for an already registered
    /// address with a user whose identity list is empty.
    #[serde(default)]
    pub identities: Option<Vec<serde_json::Value>>,
}

/// Access token handed to the client as the session cookie.
#[derive(Clone, Debug, Deserialize)]
pub struct ProviderSession {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// Sign-in and sign-up answer. Sign-up without auto-confirmation carries no session.
#[derive(Clone, Debug, Default)]
pub struct SignInResult {
    pub user: Option<ProviderUser>,
    pub session: Option<ProviderSession>,
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignInResult, AuthError>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<SignInResult, AuthError>;
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
    async fn update_password(&self, access_token: &str, password: &str) -> Result<Option<ProviderUser>, AuthError>;
    /// `Ok(None)` when the token is not (or no longer) a valid session.
    async fn get_user(&self, access_token: &str) -> Result<Option<ProviderUser>, AuthError>;
    /// Privileged: removes the account regardless of session.
    async fn delete_user(&self, user_id: &str) -> Result<(), AuthError>;
}
