//! Auth service calls folded into outcomes; users are reduced to `{ email, id }`.

use crate::auth::{AuthError, AuthProvider, ProviderSession, SignInResult};
use crate::classify::{classify_user, Outcome};
use crate::model::UserRow;

pub struct AccountService;

impl AccountService {
    pub async fn sign_up(
        auth: &dyn AuthProvider,
        email: &str,
        password: &str,
    ) -> (Outcome<UserRow>, Option<ProviderSession>) {
        match auth.sign_up(email, password).await {
            Ok(res) if res.user.as_ref().and_then(|u| u.identities.as_ref()).is_some_and(|i| i.is_empty()) => {
                tracing::warn!("sign_up: address already registered");
                (Outcome::Error, None)
            }
            raw => Self::signed_in("sign_up", raw),
        }
    }

    pub async fn sign_in(
        auth: &dyn AuthProvider,
        email: &str,
        password: &str,
    ) -> (Outcome<UserRow>, Option<ProviderSession>) {
        Self::signed_in("sign_in", auth.sign_in(email, password).await)
    }

    fn signed_in(
        op: &str,
        raw: Result<SignInResult, AuthError>,
    ) -> (Outcome<UserRow>, Option<ProviderSession>) {
        match raw {
            Ok(SignInResult { user, session }) => {
                let outcome = classify_user::<AuthError>(op, Ok(user));
                let session = if outcome.is_success() { session } else { None };
                (outcome, session)
            }
            Err(e) => (classify_user(op, Err(e)), None),
        }
    }

    /// Without a session there is nothing to revoke.
    pub async fn sign_out(auth: &dyn AuthProvider, access_token: Option<&str>) -> Outcome<()> {
        let Some(token) = access_token else {
            return Outcome::Success(());
        };
        match auth.sign_out(token).await {
            Ok(()) => Outcome::Success(()),
            Err(e) => {
                tracing::warn!(error = %e, "sign_out failed");
                Outcome::Error
            }
        }
    }

    pub async fn update_password(auth: &dyn AuthProvider, access_token: &str, password: &str) -> Outcome<UserRow> {
        classify_user("update_password", auth.update_password(access_token, password).await)
    }

    pub async fn current_user(auth: &dyn AuthProvider, access_token: Option<&str>) -> Outcome<UserRow> {
        let Some(token) = access_token else {
            tracing::debug!("no session cookie");
            return Outcome::Error;
        };
        classify_user("get_session", auth.get_user(token).await)
    }

    /// Look up the session's user, then remove the account with the privileged client.
    pub async fn delete_current_user(auth: &dyn AuthProvider, access_token: Option<&str>) -> Outcome<()> {
        let user = match Self::current_user(auth, access_token).await {
            Outcome::Success(user) => user,
            _ => return Outcome::Error,
        };
        match auth.delete_user(&user.id).await {
            Ok(()) => Outcome::Success(()),
            Err(e) => {
                tracing::warn!(error = %e, user_id = %user.id, "delete_user failed");
                Outcome::Error
            }
        }
    }
}
