//! `AuthProvider` over the managed auth service's REST API (`/auth/v1`).

use super::{AuthError, AuthProvider, ProviderSession, ProviderUser, SignInResult};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde_json::{json, Value};

#[derive(Clone)]
pub struct GoTrueClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    service_role_key: String,
}

impl GoTrueClient {
    pub fn new(base_url: &str, anon_key: &str, service_role_key: &str) -> Self {
        GoTrueClient {
            http: reqwest::Client::new(),
            base_url: format!("{}/auth/v1", base_url.trim_end_matches('/')),
            anon_key: anon_key.to_string(),
            service_role_key: service_role_key.to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Public-key request; `bearer` overrides the default bearer (the public key).
    fn public(&self, req: RequestBuilder, bearer: Option<&str>) -> RequestBuilder {
        req.header("apikey", &self.anon_key)
            .bearer_auth(bearer.unwrap_or(self.anon_key.as_str()))
    }

    fn admin(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
    }
}

/// Fails on non-2xx, carrying the service's message.
async fn checked(res: Response) -> Result<Response, AuthError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let message = res.text().await.unwrap_or_default();
    Err(AuthError::Service {
        status: status.as_u16(),
        message,
    })
}

/// Token grant and auto-confirmed sign-up return `{access_token, user, ...}`;
/// unconfirmed sign-up returns the bare user.
fn parse_sign_in(body: Value) -> Result<SignInResult, AuthError> {
    if body.get("access_token").is_some() {
        let session: ProviderSession =
            serde_json::from_value(body.clone()).map_err(|e| AuthError::Malformed(e.to_string()))?;
        let user = match body.get("user") {
            Some(Value::Null) | None => None,
            Some(u) => Some(serde_json::from_value(u.clone()).map_err(|e| AuthError::Malformed(e.to_string()))?),
        };
        return Ok(SignInResult {
            user,
            session: Some(session),
        });
    }
    if body.get("id").is_some() {
        let user: ProviderUser = serde_json::from_value(body).map_err(|e| AuthError::Malformed(e.to_string()))?;
        return Ok(SignInResult {
            user: Some(user),
            session: None,
        });
    }
    Ok(SignInResult::default())
}

#[async_trait]
impl AuthProvider for GoTrueClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignInResult, AuthError> {
        let req = self.public(self.http.post(self.url("/signup")), None);
        let res = checked(req.json(&json!({ "email": email, "password": password })).send().await?).await?;
        parse_sign_in(res.json().await?)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<SignInResult, AuthError> {
        let req = self.public(self.http.post(self.url("/token?grant_type=password")), None);
        let res = checked(req.json(&json!({ "email": email, "password": password })).send().await?).await?;
        parse_sign_in(res.json().await?)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let req = self.public(self.http.post(self.url("/logout")), Some(access_token));
        let res = req.send().await?;
        // Expired session: nothing left to revoke.
        if res.status() == StatusCode::UNAUTHORIZED {
            return Ok(());
        }
        checked(res).await?;
        Ok(())
    }

    async fn update_password(&self, access_token: &str, password: &str) -> Result<Option<ProviderUser>, AuthError> {
        let req = self.public(self.http.put(self.url("/user")), Some(access_token));
        let res = checked(req.json(&json!({ "password": password })).send().await?).await?;
        Ok(Some(res.json().await?))
    }

    async fn get_user(&self, access_token: &str) -> Result<Option<ProviderUser>, AuthError> {
        let req = self.public(self.http.get(self.url("/user")), Some(access_token));
        let res = req.send().await?;
        if matches!(res.status(), StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Ok(None);
        }
        let res = checked(res).await?;
        Ok(Some(res.json().await?))
    }

    async fn delete_user(&self, user_id: &str) -> Result<(), AuthError> {
        let req = self.admin(self.http.delete(self.url(&format!("/admin/users/{}", user_id))));
        checked(req.send().await?).await?;
        Ok(())
    }
}
