//! JSON body extractor. A body over the router's limit is 413; every other failure is a bare 400.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{body::Bytes, extract::FromRequest, extract::Request, http::StatusCode};
use serde::de::DeserializeOwned;

/// Body that parsed into `T`. A literal `null` body counts as no body.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge(e.body_text())
            } else {
                AppError::BadRequest(format!("read body: {e}"))
            }
        })?;
        match serde_json::from_slice::<Option<T>>(&bytes) {
            Ok(Some(v)) => Ok(JsonBody(v)),
            Ok(None) => Err(AppError::BadRequest("body is null".into())),
            Err(e) => Err(AppError::BadRequest(format!("parse body: {e}"))),
        }
    }
}
