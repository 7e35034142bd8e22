//! JSON request body decoded from raw bytes, independent of `Content-Type`.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;

/// Decoded body. A body over the size limit is `Request body too large`; any
/// other read or decode failure is `Invalid request payload`.
#[derive(Debug)]
pub struct Payload<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "request body unreadable");
                if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    AppError::BodyTooLarge
                } else {
                    AppError::InvalidPayload
                }
            })?;
        serde_json::from_slice(&bytes).map(Payload).map_err(|e| {
            tracing::debug!(error = %e, "request body is not valid JSON for this resource");
            AppError::InvalidPayload
        })
    }
}
