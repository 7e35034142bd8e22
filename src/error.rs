//! Typed errors and HTTP mapping.

use crate::model::Resource;
use crate::response::error_response;
use crate::store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Failures while bringing the application up or down.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Path id is not a non-negative integer. Holds the resource slug.
    #[error("Invalid {0} ID")]
    InvalidId(&'static str),
    #[error("Invalid request payload")]
    InvalidPayload,
    #[error("Request body too large")]
    BodyTooLarge,
    /// Holds the resource display name.
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    /// Classify a storage error for resource `T`: a missing row becomes `T not found`.
    pub fn from_store<T: Resource>(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppError::NotFound(T::NAME),
            other => AppError::Store(other),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidId(_) | AppError::InvalidPayload => StatusCode::BAD_REQUEST,
            AppError::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::NotFound(_) | AppError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "storage failure");
        }
        error_response(status, self.to_string())
    }
}
