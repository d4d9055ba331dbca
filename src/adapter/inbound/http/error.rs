//! Defines the `ApiError` type for the HTTP server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::domain::DomainError;
use crate::port::{FailureKind, ProviderError};

/// An error that can be converted into an HTTP response.
#[derive(Debug)]
pub enum ApiError {
    /// The request was well-formed but semantically invalid.
    UnprocessableEntity(String),

    /// The upstream flight provider failed.
    BadGateway {
        provider: String,
        kind: FailureKind,
        message: String,
    },
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        ApiError::BadGateway {
            provider: err.provider,
            kind: err.kind,
            message: err.message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ApiError::UnprocessableEntity(message) => {
                (StatusCode::UNPROCESSABLE_ENTITY, json!({ "error": message }))
            }
            ApiError::BadGateway {
                provider,
                kind,
                message,
            } => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "error": message,
                    "provider": provider,
                    "kind": kind,
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
