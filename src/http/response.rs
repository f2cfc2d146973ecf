//! Error responses.
//!
//! # Status Mapping
//! - Body or query string does not decode → 400 Bad Request
//! - Validation failure → 400 Bad Request
//! - Storage unreachable or rejected the call → 502 Bad Gateway
//! - Storage timed out → 504 Gateway Timeout
//! - Storage answer has the wrong shape → 500 Internal Server Error

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::crud::CrudError;
use crate::storage::StorageError;

/// JSON error body returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub kind: String,
    pub code: u16,
}

impl ApiError {
    pub fn new(status: StatusCode, kind: &str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            kind: kind.to_string(),
            code: status.as_u16(),
        }
    }

    /// The caller's body is not valid JSON for the expected request shape.
    pub fn decode(err: serde_json::Error) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "decode_failed",
            format!("invalid JSON in request body: {}", err),
        )
    }

    /// The query string does not match the expected parameters.
    pub fn query(rejection: QueryRejection) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "decode_failed",
            format!("invalid query string: {}", rejection.body_text()),
        )
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<CrudError> for ApiError {
    fn from(err: CrudError) -> Self {
        let status = match &err {
            CrudError::Validation(_) => StatusCode::BAD_REQUEST,
            CrudError::Storage { source, .. } => match source {
                StorageError::Timeout => StatusCode::GATEWAY_TIMEOUT,
                StorageError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_GATEWAY,
            },
            CrudError::ResponseDecode { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.kind(), err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}
