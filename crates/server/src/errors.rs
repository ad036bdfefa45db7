use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::{auth::AuthError, errors::ServiceError};
use thiserror::Error;
use tracing::error;

/// Error response rendered as `{"error": true, "message": "..."}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    /// Body extraction failures keep the extractor's status but use our body shape.
    pub fn from_rejection(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody::new(self.message))).into_response()
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        let code = e.code();
        match e {
            AuthError::Unauthorized => Self::new(StatusCode::UNAUTHORIZED, "Unauthorized Access"),
            AuthError::Forbidden => Self::new(StatusCode::FORBIDDEN, "Unauthorized Access"),
            AuthError::InvalidClaims(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            AuthError::TokenError(msg) => {
                error!(code, error = %msg, "token signing failed");
                Self::internal()
            }
        }
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            ServiceError::Db(msg) => {
                error!(error = %msg, "store operation failed");
                Self::internal()
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
