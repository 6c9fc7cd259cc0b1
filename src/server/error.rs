//! Error types for the HTTP server and their JSON rendering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::catalog::ValidationError;
use crate::store::StoreError;

/// Failures while starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid bind address '{addr}': {reason}")]
    InvalidBindAddr { addr: String, reason: String },

    #[error("Could not find available port in range {start}-{end}")]
    NoFreePort { start: u16, end: u16 },

    #[error("try_bind() must be called before run()")]
    NotBound,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A request that could not be served.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Product '{id}' not found")]
    NotFound { id: String },

    #[error("Invalid {field}: {0}", field = .0.field())]
    Invalid(#[from] ValidationError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => ApiError::NotFound { id },
            StoreError::Invalid(err) => ApiError::Invalid(err),
            StoreError::Rejected(message) => ApiError::BadRequest(message),
            StoreError::Transport(message) => ApiError::Internal(message),
        }
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "not_found",
            ApiError::Invalid(_) => "invalid_product",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut error = serde_json::json!({
            "type": self.error_type(),
            "message": self.to_string(),
        });
        if let ApiError::Invalid(err) = &self {
            error["field"] = err.field().into();
        }
        if self.status_code().is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (self.status_code(), Json(serde_json::json!({ "error": error }))).into_response()
    }
}
