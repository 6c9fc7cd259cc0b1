//! Errors surfaced by record stores.

use thiserror::Error;

use crate::catalog::ValidationError;

/// Failure of a single store call.
///
/// Fetch failures end up as text in the fetch snapshot; mutation failures
/// are handed back to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The targeted id does not exist.
    #[error("product '{id}' not found")]
    NotFound { id: String },

    /// Field validation failed before the call was issued.
    #[error("invalid product: {0}")]
    Invalid(#[from] ValidationError),

    /// The backend refused the payload.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// Network or server failure.
    #[error("transport error: {0}")]
    Transport(String),
}

impl StoreError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Stable machine-readable tag for logs and client-side handling.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Invalid(_) => "invalid_product",
            Self::Rejected(_) => "rejected",
            Self::Transport(_) => "transport_error",
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_convert() {
        let err: StoreError = ValidationError::EmptyName.into();
        assert_eq!(err.error_type(), "invalid_product");
        assert_eq!(
            err.to_string(),
            "invalid product: name must not be empty or whitespace"
        );
    }

    #[test]
    fn not_found_mentions_id() {
        let err = StoreError::not_found("abc");
        assert_eq!(err.to_string(), "product 'abc' not found");
        assert_eq!(err.error_type(), "not_found");
    }
}
