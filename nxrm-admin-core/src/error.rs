//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Core layer error type
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Resource not found
    #[error("{kind} not found: {id}")]
    NotFound { kind: String, id: String },

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Non-success response from the remote API
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// Missing or rejected credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// network error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Bad client configuration (base URL, credentials)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Storage layer error (in-memory adapter, credential store)
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`].
    pub fn not_found(kind: &str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: kind.to_string(),
            id: id.into(),
        }
    }

    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::NotFound { .. } | Self::ValidationError(_) | Self::Unauthorized(_) => true,
            Self::ApiError { status, .. } => (400..500).contains(status),
            Self::NetworkError(_)
            | Self::SerializationError(_)
            | Self::InvalidConfig(_)
            | Self::StorageError(_) => false,
        }
    }

    /// Log this error at the level picked by [`CoreError::is_expected`].
    pub fn log(&self, context: &str) {
        if self.is_expected() {
            log::warn!("{context}: {self}");
        } else {
            log::error!("{context}: {self}");
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerializationError(e.to_string())
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_expected() {
        assert!(CoreError::not_found("Role", "nx-admin").is_expected());
        assert!(CoreError::ApiError {
            status: 400,
            message: "bad".to_string()
        }
        .is_expected());
        assert!(!CoreError::ApiError {
            status: 503,
            message: "down".to_string()
        }
        .is_expected());
        assert!(!CoreError::NetworkError("reset".to_string()).is_expected());
    }

    #[test]
    fn serializes_with_code_tag() {
        let json = serde_json::to_value(CoreError::ValidationError("x".to_string())).unwrap();
        assert_eq!(json["code"], "ValidationError");
        assert_eq!(json["details"], "x");
    }

    #[test]
    fn not_found_message_names_the_resource() {
        let err = CoreError::not_found("Cleanup policy", "weekly");
        assert_eq!(err.to_string(), "Cleanup policy not found: weekly");
    }
}
