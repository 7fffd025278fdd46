use std::io;
use thiserror::Error;

/// Crate-wide error type.
///
/// The analysis pipeline itself is total; these errors only arise at the request
/// boundary (validation, configuration, decoding) and in batch execution.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents request validation errors (e.g., a score outside 0..=100).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g., an unparsable environment variable).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents standard input/output errors while reading requests.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents malformed JSON payloads.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Represents unexpected internal errors that indicate a bug.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            AppError::Validation(s) => AppError::Validation(s.clone()),
            AppError::Config(s) => AppError::Config(s.clone()),
            AppError::Io(e) => AppError::Io(io::Error::new(e.kind(), e.to_string())),
            AppError::Serialization(s) => AppError::Serialization(s.clone()),
            AppError::Internal(s) => AppError::Internal(s.clone()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("Worker task failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_maps_to_serialization() {
        let err: AppError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, AppError::Serialization(_)));
        assert!(err.to_string().starts_with("Serialization error: JSON error"));
    }

    #[test]
    fn test_clone_preserves_message() {
        let err = AppError::Io(io::Error::new(io::ErrorKind::NotFound, "missing.json"));
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }
}
