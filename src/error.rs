//! Domain-specific error types for prompt-enhancer

use thiserror::Error;

/// Main error type for the prompt enhancement service
#[derive(Error, Debug)]
pub enum EnhancerError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Malformed structured input handed to the transformer or the API.
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid parameters: {message}")]
    InvalidParams { message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Timeout error: {operation} timed out after {timeout_ms}ms")]
    Timeout { operation: String, timeout_ms: u64 },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl EnhancerError {
    pub fn validation(message: impl Into<String>) -> Self {
        EnhancerError::Validation {
            message: message.into(),
        }
    }

    /// Short machine-readable label used in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            EnhancerError::Config { .. } => "config",
            EnhancerError::Validation { .. } => "validation",
            EnhancerError::InvalidParams { .. } => "invalid_params",
            EnhancerError::Unauthorized { .. } => "unauthorized",
            EnhancerError::Storage { .. } => "storage",
            EnhancerError::Serialization { .. } => "serialization",
            EnhancerError::Timeout { .. } => "timeout",
            EnhancerError::Internal { .. } => "internal",
        }
    }
}

impl From<anyhow::Error> for EnhancerError {
    fn from(err: anyhow::Error) -> Self {
        EnhancerError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for EnhancerError {
    fn from(err: serde_json::Error) -> Self {
        EnhancerError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<rusqlite::Error> for EnhancerError {
    fn from(err: rusqlite::Error) -> Self {
        EnhancerError::Storage {
            message: err.to_string(),
        }
    }
}

impl From<chrono::ParseError> for EnhancerError {
    fn from(err: chrono::ParseError) -> Self {
        EnhancerError::Storage {
            message: format!("Stored timestamp is not RFC 3339: {}", err),
        }
    }
}

impl From<tokio::task::JoinError> for EnhancerError {
    fn from(err: tokio::task::JoinError) -> Self {
        EnhancerError::Internal {
            message: format!("Blocking task failed: {}", err),
        }
    }
}

/// Result type alias for prompt-enhancer operations
pub type Result<T> = std::result::Result<T, EnhancerError>;
