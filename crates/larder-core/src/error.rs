//! Error types for Larder.
//!
//! Every failure a request can hit maps to one of these variants. Duplicate adds and
//! deletes of absent names are normal outcomes and never show up here.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the Larder library.
#[derive(Debug, Error)]
pub enum LarderError {
    // Persistence errors
    #[error("Ingredient store unavailable at {path:?}: {message}")]
    StoreUnavailable {
        message: String,
        path: Option<PathBuf>,
    },

    // Capability errors
    #[error("Name normalization unavailable: {message}")]
    NormalizationUnavailable { message: String },

    #[error("Description synthesis unavailable: {message}")]
    SynthesisUnavailable { message: String },

    // Network errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    // Validation errors
    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Invalid params: {message}")]
    InvalidParams { message: String },

    // Generic errors
    #[error("{0}")]
    Other(String),
}

/// Result type alias for Larder operations.
pub type Result<T> = std::result::Result<T, LarderError>;

impl From<std::io::Error> for LarderError {
    fn from(err: std::io::Error) -> Self {
        LarderError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for LarderError {
    fn from(err: serde_json::Error) -> Self {
        LarderError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<reqwest::Error> for LarderError {
    fn from(err: reqwest::Error) -> Self {
        LarderError::Network {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl LarderError {
    /// Create a store error with path context.
    pub fn store(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        LarderError::StoreUnavailable {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Create a validation error for a missing or empty field.
    pub fn missing_field(field: &str) -> Self {
        LarderError::Validation {
            field: field.to_string(),
            message: "missing or empty".to_string(),
        }
    }

    /// Whether the caller sent a bad request (as opposed to a server-side failure).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            LarderError::Validation { .. } | LarderError::InvalidParams { .. }
        )
    }

    /// Convert to a JSON-RPC error code.
    ///
    /// Standard codes:
    /// - -32602: Invalid params (validation failures)
    /// - -32603: Internal error
    ///
    /// Application codes:
    /// - -32000: Network/connectivity error
    /// - -32010: Ingredient store unavailable
    /// - -32011: Name normalization unavailable
    /// - -32012: Description synthesis unavailable
    pub fn to_rpc_error_code(&self) -> i32 {
        match self {
            LarderError::Validation { .. } | LarderError::InvalidParams { .. } => -32602,
            LarderError::Network { .. } => -32000,
            LarderError::StoreUnavailable { .. } => -32010,
            LarderError::NormalizationUnavailable { .. } => -32011,
            LarderError::SynthesisUnavailable { .. } => -32012,
            _ => -32603,
        }
    }
}
