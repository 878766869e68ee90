//! # Gateway Error Types
//!
//! Typed error handling for the paygate-rs SDK.
//! All SDK operations return `Result<T, GatewayError>`.

use thiserror::Error;

/// Core error type for all SDK operations
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A field name was used that is not declared in the entity's schema.
    /// Always a programming error, never recoverable at runtime.
    #[error("Schema error: field `{field}` is not declared on {entity}")]
    Schema {
        entity: &'static str,
        field: String,
    },

    /// A value assigned to a field does not match its declared type or enum
    #[error("Type error: field `{field}` expects {expected}, got {got}")]
    FieldType {
        field: String,
        expected: &'static str,
        got: String,
    },

    /// One or more required fields are unset at request-build time
    #[error("Validation error: missing required field(s): {}", .missing.join(", "))]
    Validation { missing: Vec<String> },

    /// A response payload has the wrong shape (missing array key, etc.)
    #[error("Format error: {0}")]
    Format(String),

    /// A pagination link was followed that does not exist
    #[error("State error: {0}")]
    State(String),

    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network/HTTP error communicating with the gateway
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response from the gateway, with its structured error payload
    /// when one was returned
    #[error("Gateway error (status {status}): {message}")]
    Gateway {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl GatewayError {
    /// Returns true if this error indicates a bug in the calling code
    /// rather than a runtime condition
    pub fn is_programming_error(&self) -> bool {
        matches!(
            self,
            GatewayError::Schema { .. } | GatewayError::FieldType { .. } | GatewayError::State(_)
        )
    }

    /// Returns true if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::Network(_) => true,
            GatewayError::Gateway { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Result type alias for SDK operations
pub type GatewayResult<T> = Result<T, GatewayError>;
