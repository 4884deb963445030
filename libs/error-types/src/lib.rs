//! Unified error handling for the FitLife client
//!
//! Provides consistent error types shared by the gateway, resource clients,
//! and view-state controllers.

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Unified error type for client-side operations
#[derive(Error, Debug, Clone)]
pub enum ClientError {
    /// Transport-level failure, no HTTP response was received
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status with the best available message
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Local validation failure, blocked before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found / no data
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or expired credential detected client-side
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Response body could not be deserialized
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ClientError {
    /// HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this error means the credential is missing or rejected
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
            || matches!(self.status(), Some(401) | Some(403))
    }

    /// Whether this failure never left the client
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Unauthorized(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}
