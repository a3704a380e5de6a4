//! Client error types.

use thiserror::Error;

/// Errors that can occur when talking to the grading backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error (connection refused, timeout, TLS, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// A success response whose body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// The client could not be constructed or a request could not be built.
    #[error("client setup error: {0}")]
    Setup(String),
}

impl ClientError {
    /// HTTP status of an [`ClientError::Api`] failure.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
