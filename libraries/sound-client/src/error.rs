//! Error types for the episode API client.

use thiserror::Error;

/// Errors that can occur when talking to the episode API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Episode does not exist
    #[error("Episode not found: {0}")]
    NotFound(String),

    /// Invalid API URL
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Record is well-formed JSON but cannot become an episode
    #[error("Invalid episode record {id}: {reason}")]
    InvalidRecord { id: String, reason: String },

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
