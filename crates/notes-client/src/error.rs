//! Error types for notes-client

use thiserror::Error;

/// Result type alias using notes-client's error
pub type Result<T> = std::result::Result<T, ClientError>;

/// Failures talking to the Notes API
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not complete or the response could not be decoded
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The server has no note with that id
    #[error("Note not found")]
    NotFound,

    /// Any other non-success status
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Base URL is unusable
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}
