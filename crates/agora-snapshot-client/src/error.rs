//! Error types for the snapshot client

use thiserror::Error;

/// Snapshot client error
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server returned an error
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// No balance indexed for the requested key
    #[error("Balance not found: {0}")]
    NotFound(String),

    /// Server returned a balance that is not a decimal integer
    #[error("Invalid balance string: {0}")]
    InvalidBalance(String),
}

/// Result type for snapshot operations
pub type Result<T> = std::result::Result<T, SnapshotError>;
