//! Error types for the classification client.

use thiserror::Error;

/// Errors raised while talking to the endpoint, reading files or touching storage.
///
/// None of these are fatal: the controller turns them into notifications and
/// leaves the staged image in place.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Network-level failure (connection refused, aborted fetch, ...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body was not the JSON we expected
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The selected file could not be read
    #[error("File read error: {0}")]
    FileRead(String),

    /// Persistent key-value storage refused a read or write
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ClientError {
    /// Create a transport error with a message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create a file read error with a message.
    pub fn file_read(message: impl Into<String>) -> Self {
        Self::FileRead(message.into())
    }

    /// Create a storage error with a message.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}
