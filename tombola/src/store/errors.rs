//! Store error types.

use thiserror::Error;

use crate::game::GameError;

/// Room store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored data is not a room document
    #[error("Corrupt room document {name}: {reason}")]
    Corrupt { name: String, reason: String },

    /// Room not found
    #[error("Room not found: {0}")]
    RoomNotFound(String),

    /// Room already exists
    #[error("Room already exists: {0}")]
    RoomAlreadyExists(String),

    /// Invalid room configuration
    #[error("Invalid room configuration: {0}")]
    InvalidConfig(String),

    /// Game rule rejected the operation
    #[error(transparent)]
    Game(#[from] GameError),
}

impl StoreError {
    /// Get a client-safe error message that doesn't leak storage details
    pub fn client_message(&self) -> String {
        match self {
            StoreError::Io(_) | StoreError::Serialization(_) | StoreError::Corrupt { .. } => {
                "Internal storage error".to_string()
            }
            StoreError::Game(err) => err.client_message(),
            _ => self.to_string(),
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
