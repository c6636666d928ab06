//! Game error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by the card generator, room document and draw engine.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    /// Draw requested with nothing left in the pool.
    #[error("no numbers left to draw")]
    PoolExhausted,

    /// Draw or join requested after the tombola was won.
    #[error("game already finished")]
    GameAlreadyFinished,

    /// The room document failed its shape check.
    #[error("invalid room state: {0}")]
    InvalidRoomState(String),

    #[error("participant already exists")]
    ParticipantAlreadyExists,

    #[error("participant name can't be empty")]
    InvalidParticipantName,

    #[error("can't hold {requested} cards (1-{max} allowed)")]
    InvalidCardCount { requested: usize, max: usize },

    #[error("room is full")]
    RoomFull,

    #[error("wrong admin password")]
    Unauthorized,
}

impl GameError {
    /// Message safe to show to a participant.
    ///
    /// Invalid state details describe the stored document and stay in logs.
    pub fn client_message(&self) -> String {
        match self {
            GameError::InvalidRoomState(_) => "Room is unavailable".to_string(),
            _ => self.to_string(),
        }
    }

    /// Whether the error reports a draw that was skipped rather than refused.
    #[must_use]
    pub fn is_draw_skip(&self) -> bool {
        matches!(self, GameError::PoolExhausted | GameError::GameAlreadyFinished)
    }
}

/// Result type for game operations
pub type GameResult<T> = Result<T, GameError>;
