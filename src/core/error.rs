//! Error types for the client runtime.

use thiserror::Error;

use super::player::PlayerId;

/// Client runtime error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A redeck tried to replace a discard pile of a different size.
    ///
    /// The local board can no longer be trusted to match the server.
    #[error("redeck supplied {actual} card ids for a discard pile of {expected}")]
    RedeckMismatch { expected: usize, actual: usize },

    /// An inbound message was not valid JSON or did not match the protocol.
    #[error("malformed server event: {0}")]
    Decode(#[from] serde_json::Error),

    /// A move targeted a player that is not seated in this game.
    #[error("no seated player {0}")]
    UnknownPlayer(PlayerId),

    /// A lobby code did not contain exactly six digits.
    #[error("lobby code must contain exactly 6 digits, got {0:?}")]
    InvalidLobbyCode(String),

    /// The event or action channel closed.
    #[error("channel closed")]
    ChannelClosed,
}

impl Error {
    /// Fatal errors mean the local board mirror must be thrown away.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::RedeckMismatch { .. })
    }
}

/// Result type for client runtime operations.
pub type Result<T> = std::result::Result<T, Error>;
