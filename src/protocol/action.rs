//! Outbound client actions.
//!
//! Actions are requests: the client never applies them locally. The server
//! answers a legal request with `move`/`turn` events and ignores an illegal one.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::card::CardId;
use crate::core::config::GameSettings;
use crate::core::error::Result;

/// Card ids carried by a `meld` or `lay` request.
pub type CardIds = SmallVec<[CardId; 8]>;

/// Add or remove an AI seat in the lobby.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiRequest {
    Add,
    Remove,
}

/// A message to the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientAction {
    /// Reply to `ping`.
    Pong,
    Name { name: String },
    Ai { action: AiRequest },
    /// Join a lobby by its six digit code.
    Join { code: String },
    Start,
    Draw { card_id: CardId },
    Meld { card_ids: CardIds },
    Lay { card_ids: CardIds, meld_number: usize },
    Discard { card_id: CardId },
    Settings { settings: GameSettings },
}

impl ClientAction {
    /// Encode as wire JSON.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
