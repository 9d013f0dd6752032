//! Inbound server events.
//!
//! Every message is a JSON object tagged by `type`. Types this client does
//! not know decode to [`ServerEvent::Unrecognized`] so the pacer can log and
//! drop them without failing the connection.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::card::{Card, CardId};
use crate::core::config::GameSettings;
use crate::core::error::Result;
use crate::core::player::{PlayerId, PlayerInfo};
use crate::core::state::Phase;

/// Lobby snapshot sent before a round starts and after it ends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lobby {
    pub players: Vec<PlayerInfo>,
    /// The local player.
    pub current_player_id: PlayerId,
    pub code: String,
    #[serde(default)]
    pub settings: GameSettings,
}

/// Where the cards of a `move` event land.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MoveDestination {
    /// Into a player's hand. Position 0 is the leftmost card.
    Player { player_id: PlayerId, position: usize },
    /// Into a meld. A meld number past the last meld starts a new one.
    Meld { meld_number: usize, position: usize },
    /// Onto the discard pile.
    Discard,
}

/// A message from the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Liveness probe; answered with a `pong` without queueing.
    Ping,

    Lobby { lobby: Lobby },

    /// A new round: every card is in the deck face-down, hands are empty.
    Start {
        players: Vec<PlayerInfo>,
        current_player_id: PlayerId,
        card_ids: Vec<CardId>,
        game_code: String,
        #[serde(default)]
        settings: GameSettings,
    },

    Turn { player_id: PlayerId, state: Phase },

    /// Cards moved. A `face` on a card reveals it.
    Move {
        cards: Vec<Card>,
        destination: MoveDestination,
    },

    /// The discard pile was turned into a new deck under fresh identities.
    Redeck { new_card_ids: Vec<CardId> },

    End {
        #[serde(default)]
        winner_id: Option<PlayerId>,
        #[serde(default)]
        hand_values: FxHashMap<PlayerId, i64>,
    },

    #[serde(other)]
    Unrecognized,
}

/// Event type, used to look up pacing delays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Ping,
    Lobby,
    Start,
    Turn,
    Move,
    Redeck,
    End,
    Unrecognized,
}

impl ServerEvent {
    /// Decode one message.
    pub fn decode(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Encode as wire JSON.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            ServerEvent::Ping => EventKind::Ping,
            ServerEvent::Lobby { .. } => EventKind::Lobby,
            ServerEvent::Start { .. } => EventKind::Start,
            ServerEvent::Turn { .. } => EventKind::Turn,
            ServerEvent::Move { .. } => EventKind::Move,
            ServerEvent::Redeck { .. } => EventKind::Redeck,
            ServerEvent::End { .. } => EventKind::End,
            ServerEvent::Unrecognized => EventKind::Unrecognized,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventKind::Ping => "ping",
            EventKind::Lobby => "lobby",
            EventKind::Start => "start",
            EventKind::Turn => "turn",
            EventKind::Move => "move",
            EventKind::Redeck => "redeck",
            EventKind::End => "end",
            EventKind::Unrecognized => "unrecognized",
        };
        f.write_str(name)
    }
}
