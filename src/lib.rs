//! # rummy-client
//!
//! Client-side runtime for a multiplayer rummy game played against an
//! authoritative server over a JSON message channel.
//!
//! ## Design Principles
//!
//! 1. **Server-Authoritative**: The client mirrors the board; it never
//!    applies its own requests. Every card movement arrives as an event.
//!
//! 2. **One Zone Per Card**: Every card identity lives in exactly one zone.
//!    The zone store keeps an identity index in lockstep with the zones.
//!
//! 3. **Paced Application**: Events are released one at a time with
//!    type-specific pauses so the table animates at a readable pace.
//!
//! ## Modules
//!
//! - `core`: Cards, players, settings, board state, errors
//! - `zones`: Card/zone store and zone transitions (move, redeck)
//! - `rules`: Meld legality (sets, runs, lay targets)
//! - `protocol`: JSON wire events and actions
//! - `pacer`: Event pacer and its async driver
//! - `client`: Turn/action state machine and local input
//!
//! ## Example
//!
//! ```
//! use rummy_client::{Client, EventSink, ServerEvent};
//!
//! let mut client = Client::new();
//! let start = ServerEvent::decode(r#"{
//!     "type": "start",
//!     "players": [{"id": "p1", "name": "Ann", "human": true}],
//!     "current_player_id": "p1",
//!     "card_ids": ["a", "b", "c"],
//!     "game_code": "123456",
//!     "settings": {}
//! }"#).unwrap();
//! client.handle_event(start).unwrap();
//!
//! assert_eq!(client.board().unwrap().zones.deck().len(), 3);
//! ```

pub mod core;
pub mod zones;
pub mod rules;
pub mod protocol;
pub mod pacer;
pub mod client;

// Re-export commonly used types
pub use crate::core::{
    Card, CardId, Face, Rank, Suit,
    PlayerId, PlayerInfo, PlayerMap, Seat,
    AceRank, DeckExhaust, FirstTurn, GameSettings,
    Board, Phase, Turn,
    Error, Result,
};

pub use crate::zones::{Placement, Relocation, Retarget, ZoneLocation, ZonePosition, ZoneStore};

pub use crate::rules::{can_meld_selection, melds_for_lay, MeldRules};

pub use crate::protocol::{AiRequest, ClientAction, EventKind, Lobby, MoveDestination, ServerEvent};

pub use crate::pacer::{EventPacer, EventSink, PacerConfig, PacerDriver, Session};

pub use crate::client::{Client, ClientState, PrimaryAction, UiState};
