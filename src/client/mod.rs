//! Client runtime: the turn/action state machine around a board.
//!
//! - `state`: [`Client`], [`ClientState`] and the per-game [`UiState`]
//! - `dispatch`: applying paced server events ([`EventSink`](crate::pacer::EventSink))
//! - `controls`: local input, primary action, lobby requests
//!
//! The board is written only by event dispatch. Input writes the selection
//! and UI flags and queues requests in the outbox.

pub mod state;
pub mod dispatch;
pub mod controls;

pub use state::{Client, ClientState, Game, PrimaryAction, Selection, UiState};
pub use controls::LOBBY_CODE_LEN;
