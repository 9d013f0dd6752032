//! Core client types: cards, players, settings, board state, errors.
//!
//! This module contains the building blocks every other module shares.
//! Nothing here talks to the network or schedules work.

pub mod card;
pub mod player;
pub mod config;
pub mod state;
pub mod error;

pub use card::{Card, CardId, Face, Rank, Suit};
pub use player::{PlayerId, PlayerInfo, PlayerMap, Seat};
pub use config::{AceRank, DeckExhaust, FirstTurn, GameSettings};
pub use state::{Board, Phase, Turn};
pub use error::{Error, Result};
