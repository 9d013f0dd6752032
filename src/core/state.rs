//! Board state: the client's mirror of one game round.
//!
//! ## Board
//!
//! Everything the server has told us about the current round:
//! - Seated players and which of them is the local player
//! - Round settings and join code
//! - Whose turn it is and in which phase
//! - Zones (deck, discard, melds, hands) with every card identity
//!
//! A `Board` is built fresh from each `start` event and is only mutated by
//! event dispatch.

use serde::{Deserialize, Serialize};

use super::card::{Card, CardId};
use super::config::GameSettings;
use super::player::{PlayerId, PlayerInfo, Seat};
use crate::zones::ZoneStore;

/// Per-turn sub-state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// The player must take a card from the deck or the discard pile.
    Draw,
    /// The player may meld and lay, and must finish by discarding.
    Play,
}

/// Whose turn it is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub player_id: PlayerId,
    pub phase: Phase,
}

/// The client's mirror of a game round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    /// Seated players, in seat order.
    pub players: Vec<PlayerInfo>,

    /// The player this client acts for.
    pub local_player: PlayerId,

    /// Code other players use to join.
    pub game_code: String,

    /// Round rules (fixed for the round).
    pub settings: GameSettings,

    /// `None` while dealing and after the round ends.
    pub turn: Option<Turn>,

    /// Card locations.
    pub zones: ZoneStore,
}

impl Board {
    /// Create a fresh board: every card face-down in the deck, empty hands.
    pub fn new(
        players: Vec<PlayerInfo>,
        local_player: PlayerId,
        deck: impl IntoIterator<Item = CardId>,
        game_code: impl Into<String>,
        settings: GameSettings,
    ) -> Self {
        let zones = ZoneStore::new(deck, players.len());
        Self {
            players,
            local_player,
            game_code: game_code.into(),
            settings,
            turn: None,
            zones,
        }
    }

    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Find a player's seat.
    #[must_use]
    pub fn seat_of(&self, player: &PlayerId) -> Option<Seat> {
        self.players
            .iter()
            .position(|p| &p.id == player)
            .map(|i| Seat::new(i as u8))
    }

    /// Seat of the local player, if seated.
    #[must_use]
    pub fn local_seat(&self) -> Option<Seat> {
        self.seat_of(&self.local_player)
    }

    /// The local player's hand (empty if not seated).
    #[must_use]
    pub fn local_hand(&self) -> &[Card] {
        self.local_seat().map_or(&[], |seat| self.zones.hand(seat))
    }

    /// Is the given card in the local player's hand?
    #[must_use]
    pub fn in_local_hand(&self, id: &CardId) -> bool {
        matches!(
            (self.zones.location_of(id), self.local_seat()),
            (Some(crate::zones::ZoneLocation::Hand(at)), Some(seat)) if at == seat
        )
    }

    /// Is it currently the local player's turn?
    #[must_use]
    pub fn is_local_turn(&self) -> bool {
        self.turn
            .as_ref()
            .is_some_and(|turn| turn.player_id == self.local_player)
    }

    /// Phase of the local player's turn, `None` when it is not their turn.
    #[must_use]
    pub fn local_phase(&self) -> Option<Phase> {
        self.turn
            .as_ref()
            .filter(|turn| turn.player_id == self.local_player)
            .map(|turn| turn.phase)
    }

    /// Seats rotated so the local player comes first, for table layout.
    ///
    /// Falls back to seat order if the local player is not seated.
    #[must_use]
    pub fn seats_from_local(&self) -> Vec<Seat> {
        let count = self.player_count();
        let start = self.local_seat().map_or(0, Seat::index);
        (0..count)
            .map(|offset| Seat::new(((start + offset) % count) as u8))
            .collect()
    }
}
