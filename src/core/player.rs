//! Player identification and per-seat data storage.
//!
//! ## PlayerId
//!
//! Opaque, server-issued token identifying a player across lobby and game.
//!
//! ## Seat
//!
//! Position of a player at the table (0-based, in the order the server
//! listed players in the `start` event).
//!
//! ## PlayerMap
//!
//! Per-seat storage backed by `Vec`, indexed by `Seat`. The zone store keeps
//! one hand per seat in it.

use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Opaque, server-issued player identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create a player ID from any string-like token.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player({})", self.0)
    }
}

/// Seat index at the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Seat(pub u8);

impl Seat {
    /// Create a new seat.
    #[must_use]
    pub const fn new(seat: u8) -> Self {
        Self(seat)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all seats for a table of `player_count` players.
    ///
    /// ```
    /// use rummy_client::core::Seat;
    ///
    /// let seats: Vec<_> = Seat::all(3).collect();
    /// assert_eq!(seats, vec![Seat::new(0), Seat::new(1), Seat::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = Seat> {
        (0..player_count.min(u8::MAX as usize) as u8).map(Seat)
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// Public information about a player, as listed in a lobby or a `start` event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub id: PlayerId,
    pub name: String,
    pub human: bool,
}

impl PlayerInfo {
    /// Create a human player.
    pub fn human(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: PlayerId::new(id),
            name: name.into(),
            human: true,
        }
    }

    /// Create an AI player.
    pub fn ai(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: PlayerId::new(id),
            name: name.into(),
            human: false,
        }
    }
}

/// Per-seat data storage.
///
/// ```
/// use rummy_client::core::{PlayerMap, Seat};
///
/// let hands: PlayerMap<Vec<&str>> = PlayerMap::new(3, |seat| vec!["?"; seat.index()]);
/// assert_eq!(hands[Seat::new(2)].len(), 2);
/// assert!(hands.get(Seat::new(3)).is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// One entry per seat, built from the seat.
    pub fn new(player_count: usize, factory: impl Fn(Seat) -> T) -> Self {
        Self {
            data: Seat::all(player_count).map(factory).collect(),
        }
    }

    /// One default entry per seat.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// Get the number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a seat's data, if the seat exists.
    #[must_use]
    pub fn get(&self, seat: Seat) -> Option<&T> {
        self.data.get(seat.index())
    }

    /// Get a mutable reference to a seat's data, if the seat exists.
    pub fn get_mut(&mut self, seat: Seat) -> Option<&mut T> {
        self.data.get_mut(seat.index())
    }

    /// Iterate over (Seat, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (Seat(i as u8), v))
    }
}

impl<T> Index<Seat> for PlayerMap<T> {
    type Output = T;

    fn index(&self, seat: Seat) -> &Self::Output {
        &self.data[seat.index()]
    }
}
