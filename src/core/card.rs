//! Card identification and faces.
//!
//! Every physical card on the board has a unique `CardId` issued by the server.
//! The identifier is an opaque token: it carries no information about the
//! card's suit or rank, and it is never reused.
//!
//! ## Faces
//!
//! A card's `face` is only known once the server reveals it. A card without a
//! face is face-down. Once revealed, a face stays attached to the identity
//! until the identity is destroyed by a redeck.
//!
//! ```
//! use rummy_client::core::{Card, CardId, Face, Rank, Suit};
//!
//! let hidden = Card::face_down(CardId::new("c1"));
//! assert!(!hidden.is_face_up());
//!
//! let seven = Card::new(CardId::new("c2"), Face::new(Suit::Hearts, Rank::Num(7)));
//! assert!(seven.is_face_up());
//! assert!(!seven.is_wild());
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Opaque, server-issued identifier for a single card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a card ID from any string-like token.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CardId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card suit. Jokers carry their own suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suit {
    Hearts,
    Diamonds,
    Spades,
    Clubs,
    Joker,
}

/// Card rank as printed on the card.
///
/// `Num` covers the numeral ranks 2 through 10. `Wild` is the joker rank
/// (`"W"` on the wire).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rank {
    Ace,
    Num(u8),
    Jack,
    Queen,
    King,
    Wild,
}

impl Rank {
    /// Parse the wire representation (`"A"`, `"2"`..`"10"`, `"J"`, `"Q"`, `"K"`, `"W"`).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "A" => Some(Rank::Ace),
            "J" => Some(Rank::Jack),
            "Q" => Some(Rank::Queen),
            "K" => Some(Rank::King),
            "W" => Some(Rank::Wild),
            other => match other.parse::<u8>() {
                Ok(n) if (2..=10).contains(&n) => Some(Rank::Num(n)),
                _ => None,
            },
        }
    }

    /// Wire representation of this rank.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Num(2) => "2",
            Rank::Num(3) => "3",
            Rank::Num(4) => "4",
            Rank::Num(5) => "5",
            Rank::Num(6) => "6",
            Rank::Num(7) => "7",
            Rank::Num(8) => "8",
            Rank::Num(9) => "9",
            Rank::Num(_) => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Wild => "W",
        }
    }

    /// Is this the wild (joker) rank?
    #[must_use]
    pub const fn is_wild(self) -> bool {
        matches!(self, Rank::Wild)
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Rank {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Rank {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Rank::parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid rank {raw:?}")))
    }
}

/// The visible face of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Face {
    pub suit: Suit,
    pub rank: Rank,
}

impl Face {
    /// Create a face.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// The joker face.
    #[must_use]
    pub const fn joker() -> Self {
        Self::new(Suit::Joker, Rank::Wild)
    }

    /// Is this a wild card?
    #[must_use]
    pub const fn is_wild(&self) -> bool {
        self.rank.is_wild()
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let suit = match self.suit {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Spades => '♠',
            Suit::Clubs => '♣',
            Suit::Joker => '✦',
        };
        write!(f, "{}{}", self.rank, suit)
    }
}

/// A card as the client knows it: an identity plus an optional revealed face.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,

    /// `None` while the card is face-down.
    #[serde(default)]
    pub face: Option<Face>,
}

impl Card {
    /// Create a face-up card.
    #[must_use]
    pub fn new(id: CardId, face: Face) -> Self {
        Self { id, face: Some(face) }
    }

    /// Create a face-down card.
    #[must_use]
    pub fn face_down(id: CardId) -> Self {
        Self { id, face: None }
    }

    /// Has the face been revealed?
    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.face.is_some()
    }

    /// Is this a revealed wild card?
    #[must_use]
    pub fn is_wild(&self) -> bool {
        self.face.is_some_and(|f| f.is_wild())
    }
}
