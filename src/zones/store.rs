//! Card/zone store.
//!
//! The `ZoneStore` owns every card on the board and tracks which zone each
//! identity is in. It keeps two structures in lockstep:
//! - the ordered zones themselves (deck, discard, melds, hands)
//! - an identity -> location index for O(1) lookup
//!
//! Every card identity lives in exactly one zone. Mutation goes through the
//! transition operations in [`super::transition`], which update both
//! structures together.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::card::{Card, CardId};
use crate::core::player::{PlayerMap, Seat};

/// Where a card currently lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneLocation {
    /// Draw pile (top = last).
    Deck,
    /// Discard pile (top = last).
    Discard,
    /// A meld on the table, by meld number.
    Meld(usize),
    /// A player's hand.
    Hand(Seat),
}

impl std::fmt::Display for ZoneLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZoneLocation::Deck => write!(f, "deck"),
            ZoneLocation::Discard => write!(f, "discard"),
            ZoneLocation::Meld(i) => write!(f, "meld {i}"),
            ZoneLocation::Hand(seat) => write!(f, "hand of {seat}"),
        }
    }
}

/// Position for inserting a card into an ordered zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Add to the end (top of a pile, right end of a row).
    Top,
    /// Insert at a specific index, clamped to the zone length.
    Index(usize),
}

/// All zones of a board plus the identity index.
///
/// ## Usage
///
/// ```
/// use rummy_client::core::{CardId, Seat};
/// use rummy_client::zones::{ZoneLocation, ZoneStore};
///
/// let store = ZoneStore::new(["a", "b", "c"].map(CardId::new), 2);
///
/// assert_eq!(store.deck().len(), 3);
/// assert_eq!(store.top_of_deck().map(|c| c.id.as_str()), Some("c"));
/// assert_eq!(store.location_of(&CardId::new("a")), Some(ZoneLocation::Deck));
/// assert!(store.hand(Seat::new(1)).is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneStore {
    pub(super) deck: Vec<Card>,
    pub(super) discard: Vec<Card>,
    pub(super) melds: Vec<Vec<Card>>,
    pub(super) hands: PlayerMap<Vec<Card>>,

    /// Card locations: card_id -> zone
    pub(super) locations: FxHashMap<CardId, ZoneLocation>,
}

impl ZoneStore {
    /// Create a store with a face-down deck (in the given order) and empty
    /// discard, melds and hands.
    pub fn new(deck: impl IntoIterator<Item = CardId>, player_count: usize) -> Self {
        let deck: Vec<Card> = deck.into_iter().map(Card::face_down).collect();
        let locations = deck
            .iter()
            .map(|card| (card.id.clone(), ZoneLocation::Deck))
            .collect();

        Self {
            deck,
            discard: Vec::new(),
            melds: Vec::new(),
            hands: PlayerMap::with_default(player_count),
            locations,
        }
    }

    // === Lookup ===

    /// Get the zone a card is in.
    #[must_use]
    pub fn location_of(&self, id: &CardId) -> Option<ZoneLocation> {
        self.locations.get(id).copied()
    }

    /// Check if the store holds a card.
    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.locations.contains_key(id)
    }

    /// Get a card by identity.
    #[must_use]
    pub fn card(&self, id: &CardId) -> Option<&Card> {
        let location = self.location_of(id)?;
        self.zone(location).iter().find(|card| &card.id == id)
    }

    /// Get the cards in a zone, in order. Missing melds and seats are empty.
    #[must_use]
    pub fn zone(&self, location: ZoneLocation) -> &[Card] {
        match location {
            ZoneLocation::Deck => &self.deck,
            ZoneLocation::Discard => &self.discard,
            ZoneLocation::Meld(i) => self.melds.get(i).map_or(&[], Vec::as_slice),
            ZoneLocation::Hand(seat) => self.hands.get(seat).map_or(&[], Vec::as_slice),
        }
    }

    /// The draw pile (top = last).
    #[must_use]
    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    /// The discard pile (top = last).
    #[must_use]
    pub fn discard(&self) -> &[Card] {
        &self.discard
    }

    /// All melds on the table, in the order they were laid.
    #[must_use]
    pub fn melds(&self) -> &[Vec<Card>] {
        &self.melds
    }

    /// A single meld.
    #[must_use]
    pub fn meld(&self, index: usize) -> Option<&[Card]> {
        self.melds.get(index).map(Vec::as_slice)
    }

    /// A player's hand, left to right.
    #[must_use]
    pub fn hand(&self, seat: Seat) -> &[Card] {
        self.zone(ZoneLocation::Hand(seat))
    }

    /// Number of seats with a hand.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.hands.player_count()
    }

    /// Top card of the deck.
    #[must_use]
    pub fn top_of_deck(&self) -> Option<&Card> {
        self.deck.last()
    }

    /// Top card of the discard pile.
    #[must_use]
    pub fn top_of_discard(&self) -> Option<&Card> {
        self.discard.last()
    }

    /// Total number of cards tracked.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.locations.len()
    }

    /// Check that the zones and the identity index agree: every card in a
    /// zone appears exactly once and is indexed at that zone, and nothing
    /// else is indexed.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let mut seen = 0usize;
        let zones = [ZoneLocation::Deck, ZoneLocation::Discard]
            .into_iter()
            .chain((0..self.melds.len()).map(ZoneLocation::Meld))
            .chain(Seat::all(self.hands.player_count()).map(ZoneLocation::Hand));

        for location in zones {
            for card in self.zone(location) {
                if self.locations.get(&card.id) != Some(&location) {
                    return false;
                }
                seen += 1;
            }
        }

        seen == self.locations.len()
    }

    // === Raw mutation (index kept in step) ===

    /// Remove a card from whatever zone holds it.
    ///
    /// Returns the card and where it was, or `None` if the identity is unknown.
    pub(super) fn take(&mut self, id: &CardId) -> Option<(Card, ZoneLocation)> {
        let location = self.locations.remove(id)?;
        let zone = match location {
            ZoneLocation::Deck => &mut self.deck,
            ZoneLocation::Discard => &mut self.discard,
            ZoneLocation::Meld(i) => self.melds.get_mut(i)?,
            ZoneLocation::Hand(seat) => self.hands.get_mut(seat)?,
        };
        let index = zone.iter().position(|card| &card.id == id)?;
        Some((zone.remove(index), location))
    }

    /// Insert a card into an existing zone.
    ///
    /// Returns `false` (and leaves the card out) if the meld or seat does not exist.
    pub(super) fn put(&mut self, card: Card, location: ZoneLocation, position: ZonePosition) -> bool {
        let zone = match location {
            ZoneLocation::Deck => &mut self.deck,
            ZoneLocation::Discard => &mut self.discard,
            ZoneLocation::Meld(i) => match self.melds.get_mut(i) {
                Some(meld) => meld,
                None => return false,
            },
            ZoneLocation::Hand(seat) => match self.hands.get_mut(seat) {
                Some(hand) => hand,
                None => return false,
            },
        };

        self.locations.insert(card.id.clone(), location);
        match position {
            ZonePosition::Top => zone.push(card),
            ZonePosition::Index(i) => {
                let idx = i.min(zone.len());
                zone.insert(idx, card);
            }
        }
        true
    }

    /// Start a new meld with a single card. Returns the new meld number.
    pub(super) fn push_meld(&mut self, card: Card) -> usize {
        let index = self.melds.len();
        self.locations.insert(card.id.clone(), ZoneLocation::Meld(index));
        self.melds.push(vec![card]);
        index
    }
}
