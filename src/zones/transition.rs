//! Zone transitions: relocating cards and replacing the deck.
//!
//! These are the only operations that move cards between zones. Each one
//! updates the zones and the identity index together, so between calls every
//! identity is in exactly one zone.
//!
//! ## Face reveal is monotonic
//!
//! A relocation may reveal a face (the server attaches it to the move) but
//! never hides one. The only way a face disappears is a redeck, which destroys
//! the identity altogether.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::store::{ZoneLocation, ZonePosition, ZoneStore};
use crate::core::card::{Card, CardId, Face};
use crate::core::error::{Error, Result};
use crate::core::player::Seat;

/// Where a relocated card should land.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// Top of the discard pile.
    Discard,
    /// Into meld `meld` at `position`. A meld number past the end starts a
    /// new meld instead.
    Meld { meld: usize, position: usize },
    /// Into a hand at `position` (0 = leftmost).
    Hand { seat: Seat, position: usize },
}

/// Record of a single relocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relocation {
    pub card: CardId,
    /// `None` when the identity was not on the board before.
    pub from: Option<ZoneLocation>,
    pub to: ZoneLocation,
}

/// An identity destroyed by a redeck and the fresh identity that replaces it.
///
/// Renderers keyed by card identity move their state from `from` to `to`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Retarget {
    pub from: CardId,
    pub to: CardId,
}

impl ZoneStore {
    /// Move one card to `placement`, keeping or revealing its face.
    ///
    /// Unknown identities are created face-down (or with `face_hint`).
    /// Returns `None`, leaving the store untouched, if the placement names a
    /// seat that does not exist.
    pub fn relocate(
        &mut self,
        id: &CardId,
        face_hint: Option<Face>,
        placement: Placement,
    ) -> Option<Relocation> {
        if let Placement::Hand { seat, .. } = placement {
            if seat.index() >= self.player_count() {
                warn!(card = %id, %seat, "move targets a missing seat, ignoring");
                return None;
            }
        }

        let (prior_face, from) = match self.take(id) {
            Some((card, from)) => (card.face, Some(from)),
            None => {
                debug!(card = %id, "first sighting of card, creating it");
                (None, None)
            }
        };
        let card = Card {
            id: id.clone(),
            face: face_hint.or(prior_face),
        };

        let to = match placement {
            Placement::Discard => {
                self.put(card, ZoneLocation::Discard, ZonePosition::Top);
                ZoneLocation::Discard
            }
            Placement::Meld { meld, position } if meld < self.melds.len() => {
                self.put(card, ZoneLocation::Meld(meld), ZonePosition::Index(position));
                ZoneLocation::Meld(meld)
            }
            Placement::Meld { .. } => ZoneLocation::Meld(self.push_meld(card)),
            Placement::Hand { seat, position } => {
                self.put(card, ZoneLocation::Hand(seat), ZonePosition::Index(position));
                ZoneLocation::Hand(seat)
            }
        };

        debug!(card = %id, ?from, %to, "relocated card");
        Some(Relocation {
            card: id.clone(),
            from,
            to,
        })
    }

    /// Apply a multi-card move.
    ///
    /// Cards are relocated last-to-first: every card targets the same fixed
    /// position, so inserting in reverse leaves them in the listed order.
    pub fn apply_move(&mut self, cards: &[Card], placement: Placement) -> Vec<Relocation> {
        cards
            .iter()
            .rev()
            .filter_map(|card| self.relocate(&card.id, card.face, placement))
            .collect()
    }

    /// Replace the exhausted deck with fresh identities.
    ///
    /// `new_ids` must hold exactly one identity per discarded card; otherwise
    /// the store is left untouched and a fatal [`Error::RedeckMismatch`] is
    /// returned. On success the discard pile is emptied, the deck becomes
    /// `new_ids` (face-down, in order), and each old discard identity is
    /// paired with the new identity that replaces it.
    pub fn redeck(&mut self, new_ids: Vec<CardId>) -> Result<Vec<Retarget>> {
        if new_ids.len() != self.discard.len() {
            return Err(Error::RedeckMismatch {
                expected: self.discard.len(),
                actual: new_ids.len(),
            });
        }

        if !self.deck.is_empty() {
            warn!(remaining = self.deck.len(), "redeck while deck still holds cards, dropping them");
            for card in self.deck.drain(..) {
                self.locations.remove(&card.id);
            }
        }

        let discarded = std::mem::take(&mut self.discard);
        let mut retargets = Vec::with_capacity(discarded.len());
        for (old, new_id) in discarded.into_iter().zip(&new_ids) {
            self.locations.remove(&old.id);
            retargets.push(Retarget {
                from: old.id,
                to: new_id.clone(),
            });
        }

        for id in new_ids {
            self.locations.insert(id.clone(), ZoneLocation::Deck);
            self.deck.push(Card::face_down(id));
        }

        info!(cards = self.deck.len(), "deck replenished from discard pile");
        Ok(retargets)
    }
}
