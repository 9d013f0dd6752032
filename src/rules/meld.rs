//! Meld legality: sets, runs, and the round's size limit.
//!
//! A meld is either a **set** (cards of one rank) or a **run** (consecutive
//! ranks). Wild cards stand in for any rank. All checks read the round's
//! [`GameSettings`]; nothing here touches board state.
//!
//! Face-down cards cannot be judged, so any group containing one is invalid.

use smallvec::SmallVec;

use crate::core::card::{Card, Face, Rank, Suit};
use crate::core::config::{AceRank, GameSettings};

/// Smallest legal meld.
pub const MIN_MELD_SIZE: usize = 3;

/// Largest legal run (one of each rank).
pub const MAX_RUN_SIZE: usize = 13;

type Faces = SmallVec<[Face; 16]>;

/// Meld checks bound to one round's settings.
///
/// ## Usage
///
/// ```
/// use rummy_client::core::{Card, CardId, Face, GameSettings, Rank, Suit};
/// use rummy_client::rules::MeldRules;
///
/// let settings = GameSettings::default();
/// let rules = MeldRules::new(&settings);
/// let card = |id: &str, rank| Card::new(CardId::new(id), Face::new(Suit::Hearts, rank));
///
/// let run = [card("a", Rank::Num(4)), card("b", Rank::Num(5)), card("c", Rank::Num(6))];
/// assert!(rules.is_valid_run(&run));
/// assert!(rules.is_valid_meld(&run));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct MeldRules<'a> {
    settings: &'a GameSettings,
}

impl<'a> MeldRules<'a> {
    /// Bind the checks to a settings object.
    #[must_use]
    pub const fn new(settings: &'a GameSettings) -> Self {
        Self { settings }
    }

    /// The settings these checks read.
    #[must_use]
    pub const fn settings(&self) -> &'a GameSettings {
        self.settings
    }

    /// Numeric rank used for ordering runs. `None` for wild cards.
    ///
    /// Numerals are their number, J/Q/K are 11/12/13, and the ace is 1 or 14
    /// depending on [`GameSettings::ace_rank`].
    #[must_use]
    pub fn rank_value(&self, rank: Rank) -> Option<u8> {
        match rank {
            Rank::Wild => None,
            Rank::Num(n) => Some(n),
            Rank::Jack => Some(11),
            Rank::Queen => Some(12),
            Rank::King => Some(13),
            Rank::Ace => Some(match self.settings.ace_rank {
                AceRank::Low => 1,
                AceRank::High => 14,
            }),
        }
    }

    /// Check a group as a set: at least three cards, every non-wild of the
    /// same rank.
    ///
    /// Non-wild suits must be distinct only when duplicate suits are
    /// disallowed and the group is larger than four cards.
    #[must_use]
    pub fn is_valid_set(&self, cards: &[Card]) -> bool {
        if cards.len() < MIN_MELD_SIZE {
            return false;
        }
        let Some(faces) = faces_of(cards) else {
            return false;
        };

        let mut naturals = faces.iter().filter(|face| !face.is_wild());
        let Some(first) = naturals.clone().next() else {
            // All wild
            return true;
        };
        if !naturals.all(|face| face.rank == first.rank) {
            return false;
        }

        if self.settings.allow_set_duplicate_suit || cards.len() <= 4 {
            return true;
        }
        let mut seen: SmallVec<[Suit; 8]> = SmallVec::new();
        for face in faces.iter().filter(|face| !face.is_wild()) {
            if seen.contains(&face.suit) {
                return false;
            }
            seen.push(face.suit);
        }
        true
    }

    /// Check a group as a run: 3 to 13 cards whose non-wild ranks, once
    /// sorted, are strictly increasing with every gap fillable by the wild
    /// cards in the group.
    ///
    /// Unless mixed-suit runs are allowed, every non-wild must share a suit.
    /// A group of only wild cards is a valid run.
    #[must_use]
    pub fn is_valid_run(&self, cards: &[Card]) -> bool {
        if !(MIN_MELD_SIZE..=MAX_RUN_SIZE).contains(&cards.len()) {
            return false;
        }
        let Some(faces) = faces_of(cards) else {
            return false;
        };

        let mut ranked: SmallVec<[(u8, Suit); 16]> = faces
            .iter()
            .filter_map(|face| self.rank_value(face.rank).map(|value| (value, face.suit)))
            .collect();
        let Some(&(_, suit)) = ranked.first() else {
            return true;
        };
        if !self.settings.allow_run_mixed_suit && ranked.iter().any(|&(_, s)| s != suit) {
            return false;
        }
        ranked.sort_unstable_by_key(|&(value, _)| value);

        let mut wilds = cards.len() - ranked.len();
        let mut prev = ranked[0].0 - 1;
        for &(value, _) in &ranked {
            if value <= prev {
                return false;
            }
            let gap = usize::from(value - prev - 1);
            if gap > wilds {
                return false;
            }
            wilds -= gap;
            prev = value;
        }
        true
    }

    /// Check a group against the meld size limit, then as a set or a run.
    #[must_use]
    pub fn is_valid_meld(&self, cards: &[Card]) -> bool {
        if self
            .settings
            .limit_meld_size
            .is_some_and(|limit| cards.len() > limit)
        {
            return false;
        }
        self.is_valid_set(cards) || self.is_valid_run(cards)
    }
}

fn faces_of(cards: &[Card]) -> Option<Faces> {
    cards.iter().map(|card| card.face).collect()
}
