//! Game settings.
//!
//! Settings are chosen in the lobby, supplied by the server with the `start`
//! event, and stay fixed for the whole round. The meld rules read them; nothing
//! on the client ever writes them (changes go out as a `settings` request).
//!
//! Defaults mirror the server's defaults so that a settings object with
//! missing fields decodes to what the server would assume.

use serde::{Deserialize, Serialize};

/// Value of an ace when ordering a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AceRank {
    /// Ace ranks below 2 (value 1).
    #[default]
    Low,
    /// Ace ranks above King (value 14).
    High,
}

/// What the server does when the deck runs out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeckExhaust {
    /// Turn the discard pile over to form a new deck.
    #[default]
    FlipDiscard,
    /// Shuffle the discard pile into a new deck.
    ShuffleDiscard,
    /// End the round.
    EndRound,
}

/// Who takes the first turn of a round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstTurn {
    #[default]
    NextPlayer,
    PrevWinner,
    Random,
}

/// Rule set for a round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Number of 52-card decks shuffled together.
    pub deck_count: u32,

    /// Include jokers (wild cards).
    pub enable_jokers: bool,

    /// Cards dealt to each player.
    pub hand_size: u32,

    pub first_turn: FirstTurn,

    pub allow_draw_choice: bool,

    /// Runs may mix suits.
    pub allow_run_mixed_suit: bool,

    /// Sets may contain the same suit twice.
    pub allow_set_duplicate_suit: bool,

    /// Maximum cards in a meld (3 or 4). `None` for unlimited.
    pub limit_meld_size: Option<usize>,

    pub ace_rank: AceRank,

    pub deck_exhaust: DeckExhaust,

    /// A round can only end with a discard, so a player may never meld or lay
    /// their whole hand.
    pub require_end_discard: bool,

    pub lay_at_end: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            deck_count: 2,
            enable_jokers: true,
            hand_size: 7,
            first_turn: FirstTurn::NextPlayer,
            allow_draw_choice: false,
            allow_run_mixed_suit: false,
            allow_set_duplicate_suit: true,
            limit_meld_size: None,
            ace_rank: AceRank::Low,
            deck_exhaust: DeckExhaust::FlipDiscard,
            require_end_discard: false,
            lay_at_end: true,
        }
    }
}

impl GameSettings {
    /// Allow or forbid mixed suits in runs.
    #[must_use]
    pub fn with_mixed_suit_runs(mut self, allow: bool) -> Self {
        self.allow_run_mixed_suit = allow;
        self
    }

    /// Allow or forbid duplicate suits in sets.
    #[must_use]
    pub fn with_duplicate_suit_sets(mut self, allow: bool) -> Self {
        self.allow_set_duplicate_suit = allow;
        self
    }

    /// Set the maximum meld size (`None` for unlimited).
    #[must_use]
    pub fn with_meld_size_limit(mut self, limit: Option<usize>) -> Self {
        self.limit_meld_size = limit;
        self
    }

    /// Set the ace rank.
    #[must_use]
    pub fn with_ace_rank(mut self, ace_rank: AceRank) -> Self {
        self.ace_rank = ace_rank;
        self
    }

    /// Require or waive the terminal discard.
    #[must_use]
    pub fn with_end_discard(mut self, required: bool) -> Self {
        self.require_end_discard = required;
        self
    }
}
