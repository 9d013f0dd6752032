//! Local player input: card clicks, the main action button, lobby requests.
//!
//! Input never touches the board. It edits the selection and UI flags, and
//! queues requests for the server; the board changes only when the server
//! answers with events.
//!
//! ## Primary action
//!
//! Recomputed after every event and every input, first match wins:
//!
//! | Condition                                     | Action    |
//! |-----------------------------------------------|-----------|
//! | not in game, or not the local play phase      | `None`    |
//! | picking a lay target                          | `Cancel`  |
//! | one card, some meld accepts it                | `Lay`     |
//! | one card, not the card just taken from discard| `Discard` |
//! | several cards forming a meld                  | `Meld`    |
//! | several cards, some meld accepts them         | `Lay`     |
//! | otherwise                                     | `None`    |

use tracing::debug;

use super::state::{Client, Game, PrimaryAction};
use crate::core::card::CardId;
use crate::core::config::GameSettings;
use crate::core::error::{Error, Result};
use crate::core::state::Phase;
use crate::protocol::{AiRequest, ClientAction};
use crate::rules::{can_meld_selection, melds_for_lay};
use crate::zones::ZoneLocation;

/// Number of digits in a lobby code.
pub const LOBBY_CODE_LEN: usize = 6;

fn compute_primary_action(game: &Game) -> PrimaryAction {
    if game.board.local_phase() != Some(Phase::Play) {
        return PrimaryAction::None;
    }
    if game.ui.selecting_meld_to_lay {
        return PrimaryAction::Cancel;
    }

    let selection = &game.ui.selection;
    match selection.len() {
        0 => PrimaryAction::None,
        1 => {
            if !melds_for_lay(&game.board, selection).is_empty() {
                PrimaryAction::Lay
            } else if game.ui.non_discardable.as_ref() != selection.first() {
                PrimaryAction::Discard
            } else {
                PrimaryAction::None
            }
        }
        _ => {
            if can_meld_selection(&game.board, selection) {
                PrimaryAction::Meld
            } else if !melds_for_lay(&game.board, selection).is_empty() {
                PrimaryAction::Lay
            } else {
                PrimaryAction::None
            }
        }
    }
}

impl Client {
    /// Prune the selection and recompute the primary action.
    ///
    /// Selected cards that left the local hand are dropped, and the whole
    /// selection is dropped outside the local play phase. Leaving the play
    /// phase also leaves the lay-target picker.
    pub fn refresh_controls(&mut self) {
        let Some(game) = self.game_mut() else {
            return;
        };

        if game.board.local_phase() == Some(Phase::Play) {
            let board = &game.board;
            game.ui.selection.retain(|id| board.in_local_hand(id));
        } else {
            game.ui.selection.clear();
            game.ui.selecting_meld_to_lay = false;
        }
        if game
            .ui
            .non_discardable
            .as_ref()
            .is_some_and(|id| !game.board.zones.contains(id))
        {
            game.ui.non_discardable = None;
        }

        game.ui.primary_action = compute_primary_action(game);
    }

    /// Table melds the current selection could be laid onto.
    #[must_use]
    pub fn lay_targets(&self) -> Vec<usize> {
        self.game()
            .map(|game| melds_for_lay(&game.board, &game.ui.selection))
            .unwrap_or_default()
    }

    /// Handle a click on a card.
    ///
    /// - Draw phase: clicking the top of the deck or discard pile draws it.
    /// - Play phase: clicking a card in hand toggles its selection.
    /// - Picking a lay target: clicking a card of an eligible meld lays onto it.
    pub fn click_card(&mut self, id: &CardId) {
        let Some(game) = self.game_mut() else {
            return;
        };

        if game.ui.selecting_meld_to_lay {
            if let Some(ZoneLocation::Meld(meld)) = game.board.zones.location_of(id) {
                self.choose_lay_target(meld);
            }
            return;
        }

        match game.board.local_phase() {
            Some(Phase::Draw) => {
                let zones = &game.board.zones;
                let from_discard = zones.top_of_discard().is_some_and(|c| &c.id == id);
                let from_deck = zones.top_of_deck().is_some_and(|c| &c.id == id);
                if !from_discard && !from_deck {
                    return;
                }
                game.ui.non_discardable = from_discard.then(|| id.clone());
                debug!(card = %id, from_discard, "drawing");
                self.send(ClientAction::Draw { card_id: id.clone() });
            }
            Some(Phase::Play) => {
                if !game.board.in_local_hand(id) {
                    return;
                }
                let selection = &mut game.ui.selection;
                match selection.iter().position(|s| s == id) {
                    Some(index) => {
                        selection.remove(index);
                    }
                    None => selection.push(id.clone()),
                }
                self.refresh_controls();
            }
            None => {}
        }
    }

    /// Press the main action button.
    pub fn perform_primary_action(&mut self) {
        let Some(game) = self.game_mut() else {
            return;
        };

        let action = match game.ui.primary_action {
            PrimaryAction::None => return,
            PrimaryAction::Discard => match game.ui.selection.as_slice() {
                [card_id] => ClientAction::Discard { card_id: card_id.clone() },
                _ => return,
            },
            PrimaryAction::Meld => ClientAction::Meld {
                card_ids: game.ui.selection.clone(),
            },
            PrimaryAction::Lay => {
                game.ui.selecting_meld_to_lay = true;
                self.refresh_controls();
                return;
            }
            PrimaryAction::Cancel => {
                game.ui.selecting_meld_to_lay = false;
                self.refresh_controls();
                return;
            }
        };

        debug!(?action, "primary action");
        self.send(action);
    }

    /// Lay the selection onto meld `meld` while picking a lay target.
    ///
    /// Returns `false` (changing nothing) unless the picker is open and the
    /// meld accepts the selection.
    pub fn choose_lay_target(&mut self, meld: usize) -> bool {
        let Some(game) = self.game_mut() else {
            return false;
        };
        if !game.ui.selecting_meld_to_lay
            || !melds_for_lay(&game.board, &game.ui.selection).contains(&meld)
        {
            return false;
        }

        let card_ids = game.ui.selection.clone();
        game.ui.selecting_meld_to_lay = false;
        self.send(ClientAction::Lay { card_ids, meld_number: meld });
        self.refresh_controls();
        true
    }

    // === Lobby requests ===

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.send(ClientAction::Name { name: name.into() });
    }

    pub fn add_ai(&mut self) {
        self.send(ClientAction::Ai { action: AiRequest::Add });
    }

    pub fn remove_ai(&mut self) {
        self.send(ClientAction::Ai { action: AiRequest::Remove });
    }

    /// Request to join a lobby. Non-digits are stripped; exactly six digits
    /// must remain.
    pub fn join(&mut self, code: &str) -> Result<()> {
        let digits: String = code.chars().filter(char::is_ascii_digit).collect();
        if digits.len() != LOBBY_CODE_LEN {
            return Err(Error::InvalidLobbyCode(code.to_string()));
        }
        self.send(ClientAction::Join { code: digits });
        Ok(())
    }

    pub fn start_game(&mut self) {
        self.send(ClientAction::Start);
    }

    pub fn update_settings(&mut self, settings: GameSettings) {
        self.send(ClientAction::Settings { settings });
    }
}
