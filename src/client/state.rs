//! Client state container.
//!
//! ## Lifecycle
//!
//! ```text
//! Loading ──lobby──► Lobby ──start──► Game ──lobby──► Lobby ...
//!    ▲                                              │
//!    └──────────────── disconnect ◄─────────────────┘
//! ```
//!
//! Scores outlive games and lobbies; only a disconnect clears them.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::card::CardId;
use crate::core::player::PlayerId;
use crate::core::state::Board;
use crate::protocol::{ClientAction, Lobby};
use crate::zones::Retarget;

/// Cards the local player has picked, in the order they were picked.
pub type Selection = SmallVec<[CardId; 8]>;

/// What the main action button does right now.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PrimaryAction {
    #[default]
    None,
    /// Discard the single selected card.
    Discard,
    /// Meld the selected cards as a new meld.
    Meld,
    /// Pick a table meld to lay the selection onto.
    Lay,
    /// Leave the lay-target picker.
    Cancel,
}

/// Interaction state of the local player during a game.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    pub(super) selection: Selection,
    pub(super) primary_action: PrimaryAction,
    /// Card just drawn from the discard pile; it may not be discarded again
    /// this turn.
    pub(super) non_discardable: Option<CardId>,
    /// Waiting for the player to pick a meld to lay onto.
    pub(super) selecting_meld_to_lay: bool,
}

impl UiState {
    #[must_use]
    pub fn selection(&self) -> &[CardId] {
        &self.selection
    }

    #[must_use]
    pub fn is_selected(&self, id: &CardId) -> bool {
        self.selection.contains(id)
    }

    #[must_use]
    pub fn primary_action(&self) -> PrimaryAction {
        self.primary_action
    }

    #[must_use]
    pub fn non_discardable(&self) -> Option<&CardId> {
        self.non_discardable.as_ref()
    }

    #[must_use]
    pub fn is_selecting_meld_to_lay(&self) -> bool {
        self.selecting_meld_to_lay
    }
}

/// A round in progress.
#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    pub board: Board,
    pub ui: UiState,
}

impl Game {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            ui: UiState::default(),
        }
    }
}

/// Top-level client state.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ClientState {
    /// Connected, nothing heard yet (or disconnected).
    #[default]
    Loading,
    Lobby(Lobby),
    Game(Game),
}

/// The client runtime: state, scores, and everything waiting to go out.
///
/// Server events come in through [`EventSink`](crate::pacer::EventSink);
/// player input through the methods in [`super::controls`]. Outbound
/// requests collect in an outbox drained by [`Client::take_actions`].
///
/// ## Usage
///
/// ```
/// use rummy_client::client::{Client, PrimaryAction};
/// use rummy_client::pacer::EventSink;
/// use rummy_client::protocol::{ClientAction, ServerEvent};
///
/// let mut client = Client::new();
/// client.handle_event(ServerEvent::Ping).unwrap();
///
/// assert_eq!(client.take_actions(), vec![ClientAction::Pong]);
/// assert_eq!(client.primary_action(), PrimaryAction::None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Client {
    pub(super) state: ClientState,
    pub(super) scores: FxHashMap<PlayerId, i64>,
    pub(super) outbox: Vec<ClientAction>,
    pub(super) retargets: Vec<Retarget>,
}

impl Client {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &ClientState {
        &self.state
    }

    #[must_use]
    pub fn lobby(&self) -> Option<&Lobby> {
        match &self.state {
            ClientState::Lobby(lobby) => Some(lobby),
            _ => None,
        }
    }

    #[must_use]
    pub fn game(&self) -> Option<&Game> {
        match &self.state {
            ClientState::Game(game) => Some(game),
            _ => None,
        }
    }

    #[must_use]
    pub fn board(&self) -> Option<&Board> {
        self.game().map(|game| &game.board)
    }

    #[must_use]
    pub fn ui(&self) -> Option<&UiState> {
        self.game().map(|game| &game.ui)
    }

    /// Current selection (empty outside a game).
    #[must_use]
    pub fn selection(&self) -> &[CardId] {
        self.ui().map_or(&[], UiState::selection)
    }

    #[must_use]
    pub fn primary_action(&self) -> PrimaryAction {
        self.ui().map_or(PrimaryAction::None, UiState::primary_action)
    }

    /// Cumulative score of a player (0 if never scored).
    #[must_use]
    pub fn score_of(&self, player: &PlayerId) -> i64 {
        self.scores.get(player).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn scores(&self) -> &FxHashMap<PlayerId, i64> {
        &self.scores
    }

    /// Drain queued outbound requests, oldest first.
    pub fn take_actions(&mut self) -> Vec<ClientAction> {
        std::mem::take(&mut self.outbox)
    }

    /// Drain identity retargets produced by redecks, oldest first.
    pub fn take_retargets(&mut self) -> Vec<Retarget> {
        std::mem::take(&mut self.retargets)
    }

    pub(super) fn game_mut(&mut self) -> Option<&mut Game> {
        match &mut self.state {
            ClientState::Game(game) => Some(game),
            _ => None,
        }
    }

    pub(super) fn send(&mut self, action: ClientAction) {
        self.outbox.push(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_client_is_loading() {
        let client = Client::new();

        assert_eq!(client.state(), &ClientState::Loading);
        assert!(client.board().is_none());
        assert!(client.selection().is_empty());
        assert_eq!(client.primary_action(), PrimaryAction::None);
        assert_eq!(client.score_of(&PlayerId::new("anyone")), 0);
    }

    #[test]
    fn test_outbox_drains_in_order() {
        let mut client = Client::new();
        client.send(ClientAction::Start);
        client.send(ClientAction::Pong);

        assert_eq!(client.take_actions(), vec![ClientAction::Start, ClientAction::Pong]);
        assert!(client.take_actions().is_empty());
    }

    #[test]
    fn test_ui_state_defaults() {
        let ui = UiState::default();

        assert!(ui.selection().is_empty());
        assert_eq!(ui.primary_action(), PrimaryAction::None);
        assert_eq!(ui.non_discardable(), None);
        assert!(!ui.is_selecting_meld_to_lay());
    }
}
