//! Applying server events to the client.
//!
//! This is the only place the board is mutated. Every event that touches a
//! game ends with [`Client::refresh_controls`] so the selection and primary
//! action never go stale.

use tracing::{debug, info, warn};

use super::state::{Client, ClientState, Game};
use crate::core::card::{Card, CardId};
use crate::core::error::{Error, Result};
use crate::core::player::PlayerId;
use crate::core::state::{Board, Phase, Turn};
use crate::pacer::{EventSink, Session};
use crate::protocol::{ClientAction, MoveDestination, ServerEvent};
use crate::zones::Placement;

impl Client {
    fn apply_turn(&mut self, player_id: PlayerId, phase: Phase) -> Result<()> {
        let Some(game) = self.game_mut() else {
            debug!("turn outside a game, ignoring");
            return Ok(());
        };
        if game.board.seat_of(&player_id).is_none() {
            return Err(Error::UnknownPlayer(player_id));
        }

        debug!(player = %player_id, ?phase, "turn");
        game.board.turn = Some(Turn { player_id, phase });
        game.ui.selecting_meld_to_lay = false;
        if phase == Phase::Draw {
            game.ui.non_discardable = None;
        }
        Ok(())
    }

    fn apply_move(&mut self, cards: Vec<Card>, destination: MoveDestination) -> Result<()> {
        let Some(game) = self.game_mut() else {
            debug!("move outside a game, ignoring");
            return Ok(());
        };

        let placement = match destination {
            MoveDestination::Discard => Placement::Discard,
            MoveDestination::Meld { meld_number, position } => Placement::Meld {
                meld: meld_number,
                position,
            },
            MoveDestination::Player { player_id, position } => {
                let seat = game
                    .board
                    .seat_of(&player_id)
                    .ok_or(Error::UnknownPlayer(player_id))?;
                Placement::Hand { seat, position }
            }
        };

        let moved = game.board.zones.apply_move(&cards, placement);
        debug!(cards = moved.len(), ?placement, "move applied");
        Ok(())
    }

    fn apply_redeck(&mut self, new_card_ids: Vec<CardId>) -> Result<()> {
        let Some(game) = self.game_mut() else {
            debug!("redeck outside a game, ignoring");
            return Ok(());
        };

        let retargets = game.board.zones.redeck(new_card_ids)?;
        self.retargets.extend(retargets);
        Ok(())
    }

    fn apply_end(
        &mut self,
        winner_id: Option<PlayerId>,
        hand_values: impl IntoIterator<Item = (PlayerId, i64)>,
    ) {
        let Some(game) = self.game_mut() else {
            debug!("end outside a game, ignoring");
            return;
        };
        game.board.turn = None;

        match winner_id {
            Some(winner) => {
                let gained: i64 = hand_values.into_iter().map(|(_, value)| value).sum();
                let total = self.scores.entry(winner.clone()).or_insert(0);
                *total += gained;
                info!(winner = %winner, gained, total = *total, "round over");
            }
            None => info!("round over without a winner"),
        }
    }
}

impl EventSink for Client {
    fn handle_event(&mut self, event: ServerEvent) -> Result<()> {
        let result = match event {
            ServerEvent::Ping => {
                self.send(ClientAction::Pong);
                return Ok(());
            }
            ServerEvent::Lobby { lobby } => {
                info!(players = lobby.players.len(), code = %lobby.code, "in lobby");
                self.state = ClientState::Lobby(lobby);
                return Ok(());
            }
            ServerEvent::Start { players, current_player_id, card_ids, game_code, settings } => {
                info!(players = players.len(), cards = card_ids.len(), code = %game_code, "round started");
                let board = Board::new(players, current_player_id, card_ids, game_code, settings);
                self.state = ClientState::Game(Game::new(board));
                Ok(())
            }
            ServerEvent::Turn { player_id, state } => self.apply_turn(player_id, state),
            ServerEvent::Move { cards, destination } => self.apply_move(cards, destination),
            ServerEvent::Redeck { new_card_ids } => self.apply_redeck(new_card_ids),
            ServerEvent::End { winner_id, hand_values } => {
                self.apply_end(winner_id, hand_values);
                Ok(())
            }
            ServerEvent::Unrecognized => {
                warn!("ignoring unrecognized server event");
                return Ok(());
            }
        };

        self.refresh_controls();
        result
    }

    fn dealing_players(&self) -> Option<usize> {
        self.board()
            .filter(|board| board.turn.is_none())
            .map(Board::player_count)
    }
}

impl Session for Client {
    fn take_actions(&mut self) -> Vec<ClientAction> {
        Client::take_actions(self)
    }

    fn disconnect(&mut self) {
        info!("disconnected, resetting client");
        *self = Client::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{Face, Rank, Suit};
    use crate::core::config::GameSettings;
    use crate::core::player::{PlayerInfo, Seat};
    use crate::protocol::Lobby;
    use crate::zones::ZoneLocation;

    fn start(cards: &[&str]) -> ServerEvent {
        ServerEvent::Start {
            players: vec![PlayerInfo::human("me", "Me"), PlayerInfo::ai("bot", "Bot")],
            current_player_id: PlayerId::new("me"),
            card_ids: cards.iter().map(|s| CardId::new(*s)).collect(),
            game_code: "123456".into(),
            settings: GameSettings::default(),
        }
    }

    fn to_player(player: &str, ids: &[&str]) -> ServerEvent {
        ServerEvent::Move {
            cards: ids
                .iter()
                .map(|s| Card::new(CardId::new(*s), Face::new(Suit::Spades, Rank::Num(5))))
                .collect(),
            destination: MoveDestination::Player { player_id: PlayerId::new(player), position: 0 },
        }
    }

    fn to_discard(id: &str) -> ServerEvent {
        ServerEvent::Move {
            cards: vec![Card::face_down(CardId::new(id))],
            destination: MoveDestination::Discard,
        }
    }

    fn turn(player: &str, state: Phase) -> ServerEvent {
        ServerEvent::Turn { player_id: PlayerId::new(player), state }
    }

    #[test]
    fn test_start_builds_fresh_board() {
        let mut client = Client::new();
        client.handle_event(start(&["a", "b", "c"])).unwrap();

        let board = client.board().unwrap();
        assert_eq!(board.zones.deck().len(), 3);
        assert_eq!(board.turn, None);
        assert_eq!(board.game_code, "123456");
        assert_eq!(client.dealing_players(), Some(2));
    }

    #[test]
    fn test_lobby_replaces_game() {
        let mut client = Client::new();
        client.handle_event(start(&["a"])).unwrap();
        client
            .handle_event(ServerEvent::Lobby {
                lobby: Lobby {
                    players: vec![PlayerInfo::human("me", "Me")],
                    current_player_id: PlayerId::new("me"),
                    code: "654321".into(),
                    settings: GameSettings::default(),
                },
            })
            .unwrap();

        assert!(client.board().is_none());
        assert_eq!(client.lobby().map(|l| l.code.as_str()), Some("654321"));
    }

    #[test]
    fn test_move_to_player_hand() {
        let mut client = Client::new();
        client.handle_event(start(&["a", "b"])).unwrap();
        client.handle_event(to_player("bot", &["a", "b"])).unwrap();

        let board = client.board().unwrap();
        assert_eq!(board.zones.hand(Seat::new(1)).len(), 2);
        assert_eq!(board.zones.location_of(&CardId::new("a")), Some(ZoneLocation::Hand(Seat::new(1))));
    }

    #[test]
    fn test_move_to_unknown_player_is_rejected() {
        let mut client = Client::new();
        client.handle_event(start(&["a"])).unwrap();

        let err = client.handle_event(to_player("ghost", &["a"])).unwrap_err();

        assert!(matches!(err, Error::UnknownPlayer(_)));
        assert!(!err.is_fatal());
        assert_eq!(client.board().unwrap().zones.deck().len(), 1);
    }

    #[test]
    fn test_turn_events() {
        let mut client = Client::new();
        client.handle_event(start(&["a"])).unwrap();
        client.handle_event(turn("me", Phase::Play)).unwrap();

        let board = client.board().unwrap();
        assert!(board.is_local_turn());
        assert_eq!(board.local_phase(), Some(Phase::Play));
        assert_eq!(client.dealing_players(), None);
        assert!(client.handle_event(turn("ghost", Phase::Draw)).is_err());
    }

    #[test]
    fn test_events_outside_game_are_ignored() {
        let mut client = Client::new();

        client.handle_event(turn("me", Phase::Draw)).unwrap();
        client.handle_event(to_discard("a")).unwrap();
        client.handle_event(ServerEvent::Redeck { new_card_ids: vec![] }).unwrap();

        assert_eq!(client.state(), &ClientState::Loading);
    }

    #[test]
    fn test_redeck_records_retargets() {
        let mut client = Client::new();
        client.handle_event(start(&["a", "b"])).unwrap();
        client.handle_event(to_discard("a")).unwrap();
        client.handle_event(to_discard("b")).unwrap();

        client
            .handle_event(ServerEvent::Redeck { new_card_ids: vec![CardId::new("x"), CardId::new("y")] })
            .unwrap();

        let retargets = client.take_retargets();
        assert_eq!(retargets.len(), 2);
        assert_eq!(retargets[1].from, CardId::new("b"));
        assert_eq!(retargets[1].to, CardId::new("y"));
        assert_eq!(client.board().unwrap().zones.deck().len(), 2);
    }

    #[test]
    fn test_redeck_mismatch_is_fatal() {
        let mut client = Client::new();
        client.handle_event(start(&["a"])).unwrap();
        client.handle_event(to_discard("a")).unwrap();

        let err = client
            .handle_event(ServerEvent::Redeck { new_card_ids: vec![] })
            .unwrap_err();

        assert!(err.is_fatal());
        assert_eq!(client.board().unwrap().zones.discard().len(), 1);
    }

    #[test]
    fn test_end_scores_winner() {
        let mut client = Client::new();
        client.handle_event(start(&[])).unwrap();
        client.handle_event(turn("bot", Phase::Play)).unwrap();

        let end = |values: &[(&str, i64)]| ServerEvent::End {
            winner_id: Some(PlayerId::new("me")),
            hand_values: values.iter().map(|(p, v)| (PlayerId::new(*p), *v)).collect(),
        };
        client.handle_event(end(&[("me", 0), ("bot", 23)])).unwrap();

        assert_eq!(client.score_of(&PlayerId::new("me")), 23);
        assert_eq!(client.board().unwrap().turn, None);

        client.handle_event(start(&[])).unwrap();
        client.handle_event(end(&[("bot", 7)])).unwrap();
        assert_eq!(client.score_of(&PlayerId::new("me")), 30);
    }

    #[test]
    fn test_end_without_winner_scores_nothing() {
        let mut client = Client::new();
        client.handle_event(start(&[])).unwrap();
        client
            .handle_event(ServerEvent::End {
                winner_id: None,
                hand_values: [(PlayerId::new("bot"), 5)].into_iter().collect(),
            })
            .unwrap();

        assert!(client.scores().is_empty());
    }

    #[test]
    fn test_disconnect_resets_everything() {
        let mut client = Client::new();
        client.handle_event(start(&[])).unwrap();
        client
            .handle_event(ServerEvent::End {
                winner_id: Some(PlayerId::new("me")),
                hand_values: [(PlayerId::new("bot"), 5)].into_iter().collect(),
            })
            .unwrap();
        client.handle_event(ServerEvent::Ping).unwrap();

        client.disconnect();

        assert_eq!(client.state(), &ClientState::Loading);
        assert_eq!(client.score_of(&PlayerId::new("me")), 0);
        assert!(Session::take_actions(&mut client).is_empty());
    }
}
