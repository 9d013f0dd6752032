//! Zone transition tests driven through server events.
//!
//! These exercise the store the way the runtime does: `start`, then `move`
//! and `redeck` events decoded from wire JSON.

use rummy_client::core::{CardId, Face, Rank, Seat, Suit};
use rummy_client::pacer::EventSink;
use rummy_client::protocol::ServerEvent;
use rummy_client::zones::{Retarget, ZoneLocation};
use rummy_client::Client;

fn send(client: &mut Client, json: &str) {
    let event = ServerEvent::decode(json).expect("valid event");
    client.handle_event(event).expect("event applies");
}

fn started(card_ids: &[&str]) -> Client {
    let mut client = Client::new();
    let ids = serde_json::to_string(card_ids).unwrap();
    send(
        &mut client,
        &format!(
            r#"{{"type":"start","players":[
                {{"id":"p1","name":"Ann","human":true}},
                {{"id":"p2","name":"Bot","human":false}}
            ],"current_player_id":"p1","card_ids":{ids},"game_code":"111111","settings":{{}}}}"#
        ),
    );
    client
}

fn hand_ids(client: &Client, seat: u8) -> Vec<String> {
    client
        .board()
        .unwrap()
        .zones
        .hand(Seat::new(seat))
        .iter()
        .map(|c| c.id.as_str().to_string())
        .collect()
}

// =============================================================================
// Moves
// =============================================================================

/// Dealing face-down cards to each player keeps them ordered and hidden.
#[test]
fn test_deal_to_players() {
    let mut client = started(&["a", "b", "c", "d"]);

    send(&mut client, r#"{"type":"move","cards":[{"id":"d"},{"id":"c"}],"destination":{"type":"player","player_id":"p2","position":0}}"#);
    send(&mut client, r#"{"type":"move","cards":[{"id":"b","face":{"suit":"spades","rank":"K"}}],"destination":{"type":"player","player_id":"p1","position":0}}"#);

    assert_eq!(hand_ids(&client, 1), vec!["d", "c"]);
    assert_eq!(hand_ids(&client, 0), vec!["b"]);

    let zones = &client.board().unwrap().zones;
    assert!(zones.hand(Seat::new(1)).iter().all(|c| !c.is_face_up()));
    assert_eq!(
        zones.card(&CardId::new("b")).and_then(|c| c.face),
        Some(Face::new(Suit::Spades, Rank::King))
    );
    assert_eq!(zones.deck().len(), 1);
    assert!(zones.is_consistent());
}

/// A meld number past the last meld starts a new meld.
#[test]
fn test_new_meld_then_extend() {
    let mut client = started(&["a", "b", "c", "d"]);

    send(&mut client, r#"{"type":"move","cards":[
        {"id":"a","face":{"suit":"hearts","rank":"4"}},
        {"id":"b","face":{"suit":"hearts","rank":"5"}},
        {"id":"c","face":{"suit":"hearts","rank":"6"}}
    ],"destination":{"type":"meld","meld_number":0,"position":0}}"#);
    send(&mut client, r#"{"type":"move","cards":[{"id":"d","face":{"suit":"hearts","rank":"7"}}],"destination":{"type":"meld","meld_number":0,"position":3}}"#);

    let zones = &client.board().unwrap().zones;
    assert_eq!(zones.melds().len(), 1);
    let meld: Vec<_> = zones.melds()[0].iter().map(|c| c.id.as_str()).collect();
    assert_eq!(meld, vec!["a", "b", "c", "d"]);
}

/// Moving a card the client has never seen creates it.
#[test]
fn test_unknown_card_is_created() {
    let mut client = started(&["a"]);

    send(&mut client, r#"{"type":"move","cards":[{"id":"zz","face":{"suit":"joker","rank":"W"}}],"destination":{"type":"discard"}}"#);

    let zones = &client.board().unwrap().zones;
    assert_eq!(zones.location_of(&CardId::new("zz")), Some(ZoneLocation::Discard));
    assert_eq!(zones.total_cards(), 2);
}

/// The top of each pile is its last card.
#[test]
fn test_tops_of_piles() {
    let mut client = started(&["a", "b", "c"]);

    send(&mut client, r#"{"type":"move","cards":[{"id":"c"}],"destination":{"type":"discard"}}"#);
    send(&mut client, r#"{"type":"move","cards":[{"id":"a"}],"destination":{"type":"discard"}}"#);

    let zones = &client.board().unwrap().zones;
    assert_eq!(zones.top_of_discard().map(|c| c.id.as_str()), Some("a"));
    assert_eq!(zones.top_of_deck().map(|c| c.id.as_str()), Some("b"));
}

// =============================================================================
// Redeck
// =============================================================================

/// Redeck turns the discard pile into a face-down deck of new identities.
#[test]
fn test_redeck_from_discard() {
    let mut client = started(&["a", "b", "c"]);
    for id in ["a", "b", "c"] {
        send(&mut client, &format!(r#"{{"type":"move","cards":[{{"id":"{id}","face":{{"suit":"clubs","rank":"2"}}}}],"destination":{{"type":"discard"}}}}"#));
    }

    send(&mut client, r#"{"type":"redeck","new_card_ids":["x","y","z"]}"#);

    let zones = &client.board().unwrap().zones;
    assert!(zones.discard().is_empty());
    let deck: Vec<_> = zones.deck().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(deck, vec!["x", "y", "z"]);
    assert!(zones.deck().iter().all(|c| !c.is_face_up()));
    assert!(!zones.contains(&CardId::new("a")));

    assert_eq!(
        client.take_retargets(),
        vec![
            Retarget { from: CardId::new("a"), to: CardId::new("x") },
            Retarget { from: CardId::new("b"), to: CardId::new("y") },
            Retarget { from: CardId::new("c"), to: CardId::new("z") },
        ]
    );
}

/// A redeck whose id count does not match the discard pile is fatal and
/// leaves the board as it was.
#[test]
fn test_redeck_mismatch_is_fatal() {
    let ids = ["a", "b", "c", "d", "e"];
    let mut client = started(&ids);
    for id in ids {
        send(&mut client, &format!(r#"{{"type":"move","cards":[{{"id":"{id}"}}],"destination":{{"type":"discard"}}}}"#));
    }
    let before = client.board().cloned();

    let event = ServerEvent::decode(r#"{"type":"redeck","new_card_ids":["1","2","3","4"]}"#).unwrap();
    let err = client.handle_event(event).unwrap_err();

    assert!(err.is_fatal());
    assert_eq!(client.board().cloned(), before);
    assert!(client.take_retargets().is_empty());
}
