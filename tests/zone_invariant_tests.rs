//! Property tests for the card/zone store.
//!
//! Random sequences of relocations and redecks are applied to a store and,
//! after every step, checked against the one-zone-per-identity invariant.
//!
//! ```text
//! proptest generates: Vec<Op>
//!                       │
//!                       ▼
//!      ZoneStore.relocate / apply_move / redeck
//!                       │
//!                       ▼
//!        is_consistent() && card count bookkeeping
//! ```

use proptest::prelude::*;
use rummy_client::core::{Card, CardId, Face, Rank, Seat, Suit};
use rummy_client::zones::{Placement, ZoneLocation, ZoneStore};

const DECK_SIZE: usize = 12;
const PLAYERS: usize = 3;

#[derive(Clone, Debug)]
enum Op {
    /// Relocate the card with this index into the initial deck (or a stray id).
    Relocate { card: usize, placement: Placement, reveal: bool },
    /// Move several cards at once.
    Batch { cards: Vec<usize>, placement: Placement },
    /// Redeck with a correct or incorrect id count.
    Redeck { exact: bool },
}

fn placement() -> impl Strategy<Value = Placement> {
    prop_oneof![
        Just(Placement::Discard),
        (0usize..4, 0usize..6).prop_map(|(meld, position)| Placement::Meld { meld, position }),
        (0u8..(PLAYERS as u8 + 1), 0usize..8)
            .prop_map(|(seat, position)| Placement::Hand { seat: Seat::new(seat), position }),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (0usize..DECK_SIZE + 2, placement(), any::<bool>())
            .prop_map(|(card, placement, reveal)| Op::Relocate { card, placement, reveal }),
        2 => (prop::collection::vec(0usize..DECK_SIZE, 1..4), placement())
            .prop_map(|(cards, placement)| Op::Batch { cards, placement }),
        1 => any::<bool>().prop_map(|exact| Op::Redeck { exact }),
    ]
}

fn card_id(index: usize) -> CardId {
    CardId::new(format!("c{index}"))
}

fn face() -> Face {
    Face::new(Suit::Clubs, Rank::Queen)
}

struct Harness {
    store: ZoneStore,
    redecks: usize,
}

impl Harness {
    fn new() -> Self {
        Self {
            store: ZoneStore::new((0..DECK_SIZE).map(card_id), PLAYERS),
            redecks: 0,
        }
    }

    fn apply(&mut self, op: &Op) {
        match op {
            Op::Relocate { card, placement, reveal } => {
                let before = self.store.total_cards();
                let id = card_id(*card);
                let known = self.store.contains(&id);
                let moved = self
                    .store
                    .relocate(&id, reveal.then(face), *placement);

                match moved {
                    Some(relocation) => {
                        assert_eq!(self.store.location_of(&id), Some(relocation.to));
                        let expected = if known { before } else { before + 1 };
                        assert_eq!(self.store.total_cards(), expected);
                    }
                    None => assert_eq!(self.store.total_cards(), before),
                }
            }
            Op::Batch { cards, placement } => {
                let batch: Vec<Card> = cards.iter().map(|&i| Card::face_down(card_id(i))).collect();
                self.store.apply_move(&batch, *placement);
            }
            Op::Redeck { exact } => {
                let discarded = self.store.discard().len();
                let count = if *exact { discarded } else { discarded + 1 };
                self.redecks += 1;
                let fresh: Vec<CardId> = (0..count)
                    .map(|i| CardId::new(format!("r{}-{i}", self.redecks)))
                    .collect();
                let before = self.store.clone();

                match self.store.redeck(fresh) {
                    Ok(retargets) => {
                        assert_eq!(retargets.len(), discarded);
                        assert!(self.store.discard().is_empty());
                        assert_eq!(self.store.deck().len(), discarded);
                    }
                    Err(err) => {
                        assert!(err.is_fatal());
                        assert_eq!(self.store, before);
                    }
                }
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every identity is in exactly one zone after every operation.
    #[test]
    fn prop_one_zone_per_identity(ops in prop::collection::vec(op(), 1..60)) {
        let mut harness = Harness::new();
        for op in &ops {
            harness.apply(op);
            prop_assert!(harness.store.is_consistent(), "inconsistent after {:?}", op);
        }
    }

    /// A revealed face is never hidden again by a later move.
    #[test]
    fn prop_face_reveal_is_monotonic(
        card in 0usize..DECK_SIZE,
        moves in prop::collection::vec(placement(), 1..10),
    ) {
        let mut store = ZoneStore::new((0..DECK_SIZE).map(card_id), PLAYERS);
        let id = card_id(card);
        store.relocate(&id, Some(face()), Placement::Discard);

        for placement in moves {
            store.relocate(&id, None, placement);
            prop_assert_eq!(store.card(&id).and_then(|c| c.face), Some(face()));
        }
    }

    /// Relocating a card into the zone it already occupies keeps membership.
    #[test]
    fn prop_self_relocation_keeps_membership(seat in 0u8..PLAYERS as u8, position in 0usize..12) {
        let mut store = ZoneStore::new((0..DECK_SIZE).map(card_id), PLAYERS);
        let hand = Placement::Hand { seat: Seat::new(seat), position: 0 };
        for i in 0..4 {
            store.relocate(&card_id(i), None, hand);
        }
        let before: Vec<CardId> = {
            let mut ids: Vec<_> = store.hand(Seat::new(seat)).iter().map(|c| c.id.clone()).collect();
            ids.sort();
            ids
        };

        store.relocate(&card_id(2), None, Placement::Hand { seat: Seat::new(seat), position });

        let mut after: Vec<_> = store.hand(Seat::new(seat)).iter().map(|c| c.id.clone()).collect();
        after.sort();
        prop_assert_eq!(after, before);
        prop_assert_eq!(store.location_of(&card_id(2)), Some(ZoneLocation::Hand(Seat::new(seat))));
        prop_assert_eq!(store.total_cards(), DECK_SIZE);
    }
}
