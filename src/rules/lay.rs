//! Selection checks: can the local player's selected cards form a new meld,
//! and which table melds can they extend?
//!
//! Both checks refuse an empty selection, and refuse a selection covering the
//! whole hand when the round requires a final discard.

use crate::core::card::{Card, CardId};
use crate::core::state::Board;

use super::meld::MeldRules;

/// Selected cards of the local hand, in hand order.
///
/// Returns `None` when the selection may not be played at all.
fn playable_selection(board: &Board, selection: &[CardId]) -> Option<Vec<Card>> {
    if selection.is_empty() {
        return None;
    }
    let hand = board.local_hand();
    if board.settings.require_end_discard && selection.len() == hand.len() {
        return None;
    }
    Some(
        hand.iter()
            .filter(|card| selection.contains(&card.id))
            .cloned()
            .collect(),
    )
}

/// Indices of the table melds that stay valid with the selection added.
#[must_use]
pub fn melds_for_lay(board: &Board, selection: &[CardId]) -> Vec<usize> {
    let Some(selected) = playable_selection(board, selection) else {
        return Vec::new();
    };
    let rules = MeldRules::new(&board.settings);

    board
        .zones
        .melds()
        .iter()
        .enumerate()
        .filter(|(_, meld)| {
            let mut combined = Vec::with_capacity(meld.len() + selected.len());
            combined.extend_from_slice(meld);
            combined.extend_from_slice(&selected);
            rules.is_valid_meld(&combined)
        })
        .map(|(index, _)| index)
        .collect()
}

/// Can the selection be melded on its own?
#[must_use]
pub fn can_meld_selection(board: &Board, selection: &[CardId]) -> bool {
    playable_selection(board, selection)
        .is_some_and(|selected| MeldRules::new(&board.settings).is_valid_meld(&selected))
}
