//! Pacer delay table.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::protocol::EventKind;

/// How long the pacer waits after dispatching each kind of event before
/// releasing the next one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacerConfig {
    /// After `start` (default: 1000 ms).
    pub start_delay: Duration,

    /// After `redeck` (default: 600 ms).
    pub redeck_delay: Duration,

    /// After `move` (default: 600 ms).
    /// While cards are being dealt this is split across the players.
    pub move_delay: Duration,

    /// After `end` (default: 1000 ms).
    pub end_delay: Duration,
}

impl Default for PacerConfig {
    fn default() -> Self {
        Self {
            start_delay: Duration::from_millis(1000),
            redeck_delay: Duration::from_millis(600),
            move_delay: Duration::from_millis(600),
            end_delay: Duration::from_millis(1000),
        }
    }
}

impl PacerConfig {
    /// No delays at all; every buffered event is released at once.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            start_delay: Duration::ZERO,
            redeck_delay: Duration::ZERO,
            move_delay: Duration::ZERO,
            end_delay: Duration::ZERO,
        }
    }

    pub fn with_start_delay(mut self, delay: Duration) -> Self {
        self.start_delay = delay;
        self
    }

    pub fn with_redeck_delay(mut self, delay: Duration) -> Self {
        self.redeck_delay = delay;
        self
    }

    pub fn with_move_delay(mut self, delay: Duration) -> Self {
        self.move_delay = delay;
        self
    }

    pub fn with_end_delay(mut self, delay: Duration) -> Self {
        self.end_delay = delay;
        self
    }

    /// Delay after dispatching an event of `kind`.
    ///
    /// `dealing_players` is the seat count while a round is being dealt (no
    /// turn assigned yet); a dealt `move` then waits only its share of the
    /// move delay so a full deal takes as long as one round of moves.
    #[must_use]
    pub fn delay_for(&self, kind: EventKind, dealing_players: Option<usize>) -> Duration {
        match kind {
            EventKind::Start => self.start_delay,
            EventKind::Redeck => self.redeck_delay,
            EventKind::End => self.end_delay,
            EventKind::Move => match dealing_players.and_then(|n| u32::try_from(n).ok()) {
                Some(players) if players > 0 => self.move_delay / players,
                _ => self.move_delay,
            },
            EventKind::Ping | EventKind::Lobby | EventKind::Turn | EventKind::Unrecognized => {
                Duration::ZERO
            }
        }
    }
}
